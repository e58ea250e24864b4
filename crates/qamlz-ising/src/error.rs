//! Error types for the Ising crate.

use thiserror::Error;

/// Errors produced by Ising problem construction and transformation.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IsingError {
    /// Linear biases, couplers, and spin states must agree on length.
    #[error("dimension mismatch: expected {expected} spins, got {got}")]
    DimensionMismatch {
        /// Number of spins the problem defines.
        expected: usize,
        /// Number of spins actually supplied.
        got: usize,
    },

    /// A coupler references a spin index outside the problem.
    #[error("coupler ({i}, {j}) out of range for problem with {num_spins} spins")]
    CouplerOutOfRange {
        /// First spin index.
        i: usize,
        /// Second spin index.
        j: usize,
        /// Number of spins in the problem.
        num_spins: usize,
    },

    /// Couplers are strictly upper-triangular: i < j, no self-couplings.
    #[error("coupler ({i}, {j}) violates i < j ordering")]
    CouplerOrder {
        /// First spin index.
        i: usize,
        /// Second spin index.
        j: usize,
    },

    /// A spin index outside the problem width.
    #[error("spin index {index} out of range for problem with {num_spins} spins")]
    SpinOutOfRange {
        /// The offending index.
        index: usize,
        /// Number of spins in the problem.
        num_spins: usize,
    },

    /// A spin value outside {-1, 0, +1}.
    #[error("invalid spin value {value} at index {index}; spins must be -1, 0, or +1")]
    InvalidSpin {
        /// Index of the offending entry.
        index: usize,
        /// The value found there.
        value: i8,
    },

    /// Percentile cutoffs live in [0, 100].
    #[error("cutoff percentile must be within [0, 100], got {0}")]
    InvalidPercentile(f64),

    /// QAC encoding depth must be at least 1.
    #[error("encoding depth must be at least 1, got {0}")]
    InvalidDepth(usize),

    /// A physical state cannot be split into an integral number of copies.
    #[error("physical state length {len} is not a multiple of encoding depth {depth}")]
    DepthMismatch {
        /// Length of the physical state.
        len: usize,
        /// Encoding depth.
        depth: usize,
    },
}

/// Result type for Ising problem operations.
pub type IsingResult<T> = Result<T, IsingError>;
