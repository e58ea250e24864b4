//! Error types for the annealer abstraction layer.

use thiserror::Error;

/// Errors that can occur in sampler operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SamplerError {
    /// Problem exceeds the sampler's spin capacity.
    #[error("problem has {spins} spins but sampler supports at most {max}")]
    ProblemTooLarge {
        /// Spins in the submitted problem.
        spins: usize,
        /// Sampler capacity.
        max: usize,
    },

    /// A sample request must ask for at least one read.
    #[error("invalid read count: {0}")]
    InvalidReads(String),

    /// Anneal time must be a positive duration.
    #[error("invalid anneal time: {0}")]
    InvalidAnnealTime(String),

    /// Sampling produced no states (or filtering removed them all).
    #[error("sample set is empty: {0}")]
    EmptySampleSet(String),

    /// Problem construction or evaluation failed.
    #[error("Ising problem error: {0}")]
    Ising(#[from] qamlz_ising::IsingError),

    /// Generic backend error.
    #[error("backend error: {0}")]
    Backend(String),
}

/// Result type for sampler operations.
pub type HalResult<T> = Result<T, SamplerError>;
