//! Error types for the training crate.

use thiserror::Error;

/// Errors produced by configuration, environment construction, and the
/// training loop.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TrainError {
    /// Configuration rejected at validation.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Environment statistics are inconsistent with the dataset.
    #[error("invalid environment: {0}")]
    Environment(String),

    /// The annealing backend failed.
    #[error(transparent)]
    Sampler(#[from] qamlz_hal::SamplerError),

    /// Ising problem construction or transformation failed.
    #[error(transparent)]
    Ising(#[from] qamlz_ising::IsingError),

    /// Energy filtering left no excited states to perturb.
    #[error("no excited states survived filtering at iteration {iteration}")]
    NoStates {
        /// The outer-loop iteration that produced the empty set.
        iteration: usize,
    },
}

/// Result type for training operations.
pub type TrainResult<T> = Result<T, TrainError>;
