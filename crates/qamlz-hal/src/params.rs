//! Sampling request parameters.

use serde::{Deserialize, Serialize};

use crate::error::{HalResult, SamplerError};

/// Parameters for one anneal request.
///
/// Defaults match a typical zoom-training iteration: 200 reads at 5 µs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SampleParams {
    /// Number of independent reads (anneal repetitions).
    pub num_reads: u32,
    /// Anneal time per read, in microseconds.
    pub anneal_time_us: f64,
    /// Energy-scale multiplier applied by the sampler. Larger values make
    /// the objective steeper relative to thermal noise.
    pub strength: f64,
    /// Seed for reproducible sampling. `None` draws from entropy.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl SampleParams {
    /// Create parameters with the given read count.
    pub fn new(num_reads: u32) -> Self {
        Self {
            num_reads,
            anneal_time_us: 5.0,
            strength: 1.0,
            seed: None,
        }
    }

    /// Set the anneal time in microseconds.
    #[must_use]
    pub fn with_anneal_time_us(mut self, anneal_time_us: f64) -> Self {
        self.anneal_time_us = anneal_time_us;
        self
    }

    /// Set the energy-scale multiplier.
    #[must_use]
    pub fn with_strength(mut self, strength: f64) -> Self {
        self.strength = strength;
        self
    }

    /// Set the sampling seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Check the request is well-formed.
    pub fn validate(&self) -> HalResult<()> {
        if self.num_reads == 0 {
            return Err(SamplerError::InvalidReads(
                "num_reads must be at least 1".into(),
            ));
        }
        if !(self.anneal_time_us > 0.0) {
            return Err(SamplerError::InvalidAnnealTime(format!(
                "anneal time must be positive, got {}",
                self.anneal_time_us
            )));
        }
        Ok(())
    }
}

impl Default for SampleParams {
    fn default() -> Self {
        Self::new(200)
    }
}
