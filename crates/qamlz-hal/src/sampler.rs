//! Sampler trait and static properties.
//!
//! The [`Sampler`] trait is the seam between the training loop and
//! whatever actually anneals the problem: hardware, a remote service, or
//! the in-repo classical simulator.
//!
//! ```text
//!   properties() ──→ sample() ──→ SampleSet
//!    (sync, &ref)     (async)
//! ```
//!
//! # Contract
//!
//! - `properties()` MUST be synchronous and infallible; implementations
//!   cache properties at construction time and return a reference. A
//!   sampler that cannot describe itself without I/O is not correctly
//!   initialized.
//! - `sample()` MUST reject a problem exceeding `properties().max_spins`
//!   with [`SamplerError::ProblemTooLarge`] before doing any work.
//! - `sample()` with a fixed `SampleParams::seed` MUST be deterministic.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use qamlz_ising::IsingProblem;

use crate::error::{HalResult, SamplerError};
use crate::params::SampleParams;
use crate::sampleset::SampleSet;

/// Static description of a sampler's capacity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SamplerProperties {
    /// Name of the sampler.
    pub name: String,
    /// Maximum number of spins per problem.
    pub max_spins: usize,
    /// Maximum reads per request.
    pub max_reads: u32,
    /// Whether this sampler drives physical hardware (`false` for
    /// simulators).
    pub is_hardware: bool,
}

impl SamplerProperties {
    /// Properties for a classical simulator with the given capacity.
    pub fn simulator(max_spins: usize) -> Self {
        Self {
            name: "simulator".into(),
            max_spins,
            max_reads: 100_000,
            is_hardware: false,
        }
    }

    /// Reject problems beyond this sampler's spin capacity.
    pub fn ensure_fits(&self, problem: &IsingProblem) -> HalResult<()> {
        let spins = problem.num_spins();
        if spins > self.max_spins {
            return Err(SamplerError::ProblemTooLarge {
                spins,
                max: self.max_spins,
            });
        }
        Ok(())
    }
}

/// Trait for annealing samplers.
///
/// Implementations own whatever state the backend needs (connections,
/// schedules, RNG policy) and expose a single async entry point.
#[async_trait]
pub trait Sampler: Send + Sync {
    /// Name of this sampler.
    fn name(&self) -> &str;

    /// Static properties, cached at construction.
    fn properties(&self) -> &SamplerProperties;

    /// Anneal the problem and return the deduplicated low-energy states.
    async fn sample(&self, problem: &IsingProblem, params: &SampleParams) -> HalResult<SampleSet>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    use qamlz_ising::SpinVector;

    struct EchoSampler {
        properties: SamplerProperties,
    }

    #[async_trait]
    impl Sampler for EchoSampler {
        fn name(&self) -> &str {
            "echo"
        }

        fn properties(&self) -> &SamplerProperties {
            &self.properties
        }

        async fn sample(
            &self,
            problem: &IsingProblem,
            params: &SampleParams,
        ) -> HalResult<SampleSet> {
            self.properties.ensure_fits(problem)?;
            params.validate()?;
            let read = SpinVector::new(vec![1; problem.num_spins()]).unwrap();
            SampleSet::from_reads(problem, vec![read; params.num_reads as usize])
        }
    }

    #[test]
    fn test_simulator_properties() {
        let props = SamplerProperties::simulator(2048);
        assert_eq!(props.max_spins, 2048);
        assert!(!props.is_hardware);
    }

    #[tokio::test]
    async fn test_sampler_usable_as_trait_object() {
        let sampler: Box<dyn Sampler> = Box::new(EchoSampler {
            properties: SamplerProperties::simulator(4),
        });
        let p = IsingProblem::new(array![-1.0, 2.0], vec![]).unwrap();
        let set = sampler.sample(&p, &SampleParams::new(3)).await.unwrap();
        assert_eq!(set.len(), 1);
        assert_eq!(set.num_reads(), 3);
        assert_eq!(set.lowest().unwrap().energy, 1.0);
    }

    #[tokio::test]
    async fn test_trait_object_rejects_oversized_problem() {
        let sampler: Box<dyn Sampler> = Box::new(EchoSampler {
            properties: SamplerProperties::simulator(1),
        });
        let p = IsingProblem::new(array![0.0, 0.0], vec![]).unwrap();
        let err = sampler
            .sample(&p, &SampleParams::new(3))
            .await
            .unwrap_err();
        assert!(matches!(err, SamplerError::ProblemTooLarge { .. }));
    }

    #[test]
    fn test_ensure_fits_rejects_oversized() {
        let props = SamplerProperties::simulator(2);
        let p = IsingProblem::new(array![0.0, 0.0, 0.0], vec![]).unwrap();
        let err = props.ensure_fits(&p).unwrap_err();
        assert!(matches!(
            err,
            SamplerError::ProblemTooLarge { spins: 3, max: 2 }
        ));
    }

    #[test]
    fn test_ensure_fits_accepts_at_capacity() {
        let props = SamplerProperties::simulator(3);
        let p = IsingProblem::new(array![0.0, 0.0, 0.0], vec![]).unwrap();
        assert!(props.ensure_fits(&p).is_ok());
    }
}
