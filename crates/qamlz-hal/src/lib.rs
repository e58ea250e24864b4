//! Annealer abstraction layer for zoom-annealing training.
//!
//! This crate provides a unified interface between the training loop and
//! the annealer that samples its Ising problems, so the loop works
//! identically against hardware adapters and the in-repo classical
//! simulator.
//!
//! # Overview
//!
//! - A common [`Sampler`] trait with one async entry point, [`Sampler::sample`]
//! - [`SamplerProperties`] to describe capacity limits, cached at construction
//! - [`SampleParams`] for per-request settings (reads, anneal time, seed)
//! - Unified result handling via [`SampleSet`] and [`SampleRecord`]
//!
//! # Example: Implementing a Sampler
//!
//! ```ignore
//! use async_trait::async_trait;
//! use qamlz_hal::{HalResult, SampleParams, SampleSet, Sampler, SamplerProperties};
//! use qamlz_ising::IsingProblem;
//!
//! struct MySampler {
//!     properties: SamplerProperties,
//! }
//!
//! #[async_trait]
//! impl Sampler for MySampler {
//!     fn name(&self) -> &str { "my_sampler" }
//!
//!     // Sync and infallible; properties are cached at construction.
//!     fn properties(&self) -> &SamplerProperties {
//!         &self.properties
//!     }
//!
//!     async fn sample(&self, problem: &IsingProblem, params: &SampleParams) -> HalResult<SampleSet> {
//!         self.properties.ensure_fits(problem)?;
//!         // Dispatch to hardware and aggregate reads
//!         # todo!()
//!     }
//! }
//! ```

pub mod error;
pub mod params;
pub mod sampler;
pub mod sampleset;

pub use error::{HalResult, SamplerError};
pub use params::SampleParams;
pub use sampler::{Sampler, SamplerProperties};
pub use sampleset::{SampleRecord, SampleSet};
