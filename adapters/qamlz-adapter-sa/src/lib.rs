//! Classical Simulated-Annealing Sampler
//!
//! This crate provides a local Metropolis annealer implementing the
//! `qamlz_hal::Sampler` trait, for testing, development, and hardware-free
//! training runs. It is exact about the problem it samples (recorded
//! energies come from the submitted problem) but approximate about the
//! Boltzmann distribution it draws from, like any finite-schedule anneal.
//!
//! # Features
//!
//! - **Metropolis sweeps**: single-spin flips with local-field energy deltas
//! - **Geometric schedule**: hot-to-cold inverse-temperature ladder,
//!   normalised to the problem's energy scale
//! - **Deterministic seeding**: identical `SampleParams::seed` → identical
//!   `SampleSet`
//! - **No external services**: pure Rust, no hardware account required
//!
//! # Example
//!
//! ```ignore
//! use ndarray::array;
//! use qamlz_adapter_sa::SimulatedAnnealer;
//! use qamlz_hal::{SampleParams, Sampler};
//! use qamlz_ising::{Coupler, IsingProblem};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let annealer = SimulatedAnnealer::new();
//!     let problem = IsingProblem::new(array![-1.0, -1.0], vec![Coupler::new(0, 1, -1.0)])?;
//!
//!     let set = annealer
//!         .sample(&problem, &SampleParams::new(200).with_seed(42))
//!         .await?;
//!     println!("ground state: {:?}", set.lowest());
//!     Ok(())
//! }
//! ```

mod annealer;

pub use annealer::SimulatedAnnealer;
