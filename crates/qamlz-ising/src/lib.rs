//! QAML-Z Ising Problem Representation
//!
//! This crate represents the quadratic spin objective handed to an annealer:
//!
//!   E(s) = Σ_i h_i·s_i  +  Σ_{i<j} J_ij·s_i·s_j
//!
//! plus the two transformations applied before sampling:
//!
//! - **Pruning**: drop low-influence spins below a percentile cutoff,
//!   restoring them as spin 0 after sampling
//! - **QAC**: replicate each logical spin into ferromagnetically bound
//!   copies, decoding reads by majority vote
//!
//! # Quick start
//!
//! ```rust
//! use ndarray::array;
//! use qamlz_ising::{Coupler, IsingProblem, QacEncoder, SpinVector};
//!
//! let p = IsingProblem::new(array![-1.0, 0.5], vec![Coupler::new(0, 1, 0.25)]).unwrap();
//! let ground = SpinVector::new(vec![1, -1]).unwrap();
//! assert_eq!(p.energy(&ground).unwrap(), -1.75);
//!
//! let encoder = QacEncoder::new(3, 1.0).unwrap();
//! let physical = encoder.encode(&p, 0.5).unwrap();
//! assert_eq!(physical.num_spins(), 6);
//! ```

pub mod encode;
pub mod error;
pub mod problem;

pub use encode::{PrunedProblem, QacEncoder, prune_weak_spins, restore_pruned};
pub use error::{IsingError, IsingResult};
pub use problem::{Coupler, IsingProblem, SpinVector};
