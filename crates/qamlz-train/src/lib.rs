//! QAML-Z Zoom-Annealing Training Loop
//!
//! This crate trains a binary classifier's weight vector by repeatedly sampling
//! discrete perturbations from an annealer and narrowing the search scale
//! around the best candidate:
//!
//! 1. Build the zoomed Ising problem around the current weights from the
//!    training set's covariance statistics ([`hamiltonian`])
//! 2. Sample low-energy excited states through the annealer seam, with
//!    optional pruning and QAC encoding ([`anneal`])
//! 3. Flip coordinates stochastically where flipping is energetically
//!    favorable, score candidates by training accuracy, and keep the best
//!    ([`Model::train`])
//!
//! The perturbation scale shrinks by the zoom factor every iteration, so
//! the discrete annealer refines a continuous weight vector.
//!
//! # Example
//!
//! ```ignore
//! use qamlz_adapter_sa::SimulatedAnnealer;
//! use qamlz_train::{Model, ModelConfig, TrainEnv};
//!
//! let env = TrainEnv::new(x_train, y_train, 1)?;
//! let mut model = Model::with_seed(ModelConfig::new(10), env, 42)?;
//! model.train(&SimulatedAnnealer::new()).await?;
//!
//! for iteration in 0..10 {
//!     println!("iter{iteration}: {:?}", model.results().accuracy_for(iteration));
//! }
//! ```

pub mod anneal;
pub mod config;
pub mod env;
pub mod error;
pub mod hamiltonian;
pub mod metrics;
pub mod model;
pub mod results;

pub use anneal::anneal;
pub use config::{ModelConfig, QacSettings};
pub use env::TrainEnv;
pub use error::{TrainError, TrainResult};
pub use hamiltonian::{total_hamiltonian, zoomed_problem};
pub use metrics::{accuracy, decision_values, predict_labels, sign};
pub use model::Model;
pub use results::{RunResults, run_key};
