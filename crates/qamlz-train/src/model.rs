//! The zoom-training loop.

use std::time::Instant;

use chrono::Local;
use ndarray::Array1;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use qamlz_hal::Sampler;
use qamlz_ising::SpinVector;

use crate::anneal::anneal;
use crate::config::ModelConfig;
use crate::env::TrainEnv;
use crate::error::TrainResult;
use crate::hamiltonian::total_hamiltonian;
use crate::metrics::{accuracy, predict_labels};
use crate::results::{RunResults, run_key};

/// Iterative zoom trainer.
///
/// Starting from the all-ones weight vector, each iteration samples
/// excited-state perturbations around every current candidate, applies the
/// stochastic bit-flip policy, keeps the candidate list with the highest
/// mean training accuracy, and halves the perturbation scale. Greedy and
/// non-backtracking; terminates after the configured iteration count.
#[derive(Debug)]
pub struct Model {
    config: ModelConfig,
    env: TrainEnv,
    start_time: String,
    results: RunResults,
    rng: SmallRng,
}

impl Model {
    /// Create a model with entropy-seeded randomness.
    pub fn new(config: ModelConfig, env: TrainEnv) -> TrainResult<Self> {
        Self::build(config, env, SmallRng::from_entropy())
    }

    /// Create a model whose flips and sampler seeds derive from `seed`,
    /// making the whole run reproducible against a seeded sampler.
    pub fn with_seed(config: ModelConfig, env: TrainEnv, seed: u64) -> TrainResult<Self> {
        Self::build(config, env, SmallRng::seed_from_u64(seed))
    }

    fn build(config: ModelConfig, env: TrainEnv, rng: SmallRng) -> TrainResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            env,
            start_time: Local::now().format("%Y-%m-%d_%H-%M-%S").to_string(),
            results: RunResults::default(),
            rng,
        })
    }

    /// The run configuration.
    pub fn config(&self) -> &ModelConfig {
        &self.config
    }

    /// The training environment.
    pub fn env(&self) -> &TrainEnv {
        &self.env
    }

    /// Run-start timestamp, as embedded in result keys.
    pub fn start_time(&self) -> &str {
        &self.start_time
    }

    /// Everything recorded so far.
    pub fn results(&self) -> &RunResults {
        &self.results
    }

    /// Run the zoom loop to completion against the given sampler.
    ///
    /// One sampler call is in flight at a time; any sampler failure or an
    /// empty filtered sample set aborts the run with the partial results
    /// retained.
    pub async fn train(&mut self, sampler: &dyn Sampler) -> TrainResult<()> {
        let started = Instant::now();
        let mut mus: Vec<Array1<f64>> = vec![Array1::ones(self.env.num_weights())];

        for iteration in 0..self.config.n_iterations {
            let mut candidate_lists: Vec<Vec<Array1<f64>>> = Vec::new();
            for mu in &mus {
                let base_seed = self.rng.r#gen::<u64>();
                let excited_sets = anneal(
                    sampler,
                    &self.config,
                    iteration,
                    &self.env,
                    mu,
                    Some(base_seed),
                )
                .await?;
                for excited_states in &excited_sets {
                    candidate_lists.push(self.pick_excited_states(iteration, excited_states, mu));
                }
            }

            // Greedy selection: strictly higher mean accuracy wins, ties
            // keep the earliest list.
            let mut best_index = 0;
            let mut best_accuracy = f64::NEG_INFINITY;
            for (index, candidates) in candidate_lists.iter().enumerate() {
                let mean = self.mean_accuracy(candidates);
                if mean > best_accuracy {
                    best_accuracy = mean;
                    best_index = index;
                }
            }

            let winners = candidate_lists.swap_remove(best_index);
            let key = run_key(
                self.env.train_size(),
                self.env.fidelity(),
                iteration,
                best_index,
                &self.start_time,
            );
            self.results
                .record(iteration, best_accuracy, key, winners.clone());
            debug!(
                iteration,
                accuracy = best_accuracy,
                chosen = best_index,
                "iteration complete"
            );
            mus = winners;
        }

        debug!(
            iterations = self.config.n_iterations,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "zoom training complete"
        );
        Ok(())
    }

    /// Perturb each excited state into a candidate weight vector.
    ///
    /// Coordinates flip sign with the iteration's higher probability where
    /// the whole state is more energetic than the state with that
    /// coordinate removed, and with the lower probability elsewhere. The
    /// surviving sign vector, scaled by `sigma`, shifts `mu`.
    fn pick_excited_states(
        &mut self,
        iteration: usize,
        excited_states: &[SpinVector],
        mu: &Array1<f64>,
    ) -> Vec<Array1<f64>> {
        let sigma = self.config.sigma(iteration);
        let flip_higher = self.config.flip_higher_probs[iteration];
        let flip_lower = self.config.flip_lower_probs[iteration];

        let mut candidates = Vec::with_capacity(excited_states.len());
        for excited in excited_states {
            let state = excited.to_f64();
            let total_energy = total_hamiltonian(mu, &state, sigma, self.env.c_i(), self.env.c_ij());

            let mut perturbed = state.clone();
            for coordinate in 0..state.len() {
                let mut partial = state.clone();
                partial[coordinate] = 0.0;
                let partial_energy =
                    total_hamiltonian(mu, &partial, sigma, self.env.c_i(), self.env.c_ij());
                let flip_prob = if total_energy > partial_energy {
                    flip_higher
                } else {
                    flip_lower
                };
                if self.rng.r#gen::<f64>() < flip_prob {
                    perturbed[coordinate] = -perturbed[coordinate];
                }
            }
            candidates.push(mu + perturbed * sigma);
        }
        candidates
    }

    /// Mean sign-thresholded training accuracy over a candidate list.
    fn mean_accuracy(&self, candidates: &[Array1<f64>]) -> f64 {
        if candidates.is_empty() {
            return 0.0;
        }
        let total: f64 = candidates
            .iter()
            .map(|mu| accuracy(&predict_labels(self.env.x_train(), mu), self.env.y_train()))
            .sum();
        total / candidates.len() as f64
    }
}
