//! Run configuration: per-iteration schedules and scalar hyperparameters.

use serde::{Deserialize, Serialize};

use crate::error::{TrainError, TrainResult};

/// Quantum annealing correction settings.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct QacSettings {
    /// Physical copies per logical spin.
    pub depth: usize,
    /// Weight of the copy-binding ferromagnetic penalty, multiplied by the
    /// iteration's strength.
    pub gamma: f64,
}

impl Default for QacSettings {
    fn default() -> Self {
        Self {
            depth: 3,
            gamma: 1.0,
        }
    }
}

/// Immutable-after-construction hyperparameters for a zoom run.
///
/// Schedules are indexed by outer-loop iteration and must cover at least
/// `n_iterations` entries. [`ModelConfig::new`] fills in the standard
/// schedules; fields are public so individual entries can be overridden
/// before [`ModelConfig::validate`] is called.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Number of outer zoom iterations.
    pub n_iterations: usize,
    /// Per-iteration shrinkage of the perturbation scale; iteration `i`
    /// perturbs at `zoom_factor^(i+1)`.
    pub zoom_factor: f64,
    /// Anneal time per read, in microseconds.
    pub anneal_time_us: f64,
    /// Reads per anneal request.
    pub num_reads: u32,
    /// Flip probability applied where flipping is energetically favorable.
    pub flip_higher_probs: Vec<f64>,
    /// Flip probability applied elsewhere.
    pub flip_lower_probs: Vec<f64>,
    /// Per-iteration energy-scale strengths.
    pub strengths: Vec<f64>,
    /// Per-iteration energy-band fractions for excited-state filtering.
    pub energy_fractions: Vec<f64>,
    /// Per-iteration caps on surviving excited states.
    pub max_states: Vec<usize>,
    /// Percentile cutoff for weak-variable pruning; `None` disables it.
    pub prune_cutoff_percentile: Option<f64>,
    /// Quantum annealing correction; `None` submits problems unencoded.
    pub qac: Option<QacSettings>,
}

impl ModelConfig {
    /// Create a configuration with the standard schedules for the given
    /// iteration count.
    pub fn new(n_iterations: usize) -> Self {
        let flip_higher_probs = linspace(0.16, 0.01, n_iterations);
        let flip_lower_probs = flip_higher_probs.iter().map(|p| p / 2.0).collect();
        Self {
            n_iterations,
            zoom_factor: 0.5,
            anneal_time_us: 5.0,
            num_reads: 200,
            flip_higher_probs,
            flip_lower_probs,
            strengths: schedule(&[3.0, 1.0, 0.5, 0.2], 0.1, n_iterations),
            energy_fractions: schedule(&[0.08, 0.04, 0.02], 0.01, n_iterations),
            max_states: [16_usize, 4]
                .into_iter()
                .chain(std::iter::repeat(1))
                .take(n_iterations)
                .collect(),
            prune_cutoff_percentile: Some(85.0),
            qac: Some(QacSettings::default()),
        }
    }

    /// Set the zoom factor.
    #[must_use]
    pub fn with_zoom_factor(mut self, zoom_factor: f64) -> Self {
        self.zoom_factor = zoom_factor;
        self
    }

    /// Set the reads per anneal request.
    #[must_use]
    pub fn with_num_reads(mut self, num_reads: u32) -> Self {
        self.num_reads = num_reads;
        self
    }

    /// Set the anneal time in microseconds.
    #[must_use]
    pub fn with_anneal_time_us(mut self, anneal_time_us: f64) -> Self {
        self.anneal_time_us = anneal_time_us;
        self
    }

    /// Set or disable the pruning cutoff percentile.
    #[must_use]
    pub fn with_prune_cutoff(mut self, cutoff_percentile: Option<f64>) -> Self {
        self.prune_cutoff_percentile = cutoff_percentile;
        self
    }

    /// Set or disable quantum annealing correction.
    #[must_use]
    pub fn with_qac(mut self, qac: Option<QacSettings>) -> Self {
        self.qac = qac;
        self
    }

    /// Replace both flip-probability schedules.
    #[must_use]
    pub fn with_flip_probs(mut self, higher: Vec<f64>, lower: Vec<f64>) -> Self {
        self.flip_higher_probs = higher;
        self.flip_lower_probs = lower;
        self
    }

    /// Check schedule lengths and value ranges.
    pub fn validate(&self) -> TrainResult<()> {
        if self.n_iterations == 0 {
            return Err(TrainError::Config("n_iterations must be at least 1".into()));
        }
        if !(self.zoom_factor > 0.0 && self.zoom_factor <= 1.0) {
            return Err(TrainError::Config(format!(
                "zoom factor must be in (0, 1], got {}",
                self.zoom_factor
            )));
        }
        if !(self.anneal_time_us > 0.0) {
            return Err(TrainError::Config(format!(
                "anneal time must be positive, got {}",
                self.anneal_time_us
            )));
        }
        if self.num_reads == 0 {
            return Err(TrainError::Config("num_reads must be at least 1".into()));
        }

        self.check_schedule_len("flip_higher_probs", self.flip_higher_probs.len())?;
        self.check_schedule_len("flip_lower_probs", self.flip_lower_probs.len())?;
        self.check_schedule_len("strengths", self.strengths.len())?;
        self.check_schedule_len("energy_fractions", self.energy_fractions.len())?;
        self.check_schedule_len("max_states", self.max_states.len())?;

        for probs in [&self.flip_higher_probs, &self.flip_lower_probs] {
            if let Some(bad) = probs.iter().find(|p| !(0.0..=1.0).contains(*p)) {
                return Err(TrainError::Config(format!(
                    "flip probabilities must be within [0, 1], got {bad}"
                )));
            }
        }
        if let Some(bad) = self.strengths.iter().find(|&&v| !(v > 0.0)) {
            return Err(TrainError::Config(format!(
                "strengths must be positive, got {bad}"
            )));
        }
        if let Some(bad) = self.energy_fractions.iter().find(|&&v| !(v >= 0.0)) {
            return Err(TrainError::Config(format!(
                "energy fractions must be non-negative, got {bad}"
            )));
        }
        if self.max_states.iter().any(|&v| v == 0) {
            return Err(TrainError::Config(
                "max_states entries must be at least 1".into(),
            ));
        }

        if let Some(cutoff) = self.prune_cutoff_percentile {
            if !(0.0..=100.0).contains(&cutoff) {
                return Err(TrainError::Config(format!(
                    "prune cutoff percentile must be within [0, 100], got {cutoff}"
                )));
            }
        }
        if let Some(qac) = &self.qac {
            if qac.depth == 0 {
                return Err(TrainError::Config(
                    "QAC depth must be at least 1".into(),
                ));
            }
            if !(qac.gamma >= 0.0) {
                return Err(TrainError::Config(format!(
                    "QAC gamma must be non-negative, got {}",
                    qac.gamma
                )));
            }
        }
        Ok(())
    }

    /// Perturbation scale at the given iteration: `zoom_factor^(iter+1)`.
    pub fn sigma(&self, iteration: usize) -> f64 {
        self.zoom_factor.powi(iteration as i32 + 1)
    }

    fn check_schedule_len(&self, name: &str, len: usize) -> TrainResult<()> {
        if len < self.n_iterations {
            return Err(TrainError::Config(format!(
                "{name} covers {len} iterations but the run has {}",
                self.n_iterations
            )));
        }
        Ok(())
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self::new(10)
    }
}

/// `n` evenly spaced values from `start` to `end` inclusive.
fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            (0..n).map(|k| start + step * k as f64).collect()
        }
    }
}

/// First `n` entries of `head`, padded with `tail` as needed.
fn schedule(head: &[f64], tail: f64, n: usize) -> Vec<f64> {
    head.iter()
        .copied()
        .chain(std::iter::repeat(tail))
        .take(n)
        .collect()
}
