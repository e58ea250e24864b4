//! Accumulated training output.

use std::collections::BTreeMap;

use ndarray::Array1;
use serde::{Deserialize, Serialize};

/// The run identifier a winning weight list is stored under:
/// `mus{train_size:05}-{fidelity}_iter{iteration}_run{chosen}__{start_time}`.
pub fn run_key(
    train_size: usize,
    fidelity: u32,
    iteration: usize,
    chosen: usize,
    start_time: &str,
) -> String {
    format!("mus{train_size:05}-{fidelity}_iter{iteration}_run{chosen}__{start_time}")
}

/// Per-iteration winning accuracies and weight lists, keyed the way the
/// run produced them. Both maps grow monotonically over a run and are
/// never pruned.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunResults {
    accuracies: BTreeMap<String, f64>,
    weight_lists: BTreeMap<String, Vec<Array1<f64>>>,
}

impl RunResults {
    /// Record an iteration's winner: its mean training accuracy under
    /// `iter{iteration}` and its weight list under the composite run key.
    pub fn record(
        &mut self,
        iteration: usize,
        accuracy: f64,
        run_key: String,
        weights: Vec<Array1<f64>>,
    ) {
        self.accuracies.insert(format!("iter{iteration}"), accuracy);
        self.weight_lists.insert(run_key, weights);
    }

    /// The winning accuracy recorded for an iteration, if it ran.
    pub fn accuracy_for(&self, iteration: usize) -> Option<f64> {
        self.accuracies.get(&format!("iter{iteration}")).copied()
    }

    /// All recorded accuracies by iteration label.
    pub fn accuracies(&self) -> &BTreeMap<String, f64> {
        &self.accuracies
    }

    /// All recorded weight lists by run key.
    pub fn weight_lists(&self) -> &BTreeMap<String, Vec<Array1<f64>>> {
        &self.weight_lists
    }

    /// The winning weight list recorded for an iteration, if it ran.
    pub fn weights_for(&self, iteration: usize) -> Option<&Vec<Array1<f64>>> {
        let marker = format!("_iter{iteration}_run");
        self.weight_lists
            .iter()
            .find(|(key, _)| key.contains(&marker))
            .map(|(_, weights)| weights)
    }

    /// Number of iterations recorded so far.
    pub fn num_iterations(&self) -> usize {
        self.accuracies.len()
    }

    /// True if nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.accuracies.is_empty()
    }
}
