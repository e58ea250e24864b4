//! Aggregated annealer output.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use qamlz_ising::{IsingProblem, SpinVector};

use crate::error::HalResult;

/// One unique state observed by the annealer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleRecord {
    /// The spin assignment.
    pub state: SpinVector,
    /// Its energy under the submitted problem.
    pub energy: f64,
    /// How many reads returned this state.
    pub occurrences: u32,
}

/// The deduplicated result of an anneal: unique states with their energies
/// and read counts, sorted by ascending energy.
///
/// Ties in energy are broken by state content, so ordering is deterministic
/// regardless of read order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SampleSet {
    records: Vec<SampleRecord>,
}

impl SampleSet {
    /// Aggregate raw reads against the problem they were sampled from.
    ///
    /// Duplicate states collapse into one record with summed occurrences;
    /// each unique state is evaluated once.
    pub fn from_reads(problem: &IsingProblem, reads: Vec<SpinVector>) -> HalResult<Self> {
        let mut counts: FxHashMap<SpinVector, u32> = FxHashMap::default();
        for read in reads {
            *counts.entry(read).or_insert(0) += 1;
        }

        let mut records = Vec::with_capacity(counts.len());
        for (state, occurrences) in counts {
            let energy = problem.energy(&state)?;
            records.push(SampleRecord {
                state,
                energy,
                occurrences,
            });
        }
        records.sort_by(|a, b| {
            a.energy
                .partial_cmp(&b.energy)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.state.spins().cmp(b.state.spins()))
        });
        Ok(Self { records })
    }

    /// Build directly from pre-aggregated records (sorted on entry).
    pub fn from_records(mut records: Vec<SampleRecord>) -> Self {
        records.sort_by(|a, b| {
            a.energy
                .partial_cmp(&b.energy)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.state.spins().cmp(b.state.spins()))
        });
        Self { records }
    }

    /// All records, ascending energy.
    pub fn records(&self) -> &[SampleRecord] {
        &self.records
    }

    /// Number of unique states.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True if no states were recorded.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Total reads across all records.
    pub fn num_reads(&self) -> u32 {
        self.records.iter().map(|r| r.occurrences).sum()
    }

    /// The lowest-energy record, if any.
    pub fn lowest(&self) -> Option<&SampleRecord> {
        self.records.first()
    }

    /// Iterate over just the states, ascending energy.
    pub fn states(&self) -> impl Iterator<Item = &SpinVector> {
        self.records.iter().map(|r| &r.state)
    }

    /// Keep records within `fraction` of the band minimum:
    /// `E ≤ E_min + fraction·|E_min|`.
    #[must_use]
    pub fn within_energy_fraction(&self, fraction: f64) -> Self {
        let Some(lowest) = self.lowest() else {
            return Self::default();
        };
        let ceiling = lowest.energy + fraction * lowest.energy.abs();
        Self {
            records: self
                .records
                .iter()
                .filter(|r| r.energy <= ceiling)
                .cloned()
                .collect(),
        }
    }

    /// Keep at most the `max_states` lowest-energy records.
    #[must_use]
    pub fn truncated(&self, max_states: usize) -> Self {
        Self {
            records: self.records.iter().take(max_states).cloned().collect(),
        }
    }
}
