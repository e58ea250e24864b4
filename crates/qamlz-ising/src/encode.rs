//! Problem transformations: weak-variable pruning and QAC encoding.
//!
//! Both are pure functions over [`IsingProblem`]:
//!
//! - **Pruning** drops spins whose total coupling influence falls below a
//!   percentile cutoff, shrinking the problem the annealer sees. Dropped
//!   coordinates are restored as spin 0 after sampling.
//! - **QAC** (quantum annealing correction) replicates each logical spin
//!   into `depth` ferromagnetically bound physical copies and decodes reads
//!   by per-spin majority vote.

use ndarray::Array1;
use serde::{Deserialize, Serialize};

use crate::error::{IsingError, IsingResult};
use crate::problem::{Coupler, IsingProblem, SpinVector};

/// A reduced problem together with the surviving variable indices.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrunedProblem {
    /// The problem over the surviving spins only.
    pub problem: IsingProblem,
    /// Original indices of the survivors, ascending: `kept[r]` is the
    /// original index of reduced spin `r`.
    pub kept: Vec<usize>,
}

/// Drop spins whose coupling influence falls below the given percentile.
///
/// The influence of spin `i` is `|h_i| + Σ_j |J_ij|`. The threshold is the
/// `cutoff_percentile`-th percentile (linear interpolation) of all
/// influences; spins strictly below it are dropped, along with every
/// coupler touching them. A cutoff of 0 keeps everything. The survivor set
/// is never empty for a non-empty problem: the maximal-influence spin
/// always meets the threshold.
pub fn prune_weak_spins(
    problem: &IsingProblem,
    cutoff_percentile: f64,
) -> IsingResult<PrunedProblem> {
    if !(0.0..=100.0).contains(&cutoff_percentile) {
        return Err(IsingError::InvalidPercentile(cutoff_percentile));
    }

    let influence = problem.influence();
    let threshold = percentile(influence.as_slice().unwrap_or(&[]), cutoff_percentile);

    let kept: Vec<usize> = (0..problem.num_spins())
        .filter(|&i| influence[i] >= threshold)
        .collect();

    // Old index -> reduced index for surviving spins.
    let mut remap = vec![None; problem.num_spins()];
    for (reduced, &original) in kept.iter().enumerate() {
        remap[original] = Some(reduced);
    }

    let h = kept.iter().map(|&i| problem.h()[i]).collect();
    let couplers: Vec<Coupler> = problem
        .couplers()
        .iter()
        .filter_map(|c| match (remap[c.i], remap[c.j]) {
            (Some(i), Some(j)) => Some(Coupler::new(i, j, c.strength)),
            _ => None,
        })
        .collect();

    Ok(PrunedProblem {
        problem: IsingProblem::new(h, couplers)?,
        kept,
    })
}

/// Re-expand a reduced state to the original width, filling pruned
/// coordinates with spin 0.
pub fn restore_pruned(
    state: &SpinVector,
    kept: &[usize],
    num_spins: usize,
) -> IsingResult<SpinVector> {
    if state.len() != kept.len() {
        return Err(IsingError::DimensionMismatch {
            expected: kept.len(),
            got: state.len(),
        });
    }
    let mut full = vec![0_i8; num_spins];
    for (reduced, &original) in kept.iter().enumerate() {
        if original >= num_spins {
            return Err(IsingError::SpinOutOfRange {
                index: original,
                num_spins,
            });
        }
        full[original] = state[reduced];
    }
    SpinVector::new(full)
}

/// Quantum annealing correction encoder.
///
/// Each logical spin is replicated into `depth` physical copies; copy `c`
/// of logical spin `i` lives at physical index `c·n + i`. Biases are
/// replicated onto every copy, couplers act within each copy, and copies of
/// the same logical spin are bound by a ferromagnetic penalty
/// `-gamma · penalty_scale`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct QacEncoder {
    depth: usize,
    gamma: f64,
}

impl QacEncoder {
    /// Create an encoder with the given replication depth and penalty weight.
    pub fn new(depth: usize, gamma: f64) -> IsingResult<Self> {
        if depth == 0 {
            return Err(IsingError::InvalidDepth(0));
        }
        Ok(Self { depth, gamma })
    }

    /// Replication depth.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Penalty weight gamma.
    pub fn gamma(&self) -> f64 {
        self.gamma
    }

    /// Encode a logical problem into its physical replication.
    ///
    /// `penalty_scale` multiplies gamma in the copy-binding strength; the
    /// caller passes the iteration's energy scale so penalties keep pace
    /// with the shrinking problem.
    pub fn encode(
        &self,
        problem: &IsingProblem,
        penalty_scale: f64,
    ) -> IsingResult<IsingProblem> {
        let n = problem.num_spins();
        let mut h = Array1::<f64>::zeros(n * self.depth);
        for copy in 0..self.depth {
            for i in 0..n {
                h[copy * n + i] = problem.h()[i];
            }
        }

        let mut couplers =
            Vec::with_capacity(self.depth * problem.num_couplers() + n * pairs(self.depth));
        for copy in 0..self.depth {
            for c in problem.couplers() {
                couplers.push(Coupler::new(copy * n + c.i, copy * n + c.j, c.strength));
            }
        }
        let penalty = -self.gamma * penalty_scale;
        for i in 0..n {
            for c1 in 0..self.depth {
                for c2 in (c1 + 1)..self.depth {
                    couplers.push(Coupler::new(c1 * n + i, c2 * n + i, penalty));
                }
            }
        }

        IsingProblem::new(h, couplers)
    }

    /// Decode a physical state by per-logical-spin majority vote.
    ///
    /// An even split votes 0. Logical energies should be recomputed on the
    /// unencoded problem; the physical energy includes penalty terms.
    pub fn decode(&self, physical: &SpinVector) -> IsingResult<SpinVector> {
        if physical.len() % self.depth != 0 {
            return Err(IsingError::DepthMismatch {
                len: physical.len(),
                depth: self.depth,
            });
        }
        let n = physical.len() / self.depth;
        let mut logical = vec![0_i8; n];
        for (i, slot) in logical.iter_mut().enumerate() {
            let vote: i32 = (0..self.depth)
                .map(|copy| i32::from(physical[copy * n + i]))
                .sum();
            *slot = match vote {
                v if v > 0 => 1,
                v if v < 0 => -1,
                _ => 0,
            };
        }
        SpinVector::new(logical)
    }
}

/// Number of unordered pairs among `depth` copies.
fn pairs(depth: usize) -> usize {
    depth * (depth - 1) / 2
}

/// Percentile with linear interpolation between closest ranks.
///
/// Matches the numpy default. Returns 0 for an empty slice.
fn percentile(values: &[f64], p: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let rank = p / 100.0 * (sorted.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    if lower == upper {
        sorted[lower]
    } else {
        let frac = rank - lower as f64;
        sorted[lower] + frac * (sorted[upper] - sorted[lower])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    fn three_spin_problem() -> IsingProblem {
        // influence: spin 0 -> 2.5, spin 1 -> 3.5, spin 2 -> 0.01
        IsingProblem::new(
            array![1.5, -2.5, 0.01],
            vec![Coupler::new(0, 1, 1.0)],
        )
        .unwrap()
    }

    #[test]
    fn test_prune_drops_weak_spin() {
        let pruned = prune_weak_spins(&three_spin_problem(), 50.0).unwrap();
        assert_eq!(pruned.kept, vec![0, 1]);
        assert_eq!(pruned.problem.num_spins(), 2);
        assert_eq!(pruned.problem.couplers(), &[Coupler::new(0, 1, 1.0)]);
        assert_relative_eq!(pruned.problem.h()[0], 1.5);
        assert_relative_eq!(pruned.problem.h()[1], -2.5);
    }

    #[test]
    fn test_prune_cutoff_zero_keeps_all() {
        let pruned = prune_weak_spins(&three_spin_problem(), 0.0).unwrap();
        assert_eq!(pruned.kept, vec![0, 1, 2]);
        assert_eq!(pruned.problem.num_couplers(), 1);
    }

    #[test]
    fn test_prune_remaps_couplers() {
        // spin 0 weak; coupler (1, 2) must become (0, 1) in the survivors.
        let p = IsingProblem::new(
            array![0.001, 2.0, -2.0],
            vec![Coupler::new(1, 2, 1.0)],
        )
        .unwrap();
        let pruned = prune_weak_spins(&p, 50.0).unwrap();
        assert_eq!(pruned.kept, vec![1, 2]);
        assert_eq!(pruned.problem.couplers(), &[Coupler::new(0, 1, 1.0)]);
    }

    #[test]
    fn test_prune_rejects_bad_percentile() {
        let err = prune_weak_spins(&three_spin_problem(), 101.0).unwrap_err();
        assert!(matches!(err, IsingError::InvalidPercentile(p) if p == 101.0));
    }

    #[test]
    fn test_prune_never_empties_problem() {
        let pruned = prune_weak_spins(&three_spin_problem(), 100.0).unwrap();
        assert_eq!(pruned.kept, vec![1]);
        assert_eq!(pruned.problem.num_spins(), 1);
    }

    #[test]
    fn test_restore_pruned_zero_fills() {
        let reduced = SpinVector::new(vec![1, -1]).unwrap();
        let full = restore_pruned(&reduced, &[0, 2], 4).unwrap();
        assert_eq!(full.spins(), &[1, 0, -1, 0]);
    }

    #[test]
    fn test_restore_pruned_length_mismatch() {
        let reduced = SpinVector::new(vec![1]).unwrap();
        let err = restore_pruned(&reduced, &[0, 2], 4).unwrap_err();
        assert!(matches!(err, IsingError::DimensionMismatch { .. }));
    }

    #[test]
    fn test_restore_pruned_rejects_out_of_range_index() {
        let reduced = SpinVector::new(vec![1, -1]).unwrap();
        let err = restore_pruned(&reduced, &[0, 5], 4).unwrap_err();
        assert!(matches!(
            err,
            IsingError::SpinOutOfRange { index: 5, num_spins: 4 }
        ));
    }

    #[test]
    fn test_qac_encode_shapes() {
        let p = three_spin_problem();
        let enc = QacEncoder::new(3, 1.0).unwrap();
        let physical = enc.encode(&p, 2.0).unwrap();
        assert_eq!(physical.num_spins(), 9);
        // 3 copies of 1 coupler + 3 spins x C(3,2) penalties
        assert_eq!(physical.num_couplers(), 3 + 9);
    }

    #[test]
    fn test_qac_encode_penalty_strength() {
        let p = IsingProblem::new(array![1.0], vec![]).unwrap();
        let enc = QacEncoder::new(2, 0.5).unwrap();
        let physical = enc.encode(&p, 3.0).unwrap();
        // Sole coupler binds the two copies of spin 0 at -gamma * scale.
        assert_eq!(physical.num_couplers(), 1);
        assert_relative_eq!(physical.couplers()[0].strength, -1.5);
        assert_eq!((physical.couplers()[0].i, physical.couplers()[0].j), (0, 1));
    }

    #[test]
    fn test_qac_decode_majority() {
        let enc = QacEncoder::new(3, 1.0).unwrap();
        // copies: [1, -1] [1, -1] [-1, -1]  (copy-major layout, n = 2)
        let physical = SpinVector::new(vec![1, -1, 1, -1, -1, -1]).unwrap();
        let logical = enc.decode(&physical).unwrap();
        assert_eq!(logical.spins(), &[1, -1]);
    }

    #[test]
    fn test_qac_decode_tie_votes_zero() {
        let enc = QacEncoder::new(2, 1.0).unwrap();
        let physical = SpinVector::new(vec![1, -1]).unwrap();
        let logical = enc.decode(&physical).unwrap();
        assert_eq!(logical.spins(), &[0]);
    }

    #[test]
    fn test_qac_decode_depth_mismatch() {
        let enc = QacEncoder::new(3, 1.0).unwrap();
        let physical = SpinVector::new(vec![1, -1]).unwrap();
        let err = enc.decode(&physical).unwrap_err();
        assert!(matches!(err, IsingError::DepthMismatch { len: 2, depth: 3 }));
    }

    #[test]
    fn test_qac_clean_replication_decodes_to_original() {
        let enc = QacEncoder::new(3, 1.0).unwrap();
        let logical = SpinVector::new(vec![1, -1, 1]).unwrap();
        let mut copies = Vec::new();
        for _ in 0..3 {
            copies.extend_from_slice(logical.spins());
        }
        let physical = SpinVector::new(copies).unwrap();
        assert_eq!(enc.decode(&physical).unwrap(), logical);
    }

    #[test]
    fn test_qac_physical_energy_of_clean_state() {
        // For an unbroken replicated state, each copy contributes the
        // logical energy and every penalty coupler contributes -gamma*scale.
        let p = three_spin_problem();
        let enc = QacEncoder::new(3, 1.0).unwrap();
        let physical_problem = enc.encode(&p, 2.0).unwrap();

        let logical = SpinVector::new(vec![1, -1, 1]).unwrap();
        let mut copies = Vec::new();
        for _ in 0..3 {
            copies.extend_from_slice(logical.spins());
        }
        let physical = SpinVector::new(copies).unwrap();

        let e_logical = p.energy(&logical).unwrap();
        let e_physical = physical_problem.energy(&physical).unwrap();
        let penalty_total = -1.0 * 2.0 * (3 * pairs(3)) as f64;
        assert_relative_eq!(e_physical, 3.0 * e_logical + penalty_total, epsilon = 1e-12);
    }

    #[test]
    fn test_percentile_interpolates() {
        let v = [1.0, 2.0, 3.0, 4.0];
        assert_relative_eq!(percentile(&v, 0.0), 1.0);
        assert_relative_eq!(percentile(&v, 100.0), 4.0);
        assert_relative_eq!(percentile(&v, 50.0), 2.5);
        assert_relative_eq!(percentile(&v, 25.0), 1.75);
    }
}
