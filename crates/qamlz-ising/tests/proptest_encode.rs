//! Property-based tests for pruning and QAC encoding.
//!
//! Tests that encode/decode and prune/restore compositions behave as exact
//! inverses on clean inputs.

use ndarray::Array1;
use proptest::prelude::*;
use qamlz_ising::{IsingProblem, QacEncoder, SpinVector, prune_weak_spins, restore_pruned};

/// Generate a random ±1 spin assignment of 1..=8 spins.
fn arb_spins() -> impl Strategy<Value = Vec<i8>> {
    prop::collection::vec(prop_oneof![Just(-1_i8), Just(1_i8)], 1..=8)
}

/// Generate random linear biases of the given length.
fn arb_biases(len: usize) -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(-2.0..2.0_f64, len..=len)
}

proptest! {
    /// Replicating a logical state onto every copy and decoding recovers it
    /// exactly, for any depth.
    #[test]
    fn test_qac_decode_inverts_clean_replication(
        spins in arb_spins(),
        depth in 1_usize..=5,
    ) {
        let logical = SpinVector::new(spins).unwrap();
        let mut physical = Vec::with_capacity(logical.len() * depth);
        for _ in 0..depth {
            physical.extend_from_slice(logical.spins());
        }
        let physical = SpinVector::new(physical).unwrap();

        let encoder = QacEncoder::new(depth, 1.0).unwrap();
        let decoded = encoder.decode(&physical).unwrap();
        prop_assert_eq!(decoded, logical);
    }

    /// restore(prune(x)) leaves surviving coordinates untouched and fills
    /// dropped coordinates with 0.
    #[test]
    fn test_prune_restore_composition(
        biases in arb_biases(6),
        cutoff in 0.0..100.0_f64,
    ) {
        let problem = IsingProblem::new(Array1::from_vec(biases), vec![]).unwrap();
        let pruned = prune_weak_spins(&problem, cutoff).unwrap();
        prop_assert!(!pruned.kept.is_empty());

        // Pretend the annealer returned all-up on the reduced problem.
        let reduced = SpinVector::new(vec![1; pruned.kept.len()]).unwrap();
        let full = restore_pruned(&reduced, &pruned.kept, problem.num_spins()).unwrap();

        prop_assert_eq!(full.len(), problem.num_spins());
        for i in 0..problem.num_spins() {
            if pruned.kept.contains(&i) {
                prop_assert_eq!(full[i], 1);
            } else {
                prop_assert_eq!(full[i], 0);
            }
        }
    }

    /// Encoded physical energy of a clean replicated state is
    /// depth·E_logical plus the constant penalty contribution.
    #[test]
    fn test_qac_energy_of_clean_state(
        spins in arb_spins(),
        depth in 1_usize..=4,
    ) {
        let n = spins.len();
        let h: Array1<f64> = (0..n).map(|i| (i as f64) - 1.0).collect();
        let problem = IsingProblem::new(h, vec![]).unwrap();

        let logical = SpinVector::new(spins).unwrap();
        let mut physical = Vec::with_capacity(n * depth);
        for _ in 0..depth {
            physical.extend_from_slice(logical.spins());
        }
        let physical = SpinVector::new(physical).unwrap();

        let encoder = QacEncoder::new(depth, 1.0).unwrap();
        let physical_problem = encoder.encode(&problem, 1.0).unwrap();

        let e_logical = problem.energy(&logical).unwrap();
        let e_physical = physical_problem.energy(&physical).unwrap();
        let penalty = -((n * depth * (depth - 1) / 2) as f64);
        prop_assert!((e_physical - (depth as f64 * e_logical + penalty)).abs() < 1e-9);
    }
}
