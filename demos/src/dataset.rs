//! Synthetic datasets for zoom-training demos.

use ndarray::{Array1, Array2};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// A generated dataset together with the weights that labelled it.
#[derive(Debug, Clone)]
pub struct SyntheticDataset {
    /// Weak-classifier scores, samples by classifiers, in [-1, 1].
    pub x: Array2<f64>,
    /// Labels in {-1, +1}.
    pub y: Array1<f64>,
    /// The hidden ±1 weight vector behind the labels.
    pub true_weights: Array1<f64>,
}

/// Generate a linearly separable binary dataset.
///
/// Feature rows are uniform weak-classifier scores in [-1, 1]; labels are
/// the sign of the decision value under a random ±1 weight vector, so the
/// dataset is perfectly separable by construction. `noise` then flips that
/// fraction of labels (in expectation), bounding the accuracy any linear
/// classifier can reach. Fixed seeds give identical datasets.
///
/// # Panics
///
/// Panics if `num_weights` is 0; no row could then leave the decision
/// boundary.
pub fn separable_dataset(
    train_size: usize,
    num_weights: usize,
    noise: f64,
    seed: u64,
) -> SyntheticDataset {
    assert!(num_weights > 0, "dataset needs at least one weak classifier");
    let mut rng = SmallRng::seed_from_u64(seed);

    let true_weights: Array1<f64> = (0..num_weights)
        .map(|_| if rng.r#gen::<bool>() { 1.0 } else { -1.0 })
        .collect();

    let mut x = Array2::<f64>::zeros((train_size, num_weights));
    let mut y = Array1::<f64>::zeros(train_size);
    for row in 0..train_size {
        // Resample any row landing exactly on the decision boundary so
        // every label is a strict ±1.
        loop {
            for col in 0..num_weights {
                x[[row, col]] = rng.gen_range(-1.0..1.0);
            }
            let decision: f64 = (0..num_weights)
                .map(|col| x[[row, col]] * true_weights[col])
                .sum();
            if decision != 0.0 {
                y[row] = decision.signum();
                break;
            }
        }
        if rng.r#gen::<f64>() < noise {
            y[row] = -y[row];
        }
    }

    SyntheticDataset { x, y, true_weights }
}
