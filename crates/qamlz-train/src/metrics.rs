//! Classifier metrics: sign-thresholded prediction and training accuracy.

use ndarray::{Array1, Array2};

/// Sign with a zero fixed point: -1, 0, or +1.
///
/// Unlike [`f64::signum`], a decision value of exactly zero maps to zero,
/// so an undecided sample never counts as a +1 prediction.
pub fn sign(value: f64) -> f64 {
    if value > 0.0 {
        1.0
    } else if value < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// Per-sample decision values `X·w`.
///
/// Rows of `features` are samples, columns are weak-classifier outputs.
///
/// # Panics
///
/// Panics if the weight length does not match the feature columns.
pub fn decision_values(features: &Array2<f64>, weights: &Array1<f64>) -> Array1<f64> {
    features.dot(weights)
}

/// Sign-thresholded predicted labels, one per sample.
pub fn predict_labels(features: &Array2<f64>, weights: &Array1<f64>) -> Array1<f64> {
    decision_values(features, weights).mapv(sign)
}

/// Fraction of predictions exactly matching the labels.
///
/// Predictions and labels take values in {-1, 0, +1}, so exact comparison
/// is well defined. Returns 0 for empty input.
///
/// # Panics
///
/// Panics if `predicted` and `labels` differ in length.
pub fn accuracy(predicted: &Array1<f64>, labels: &Array1<f64>) -> f64 {
    assert_eq!(
        predicted.len(),
        labels.len(),
        "predictions and labels must have equal length"
    );
    if labels.is_empty() {
        return 0.0;
    }
    let hits = predicted
        .iter()
        .zip(labels.iter())
        .filter(|(p, y)| p == y)
        .count();
    hits as f64 / labels.len() as f64
}
