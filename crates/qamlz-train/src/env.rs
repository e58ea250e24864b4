//! Training environment: dataset plus derived covariance statistics.

use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};

use crate::error::{TrainError, TrainResult};

/// Read-only training input for a zoom run.
///
/// Rows of `x_train` are samples, columns are weak-classifier outputs; the
/// weight vector being trained has one entry per column. The covariance
/// statistics feeding the Hamiltonian are
///
///   C_i = Xᵀy / N,  C_ij = XᵀX / N
///
/// of which only the strict upper triangle of `C_ij` is ever read.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainEnv {
    x_train: Array2<f64>,
    y_train: Array1<f64>,
    c_i: Array1<f64>,
    c_ij: Array2<f64>,
    fidelity: u32,
}

impl TrainEnv {
    /// Build an environment from raw features and ±1 labels, computing the
    /// covariance statistics.
    ///
    /// `fidelity` is the number of independent anneal repetitions taken per
    /// weight vector per iteration; it must be at least 1.
    pub fn new(x_train: Array2<f64>, y_train: Array1<f64>, fidelity: u32) -> TrainResult<Self> {
        let n = y_train.len() as f64;
        let c_i = x_train.t().dot(&y_train) / n;
        let c_ij = x_train.t().dot(&x_train) / n;
        Self::from_parts(x_train, y_train, c_i, c_ij, fidelity)
    }

    /// Build an environment from pre-computed statistics.
    ///
    /// Shapes are validated; the statistics themselves are taken as given,
    /// which lets tests pin exact Hamiltonian coefficients.
    pub fn from_parts(
        x_train: Array2<f64>,
        y_train: Array1<f64>,
        c_i: Array1<f64>,
        c_ij: Array2<f64>,
        fidelity: u32,
    ) -> TrainResult<Self> {
        if x_train.nrows() == 0 || x_train.ncols() == 0 {
            return Err(TrainError::Environment(
                "training set must have at least one sample and one feature".into(),
            ));
        }
        if y_train.len() != x_train.nrows() {
            return Err(TrainError::Environment(format!(
                "expected {} labels, got {}",
                x_train.nrows(),
                y_train.len()
            )));
        }
        if let Some(bad) = y_train.iter().find(|&&y| y != 1.0 && y != -1.0) {
            return Err(TrainError::Environment(format!(
                "labels must be -1 or +1, got {bad}"
            )));
        }
        let num_weights = x_train.ncols();
        if c_i.len() != num_weights {
            return Err(TrainError::Environment(format!(
                "expected {} linear terms, got {}",
                num_weights,
                c_i.len()
            )));
        }
        if c_ij.nrows() != num_weights || c_ij.ncols() != num_weights {
            return Err(TrainError::Environment(format!(
                "expected {num_weights}x{num_weights} pairwise terms, got {}x{}",
                c_ij.nrows(),
                c_ij.ncols()
            )));
        }
        if fidelity == 0 {
            return Err(TrainError::Environment(
                "fidelity must be at least 1".into(),
            ));
        }
        Ok(Self {
            x_train,
            y_train,
            c_i,
            c_ij,
            fidelity,
        })
    }

    /// Training features, samples by weak classifiers.
    pub fn x_train(&self) -> &Array2<f64> {
        &self.x_train
    }

    /// Training labels, ±1 per sample.
    pub fn y_train(&self) -> &Array1<f64> {
        &self.y_train
    }

    /// Linear covariance terms `C_i`.
    pub fn c_i(&self) -> &Array1<f64> {
        &self.c_i
    }

    /// Pairwise covariance terms `C_ij`; only the strict upper triangle is
    /// meaningful.
    pub fn c_ij(&self) -> &Array2<f64> {
        &self.c_ij
    }

    /// Number of training samples.
    pub fn train_size(&self) -> usize {
        self.y_train.len()
    }

    /// Dimensionality of the weight vector.
    pub fn num_weights(&self) -> usize {
        self.c_i.len()
    }

    /// Independent anneal repetitions per weight vector per iteration.
    pub fn fidelity(&self) -> u32 {
        self.fidelity
    }
}
