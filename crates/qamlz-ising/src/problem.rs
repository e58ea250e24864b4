//! Ising problem data structures.
//!
//! An Ising problem is a quadratic objective over spins s_i ∈ {-1, +1}:
//!
//!   E(s) = Σ_i h_i·s_i  +  Σ_{i<j} J_ij·s_i·s_j
//!
//! with linear biases `h` and strictly upper-triangular pairwise couplers
//! `J`. [`SpinVector`] additionally admits 0 entries, marking variables
//! elided by pruning or left undecided by a majority vote; a 0 spin
//! contributes no energy.
//!
//! # Example
//!
//! ```rust
//! use ndarray::array;
//! use qamlz_ising::{Coupler, IsingProblem, SpinVector};
//!
//! // E(s) = -s_0 + 0.5·s_0·s_1
//! let p = IsingProblem::new(array![-1.0, 0.0], vec![Coupler::new(0, 1, 0.5)]).unwrap();
//! let s = SpinVector::new(vec![1, -1]).unwrap();
//! assert_eq!(p.energy(&s).unwrap(), -1.5);
//! ```

use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};
use std::ops::Index;

use crate::error::{IsingError, IsingResult};

/// A single pairwise coupling `J_ij·s_i·s_j` with `i < j`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coupler {
    /// First spin index.
    pub i: usize,
    /// Second spin index, strictly greater than `i`.
    pub j: usize,
    /// Coupling strength J_ij.
    pub strength: f64,
}

impl Coupler {
    /// Create a new coupler.
    pub fn new(i: usize, j: usize, strength: f64) -> Self {
        Self { i, j, strength }
    }

    /// True if this coupler touches spin `spin`.
    pub fn touches(&self, spin: usize) -> bool {
        self.i == spin || self.j == spin
    }
}

/// A spin assignment over problem variables.
///
/// Entries are -1/+1 for annealed spins; 0 marks a variable restored after
/// pruning or an even majority-vote split.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SpinVector {
    spins: Vec<i8>,
}

impl SpinVector {
    /// Construct from raw spin values, rejecting anything outside {-1, 0, +1}.
    pub fn new(spins: Vec<i8>) -> IsingResult<Self> {
        for (index, &value) in spins.iter().enumerate() {
            if !(-1..=1).contains(&value) {
                return Err(IsingError::InvalidSpin { index, value });
            }
        }
        Ok(Self { spins })
    }

    /// Construct by taking the sign of each value; 0.0 maps to spin 0.
    pub fn from_signs(values: &[f64]) -> Self {
        let spins = values
            .iter()
            .map(|&v| {
                if v > 0.0 {
                    1
                } else if v < 0.0 {
                    -1
                } else {
                    0
                }
            })
            .collect();
        Self { spins }
    }

    /// Number of spins.
    pub fn len(&self) -> usize {
        self.spins.len()
    }

    /// True if the vector has no spins.
    pub fn is_empty(&self) -> bool {
        self.spins.is_empty()
    }

    /// The raw spin values.
    pub fn spins(&self) -> &[i8] {
        &self.spins
    }

    /// The spins as a float vector, for arithmetic against weight vectors.
    pub fn to_f64(&self) -> Array1<f64> {
        self.spins.iter().map(|&s| f64::from(s)).collect()
    }

    /// The same assignment with every spin negated.
    #[must_use]
    pub fn negated(&self) -> Self {
        Self {
            spins: self.spins.iter().map(|&s| -s).collect(),
        }
    }
}

impl Index<usize> for SpinVector {
    type Output = i8;

    fn index(&self, index: usize) -> &i8 {
        &self.spins[index]
    }
}

/// A quadratic spin objective: linear biases plus upper-triangular couplers.
///
/// E(s) = Σ_i h_i·s_i + Σ_{i<j} J_ij·s_i·s_j
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IsingProblem {
    h: Array1<f64>,
    /// Sorted by (i, j) ascending; every coupler satisfies i < j.
    couplers: Vec<Coupler>,
}

impl IsingProblem {
    /// Create from linear biases and a coupler list.
    ///
    /// Couplers are validated (`i < j`, indices in range) and sorted by
    /// (i, j). Duplicate index pairs are kept and contribute additively.
    pub fn new(h: Array1<f64>, couplers: Vec<Coupler>) -> IsingResult<Self> {
        let num_spins = h.len();
        for c in &couplers {
            if c.i >= c.j {
                return Err(IsingError::CouplerOrder { i: c.i, j: c.j });
            }
            if c.j >= num_spins {
                return Err(IsingError::CouplerOutOfRange {
                    i: c.i,
                    j: c.j,
                    num_spins,
                });
            }
        }
        let mut couplers = couplers;
        couplers.sort_by(|a, b| (a.i, a.j).cmp(&(b.i, b.j)));
        Ok(Self { h, couplers })
    }

    /// Create from a dense coupling matrix.
    ///
    /// Only the strictly upper triangle of `j` is read; the diagonal and
    /// lower triangle are ignored. Zero entries produce no coupler.
    pub fn from_dense(h: Array1<f64>, j: &Array2<f64>) -> IsingResult<Self> {
        let n = h.len();
        if j.nrows() != n || j.ncols() != n {
            return Err(IsingError::DimensionMismatch {
                expected: n,
                got: j.nrows().max(j.ncols()),
            });
        }
        let mut couplers = Vec::new();
        for row in 0..n {
            for col in (row + 1)..n {
                let strength = j[[row, col]];
                if strength != 0.0 {
                    couplers.push(Coupler::new(row, col, strength));
                }
            }
        }
        Ok(Self { h, couplers })
    }

    /// Number of spins.
    pub fn num_spins(&self) -> usize {
        self.h.len()
    }

    /// The linear biases.
    pub fn h(&self) -> &Array1<f64> {
        &self.h
    }

    /// The couplers, sorted by (i, j) ascending.
    pub fn couplers(&self) -> &[Coupler] {
        &self.couplers
    }

    /// Number of couplers.
    pub fn num_couplers(&self) -> usize {
        self.couplers.len()
    }

    /// Evaluate E(s) for the given spin assignment.
    pub fn energy(&self, state: &SpinVector) -> IsingResult<f64> {
        if state.len() != self.num_spins() {
            return Err(IsingError::DimensionMismatch {
                expected: self.num_spins(),
                got: state.len(),
            });
        }
        let mut energy = 0.0;
        for (i, &h_i) in self.h.iter().enumerate() {
            energy += h_i * f64::from(state[i]);
        }
        for c in &self.couplers {
            energy += c.strength * f64::from(state[c.i]) * f64::from(state[c.j]);
        }
        Ok(energy)
    }

    /// Per-spin coupling influence `|h_i| + Σ_j |J_ij|` (used by pruning).
    pub fn influence(&self) -> Array1<f64> {
        let mut influence: Array1<f64> = self.h.mapv(f64::abs);
        for c in &self.couplers {
            influence[c.i] += c.strength.abs();
            influence[c.j] += c.strength.abs();
        }
        influence
    }

    /// Largest absolute bias or coupling strength, or 0 for an empty problem.
    ///
    /// Annealers use this to set their temperature ladder.
    pub fn max_abs_term(&self) -> f64 {
        let h_max = self.h.iter().fold(0.0_f64, |m, &v| m.max(v.abs()));
        let j_max = self
            .couplers
            .iter()
            .fold(0.0_f64, |m, c| m.max(c.strength.abs()));
        h_max.max(j_max)
    }
}
