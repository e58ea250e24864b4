//! The zoom-training Hamiltonian and its Ising form.
//!
//! The training loop scores a perturbation `s` of the current weights `mu`
//! at scale `sigma` by the energy
//!
//!   H(mu, s, σ) = −C·(mu + sσ)
//!               + Σ_i (Σ_{j>i} C_ij·mu_j)·s_i·σ
//!               + Σ_{i<j} s_i·C_ij·s_j·σ²
//!
//! where `C` and `C_ij` are the linear and pairwise covariance statistics
//! of the training set. Only the strict upper triangle of `C_ij` is read.
//! The same objective, minus its `s`-independent constant `−C·mu`, is what
//! the annealer minimizes as an Ising problem ([`zoomed_problem`]).

use ndarray::{Array1, Array2};

use qamlz_ising::{Coupler, IsingProblem};

use crate::error::TrainResult;

/// Scalar energy of the candidate `mu + s·sigma` under the covariance
/// statistics.
///
/// At `sigma = 0` this reduces to `−C·mu`, the energy of the unperturbed
/// weights, and it is invariant under simultaneous negation of `s` and
/// `sigma` since they enter only as the product `s·sigma`.
///
/// # Panics
///
/// Panics if `mu`, `s`, and `c_i` disagree on length, or if `c_ij` is not
/// square of matching size.
pub fn total_hamiltonian(
    mu: &Array1<f64>,
    s: &Array1<f64>,
    sigma: f64,
    c_i: &Array1<f64>,
    c_ij: &Array2<f64>,
) -> f64 {
    let n = c_i.len();
    assert_eq!(mu.len(), n, "mu length must match c_i");
    assert_eq!(s.len(), n, "state length must match c_i");
    assert_eq!(c_ij.nrows(), n, "c_ij rows must match c_i");
    assert_eq!(c_ij.ncols(), n, "c_ij columns must match c_i");

    let mut energy = 0.0;
    for i in 0..n {
        energy -= c_i[i] * (mu[i] + s[i] * sigma);
    }
    for i in 0..n {
        let mut cross = 0.0;
        for j in (i + 1)..n {
            cross += c_ij[[i, j]] * mu[j];
        }
        energy += cross * s[i] * sigma;
    }
    for i in 0..n {
        for j in (i + 1)..n {
            energy += s[i] * c_ij[[i, j]] * s[j] * sigma * sigma;
        }
    }
    energy
}

/// The Ising problem whose energy over `s` equals the Hamiltonian at scale
/// `sigma`, up to the `s`-independent constant `−C·mu`:
///
///   h_i = σ(−C_i + Σ_{j>i} C_ij·mu_j),  J_ij = σ²·C_ij  for i < j.
///
/// Zero couplings are skipped.
///
/// # Panics
///
/// Panics if `mu` and `c_i` disagree on length, or if `c_ij` is not square
/// of matching size.
pub fn zoomed_problem(
    mu: &Array1<f64>,
    sigma: f64,
    c_i: &Array1<f64>,
    c_ij: &Array2<f64>,
) -> TrainResult<IsingProblem> {
    let n = c_i.len();
    assert_eq!(mu.len(), n, "mu length must match c_i");
    assert_eq!(c_ij.nrows(), n, "c_ij rows must match c_i");
    assert_eq!(c_ij.ncols(), n, "c_ij columns must match c_i");

    let mut h = Array1::<f64>::zeros(n);
    for i in 0..n {
        let mut cross = 0.0;
        for j in (i + 1)..n {
            cross += c_ij[[i, j]] * mu[j];
        }
        h[i] = sigma * (-c_i[i] + cross);
    }

    let sigma_sq = sigma * sigma;
    let mut couplers = Vec::new();
    for i in 0..n {
        for j in (i + 1)..n {
            let strength = sigma_sq * c_ij[[i, j]];
            if strength != 0.0 {
                couplers.push(Coupler::new(i, j, strength));
            }
        }
    }

    Ok(IsingProblem::new(h, couplers)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;
    use qamlz_ising::SpinVector;

    #[test]
    fn test_hamiltonian_hand_computed() {
        let mu = array![1.0, -1.0];
        let s = array![1.0, 1.0];
        let c_i = array![2.0, 3.0];
        let c_ij = array![[0.0, 4.0], [0.0, 0.0]];
        let sigma = 0.5;

        // linear: -(2·(1 + 0.5) + 3·(-1 + 0.5)) = -1.5
        // mu cross: 4·(-1)·1·0.5 = -2.0
        // pairwise: 1·4·1·0.25 = 1.0
        let h = total_hamiltonian(&mu, &s, sigma, &c_i, &c_ij);
        assert_relative_eq!(h, -2.5);
    }

    #[test]
    fn test_sigma_zero_reduces_to_linear_term() {
        let mu = array![0.75, -0.25, 2.0];
        let s = array![1.0, -1.0, 1.0];
        let c_i = array![1.0, 2.0, -0.5];
        let c_ij = array![[0.0, 1.0, 2.0], [0.0, 0.0, 3.0], [0.0, 0.0, 0.0]];

        let h = total_hamiltonian(&mu, &s, 0.0, &c_i, &c_ij);
        assert_relative_eq!(h, -(1.0 * 0.75 + 2.0 * -0.25 + -0.5 * 2.0));
    }

    #[test]
    fn test_negation_symmetry() {
        let mu = array![0.5, 1.5, -0.5];
        let s = array![1.0, -1.0, 1.0];
        let c_i = array![1.0, -2.0, 0.5];
        let c_ij = array![[0.0, 0.3, -0.7], [0.0, 0.0, 1.1], [0.0, 0.0, 0.0]];
        let sigma = 0.25;

        let h = total_hamiltonian(&mu, &s, sigma, &c_i, &c_ij);
        let h_negated = total_hamiltonian(&mu, &s.mapv(|v| -v), -sigma, &c_i, &c_ij);
        assert_eq!(h, h_negated);
    }

    #[test]
    fn test_lower_triangle_ignored() {
        let mu = array![1.0, 1.0];
        let s = array![1.0, 1.0];
        let c_i = array![1.0, 1.0];
        let upper_only = array![[0.0, 2.0], [0.0, 0.0]];
        let with_noise = array![[9.0, 2.0], [-7.0, 9.0]];

        let sigma = 0.5;
        assert_eq!(
            total_hamiltonian(&mu, &s, sigma, &c_i, &upper_only),
            total_hamiltonian(&mu, &s, sigma, &c_i, &with_noise),
        );
    }

    #[test]
    #[should_panic(expected = "state length must match c_i")]
    fn test_shape_mismatch_panics() {
        let mu = array![1.0, 1.0];
        let s = array![1.0];
        let c_i = array![1.0, 1.0];
        let c_ij = Array2::<f64>::zeros((2, 2));
        total_hamiltonian(&mu, &s, 0.5, &c_i, &c_ij);
    }

    #[test]
    fn test_zoomed_problem_biases_and_couplers() {
        let mu = array![1.0, -2.0];
        let c_i = array![2.0, 3.0];
        let c_ij = array![[0.0, 4.0], [0.0, 0.0]];
        let sigma = 0.5;

        let problem = zoomed_problem(&mu, sigma, &c_i, &c_ij).unwrap();
        // h_0 = 0.5·(-2 + 4·(-2)) = -5, h_1 = 0.5·(-3) = -1.5
        assert_relative_eq!(problem.h()[0], -5.0);
        assert_relative_eq!(problem.h()[1], -1.5);
        // J_01 = 0.25·4 = 1
        assert_eq!(problem.couplers(), &[Coupler::new(0, 1, 1.0)]);
    }

    #[test]
    fn test_zoomed_problem_skips_zero_couplings() {
        let mu = array![1.0, 1.0];
        let c_i = array![1.0, 1.0];
        let c_ij = Array2::<f64>::zeros((2, 2));
        let problem = zoomed_problem(&mu, 0.5, &c_i, &c_ij).unwrap();
        assert_eq!(problem.num_couplers(), 0);
    }

    #[test]
    fn test_ising_energy_matches_hamiltonian_up_to_constant() {
        let mu = array![0.5, -1.0, 2.0];
        let c_i = array![1.0, 2.0, -0.5];
        let c_ij = array![[0.0, 1.0, 2.0], [0.0, 0.0, 3.0], [0.0, 0.0, 0.0]];
        let sigma = 0.25;

        let problem = zoomed_problem(&mu, sigma, &c_i, &c_ij).unwrap();
        let constant = -c_i.dot(&mu);

        for spins in [[1, 1, 1], [1, -1, 1], [-1, -1, 1], [-1, -1, -1]] {
            let state = SpinVector::new(spins.to_vec()).unwrap();
            let expected = total_hamiltonian(&mu, &state.to_f64(), sigma, &c_i, &c_ij);
            let ising = problem.energy(&state).unwrap();
            assert_relative_eq!(ising + constant, expected, epsilon = 1e-12);
        }
    }
}
