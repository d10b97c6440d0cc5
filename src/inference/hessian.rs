//! inference::hessian — standard errors from the observed information.
//!
//! Purpose
//! -------
//! Turn a fitted log-likelihood into coefficient standard errors. The
//! observed information `I(θ̂) = -∇²ℓ(θ̂)` is approximated by finite
//! differences and inverted through a symmetric eigendecomposition.
//!
//! Key behaviors
//! -------------
//! - [`calc_standard_errors`]: classical errors `sqrt(diag(I⁻¹))`.
//! - [`calc_robust_standard_errors`]: sandwich errors
//!   `sqrt(diag(I⁻¹ S I⁻¹))` where `S = Σₜ gₜ gₜᵀ` is the outer product of
//!   per-observation scores.
//!
//! Invariants & assumptions
//! ------------------------
//! - Eigenvalues at or below `EIGEN_EPS` are dropped from the inverse. A
//!   parameter that loads on a dropped (flat or indefinite) direction is not
//!   identified and its error is `NaN`, as is any negative variance.
//! - Callers pass functions of the *natural* parameters; no delta method is
//!   applied here.
use crate::optimization::{
    errors::OptResult,
    loglik_optimizer::{
        finite_diff::scalar_hessian,
        types::{Hessian, Theta},
    },
    numerical_stability::transformations::EIGEN_EPS,
};
use nalgebra::DMatrix;
use ndarray::{Array1, Array2};

/// Classical standard errors at `theta_hat` for a scalar log-likelihood.
///
/// # Errors
/// Propagates `HessianDimMismatch` / `InvalidHessian` from the
/// finite-difference Hessian.
pub fn calc_standard_errors<F: Fn(&Theta) -> f64>(
    loglik: &F, theta_hat: &Theta,
) -> OptResult<Array1<f64>> {
    let obs_info = observed_information(loglik, theta_hat)?;
    let (inv, unidentified) = pseudo_inverse(&obs_info);
    Ok(errors_from_variances(&inv, &unidentified))
}

/// Sandwich (QML) standard errors.
///
/// `contributions(θ)` returns the per-observation log-likelihood terms; their
/// sum must equal the scalar log-likelihood.
pub fn calc_robust_standard_errors<F, G>(
    loglik: &F, contributions: &G, theta_hat: &Theta,
) -> OptResult<Array1<f64>>
where
    F: Fn(&Theta) -> f64,
    G: Fn(&Theta) -> Array1<f64>,
{
    let obs_info = observed_information(loglik, theta_hat)?;
    let (inv, unidentified) = pseudo_inverse(&obs_info);
    let scores = score_outer_product(contributions, theta_hat);
    let sandwich = inv.dot(&scores).dot(&inv);
    Ok(errors_from_variances(&sandwich, &unidentified))
}

/// Loading² on a dropped eigenvector above which a parameter is unidentified.
const LOADING_EPS: f64 = 1e-8;

fn errors_from_variances(cov: &Array2<f64>, unidentified: &[bool]) -> Array1<f64> {
    cov.diag()
        .iter()
        .zip(unidentified)
        .map(|(&v, &flat)| if flat || v.is_nan() || v <= 0.0 { f64::NAN } else { v.sqrt() })
        .collect()
}

fn observed_information<F: Fn(&Theta) -> f64>(loglik: &F, theta_hat: &Theta) -> OptResult<Hessian> {
    let neg = |theta: &Theta| -loglik(theta);
    scalar_hessian(&neg, theta_hat)
}

/// `Σₜ gₜ gₜᵀ` with `gₜ` the central-difference gradient of the t-th term.
fn score_outer_product<G: Fn(&Theta) -> Array1<f64>>(contributions: &G, theta: &Theta) -> Array2<f64> {
    let k = theta.len();
    let n_obs = contributions(theta).len();
    let mut jac = Array2::<f64>::zeros((n_obs, k));
    for j in 0..k {
        let h = 1e-5 * theta[j].abs().max(1.0);
        let mut up = theta.clone();
        let mut down = theta.clone();
        up[j] += h;
        down[j] -= h;
        let diff = (contributions(&up) - contributions(&down)) / (2.0 * h);
        jac.column_mut(j).assign(&diff);
    }
    jac.t().dot(&jac)
}

fn fill_dmatrix(src: &Array2<f64>) -> DMatrix<f64> {
    let n = src.nrows();
    DMatrix::<f64>::from_fn(n, n, |i, j| src[[i, j]])
}

/// Moore–Penrose style inverse of a symmetric matrix with an eigenvalue floor.
///
/// Also returns, per coordinate, whether it loads on a dropped direction.
fn pseudo_inverse(mat: &Array2<f64>) -> (Array2<f64>, Vec<bool>) {
    let n = mat.nrows();
    let eigen = fill_dmatrix(mat).symmetric_eigen();
    let q = eigen.eigenvectors;
    let mut inv = Array2::<f64>::zeros((n, n));
    let mut unidentified = vec![false; n];
    for (k, &lambda) in eigen.eigenvalues.iter().enumerate() {
        if lambda.is_nan() || lambda <= EIGEN_EPS {
            for (i, flag) in unidentified.iter_mut().enumerate() {
                *flag |= q[(i, k)].powi(2) > LOADING_EPS;
            }
            continue;
        }
        for i in 0..n {
            for j in 0..n {
                inv[[i, j]] += q[(i, k)] * q[(j, k)] / lambda;
            }
        }
    }
    (inv, unidentified)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    #[test]
    // Purpose
    // -------
    // Classical errors of a Gaussian quadratic log-likelihood match the
    // analytic inverse information.
    //
    // Given
    // -----
    // - ℓ(θ) = -½ θᵀ A θ with A = diag(4, 1).
    //
    // Expect
    // ------
    // - SE = [1/2, 1].
    fn standard_errors_match_diagonal_quadratic() {
        let a = array![[4.0, 0.0], [0.0, 1.0]];
        let loglik = |theta: &Theta| -0.5 * theta.dot(&a.dot(theta));

        let se = calc_standard_errors(&loglik, &array![1.0, -1.0]).unwrap();

        assert_relative_eq!(se[0], 0.5, epsilon = 1e-4);
        assert_relative_eq!(se[1], 1.0, epsilon = 1e-4);
    }

    #[test]
    // Purpose
    // -------
    // A direction with zero curvature is dropped instead of producing ∞, and
    // the coordinate spanning it is flagged.
    //
    // Given
    // -----
    // - diag(2, 0).
    //
    // Expect
    // ------
    // - Inverse diag(0.5, 0); only the second coordinate is unidentified.
    fn pseudo_inverse_drops_null_directions() {
        let (inv, unidentified) = pseudo_inverse(&array![[2.0, 0.0], [0.0, 0.0]]);
        assert_relative_eq!(inv[[0, 0]], 0.5, epsilon = 1e-12);
        assert_relative_eq!(inv[[1, 1]], 0.0, epsilon = 1e-12);
        assert_eq!(unidentified, vec![false, true]);
    }

    #[test]
    // Purpose
    // -------
    // Parameters the likelihood cannot pin down get a NaN error, never 0.
    //
    // Given
    // -----
    // - ℓ(θ) = -(θ₀ + θ₁)² - θ₂²: θ₀ and θ₁ only enter through their sum;
    //   θ₂ has curvature 2.
    // - ℓ(θ) = θ₀² (curvature of the wrong sign).
    //
    // Expect
    // ------
    // - Classical and robust SEs of θ₀, θ₁ are NaN; SE of θ₂ = 1/√2.
    // - NaN for the indefinite case.
    fn flat_and_indefinite_directions_give_nan_errors() {
        let ridge = |theta: &Theta| -(theta[0] + theta[1]).powi(2) - theta[2].powi(2);
        let ridge_terms = |theta: &Theta| array![ridge(theta)];
        let theta_hat = array![0.3, -0.3, 0.0];

        let se = calc_standard_errors(&ridge, &theta_hat).unwrap();
        let robust = calc_robust_standard_errors(&ridge, &ridge_terms, &theta_hat).unwrap();
        assert!(se[0].is_nan() && se[1].is_nan());
        assert!(robust[0].is_nan() && robust[1].is_nan());
        assert_relative_eq!(se[2], 0.5_f64.sqrt(), epsilon = 1e-4);

        let convex = |theta: &Theta| theta[0].powi(2);
        assert!(calc_standard_errors(&convex, &array![0.0]).unwrap()[0].is_nan());
    }

    #[test]
    // Purpose
    // -------
    // For a correctly specified Gaussian mean model the sandwich and the
    // classical error coincide.
    //
    // Given
    // -----
    // - xₜ ∈ {-1, 1, -1, 1}, unit variance, ℓₜ(μ) = -½ (xₜ - μ)².
    //
    // Expect
    // ------
    // - Classical SE = 1/√4 = 0.5; robust SE = sqrt(Σ(xₜ-μ̂)²)/4 = 0.5.
    fn robust_errors_match_classical_when_scores_match_information() {
        let x = array![-1.0, 1.0, -1.0, 1.0];
        let contributions = |theta: &Theta| x.mapv(|xt| -0.5 * (xt - theta[0]).powi(2));
        let loglik = |theta: &Theta| contributions(theta).sum();
        let theta_hat = array![0.0];

        let classical = calc_standard_errors(&loglik, &theta_hat).unwrap();
        let robust = calc_robust_standard_errors(&loglik, &contributions, &theta_hat).unwrap();

        assert_relative_eq!(classical[0], 0.5, epsilon = 1e-4);
        assert_relative_eq!(robust[0], 0.5, epsilon = 1e-4);
    }
}
