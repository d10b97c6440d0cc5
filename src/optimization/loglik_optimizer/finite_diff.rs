//! loglik_optimizer::finite_diff — numerical Hessians for inference.
//!
//! Purpose
//! -------
//! Approximate the Hessian of a scalar log-likelihood at an estimate, so the
//! inference layer can invert the observed information without depending on
//! the `finitediff` API directly.
//!
//! Conventions
//! -----------
//! - [`scalar_hessian`] uses a second-difference stencil on the function
//!   values with step `ε^{1/4}·max(|θ_i|, 1)`. When the stencil yields a
//!   non-finite entry it falls back to [`compute_hessian`] over a
//!   central-difference gradient.
//! - Returned matrices are validated and symmetric.
use crate::optimization::{
    errors::OptResult,
    loglik_optimizer::{
        types::{Grad, Hessian, Theta},
        validation::validate_hessian,
    },
};
use finitediff::FiniteDiff;

/// Relative step of the second-difference stencil, roughly `ε^{1/4}`.
const HESSIAN_STEP: f64 = 1e-4;

/// Hessian of `f` at `theta` from a gradient-producing function `g`.
///
/// # Errors
/// `HessianDimMismatch` or `InvalidHessian` when both the central and the
/// forward approximation fail validation.
pub fn compute_hessian<G: Fn(&Theta) -> Grad>(g: &G, theta: &Theta) -> OptResult<Hessian> {
    let dim = theta.len();
    let mut cent_hess = theta.central_hessian(g);
    if validate_hessian(&cent_hess, dim).is_ok() {
        symmetrize_hess(&mut cent_hess);
        return Ok(cent_hess);
    }
    let mut forward_hess = theta.forward_hessian(g);
    validate_hessian(&forward_hess, dim)?;
    symmetrize_hess(&mut forward_hess);
    Ok(forward_hess)
}

/// Hessian of a scalar function `f` at `theta`.
pub fn scalar_hessian<F: Fn(&Theta) -> f64>(f: &F, theta: &Theta) -> OptResult<Hessian> {
    let dim = theta.len();
    let steps: Vec<f64> = theta.iter().map(|t| HESSIAN_STEP * t.abs().max(1.0)).collect();
    let f0 = f(theta);
    let eval = |moves: &[(usize, f64)]| {
        let mut x = theta.clone();
        for &(i, d) in moves {
            x[i] += d;
        }
        f(&x)
    };

    let mut hess = Hessian::zeros((dim, dim));
    for i in 0..dim {
        let hi = steps[i];
        hess[[i, i]] = (eval(&[(i, hi)]) - 2.0 * f0 + eval(&[(i, -hi)])) / (hi * hi);
        for j in 0..i {
            let hj = steps[j];
            let v = (eval(&[(i, hi), (j, hj)]) - eval(&[(i, hi), (j, -hj)])
                - eval(&[(i, -hi), (j, hj)])
                + eval(&[(i, -hi), (j, -hj)]))
                / (4.0 * hi * hj);
            hess[[i, j]] = v;
            hess[[j, i]] = v;
        }
    }
    if validate_hessian(&hess, dim).is_ok() {
        return Ok(hess);
    }
    let grad = |x: &Theta| -> Grad { x.central_diff(f) };
    compute_hessian(&grad, theta)
}

fn symmetrize_hess(hess: &mut Hessian) {
    for i in 0..hess.nrows() {
        for j in 0..i {
            let avg = 0.5 * (hess[[i, j]] + hess[[j, i]]);
            hess[[i, j]] = avg;
            hess[[j, i]] = avg;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::{Array2, array};

    #[test]
    // Purpose
    // -------
    // The scalar Hessian of a quadratic form matches its analytic matrix.
    //
    // Given
    // -----
    // - f(x) = x₀² + 3x₀x₁ + 2x₁², Hessian [[2, 3], [3, 4]].
    //
    // Expect
    // ------
    // - `scalar_hessian` ≈ the analytic matrix and is exactly symmetric.
    fn scalar_hessian_matches_quadratic_form() {
        let f = |x: &Theta| x[0].powi(2) + 3.0 * x[0] * x[1] + 2.0 * x[1].powi(2);

        let hess = scalar_hessian(&f, &array![0.3, -0.7]).unwrap();

        assert_relative_eq!(hess[[0, 0]], 2.0, epsilon = 1e-4);
        assert_relative_eq!(hess[[0, 1]], 3.0, epsilon = 1e-4);
        assert_relative_eq!(hess[[1, 1]], 4.0, epsilon = 1e-4);
        assert_eq!(hess[[0, 1]], hess[[1, 0]]);
    }

    #[test]
    // Purpose
    // -------
    // Symmetrization averages mirrored entries.
    //
    // Given
    // -----
    // - [[1, 2], [4, 1]].
    //
    // Expect
    // ------
    // - Off-diagonals become 3.
    fn symmetrize_hess_averages_off_diagonals() {
        let mut hess: Array2<f64> = array![[1.0, 2.0], [4.0, 1.0]];
        symmetrize_hess(&mut hess);
        assert_eq!(hess, array![[1.0, 3.0], [3.0, 1.0]]);
    }
}
