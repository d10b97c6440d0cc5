//! Numerical stability utilities.
//!
//! Provides safe implementations of the nonlinear transforms used to map the
//! optimizer's unconstrained `θ` into model-space parameters.
//! Explicit cutoffs (`x > 20.0`) keep `f64` arithmetic in a well-conditioned
//! regime.
//!
//! # Provided items
//! - [`STATIONARITY_MARGIN`]: a small ε buffer keeping `|β| < 1` and partial
//!   autocorrelations strictly inside `(-1, 1)`.
//! - [`safe_softplus`] / [`safe_softplus_inv`]: ℝ ↔ (0, ∞).
//! - [`bounded_tanh`] / [`bounded_tanh_inv`]: ℝ ↔ (−(1 − margin), 1 − margin).
//! - [`pacf_to_coefficients`] / [`coefficients_to_pacf`]: Durbin–Levinson
//!   map between partial autocorrelations and polynomial coefficients.
use ndarray::{Array1, ArrayView1};

/// Buffer keeping stationarity / invertibility conditions strict.
pub const STATIONARITY_MARGIN: f64 = 1e-6;

/// Eigenvalues below this are treated as zero when inverting information
/// matrices.
pub const EIGEN_EPS: f64 = 1e-10;

/// Generic tolerance for clamping and float comparisons.
pub const GENERAL_TOL: f64 = 1e-12;

/// Numerically stable softplus: `ln(1 + exp(x))`.
pub fn safe_softplus(x: f64) -> f64 {
    if x > 20.0 { x } else { x.exp().ln_1p() }
}

/// Inverse of softplus on `(0, ∞)`: `ln(exp(x) - 1)`.
///
/// Inputs at or below zero are clamped to [`GENERAL_TOL`] first.
pub fn safe_softplus_inv(x: f64) -> f64 {
    let x = x.max(GENERAL_TOL);
    if x > 20.0 { x } else { x.exp_m1().ln() }
}

/// `(1 - STATIONARITY_MARGIN) · tanh(x)`.
pub fn bounded_tanh(x: f64) -> f64 {
    (1.0 - STATIONARITY_MARGIN) * x.tanh()
}

/// Inverse of [`bounded_tanh`]; inputs outside the open interval are pulled
/// just inside it.
pub fn bounded_tanh_inv(y: f64) -> f64 {
    let bound = 1.0 - STATIONARITY_MARGIN;
    let r = (y / bound).clamp(-1.0 + STATIONARITY_MARGIN, 1.0 - STATIONARITY_MARGIN);
    r.atanh()
}

/// Map unconstrained reals to the coefficients of a stationary
/// autoregressive polynomial `1 - φ₁B - … - φₚBᵖ`.
///
/// Each input is squashed by [`bounded_tanh`] into a partial autocorrelation
/// `r_k`, then the Durbin–Levinson recursion builds the coefficients:
/// `φ⁽ᵏ⁾_k = r_k`, `φ⁽ᵏ⁾_j = φ⁽ᵏ⁻¹⁾_j − r_k φ⁽ᵏ⁻¹⁾_{k−j}`.
pub fn pacf_to_coefficients(raw: ArrayView1<f64>) -> Array1<f64> {
    let p = raw.len();
    let mut phi = Array1::<f64>::zeros(p);
    let mut prev = Array1::<f64>::zeros(p);
    for k in 0..p {
        let r = bounded_tanh(raw[k]);
        prev.assign(&phi);
        phi[k] = r;
        for j in 0..k {
            phi[j] = prev[j] - r * prev[k - 1 - j];
        }
    }
    phi
}

/// Inverse of [`pacf_to_coefficients`].
///
/// Runs the Durbin–Levinson recursion backwards. Coefficients outside the
/// stationary region have some `|r_k| ≥ 1`; those are clamped inside the
/// bound so the result is always finite.
pub fn coefficients_to_pacf(coeffs: ArrayView1<f64>) -> Array1<f64> {
    let p = coeffs.len();
    let mut phi = coeffs.to_owned();
    let mut raw = Array1::<f64>::zeros(p);
    let bound = 1.0 - STATIONARITY_MARGIN;
    for k in (0..p).rev() {
        let r = phi[k].clamp(-bound, bound);
        raw[k] = bounded_tanh_inv(r);
        let denom = 1.0 - r * r;
        let prev = phi.clone();
        for j in 0..k {
            phi[j] = (prev[j] + r * prev[k - 1 - j]) / denom;
        }
    }
    raw
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    #[test]
    // Purpose
    // -------
    // Softplus and its inverse agree with the naive formulas and round-trip.
    //
    // Given
    // -----
    // - A grid of moderate inputs plus one large input past the cutoff.
    //
    // Expect
    // ------
    // - `safe_softplus(x) ≈ ln(1 + eˣ)` and `safe_softplus_inv` recovers `x`.
    fn softplus_matches_naive_and_inverts() {
        for &x in &[-5.0, -0.5, 0.0, 1.3, 7.0, 25.0] {
            let sp = safe_softplus(x);
            if x < 20.0 {
                assert_relative_eq!(sp, (1.0 + f64::exp(x)).ln(), epsilon = 1e-12);
            }
            assert_relative_eq!(safe_softplus_inv(sp), x, epsilon = 1e-8);
        }
    }

    #[test]
    // Purpose
    // -------
    // A single partial autocorrelation maps to itself as the AR(1) coefficient.
    //
    // Given
    // -----
    // - raw = [atanh(0.5)].
    //
    // Expect
    // ------
    // - φ ≈ [0.5] up to the stationarity margin.
    fn pacf_map_order_one_is_tanh() {
        let phi = pacf_to_coefficients(array![0.5_f64.atanh()].view());
        assert_relative_eq!(phi[0], 0.5, epsilon = 1e-5);
    }

    #[test]
    // Purpose
    // -------
    // Second-order coefficients satisfy the AR(2) stationarity triangle and
    // the inverse map recovers the raw inputs.
    //
    // Given
    // -----
    // - Several raw pairs, including large magnitudes.
    //
    // Expect
    // ------
    // - |φ₂| < 1, φ₁ + φ₂ < 1, φ₂ − φ₁ < 1.
    // - `coefficients_to_pacf(pacf_to_coefficients(raw)) ≈ raw` for moderate raw.
    fn pacf_map_order_two_is_stationary_and_invertible() {
        for raw in [array![0.3, -0.8], array![2.0, 1.5], array![-4.0, 0.1]] {
            let phi = pacf_to_coefficients(raw.view());
            assert!(phi[1].abs() < 1.0);
            assert!(phi[0] + phi[1] < 1.0);
            assert!(phi[1] - phi[0] < 1.0);
        }

        let raw = array![0.3, -0.8, 0.45];
        let back = coefficients_to_pacf(pacf_to_coefficients(raw.view()).view());
        for (a, b) in raw.iter().zip(back.iter()) {
            assert_relative_eq!(*a, *b, epsilon = 1e-6);
        }
    }
}
