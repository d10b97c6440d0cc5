//! Per-observation information criteria.
//!
//! With `LL` the maximized log-likelihood, `k` free parameters and `n`
//! observations:
//!
//! - Akaike: `(−2LL + 2k) / n`
//! - Bayes: `(−2LL + k ln n) / n`
//! - Shibata: `−2LL/n + ln((n + 2k)/n)`
//! - Hannan–Quinn: `(−2LL + 2k ln ln n) / n`
//!
//! Lower is better for all four.
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InformationCriterion {
    #[default]
    Akaike,
    Bayes,
    Shibata,
    HannanQuinn,
}

impl InformationCriterion {
    pub fn name(&self) -> &'static str {
        match self {
            InformationCriterion::Akaike => "Akaike",
            InformationCriterion::Bayes => "Bayes",
            InformationCriterion::Shibata => "Shibata",
            InformationCriterion::HannanQuinn => "Hannan-Quinn",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InformationCriteria {
    pub akaike: f64,
    pub bayes: f64,
    pub shibata: f64,
    pub hannan_quinn: f64,
}

impl InformationCriteria {
    pub fn compute(loglik: f64, k: usize, n: usize) -> Self {
        let (k, n) = (k as f64, n as f64);
        let dev = -2.0 * loglik;
        InformationCriteria {
            akaike: (dev + 2.0 * k) / n,
            bayes: (dev + k * n.ln()) / n,
            shibata: dev / n + ((n + 2.0 * k) / n).ln(),
            hannan_quinn: (dev + 2.0 * k * n.ln().ln()) / n,
        }
    }

    pub fn get(&self, criterion: InformationCriterion) -> f64 {
        match criterion {
            InformationCriterion::Akaike => self.akaike,
            InformationCriterion::Bayes => self.bayes,
            InformationCriterion::Shibata => self.shibata,
            InformationCriterion::HannanQuinn => self.hannan_quinn,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    // Purpose
    // -------
    // Check every criterion against a hand computation.
    //
    // Given
    // -----
    // - LL = 1000, k = 6, n = 800.
    //
    // Expect
    // ------
    // - The four closed forms above.
    fn criteria_match_closed_forms() {
        let ic = InformationCriteria::compute(1000.0, 6, 800);
        let n: f64 = 800.0;
        assert_relative_eq!(ic.akaike, (-2000.0 + 12.0) / n);
        assert_relative_eq!(ic.bayes, (-2000.0 + 6.0 * n.ln()) / n);
        assert_relative_eq!(ic.shibata, -2000.0 / n + (812.0 / n).ln());
        assert_relative_eq!(ic.hannan_quinn, (-2000.0 + 12.0 * n.ln().ln()) / n);
        assert_eq!(ic.get(InformationCriterion::Bayes), ic.bayes);
    }

    #[test]
    // Purpose
    // -------
    // BIC charges more than AIC for extra parameters once ln n > 2.
    //
    // Given
    // -----
    // - Equal log-likelihoods with 6 and 12 parameters, n = 800.
    //
    // Expect
    // ------
    // - The BIC gap exceeds the AIC gap.
    fn bayes_penalizes_extra_parameters_more_than_akaike() {
        let small = InformationCriteria::compute(1000.0, 6, 800);
        let large = InformationCriteria::compute(1000.0, 12, 800);
        assert!(large.bayes - small.bayes > large.akaike - small.akaike);
    }

    #[test]
    // Purpose
    // -------
    // Criteria deserialize from snake_case; Akaike is the default.
    //
    // Given
    // -----
    // - `"hannan_quinn"`.
    //
    // Expect
    // ------
    // - `HannanQuinn`; default `Akaike`.
    fn criterion_parses_from_snake_case() {
        let c: InformationCriterion = serde_json::from_str("\"hannan_quinn\"").unwrap();
        assert_eq!(c, InformationCriterion::HannanQuinn);
        assert_eq!(InformationCriterion::default(), InformationCriterion::Akaike);
    }
}
