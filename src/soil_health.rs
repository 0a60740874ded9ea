//! Soil Health Scorer
//!
//! Composite 0-100 score from N, P, K readings:
//! 1. Gaussian bell per nutrient around a fixed agronomic optimum
//! 2. Weighted base: 0.35·N + 0.30·P + 0.35·K
//! 3. Balance bonus (0-10) when max/min nutrient ratio < 2.5
//! 4. score = min(100, round(base + bonus, 1))
//!
//! Total over all non-negative inputs: zero readings disable the balance
//! bonus instead of dividing by zero.

use serde::Serialize;

/// (optimum, sigma) per nutrient in mg/kg
const N_BELL: (f64, f64) = (105.0, 55.0);
const P_BELL: (f64, f64) = (60.0, 35.0);
const K_BELL: (f64, f64) = (100.0, 50.0);

const N_WEIGHT: f64 = 0.35;
const P_WEIGHT: f64 = 0.30;
const K_WEIGHT: f64 = 0.35;

/// Ratio at and above which no balance bonus is given
const BALANCE_RATIO_LIMIT: f64 = 2.5;
const MAX_BALANCE_BONUS: f64 = 10.0;

/// Letter-style grade for a health score
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum HealthGrade {
    Poor,
    Fair,
    Good,
    Excellent,
}

impl HealthGrade {
    /// ≥80 Excellent, ≥60 Good, ≥40 Fair, else Poor
    pub fn from_score(score: f64) -> Self {
        if score >= 80.0 {
            HealthGrade::Excellent
        } else if score >= 60.0 {
            HealthGrade::Good
        } else if score >= 40.0 {
            HealthGrade::Fair
        } else {
            HealthGrade::Poor
        }
    }

    pub fn display_text(&self) -> &'static str {
        match self {
            HealthGrade::Excellent => "Excellent",
            HealthGrade::Good => "Good",
            HealthGrade::Fair => "Fair",
            HealthGrade::Poor => "Poor",
        }
    }

    pub fn interpretation(&self) -> &'static str {
        match self {
            HealthGrade::Excellent => {
                "Nutrient levels are well-balanced and within optimal ranges."
            }
            HealthGrade::Good => {
                "Soil is in good health; minor adjustments could optimise it for specific crops."
            }
            HealthGrade::Fair => "Consider targeted nutrient amendments to improve balance.",
            HealthGrade::Poor => "One or more nutrients are significantly outside optimal ranges.",
        }
    }
}

/// Breakdown of a soil health score
#[derive(Debug, Clone, Serialize)]
pub struct SoilHealthReport {
    pub nitrogen_bell: f64,
    pub phosphorus_bell: f64,
    pub potassium_bell: f64,
    pub base: f64,
    pub balance_bonus: f64,
    pub score: f64,
    pub grade: HealthGrade,
}

/// Gaussian bell scaled to 0-100, peaking at `optimum`
#[inline]
pub fn bell(value: f64, optimum: f64, sigma: f64) -> f64 {
    let z = (value - optimum) / sigma;
    100.0 * libm::exp(-0.5 * z * z)
}

/// Bonus for evenly balanced nutrients; 0 if any reading is zero
pub fn balance_bonus(n: f64, p: f64, k: f64) -> f64 {
    let min = n.min(p).min(k);
    if min <= 0.0 {
        return 0.0;
    }
    let max = n.max(p).max(k);
    let ratio = max / min;

    if ratio < BALANCE_RATIO_LIMIT {
        (MAX_BALANCE_BONUS * (1.0 - (ratio - 1.0) / 1.5)).max(0.0)
    } else {
        0.0
    }
}

/// Full breakdown of the soil health score
pub fn assess_soil_health(n: f64, p: f64, k: f64) -> SoilHealthReport {
    let nitrogen_bell = bell(n, N_BELL.0, N_BELL.1);
    let phosphorus_bell = bell(p, P_BELL.0, P_BELL.1);
    let potassium_bell = bell(k, K_BELL.0, K_BELL.1);

    let base = N_WEIGHT * nitrogen_bell + P_WEIGHT * phosphorus_bell + K_WEIGHT * potassium_bell;
    let bonus = balance_bonus(n, p, k);

    let score = (((base + bonus) * 10.0).round() / 10.0).min(100.0);

    SoilHealthReport {
        nitrogen_bell,
        phosphorus_bell,
        potassium_bell,
        base,
        balance_bonus: bonus,
        score,
        grade: HealthGrade::from_score(score),
    }
}

/// Soil health score in [0, 100]
pub fn score_soil_health(n: f64, p: f64, k: f64) -> f64 {
    assess_soil_health(n, p, k).score
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_bell_peak_and_one_sigma() {
        assert_relative_eq!(bell(105.0, 105.0, 55.0), 100.0);
        assert_relative_eq!(bell(160.0, 105.0, 55.0), 100.0 * (-0.5f64).exp(), epsilon = 1e-9);
    }

    #[test]
    fn test_optimum_scores_excellent() {
        let report = assess_soil_health(105.0, 60.0, 100.0);
        // ratio 1.75 → bonus 5, capped at 100
        assert_relative_eq!(report.balance_bonus, 5.0, epsilon = 1e-9);
        assert_eq!(report.score, 100.0);
        assert_eq!(report.grade, HealthGrade::Excellent);
    }

    #[test]
    fn test_zero_readings_no_bonus() {
        let report = assess_soil_health(0.0, 0.0, 0.0);
        assert_eq!(report.balance_bonus, 0.0);
        assert!(report.score < 50.0);
        assert_eq!(report.grade, HealthGrade::Poor);
    }

    #[test]
    fn test_unbalanced_ratio_no_bonus() {
        // 150/50 = 3.0 ≥ 2.5
        assert_eq!(balance_bonus(150.0, 50.0, 100.0), 0.0);
        // Perfectly even → full bonus
        assert_relative_eq!(balance_bonus(80.0, 80.0, 80.0), 10.0);
    }

    #[test]
    fn test_score_rounded_to_one_decimal() {
        let score = score_soil_health(100.0, 50.0, 80.0);
        assert_relative_eq!(score * 10.0, (score * 10.0).round(), epsilon = 1e-9);
    }

    #[test]
    fn test_grade_bands() {
        assert_eq!(HealthGrade::from_score(80.0), HealthGrade::Excellent);
        assert_eq!(HealthGrade::from_score(79.9), HealthGrade::Good);
        assert_eq!(HealthGrade::from_score(60.0), HealthGrade::Good);
        assert_eq!(HealthGrade::from_score(40.0), HealthGrade::Fair);
        assert_eq!(HealthGrade::from_score(39.9), HealthGrade::Poor);
    }
}
