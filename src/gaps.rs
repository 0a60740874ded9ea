//! Nutrient Gap Calculator
//!
//! Compares a soil reading against a target crop's optimal ranges.
//! `diffs = round(target - current, 2)`: positive means the soil needs more
//! of that nutrient, negative means it already holds an excess.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::{AdvisorError, Result};
use crate::knowledge::crops::require_crop;
use crate::knowledge::nutrients::{round2, Npk, Nutrient};

/// How a nutrient target is chosen from a crop's optimal range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Strategy {
    /// Middle of the optimal range
    #[default]
    Midpoint,
    /// Lower bound of the optimal range
    Minimum,
}

impl FromStr for Strategy {
    type Err = AdvisorError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "midpoint" | "mid" => Ok(Strategy::Midpoint),
            "minimum" | "min" => Ok(Strategy::Minimum),
            other => Err(AdvisorError::invalid(format!("unknown strategy: {}", other))),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::Midpoint => write!(f, "midpoint"),
            Strategy::Minimum => write!(f, "minimum"),
        }
    }
}

/// Gap calculation result
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NutrientGaps {
    /// target - current, rounded to 2 decimals
    pub diffs: Npk,
    /// Concrete target per nutrient
    pub targets: Npk,
}

impl NutrientGaps {
    /// Any nutrient more than 5 mg/kg above target
    pub fn has_excess(&self) -> bool {
        self.diffs.iter().any(|(_, d)| d < -5.0)
    }

    pub fn status(&self, nutrient: Nutrient) -> GapStatus {
        GapStatus::classify(self.diffs.get(nutrient))
    }
}

/// Human-facing classification of a single diff
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GapStatus {
    /// More than 5 mg/kg above target
    Excess,
    /// Above target by at most 5 mg/kg
    SlightExcess,
    Optimal,
    /// Up to 10 mg/kg short
    NearOptimal,
    /// 10-30 mg/kg short
    ModerateDeficit,
    /// More than 30 mg/kg short
    LargeDeficit,
}

impl GapStatus {
    pub fn classify(diff: f64) -> Self {
        if diff < -5.0 {
            GapStatus::Excess
        } else if diff < 0.0 {
            GapStatus::SlightExcess
        } else if diff == 0.0 {
            GapStatus::Optimal
        } else if diff <= 10.0 {
            GapStatus::NearOptimal
        } else if diff <= 30.0 {
            GapStatus::ModerateDeficit
        } else {
            GapStatus::LargeDeficit
        }
    }

    pub fn display_text(&self) -> &'static str {
        match self {
            GapStatus::Excess => "Excess",
            GapStatus::SlightExcess => "Slight excess",
            GapStatus::Optimal => "Optimal",
            GapStatus::NearOptimal => "Near optimal",
            GapStatus::ModerateDeficit => "Addition needed",
            GapStatus::LargeDeficit => "Large addition needed",
        }
    }
}

/// Compute additions (positive) and excesses (negative) against `target_crop`
///
/// Fails with `UnknownCrop` if the crop is not in the knowledge base.
pub fn compute_gaps(
    current_n: f64,
    current_p: f64,
    current_k: f64,
    target_crop: &str,
    strategy: Strategy,
) -> Result<NutrientGaps> {
    let crop = require_crop(target_crop)?;

    let raw_targets = match strategy {
        Strategy::Midpoint => crop.requirements.midpoints(),
        Strategy::Minimum => crop.requirements.minimums(),
    };
    let current = Npk::new(current_n, current_p, current_k);

    Ok(NutrientGaps {
        diffs: Npk::from_fn(|nut| round2(raw_targets.get(nut) - current.get(nut))),
        targets: Npk::from_fn(|nut| round2(raw_targets.get(nut))),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::knowledge::crops::find_crop;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_rice_midpoint_scenario() {
        let gaps = compute_gaps(100.0, 50.0, 80.0, "Rice", Strategy::Midpoint).unwrap();
        assert_eq!(gaps.targets, Npk::new(100.0, 50.0, 50.0));
        assert_eq!(gaps.diffs, Npk::new(0.0, 0.0, -30.0));
        assert!(gaps.has_excess());
        assert_eq!(gaps.status(Nutrient::Potassium), GapStatus::Excess);
        assert_eq!(gaps.status(Nutrient::Nitrogen), GapStatus::Optimal);
    }

    #[test]
    fn test_minimum_strategy_uses_lower_bound() {
        let gaps = compute_gaps(10.0, 10.0, 10.0, "Tomato", Strategy::Minimum).unwrap();
        let tomato = find_crop("Tomato").unwrap();
        for nut in Nutrient::ALL {
            assert_eq!(gaps.targets.get(nut), tomato.requirements.get(nut).min);
        }
        assert_eq!(gaps.diffs, Npk::new(110.0, 70.0, 140.0));
        assert!(!gaps.has_excess());
    }

    #[test]
    fn test_round_trip_with_fractional_readings() {
        let current = Npk::new(33.337, 71.111, 0.0);
        let gaps =
            compute_gaps(current.n, current.p, current.k, "Corn", Strategy::Midpoint).unwrap();
        for nut in Nutrient::ALL {
            assert_abs_diff_eq!(
                gaps.targets.get(nut) - gaps.diffs.get(nut),
                current.get(nut),
                epsilon = 0.01
            );
        }
    }

    #[test]
    fn test_unknown_crop() {
        let err = compute_gaps(1.0, 1.0, 1.0, "Quinoa", Strategy::Midpoint).unwrap_err();
        assert_eq!(err, AdvisorError::UnknownCrop("Quinoa".to_string()));
    }

    #[test]
    fn test_strategy_parsing() {
        assert_eq!("mid".parse::<Strategy>().unwrap(), Strategy::Midpoint);
        assert_eq!("Minimum".parse::<Strategy>().unwrap(), Strategy::Minimum);
        assert!("max".parse::<Strategy>().is_err());
        assert_eq!(Strategy::Minimum.to_string(), "minimum");
    }

    #[test]
    fn test_gap_status_bands() {
        assert_eq!(GapStatus::classify(-5.01), GapStatus::Excess);
        assert_eq!(GapStatus::classify(-5.0), GapStatus::SlightExcess);
        assert_eq!(GapStatus::classify(10.0), GapStatus::NearOptimal);
        assert_eq!(GapStatus::classify(30.0), GapStatus::ModerateDeficit);
        assert_eq!(GapStatus::classify(30.5), GapStatus::LargeDeficit);
    }
}
