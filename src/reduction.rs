//! Reduction Planner
//!
//! Turns gap-calculator targets into a plan for shedding excess nutrients.
//! A nutrient qualifies only when `current - target > 5` mg/kg; items are
//! emitted in fixed N, P, K order regardless of severity.

use serde::Serialize;

use crate::knowledge::nutrients::{round2, Npk, Nutrient};
use crate::knowledge::reduction_catalog::{crop_tip, techniques_for, ReductionTechnique};

/// Excess below or at this value is not flagged
const EXCESS_DEADBAND: f64 = 5.0;

/// Severity of an excess (exclusive bands, upper edges belong to the lower tier)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum ExcessSeverity {
    /// 5 < excess ≤ 15
    Mild,
    /// 15 < excess ≤ 30
    Moderate,
    /// excess > 30
    High,
}

impl ExcessSeverity {
    pub fn from_excess(excess: f64) -> Self {
        if excess > 30.0 {
            ExcessSeverity::High
        } else if excess > 15.0 {
            ExcessSeverity::Moderate
        } else {
            ExcessSeverity::Mild
        }
    }

    pub fn display_text(&self) -> &'static str {
        match self {
            ExcessSeverity::High => "high",
            ExcessSeverity::Moderate => "moderate",
            ExcessSeverity::Mild => "mild",
        }
    }
}

/// Plan entry for one nutrient in excess
#[derive(Debug, Clone, Serialize)]
pub struct ReductionItem {
    pub nutrient: Nutrient,
    pub current: f64,
    pub target: f64,
    /// current - target, rounded to 2 decimals
    pub excess: f64,
    pub severity: ExcessSeverity,
    pub techniques: Vec<&'static ReductionTechnique>,
    pub crop_tip: Option<&'static str>,
}

/// Build the reduction plan for a soil reading against `targets`
///
/// `targets` normally comes from [`crate::gaps::compute_gaps`] for the same crop.
pub fn plan_reduction(
    current_n: f64,
    current_p: f64,
    current_k: f64,
    target_crop: &str,
    targets: &Npk,
) -> Vec<ReductionItem> {
    let current = Npk::new(current_n, current_p, current_k);

    Nutrient::ALL
        .into_iter()
        .filter_map(|nutrient| {
            let excess = round2(current.get(nutrient) - targets.get(nutrient));
            if excess <= EXCESS_DEADBAND {
                return None;
            }

            Some(ReductionItem {
                nutrient,
                current: current.get(nutrient),
                target: targets.get(nutrient),
                excess,
                severity: ExcessSeverity::from_excess(excess),
                techniques: techniques_for(nutrient),
                crop_tip: crop_tip(target_crop, nutrient),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gaps::{compute_gaps, Strategy};

    #[test]
    fn test_rice_potassium_boundary_is_moderate() {
        let gaps = compute_gaps(100.0, 50.0, 80.0, "Rice", Strategy::Midpoint).unwrap();
        let plan = plan_reduction(100.0, 50.0, 80.0, "Rice", &gaps.targets);

        assert_eq!(plan.len(), 1);
        let item = &plan[0];
        assert_eq!(item.nutrient, Nutrient::Potassium);
        assert_eq!(item.excess, 30.0);
        assert_eq!(item.severity, ExcessSeverity::Moderate);
        assert_eq!(item.techniques.len(), 3);
        assert!(item.crop_tip.is_some());
    }

    #[test]
    fn test_severity_bands() {
        assert_eq!(ExcessSeverity::from_excess(30.01), ExcessSeverity::High);
        assert_eq!(ExcessSeverity::from_excess(30.0), ExcessSeverity::Moderate);
        assert_eq!(ExcessSeverity::from_excess(15.0), ExcessSeverity::Mild);
        assert_eq!(ExcessSeverity::from_excess(5.01), ExcessSeverity::Mild);
    }

    #[test]
    fn test_deadband_excludes_marginal_excess() {
        let targets = Npk::new(100.0, 50.0, 50.0);
        // N excess exactly 5, P below target, K excess 5.5
        let plan = plan_reduction(105.0, 40.0, 55.5, "Barley", &targets);
        assert_eq!(plan.len(), 1);
        assert_eq!(plan[0].nutrient, Nutrient::Potassium);
        assert!(plan[0].crop_tip.is_none());
    }

    #[test]
    fn test_fixed_nutrient_order() {
        let targets = Npk::new(50.0, 50.0, 50.0);
        // K most severe, N mildest: still emitted N, P, K
        let plan = plan_reduction(60.0, 70.0, 150.0, "Tomato", &targets);
        let order: Vec<Nutrient> = plan.iter().map(|i| i.nutrient).collect();
        assert_eq!(order, Nutrient::ALL.to_vec());
        assert_eq!(plan[0].severity, ExcessSeverity::Mild);
        assert_eq!(plan[2].severity, ExcessSeverity::High);
    }
}
