//! Crop Knowledge Table
//!
//! Per-crop seasonal nutrient impact, rotation family and optimal NPK ranges.
//! The table is an ordered slice: rotation tie-breaks follow this order.
//!
//! Data sources:
//! - Nutrient impact: mg/kg change per season (negative = depletes)
//! - Optimal ranges: mg/kg, (min, max) per nutrient

use serde::Serialize;

use super::nutrients::{Npk, Nutrient};
use crate::error::{AdvisorError, Result};

/// Botanical/agronomic grouping used for rotation compatibility
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CropFamily {
    Cereal,
    Legume,
    CashCrop,
    Grass,
    Solanaceae,
    Allium,
}

impl CropFamily {
    /// Key as used in the rotation tables ("cash_crop", ...)
    pub fn key(&self) -> &'static str {
        match self {
            CropFamily::Cereal => "cereal",
            CropFamily::Legume => "legume",
            CropFamily::CashCrop => "cash_crop",
            CropFamily::Grass => "grass",
            CropFamily::Solanaceae => "solanaceae",
            CropFamily::Allium => "allium",
        }
    }

    pub fn display_text(&self) -> &'static str {
        match self {
            CropFamily::Cereal => "Cereal",
            CropFamily::Legume => "Legume",
            CropFamily::CashCrop => "Cash Crop",
            CropFamily::Grass => "Grass",
            CropFamily::Solanaceae => "Solanaceae",
            CropFamily::Allium => "Allium",
        }
    }
}

/// Signed nutrient change per season (positive = adds to soil)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NutrientImpact {
    pub n: i32,
    pub p: i32,
    pub k: i32,
}

impl NutrientImpact {
    pub fn get(&self, nutrient: Nutrient) -> i32 {
        match nutrient {
            Nutrient::Nitrogen => self.n,
            Nutrient::Phosphorus => self.p,
            Nutrient::Potassium => self.k,
        }
    }
}

/// Optimal range for one nutrient (mg/kg)
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OptimalRange {
    pub min: f64,
    pub max: f64,
}

impl OptimalRange {
    pub fn midpoint(&self) -> f64 {
        (self.min + self.max) / 2.0
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Optimal ranges for N, P and K
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NutrientRequirements {
    pub n: OptimalRange,
    pub p: OptimalRange,
    pub k: OptimalRange,
}

impl NutrientRequirements {
    pub fn get(&self, nutrient: Nutrient) -> OptimalRange {
        match nutrient {
            Nutrient::Nitrogen => self.n,
            Nutrient::Phosphorus => self.p,
            Nutrient::Potassium => self.k,
        }
    }

    pub fn midpoints(&self) -> Npk {
        Npk::from_fn(|nut| self.get(nut).midpoint())
    }

    pub fn minimums(&self) -> Npk {
        Npk::from_fn(|nut| self.get(nut).min)
    }
}

/// A crop known to the advisor
#[derive(Debug, Clone, Serialize)]
pub struct Crop {
    pub name: &'static str,
    pub family: CropFamily,
    pub impact: NutrientImpact,
    pub requirements: NutrientRequirements,
    /// Cosmetic only
    pub glyph: &'static str,
}

const fn range(min: f64, max: f64) -> OptimalRange {
    OptimalRange { min, max }
}

const fn crop(
    name: &'static str,
    family: CropFamily,
    impact: (i32, i32, i32),
    requirements: (OptimalRange, OptimalRange, OptimalRange),
    glyph: &'static str,
) -> Crop {
    Crop {
        name,
        family,
        impact: NutrientImpact { n: impact.0, p: impact.1, k: impact.2 },
        requirements: NutrientRequirements {
            n: requirements.0,
            p: requirements.1,
            k: requirements.2,
        },
        glyph,
    }
}

// ============================================================================
// EMBEDDED CROP TABLE
// ============================================================================

#[rustfmt::skip]
static CROPS: &[Crop] = &[
    crop("Rice",      CropFamily::Cereal,     (-40, -15, -20), (range(80.0, 120.0),  range(40.0, 60.0),  range(40.0, 60.0)),   "🌾"),
    crop("Wheat",     CropFamily::Cereal,     (-35, -18, -15), (range(100.0, 140.0), range(50.0, 70.0),  range(50.0, 70.0)),   "🌿"),
    crop("Corn",      CropFamily::Cereal,     (-50, -20, -30), (range(120.0, 180.0), range(60.0, 90.0),  range(60.0, 100.0)),  "🌽"),
    crop("Barley",    CropFamily::Cereal,     (-25, -10, -12), (range(60.0, 100.0),  range(30.0, 50.0),  range(40.0, 60.0)),   "🌾"),
    crop("Soybean",   CropFamily::Legume,     (20, -10, -15),  (range(40.0, 80.0),   range(40.0, 80.0),  range(80.0, 120.0)),  "🫘"),
    crop("Cotton",    CropFamily::CashCrop,   (-30, -25, -35), (range(100.0, 150.0), range(50.0, 80.0),  range(80.0, 120.0)),  "🧶"),
    crop("Sugarcane", CropFamily::Grass,      (-60, -25, -40), (range(150.0, 200.0), range(60.0, 100.0), range(100.0, 150.0)), "🎋"),
    crop("Tomato",    CropFamily::Solanaceae, (-35, -30, -45), (range(120.0, 160.0), range(80.0, 120.0), range(150.0, 200.0)), "🍅"),
    crop("Potato",    CropFamily::Solanaceae, (-25, -20, -40), (range(100.0, 140.0), range(60.0, 100.0), range(120.0, 180.0)), "🥔"),
    crop("Onion",     CropFamily::Allium,     (-20, -15, -30), (range(80.0, 120.0),  range(50.0, 80.0),  range(100.0, 140.0)), "🧅"),
];

// ============================================================================
// LOOKUP FUNCTIONS
// ============================================================================

/// All crops in knowledge-base order
pub fn all_crops() -> &'static [Crop] {
    CROPS
}

/// Exact (case-sensitive) lookup by crop name
pub fn find_crop(name: &str) -> Option<&'static Crop> {
    CROPS.iter().find(|c| c.name == name)
}

/// Lookup that fails with `UnknownCrop`
pub fn require_crop(name: &str) -> Result<&'static Crop> {
    find_crop(name).ok_or_else(|| AdvisorError::UnknownCrop(name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_order_and_uniqueness() {
        let names: Vec<&str> = all_crops().iter().map(|c| c.name).collect();
        assert_eq!(names[0], "Rice");
        assert_eq!(names.len(), 10);
        let mut dedup = names.clone();
        dedup.sort();
        dedup.dedup();
        assert_eq!(dedup.len(), names.len());
    }

    #[test]
    fn test_ranges_are_ordered() {
        for c in all_crops() {
            for nut in Nutrient::ALL {
                let r = c.requirements.get(nut);
                assert!(r.min < r.max, "{} {:?}", c.name, nut);
            }
        }
    }

    #[test]
    fn test_range_contains_both_edges() {
        let rice_k = find_crop("Rice").unwrap().requirements.get(Nutrient::Potassium);
        assert!(rice_k.contains(40.0));
        assert!(rice_k.contains(60.0));
        assert!(!rice_k.contains(39.99));
        assert!(!rice_k.contains(80.0));
    }

    #[test]
    fn test_soybean_is_only_nitrogen_fixer() {
        let fixers: Vec<&str> = all_crops()
            .iter()
            .filter(|c| c.impact.n > 0)
            .map(|c| c.name)
            .collect();
        assert_eq!(fixers, vec!["Soybean"]);
    }

    #[test]
    fn test_lookup() {
        let rice = find_crop("Rice").unwrap();
        assert_eq!(rice.family, CropFamily::Cereal);
        assert_eq!(rice.requirements.midpoints(), Npk::new(100.0, 50.0, 50.0));
        assert!(find_crop("rice").is_none());
        assert_eq!(
            require_crop("Quinoa").unwrap_err(),
            AdvisorError::UnknownCrop("Quinoa".to_string())
        );
    }
}
