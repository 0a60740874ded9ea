//! Nutrient identifiers, NPK triples and general status bands
//!
//! Every per-nutrient output in the crate is emitted in the fixed order
//! N, P, K (see [`Nutrient::ALL`]).

use serde::{Deserialize, Serialize};

/// Soil macronutrient
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Nutrient {
    Nitrogen,   // N
    Phosphorus, // P
    Potassium,  // K
}

impl Nutrient {
    /// Display and iteration order
    pub const ALL: [Nutrient; 3] = [Nutrient::Nitrogen, Nutrient::Phosphorus, Nutrient::Potassium];

    /// Chemical symbol ("N", "P", "K")
    pub fn symbol(&self) -> &'static str {
        match self {
            Nutrient::Nitrogen => "N",
            Nutrient::Phosphorus => "P",
            Nutrient::Potassium => "K",
        }
    }

    pub fn display_text(&self) -> &'static str {
        match self {
            Nutrient::Nitrogen => "Nitrogen",
            Nutrient::Phosphorus => "Phosphorus",
            Nutrient::Potassium => "Potassium",
        }
    }

    /// General (crop-independent) low/high thresholds in mg/kg
    fn status_bands(&self) -> (f64, f64) {
        match self {
            Nutrient::Nitrogen => (60.0, 150.0),
            Nutrient::Phosphorus => (30.0, 90.0),
            Nutrient::Potassium => (50.0, 120.0),
        }
    }
}

/// An N/P/K triple in mg/kg
///
/// Used for soil readings, nutrient targets and signed differences alike.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Npk {
    pub n: f64,
    pub p: f64,
    pub k: f64,
}

impl Npk {
    pub fn new(n: f64, p: f64, k: f64) -> Self {
        Self { n, p, k }
    }

    pub fn get(&self, nutrient: Nutrient) -> f64 {
        match nutrient {
            Nutrient::Nitrogen => self.n,
            Nutrient::Phosphorus => self.p,
            Nutrient::Potassium => self.k,
        }
    }

    /// Build a triple by evaluating `f` for N, P and K in order
    pub fn from_fn(mut f: impl FnMut(Nutrient) -> f64) -> Self {
        Self {
            n: f(Nutrient::Nitrogen),
            p: f(Nutrient::Phosphorus),
            k: f(Nutrient::Potassium),
        }
    }

    /// Feature vector in model order [N, P, K]
    pub fn as_array(&self) -> [f64; 3] {
        [self.n, self.p, self.k]
    }

    /// Iterate `(nutrient, value)` pairs in N, P, K order
    pub fn iter(&self) -> impl Iterator<Item = (Nutrient, f64)> + '_ {
        Nutrient::ALL.into_iter().map(move |nut| (nut, self.get(nut)))
    }
}

/// Coarse status of a single reading against general agronomic bands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NutrientStatus {
    Low,
    Optimal,
    High,
}

impl NutrientStatus {
    /// Classify a reading; both band edges count as Optimal
    pub fn classify(nutrient: Nutrient, value: f64) -> Self {
        let (low, high) = nutrient.status_bands();
        if value < low {
            NutrientStatus::Low
        } else if value > high {
            NutrientStatus::High
        } else {
            NutrientStatus::Optimal
        }
    }

    pub fn display_text(&self) -> &'static str {
        match self {
            NutrientStatus::Low => "Low",
            NutrientStatus::Optimal => "Optimal",
            NutrientStatus::High => "High",
        }
    }
}

/// Round to two decimals (mg/kg precision used by the gap calculations)
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_order() {
        let symbols: Vec<&str> = Nutrient::ALL.iter().map(|n| n.symbol()).collect();
        assert_eq!(symbols, vec!["N", "P", "K"]);
    }

    #[test]
    fn test_npk_accessors() {
        let npk = Npk::new(100.0, 50.0, 80.0);
        assert_eq!(npk.get(Nutrient::Phosphorus), 50.0);
        assert_eq!(npk.as_array(), [100.0, 50.0, 80.0]);
        let doubled = Npk::from_fn(|nut| npk.get(nut) * 2.0);
        assert_eq!(doubled, Npk::new(200.0, 100.0, 160.0));
    }

    #[test]
    fn test_status_bands() {
        assert_eq!(NutrientStatus::classify(Nutrient::Nitrogen, 59.9), NutrientStatus::Low);
        assert_eq!(NutrientStatus::classify(Nutrient::Nitrogen, 60.0), NutrientStatus::Optimal);
        assert_eq!(NutrientStatus::classify(Nutrient::Nitrogen, 150.0), NutrientStatus::Optimal);
        assert_eq!(NutrientStatus::classify(Nutrient::Phosphorus, 95.0), NutrientStatus::High);
        assert_eq!(NutrientStatus::classify(Nutrient::Potassium, 30.0), NutrientStatus::Low);
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(-30.004), -30.0);
        assert_eq!(round2(12.345678), 12.35);
    }
}
