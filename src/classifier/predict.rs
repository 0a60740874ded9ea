//! Crop prediction from NPK readings
//!
//! The adapter trusts the classifier's own `predict` for the winning label
//! and only zips the probability vector against the target names; it never
//! re-derives the winner from the map, so tie-breaking stays with the model.

use rustc_hash::FxHashMap;
use serde::Serialize;

use super::CropClassifier;
use crate::error::{AdvisorError, Result};

/// Predicted crop plus the full probability distribution
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prediction {
    pub crop: String,
    /// One entry per supported crop
    pub probabilities: FxHashMap<String, f64>,
    /// Target names in label-index order, for stable ranking
    #[serde(skip)]
    order: Vec<String>,
}

impl Prediction {
    pub fn probability(&self, crop: &str) -> Option<f64> {
        self.probabilities.get(crop).copied()
    }

    /// Crops by descending probability; ties keep label-index order
    pub fn ranked(&self) -> Vec<(&str, f64)> {
        let mut ranked: Vec<(&str, f64)> = self
            .order
            .iter()
            .map(|name| (name.as_str(), self.probabilities.get(name).copied().unwrap_or(0.0)))
            .collect();
        ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        ranked
    }

    pub fn top(&self, n: usize) -> Vec<(&str, f64)> {
        let mut ranked = self.ranked();
        ranked.truncate(n);
        ranked
    }
}

const PROBABILITY_SUM_TOLERANCE: f64 = 1e-6;

fn check_positive(name: &str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(AdvisorError::invalid(format!("{} must be a positive number, got {}", name, value)))
    }
}

/// Predict the best crop for a soil reading
///
/// Fails with `InvalidInput` for non-positive readings or readings the
/// classifier cannot turn into a proper distribution, and with
/// `ModelUnavailable` if the classifier's outputs disagree with its metadata.
pub fn predict_crop<C: CropClassifier + ?Sized>(
    n: f64,
    p: f64,
    k: f64,
    classifier: &C,
) -> Result<Prediction> {
    check_positive("N", n)?;
    check_positive("P", p)?;
    check_positive("K", k)?;

    let scaled = classifier.transform(&[n, p, k]);
    let label = classifier.predict(&scaled);
    let crop = classifier
        .decode_label(label)
        .ok_or_else(|| AdvisorError::model(format!("classifier produced unknown label {}", label)))?
        .to_string();

    let targets = &classifier.metadata().target_names;
    let distribution = classifier.predict_probabilities(&scaled);
    if distribution.len() != targets.len() {
        return Err(AdvisorError::model(format!(
            "classifier returned {} probabilities for {} targets",
            distribution.len(),
            targets.len()
        )));
    }

    // Readings far outside the training range underflow every class likelihood
    let total: f64 = distribution.iter().sum();
    let well_formed = distribution
        .iter()
        .all(|prob| prob.is_finite() && (0.0..=1.0).contains(prob))
        && (total - 1.0).abs() <= PROBABILITY_SUM_TOLERANCE;
    if !well_formed {
        return Err(AdvisorError::invalid(format!(
            "reading ({}, {}, {}) is outside the classifier's domain",
            n, p, k
        )));
    }

    let probabilities = targets.iter().cloned().zip(distribution).collect();

    Ok(Prediction {
        crop,
        probabilities,
        order: targets.clone(),
    })
}
