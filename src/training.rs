//! Training Pipeline
//!
//! Stratified train/test split, model fitting and held-out evaluation.
//!
//! Pipeline: split → LabelEncoder (sorted names) → StandardScaler fitted on
//! the train rows → GaussianNb on the scaled rows → evaluate on the test rows.

use std::collections::BTreeMap;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rayon::prelude::*;
use serde::Serialize;

use crate::classifier::{
    CropClassifier, Features, GaussianNb, LabelEncoder, ModelBundle, StandardScaler,
};
use crate::data::Dataset;
use crate::error::{AdvisorError, Result};

/// Per-crop precision/recall/F1
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassMetrics {
    pub crop: String,
    pub precision: f64,
    pub recall: f64,
    pub f1_score: f64,
    pub support: usize,
}

/// Held-out evaluation summary (averages weighted by support)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvaluationReport {
    pub accuracy: f64,
    pub precision: f64,
    pub recall: f64,
    pub f1_score: f64,
    pub test_rows: usize,
    pub per_class: Vec<ClassMetrics>,
}

/// Split rows into (train, test), holding out `round(count × test_size)`
/// rows of every crop
///
/// A crop with at least two rows keeps at least one row on each side; a
/// single-row crop goes entirely to train. Same seed, same split.
pub fn stratified_split(
    dataset: &Dataset,
    test_size: f64,
    seed: u64,
) -> Result<(Dataset, Dataset)> {
    if !(test_size > 0.0 && test_size < 1.0) {
        return Err(AdvisorError::invalid(format!(
            "test_size must be in (0, 1), got {}",
            test_size
        )));
    }
    if dataset.rows.len() != dataset.labels.len() {
        return Err(AdvisorError::invalid("dataset rows and labels differ in length"));
    }

    // BTreeMap keeps class iteration order independent of hashing
    let mut by_class: BTreeMap<&str, Vec<usize>> = BTreeMap::new();
    for (idx, label) in dataset.labels.iter().enumerate() {
        by_class.entry(label.as_str()).or_default().push(idx);
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let mut train_idx = Vec::with_capacity(dataset.len());
    let mut test_idx = Vec::new();

    for indices in by_class.values_mut() {
        indices.shuffle(&mut rng);
        let count = indices.len();
        let n_test = if count < 2 {
            0
        } else {
            ((count as f64 * test_size).round() as usize).clamp(1, count - 1)
        };
        test_idx.extend_from_slice(&indices[..n_test]);
        train_idx.extend_from_slice(&indices[n_test..]);
    }

    train_idx.sort_unstable();
    test_idx.sort_unstable();

    let pick = |indices: &[usize]| Dataset {
        rows: indices.iter().map(|&i| dataset.rows[i]).collect(),
        labels: indices.iter().map(|&i| dataset.labels[i].clone()).collect(),
    };

    Ok((pick(&train_idx), pick(&test_idx)))
}

/// Fit encoder, scaler and classifier on `train`
pub fn fit_bundle(train: &Dataset, var_smoothing: f64) -> Result<ModelBundle> {
    if train.is_empty() {
        return Err(AdvisorError::invalid("cannot train on an empty dataset"));
    }

    let encoder = LabelEncoder::fit(&train.labels);
    let labels: Vec<usize> = train
        .labels
        .iter()
        .map(|label| {
            encoder
                .encode(label)
                .ok_or_else(|| AdvisorError::invalid(format!("unencodable label {}", label)))
        })
        .collect::<Result<_>>()?;

    let scaler = StandardScaler::fit(&train.rows)?;
    let scaled: Vec<Features> = train.rows.iter().map(|r| scaler.transform(r)).collect();
    let model = GaussianNb::fit(&scaled, &labels, encoder.len(), var_smoothing)?;

    tracing::info!(
        "Fitted classifier on {} rows across {} crops",
        train.len(),
        encoder.len()
    );
    ModelBundle::new(model, scaler, encoder, None)
}

fn ratio(num: usize, den: usize) -> f64 {
    if den == 0 {
        0.0
    } else {
        num as f64 / den as f64
    }
}

fn f1(precision: f64, recall: f64) -> f64 {
    if precision + recall == 0.0 {
        0.0
    } else {
        2.0 * precision * recall / (precision + recall)
    }
}

/// Evaluate a classifier on held-out rows
pub fn evaluate<C: CropClassifier + ?Sized>(
    classifier: &C,
    test: &Dataset,
) -> Result<EvaluationReport> {
    if test.is_empty() {
        return Err(AdvisorError::invalid("cannot evaluate on an empty dataset"));
    }

    let predicted: Vec<Option<&str>> = test
        .rows
        .par_iter()
        .map(|row| classifier.decode_label(classifier.predict(&classifier.transform(row))))
        .collect();

    // crop -> (true positives, predicted count, support)
    let mut tallies: BTreeMap<&str, (usize, usize, usize)> = BTreeMap::new();
    let mut correct = 0;
    for (truth, guess) in test.labels.iter().zip(predicted.iter().copied()) {
        tallies.entry(truth.as_str()).or_default().2 += 1;
        if let Some(guess) = guess {
            tallies.entry(guess).or_default().1 += 1;
            if guess == truth.as_str() {
                tallies.entry(guess).or_default().0 += 1;
                correct += 1;
            }
        }
    }

    let total = test.len();
    let per_class: Vec<ClassMetrics> = tallies
        .into_iter()
        .map(|(crop, (tp, predicted, support))| {
            let precision = ratio(tp, predicted);
            let recall = ratio(tp, support);
            ClassMetrics {
                crop: crop.to_string(),
                precision,
                recall,
                f1_score: f1(precision, recall),
                support,
            }
        })
        .collect();

    let weighted = |metric: fn(&ClassMetrics) -> f64| -> f64 {
        per_class
            .iter()
            .map(|c| metric(c) * c.support as f64)
            .sum::<f64>()
            / total as f64
    };

    Ok(EvaluationReport {
        accuracy: ratio(correct, total),
        precision: weighted(|c| c.precision),
        recall: weighted(|c| c.recall),
        f1_score: weighted(|c| c.f1_score),
        test_rows: total,
        per_class,
    })
}
