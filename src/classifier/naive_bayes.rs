//! Gaussian Naive Bayes
//!
//! Per-class feature means and variances with class priors. Variances are
//! smoothed by `var_smoothing × max feature variance` as in the usual
//! formulation, which keeps constant features from producing zero variance.
//!
//! `predict` and `predict_probabilities` share one joint log-likelihood, so
//! the predicted index is always the first argmax of the distribution.

use serde::{Deserialize, Serialize};

use super::Features;
use crate::error::{AdvisorError, Result};

const LN_2PI: f64 = 1.837_877_066_409_345_3;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GaussianNb {
    pub class_priors: Vec<f64>,
    pub means: Vec<Features>,
    pub variances: Vec<Features>,
}

impl GaussianNb {
    /// Fit on scaled rows with label indices in `0..n_classes`
    ///
    /// Every class must have at least one row.
    pub fn fit(
        rows: &[Features],
        labels: &[usize],
        n_classes: usize,
        var_smoothing: f64,
    ) -> Result<Self> {
        if rows.len() != labels.len() {
            return Err(AdvisorError::invalid(format!(
                "{} rows but {} labels",
                rows.len(),
                labels.len()
            )));
        }
        if rows.is_empty() || n_classes == 0 {
            return Err(AdvisorError::invalid("cannot fit classifier on empty data"));
        }

        let mut counts = vec![0usize; n_classes];
        let mut sums = vec![[0.0; 3]; n_classes];
        for (row, &label) in rows.iter().zip(labels) {
            if label >= n_classes {
                return Err(AdvisorError::invalid(format!("label {} out of range", label)));
            }
            counts[label] += 1;
            for i in 0..3 {
                sums[label][i] += row[i];
            }
        }
        if let Some(empty) = counts.iter().position(|&c| c == 0) {
            return Err(AdvisorError::invalid(format!("class {} has no training rows", empty)));
        }

        let means: Vec<Features> = sums
            .iter()
            .zip(&counts)
            .map(|(s, &c)| [s[0] / c as f64, s[1] / c as f64, s[2] / c as f64])
            .collect();

        let mut variances = vec![[0.0; 3]; n_classes];
        for (row, &label) in rows.iter().zip(labels) {
            for i in 0..3 {
                variances[label][i] += (row[i] - means[label][i]).powi(2) / counts[label] as f64;
            }
        }

        let epsilon = var_smoothing * max_feature_variance(rows).max(f64::MIN_POSITIVE);
        for var in variances.iter_mut() {
            for v in var.iter_mut() {
                *v += epsilon;
            }
        }

        let total = rows.len() as f64;
        let class_priors = counts.iter().map(|&c| c as f64 / total).collect();

        Ok(Self { class_priors, means, variances })
    }

    pub fn n_classes(&self) -> usize {
        self.class_priors.len()
    }

    fn joint_log_likelihood(&self, x: &Features) -> Vec<f64> {
        self.class_priors
            .iter()
            .zip(self.means.iter().zip(&self.variances))
            .map(|(prior, (mean, var))| {
                let mut ll = prior.ln();
                for i in 0..3 {
                    ll -= 0.5 * (LN_2PI + var[i].ln() + (x[i] - mean[i]).powi(2) / var[i]);
                }
                ll
            })
            .collect()
    }

    /// First index of the maximum joint log-likelihood
    pub fn predict(&self, x: &Features) -> usize {
        let jll = self.joint_log_likelihood(x);
        let mut best = 0;
        for (idx, value) in jll.iter().enumerate() {
            if *value > jll[best] {
                best = idx;
            }
        }
        best
    }

    /// Softmax of the joint log-likelihood (sums to 1)
    pub fn predict_probabilities(&self, x: &Features) -> Vec<f64> {
        let jll = self.joint_log_likelihood(x);
        let max = jll.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let exps: Vec<f64> = jll.iter().map(|v| (v - max).exp()).collect();
        let sum: f64 = exps.iter().sum();
        exps.into_iter().map(|e| e / sum).collect()
    }

    pub(crate) fn is_valid(&self) -> bool {
        let n = self.class_priors.len();
        n > 0
            && self.means.len() == n
            && self.variances.len() == n
            && self.class_priors.iter().all(|p| p.is_finite() && *p > 0.0)
            && self.variances.iter().flatten().all(|v| v.is_finite() && *v > 0.0)
            && self.means.iter().flatten().all(|m| m.is_finite())
    }
}

fn max_feature_variance(rows: &[Features]) -> f64 {
    let count = rows.len() as f64;
    (0..3)
        .map(|i| {
            let mean = rows.iter().map(|r| r[i]).sum::<f64>() / count;
            rows.iter().map(|r| (r[i] - mean).powi(2)).sum::<f64>() / count
        })
        .fold(0.0, f64::max)
}
