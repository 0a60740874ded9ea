//! Classifier Bundle
//!
//! JSON artifact holding the fitted scaler, classifier and label encoder plus
//! metadata. Loading validates every required key and the consistency of
//! their dimensions up front, so a bad artifact fails with
//! `ModelUnavailable` at load time rather than on first prediction.

use std::fs;
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use super::label_encoder::LabelEncoder;
use super::naive_bayes::GaussianNb;
use super::scaler::StandardScaler;
use super::{CropClassifier, Features, ModelMetadata};
use crate::error::{AdvisorError, Result};

/// Feature names in model order
pub const FEATURE_NAMES: [&str; 3] = ["N", "P", "K"];

/// Loaded, validated classifier bundle
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelBundle {
    pub model: GaussianNb,
    pub scaler: StandardScaler,
    pub label_encoder: LabelEncoder,
    #[serde(flatten)]
    pub metadata: ModelMetadata,
}

/// On-disk shape; every key optional so absence can be reported by name
#[derive(Debug, Deserialize)]
struct BundleFile {
    model: Option<GaussianNb>,
    scaler: Option<StandardScaler>,
    label_encoder: Option<LabelEncoder>,
    feature_names: Option<Vec<String>>,
    target_names: Option<Vec<String>>,
    accuracy: Option<f64>,
}

fn required<T>(value: Option<T>, key: &str) -> Result<T> {
    value.ok_or_else(|| AdvisorError::model(format!("bundle is missing required key '{}'", key)))
}

impl ModelBundle {
    /// Assemble and validate a bundle from fitted parts
    pub fn new(
        model: GaussianNb,
        scaler: StandardScaler,
        label_encoder: LabelEncoder,
        accuracy: Option<f64>,
    ) -> Result<Self> {
        let metadata = ModelMetadata {
            feature_names: FEATURE_NAMES.iter().map(|s| s.to_string()).collect(),
            target_names: label_encoder.classes.clone(),
            accuracy,
        };
        let bundle = Self { model, scaler, label_encoder, metadata };
        bundle.validate()?;
        Ok(bundle)
    }

    /// Parse and validate a bundle from JSON text
    pub fn from_json(json: &str) -> Result<Self> {
        let file: BundleFile = serde_json::from_str(json)
            .map_err(|e| AdvisorError::model(format!("failed to parse bundle: {}", e)))?;

        let bundle = Self {
            model: required(file.model, "model")?,
            scaler: required(file.scaler, "scaler")?,
            label_encoder: required(file.label_encoder, "label_encoder")?,
            metadata: ModelMetadata {
                feature_names: required(file.feature_names, "feature_names")?,
                target_names: required(file.target_names, "target_names")?,
                accuracy: file.accuracy,
            },
        };
        bundle.validate()?;
        Ok(bundle)
    }

    /// Load a bundle file; any I/O, parse or validation failure is `ModelUnavailable`
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| AdvisorError::model(format!("failed to read {:?}: {}", path, e)))?;
        let bundle = Self::from_json(&contents)?;
        tracing::debug!(
            "Loaded classifier bundle {:?} ({} classes)",
            path,
            bundle.metadata.target_names.len()
        );
        Ok(bundle)
    }

    /// Write the bundle as pretty JSON, creating parent directories
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {:?}", parent))?;
        }
        let json = serde_json::to_string_pretty(self).context("Failed to serialize bundle")?;
        fs::write(path, json).with_context(|| format!("Failed to write bundle: {:?}", path))?;
        Ok(())
    }

    pub fn with_accuracy(mut self, accuracy: f64) -> Self {
        self.metadata.accuracy = Some(accuracy);
        self
    }

    fn validate(&self) -> Result<()> {
        let meta = &self.metadata;
        if meta.feature_names != FEATURE_NAMES {
            return Err(AdvisorError::model(format!(
                "expected features {:?}, bundle has {:?}",
                FEATURE_NAMES, meta.feature_names
            )));
        }
        if self.label_encoder.is_empty() {
            return Err(AdvisorError::model("label encoder has no classes"));
        }
        if self.label_encoder.classes.windows(2).any(|w| w[0] >= w[1]) {
            return Err(AdvisorError::model("label encoder classes must be sorted and unique"));
        }
        if meta.target_names != self.label_encoder.classes {
            return Err(AdvisorError::model(
                "target_names do not match label encoder classes",
            ));
        }
        if !self.model.is_valid() {
            return Err(AdvisorError::model("classifier parameters are malformed"));
        }
        if self.model.n_classes() != self.label_encoder.len() {
            return Err(AdvisorError::model(format!(
                "classifier has {} classes, label encoder has {}",
                self.model.n_classes(),
                self.label_encoder.len()
            )));
        }
        if !self.scaler.is_valid() {
            return Err(AdvisorError::model("scaler parameters are malformed"));
        }
        Ok(())
    }
}

impl CropClassifier for ModelBundle {
    fn transform(&self, raw: &Features) -> Features {
        self.scaler.transform(raw)
    }

    fn predict(&self, scaled: &Features) -> usize {
        self.model.predict(scaled)
    }

    fn predict_probabilities(&self, scaled: &Features) -> Vec<f64> {
        self.model.predict_probabilities(scaled)
    }

    fn decode_label(&self, index: usize) -> Option<&str> {
        self.label_encoder.decode(index)
    }

    fn metadata(&self) -> &ModelMetadata {
        &self.metadata
    }
}
