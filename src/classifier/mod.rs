//! Crop Classifier Adapter
//!
//! The classifier is consumed through the [`CropClassifier`] capability
//! trait: scale raw features, predict a label index, produce a probability
//! distribution and decode labels. [`ModelBundle`] is the concrete
//! implementation persisted by the training pipeline.
//!
//! - `scaler`: standard scaling fitted on training rows
//! - `label_encoder`: sorted crop names ↔ label indices
//! - `naive_bayes`: Gaussian naive Bayes classifier
//! - `bundle`: validated JSON artifact tying the three together
//! - `cache`: single-flight memoized bundle loading
//! - `predict`: `predict_crop` and the ranked `Prediction`

pub mod bundle;
pub mod cache;
pub mod label_encoder;
pub mod naive_bayes;
pub mod predict;
pub mod scaler;

pub use bundle::ModelBundle;
pub use cache::BundleCache;
pub use label_encoder::LabelEncoder;
pub use naive_bayes::GaussianNb;
pub use predict::{predict_crop, Prediction};
pub use scaler::StandardScaler;

use serde::{Deserialize, Serialize};

/// Raw or scaled feature vector in [N, P, K] order
pub type Features = [f64; 3];

/// Descriptive metadata carried by a classifier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelMetadata {
    pub feature_names: Vec<String>,
    /// Crop names in label-index order
    pub target_names: Vec<String>,
    /// Held-out accuracy, if evaluated
    pub accuracy: Option<f64>,
}

/// Capabilities required from a trained crop classifier
///
/// Implementations are read-only once constructed and shared across threads.
pub trait CropClassifier: Send + Sync {
    /// Apply the fitted feature scaling
    fn transform(&self, raw: &Features) -> Features;

    /// Index of the predicted label for already-scaled features
    fn predict(&self, scaled: &Features) -> usize;

    /// One probability per target, in label-index order
    fn predict_probabilities(&self, scaled: &Features) -> Vec<f64>;

    /// Crop name for a label index
    fn decode_label(&self, index: usize) -> Option<&str>;

    fn metadata(&self) -> &ModelMetadata;
}
