//! Training Configuration
//!
//! JSON file with `data`, `model` and `output` sections. Every section and
//! every field is optional; missing values fall back to the defaults below.
//!
//! ```json
//! {
//!   "data":   { "path": "data/Crop_recommendation.csv", "test_size": 0.2, "random_state": 42 },
//!   "model":  { "var_smoothing": 1e-9 },
//!   "output": {
//!     "bundle_path": "models/npk_crop_model.json",
//!     "metrics_path": "reports/metrics.json"
//!   }
//! }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::error::{AdvisorError, Result};

/// Default bundle location, also used by the report binary
pub const DEFAULT_BUNDLE_PATH: &str = "models/npk_crop_model.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataParams {
    pub path: PathBuf,
    /// Fraction of each crop's rows held out for evaluation
    pub test_size: f64,
    pub random_state: u64,
}

impl Default for DataParams {
    fn default() -> Self {
        Self {
            path: PathBuf::from("data/Crop_recommendation.csv"),
            test_size: 0.2,
            random_state: 42,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelParams {
    pub var_smoothing: f64,
}

impl Default for ModelParams {
    fn default() -> Self {
        Self { var_smoothing: 1e-9 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputParams {
    pub bundle_path: PathBuf,
    pub metrics_path: PathBuf,
}

impl Default for OutputParams {
    fn default() -> Self {
        Self {
            bundle_path: PathBuf::from(DEFAULT_BUNDLE_PATH),
            metrics_path: PathBuf::from("reports/metrics.json"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingConfig {
    pub data: DataParams,
    pub model: ModelParams,
    pub output: OutputParams,
}

impl TrainingConfig {
    /// Load configuration from a JSON file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        let config: TrainingConfig = serde_json::from_str(&contents)
            .with_context(|| "Failed to parse training config JSON")?;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let test_size = self.data.test_size;
        if !(test_size > 0.0 && test_size < 1.0) {
            return Err(AdvisorError::invalid(format!(
                "data.test_size must be in (0, 1), got {}",
                test_size
            )));
        }
        if !(self.model.var_smoothing > 0.0 && self.model.var_smoothing.is_finite()) {
            return Err(AdvisorError::invalid(format!(
                "model.var_smoothing must be positive, got {}",
                self.model.var_smoothing
            )));
        }
        Ok(())
    }
}
