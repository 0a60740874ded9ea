//! NPK Crop Advisor
//!
//! Recommendation engine for soil N/P/K readings (mg/kg):
//! - `classifier/`: crop prediction through a trained model bundle
//! - `gaps`: additions/excesses against a target crop's optimal ranges
//! - `reduction`: techniques for shedding excess nutrients
//! - `soil_health`: composite 0-100 soil health score
//! - `rotation`: next-crop suggestions from family and nutrient-impact rules
//! - `knowledge/`: static crop, season, rotation and technique tables
//!
//! Model pipeline (used by the `train_model` binary):
//! - `data`: dataset loading with Polars
//! - `training`: stratified split, fitting and evaluation
//! - `config`: training configuration
//!
//! The engine functions are pure and thread-safe; only the model bundle
//! touches the filesystem.

pub mod classifier;
pub mod config;
pub mod data;
pub mod error;
pub mod gaps;
pub mod knowledge;
pub mod reduction;
pub mod rotation;
pub mod soil_health;
pub mod training;

// Re-export the caller-facing API
pub use classifier::{
    predict_crop, BundleCache, CropClassifier, ModelBundle, ModelMetadata, Prediction,
};
pub use config::TrainingConfig;
pub use error::{AdvisorError, Result};
pub use gaps::{compute_gaps, GapStatus, NutrientGaps, Strategy};
pub use knowledge::{Crop, CropFamily, Npk, Nutrient, NutrientStatus, Season};
pub use reduction::{plan_reduction, ExcessSeverity, ReductionItem};
pub use rotation::{rotation_chain, suggest_rotation, RotationReason, RotationSuggestion};
pub use soil_health::{assess_soil_health, score_soil_health, HealthGrade, SoilHealthReport};
