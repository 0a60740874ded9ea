//! Static knowledge base
//!
//! Read-only tables consulted by every engine function:
//! - `crops`: nutrient impact, family and optimal ranges per crop (ordered)
//! - `seasons`: Kharif / Rabi / Zaid calendar and member crops
//! - `rotation_rules`: family → preferred successor families
//! - `reduction_catalog`: excess-reduction techniques and crop tips
//! - `nutrients`: N/P/K identifiers and general status bands

pub mod crops;
pub mod nutrients;
pub mod reduction_catalog;
pub mod rotation_rules;
pub mod seasons;

pub use crops::{all_crops, find_crop, require_crop, Crop, CropFamily, NutrientImpact, OptimalRange};
pub use nutrients::{Npk, Nutrient, NutrientStatus};
pub use reduction_catalog::{crop_tip, techniques_for, Effectiveness, ReductionTechnique};
pub use rotation_rules::{preferred_successors, successor_rank};
pub use seasons::{seasons_for_crop, Season};
