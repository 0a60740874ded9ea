//! Rotation Advisor
//!
//! Scores every other crop in the knowledge base as a successor to the
//! previous crop. All rules are evaluated independently and stack:
//!
//! | rule | condition                                      | score         |
//! |------|------------------------------------------------|---------------|
//! | a    | candidate family is preferred successor rank r | +(3 - r) × 25 |
//! | b    | same family                                    | -40           |
//! | c    | both solanaceae                                | -30           |
//! | d    | prev ΔN < -30 and candidate ΔN > 0             | +40           |
//! | e    | prev ΔK < -30 and candidate ΔK > -20           | +20           |
//! | f    | prev ΔN < -30 and candidate ΔN > -20           | +15           |
//! | g    | prev ΔP < -20 and candidate ΔP > -15           | +10           |
//!
//! Suggestions are sorted by descending score with a stable sort, so ties
//! keep knowledge-base order.

use std::fmt;

use serde::Serialize;
use smallvec::SmallVec;

use crate::knowledge::crops::{all_crops, find_crop, Crop, CropFamily, NutrientImpact};
use crate::knowledge::rotation_rules::successor_rank;

/// Why a candidate gained or lost score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RotationReason {
    GoodRotationAfter(CropFamily),
    SameFamily,
    SolanaceaeBackToBack,
    NitrogenFixerAfterHeavyConsumer,
    GentleOnPotassium,
    LowNitrogenDemand,
    LowPhosphorusDemand,
}

impl fmt::Display for RotationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RotationReason::GoodRotationAfter(family) => {
                write!(f, "Good rotation after {}", family.key())
            }
            RotationReason::SameFamily => write!(f, "Same crop family — disease risk"),
            RotationReason::SolanaceaeBackToBack => {
                write!(f, "Avoid solanaceae back-to-back (blight risk)")
            }
            RotationReason::NitrogenFixerAfterHeavyConsumer => {
                write!(f, "Nitrogen-fixer follows heavy nitrogen consumer")
            }
            RotationReason::GentleOnPotassium => {
                write!(f, "Gentle on potassium — lets soil recover")
            }
            RotationReason::LowNitrogenDemand => write!(f, "Low nitrogen demand"),
            RotationReason::LowPhosphorusDemand => write!(f, "Low phosphorus demand"),
        }
    }
}

/// A scored next-crop candidate
#[derive(Debug, Clone, Serialize)]
pub struct RotationSuggestion {
    pub crop: &'static str,
    pub family: CropFamily,
    pub impact: NutrientImpact,
    pub score: i32,
    pub reasons: SmallVec<[RotationReason; 4]>,
}

fn score_candidate(prev: &Crop, candidate: &'static Crop) -> RotationSuggestion {
    let mut score = 0;
    let mut reasons: SmallVec<[RotationReason; 4]> = SmallVec::new();
    let (p, c) = (&prev.impact, &candidate.impact);

    if let Some(rank) = successor_rank(prev.family, candidate.family) {
        score += (3 - rank as i32) * 25;
        reasons.push(RotationReason::GoodRotationAfter(prev.family));
    }

    if candidate.family == prev.family {
        score -= 40;
        reasons.push(RotationReason::SameFamily);

        if prev.family == CropFamily::Solanaceae {
            score -= 30;
            reasons.push(RotationReason::SolanaceaeBackToBack);
        }
    }

    if p.n < -30 && c.n > 0 {
        score += 40;
        reasons.push(RotationReason::NitrogenFixerAfterHeavyConsumer);
    }

    if p.k < -30 && c.k > -20 {
        score += 20;
        reasons.push(RotationReason::GentleOnPotassium);
    }

    if p.n < -30 && c.n > -20 {
        score += 15;
        reasons.push(RotationReason::LowNitrogenDemand);
    }

    if p.p < -20 && c.p > -15 {
        score += 10;
        reasons.push(RotationReason::LowPhosphorusDemand);
    }

    RotationSuggestion {
        crop: candidate.name,
        family: candidate.family,
        impact: candidate.impact,
        score,
        reasons,
    }
}

/// Ranked successor candidates for `previous_crop`
///
/// An unrecognised crop yields an empty list, not an error.
pub fn suggest_rotation(previous_crop: &str) -> Vec<RotationSuggestion> {
    let Some(prev) = find_crop(previous_crop) else {
        return Vec::new();
    };

    let mut suggestions: Vec<RotationSuggestion> = all_crops()
        .iter()
        .filter(|c| c.name != prev.name)
        .map(|c| score_candidate(prev, c))
        .collect();

    suggestions.sort_by(|a, b| b.score.cmp(&a.score));
    suggestions
}

/// Multi-season plan: `previous_crop` followed by up to `seasons` successors
///
/// Each step takes the top-ranked suggestion of the step before. Stops early
/// if a step has no suggestions.
pub fn rotation_chain(previous_crop: &str, seasons: usize) -> Vec<&'static str> {
    let Some(start) = find_crop(previous_crop) else {
        return Vec::new();
    };

    let mut chain = vec![start.name];
    let mut current = start.name;
    for _ in 0..seasons {
        match suggest_rotation(current).first() {
            Some(next) => {
                chain.push(next.crop);
                current = next.crop;
            }
            None => break,
        }
    }
    chain
}
