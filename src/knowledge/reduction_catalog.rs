//! Nutrient Reduction Catalog
//!
//! Three techniques per nutrient for shedding an excess, plus crop-specific
//! tips for (crop, nutrient) pairs where the excess has a known consequence.

use serde::Serialize;

use super::nutrients::Nutrient;

/// Qualitative effectiveness tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum Effectiveness {
    Medium,
    MediumHigh,
    High,
}

impl Effectiveness {
    pub fn display_text(&self) -> &'static str {
        match self {
            Effectiveness::High => "high",
            Effectiveness::MediumHigh => "medium-high",
            Effectiveness::Medium => "medium",
        }
    }
}

/// A technique for lowering one nutrient
#[derive(Debug, Clone, Serialize)]
pub struct ReductionTechnique {
    pub nutrient: Nutrient,
    pub title: &'static str,
    /// Expected time window to see an effect
    pub timeframe: &'static str,
    pub effectiveness: Effectiveness,
    pub description: &'static str,
    pub steps: &'static [&'static str],
    pub caution: &'static str,
}

// ============================================================================
// EMBEDDED TECHNIQUES
// ============================================================================

static TECHNIQUES: &[ReductionTechnique] = &[
    // --- Nitrogen ---
    ReductionTechnique {
        nutrient: Nutrient::Nitrogen,
        title: "Grow a nitrogen-scavenging cover crop",
        timeframe: "6–10 weeks",
        effectiveness: Effectiveness::High,
        description: "Fast-growing grasses such as sorghum-sudangrass or cereal rye take up surplus nitrate and lock it in biomass.",
        steps: &[
            "Sow a dense grass cover crop right after harvest",
            "Let it grow until just before flowering",
            "Cut and remove the biomass from the field instead of incorporating it",
        ],
        caution: "Incorporating the residue returns most of the nitrogen to the soil.",
    },
    ReductionTechnique {
        nutrient: Nutrient::Nitrogen,
        title: "Incorporate high-carbon residues",
        timeframe: "3–6 weeks",
        effectiveness: Effectiveness::MediumHigh,
        description: "Straw, sawdust or wood chips with a high C:N ratio make soil microbes immobilise mineral nitrogen while they decompose.",
        steps: &[
            "Spread 2–4 t/ha of straw or aged sawdust",
            "Work it into the top 10–15 cm",
            "Wait at least three weeks before sowing",
        ],
        caution: "Immobilisation is temporary; seedlings sown too early can show nitrogen deficiency.",
    },
    ReductionTechnique {
        nutrient: Nutrient::Nitrogen,
        title: "Controlled leaching irrigation",
        timeframe: "1–3 weeks",
        effectiveness: Effectiveness::Medium,
        description: "Heavy irrigation moves soluble nitrate below the root zone.",
        steps: &[
            "Apply water in excess of field capacity in two or three passes",
            "Allow the profile to drain between passes",
            "Re-test soil nitrogen before planting",
        ],
        caution: "Leached nitrate can contaminate groundwater; avoid near wells and on shallow water tables.",
    },
    // --- Phosphorus ---
    ReductionTechnique {
        nutrient: Nutrient::Phosphorus,
        title: "Stop phosphorus and manure inputs",
        timeframe: "1–3 seasons",
        effectiveness: Effectiveness::High,
        description: "Phosphorus is immobile in soil, so withholding all P fertiliser and manure is the primary way to draw it down.",
        steps: &[
            "Switch to nitrogen- or potash-only fertiliser blends",
            "Suspend manure and compost applications",
            "Re-test every season",
        ],
        caution: "Drawdown is slow; expect only a few mg/kg decline per season.",
    },
    ReductionTechnique {
        nutrient: Nutrient::Phosphorus,
        title: "Mine phosphorus with high-uptake crops",
        timeframe: "1–2 seasons",
        effectiveness: Effectiveness::MediumHigh,
        description: "High-biomass crops such as forage grasses or maize silage remove phosphorus when the whole plant is harvested.",
        steps: &[
            "Plant a high-biomass forage crop",
            "Harvest the whole plant and take it off the field",
            "Repeat until soil P is back in range",
        ],
        caution: "Only removal of the harvested biomass lowers soil phosphorus.",
    },
    ReductionTechnique {
        nutrient: Nutrient::Phosphorus,
        title: "Bind phosphorus with amendments",
        timeframe: "2–8 weeks",
        effectiveness: Effectiveness::Medium,
        description: "Gypsum or iron/aluminium-rich amendments convert soluble phosphate into less available forms and reduce runoff losses.",
        steps: &[
            "Apply gypsum at 1–2 t/ha",
            "Incorporate lightly and irrigate",
            "Keep buffer strips along drains and streams",
        ],
        caution: "Aluminium amendments acidify soil; check pH before use.",
    },
    // --- Potassium ---
    ReductionTechnique {
        nutrient: Nutrient::Potassium,
        title: "Stop potash and wood-ash inputs",
        timeframe: "1–2 seasons",
        effectiveness: Effectiveness::High,
        description: "Withholding muriate of potash, wood ash and potassium-rich manures lets crop removal lower the surplus.",
        steps: &[
            "Use potassium-free fertiliser blends",
            "Stop applying wood ash and poultry litter",
            "Re-test exchangeable K each season",
        ],
        caution: "Keep an eye on magnesium; high K often masks Mg deficiency.",
    },
    ReductionTechnique {
        nutrient: Nutrient::Potassium,
        title: "Grow potassium-hungry forage",
        timeframe: "1 season",
        effectiveness: Effectiveness::MediumHigh,
        description: "Grasses and alfalfa take up luxury potassium well beyond their needs when it is abundant.",
        steps: &[
            "Plant a forage grass or alfalfa stand",
            "Cut and remove the hay several times",
            "Do not return the hay or its manure to the same field",
        ],
        caution: "Forage with very high K can cause grass tetany in livestock.",
    },
    ReductionTechnique {
        nutrient: Nutrient::Potassium,
        title: "Leach with low-salt irrigation water",
        timeframe: "2–6 weeks",
        effectiveness: Effectiveness::Medium,
        description: "Repeated heavy irrigation with clean water moves exchangeable potassium down the profile on light soils.",
        steps: &[
            "Confirm the soil is well drained",
            "Apply several heavy irrigations a few days apart",
            "Add calcium (gypsum) to displace potassium from exchange sites",
        ],
        caution: "Ineffective on heavy clay and wastes water on poorly drained soils.",
    },
];

/// (crop, nutrient, tip)
#[rustfmt::skip]
static CROP_TIPS: &[(&str, Nutrient, &str)] = &[
    ("Rice", Nutrient::Nitrogen, "Excess nitrogen in paddies causes lodging and blast; drain the field mid-season and skip the top-dressing."),
    ("Rice", Nutrient::Potassium, "Rice tolerates moderate potassium surplus; prioritise drawing down K in the dry season."),
    ("Wheat", Nutrient::Nitrogen, "High nitrogen makes wheat lodge and raises rust pressure; delay sowing after a scavenging cover crop."),
    ("Corn", Nutrient::Phosphorus, "Corn responds poorly to extra phosphorus; surplus P mostly ends up in runoff."),
    ("Soybean", Nutrient::Nitrogen, "Soil nitrate suppresses nodulation, so the soybean will not fix its own nitrogen; do not inoculate until N is lower."),
    ("Cotton", Nutrient::Nitrogen, "Excess nitrogen drives rank vegetative growth and boll shedding; use a growth regulator if N cannot be lowered."),
    ("Sugarcane", Nutrient::Potassium, "Surplus potassium lowers juice quality; avoid potash in the ratoon crop."),
    ("Tomato", Nutrient::Nitrogen, "Too much nitrogen gives leafy plants with few fruit; shift to a low-N, high-Ca feeding program."),
    ("Tomato", Nutrient::Potassium, "High potassium induces blossom-end rot through calcium antagonism; supply calcium."),
    ("Potato", Nutrient::Nitrogen, "Excess nitrogen delays tuber set and skin maturity; haulm destruction can be brought forward."),
    ("Potato", Nutrient::Phosphorus, "Very high phosphorus can induce zinc deficiency in potatoes; consider a foliar zinc spray."),
    ("Onion", Nutrient::Nitrogen, "Excess nitrogen produces thick necks and poor storage; stop N at least six weeks before harvest."),
];

// ============================================================================
// LOOKUP FUNCTIONS
// ============================================================================

/// All techniques, grouped N, P, K
pub fn all_techniques() -> &'static [ReductionTechnique] {
    TECHNIQUES
}

/// The three techniques for one nutrient, in catalog order
pub fn techniques_for(nutrient: Nutrient) -> Vec<&'static ReductionTechnique> {
    TECHNIQUES.iter().filter(|t| t.nutrient == nutrient).collect()
}

/// Crop-specific tip for lowering `nutrient` before growing `crop`, if any
pub fn crop_tip(crop: &str, nutrient: Nutrient) -> Option<&'static str> {
    CROP_TIPS
        .iter()
        .find(|(c, n, _)| *c == crop && *n == nutrient)
        .map(|(_, _, tip)| *tip)
}
