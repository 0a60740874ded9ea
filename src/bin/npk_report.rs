// Full advisory report for one soil reading, printed as JSON
//
// Usage: cargo run --bin npk_report -- <N> <P> <K> [target_crop] [midpoint|minimum]
//
// The classifier bundle is read from NPK_MODEL_PATH (default
// models/npk_crop_model.json). If it cannot be loaded the report is still
// produced, without the prediction section.

use anyhow::{bail, Context};
use npk_advisor::config::DEFAULT_BUNDLE_PATH;
use npk_advisor::knowledge::{find_crop, require_crop};
use npk_advisor::{
    assess_soil_health, compute_gaps, plan_reduction, predict_crop, rotation_chain,
    suggest_rotation, BundleCache, Nutrient, NutrientStatus, Season, Strategy,
};
use serde_json::json;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const CHAIN_SEASONS: usize = 3;

fn parse_reading(args: &[String], idx: usize, name: &str) -> anyhow::Result<f64> {
    args.get(idx)
        .with_context(|| format!("missing {} reading", name))?
        .parse()
        .with_context(|| format!("{} must be a number", name))
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "npk_advisor=info,npk_report=info,warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.len() < 3 {
        bail!("usage: npk_report <N> <P> <K> [target_crop] [midpoint|minimum]");
    }
    let n = parse_reading(&args, 0, "N")?;
    let p = parse_reading(&args, 1, "P")?;
    let k = parse_reading(&args, 2, "K")?;
    let strategy: Strategy = match args.get(4) {
        Some(s) => s.parse()?,
        None => Strategy::default(),
    };

    let statuses: serde_json::Map<String, serde_json::Value> = Nutrient::ALL
        .into_iter()
        .zip([n, p, k])
        .map(|(nut, value)| {
            let status = NutrientStatus::classify(nut, value);
            (nut.symbol().to_string(), json!(status.display_text()))
        })
        .collect();

    let health = assess_soil_health(n, p, k);
    let season = Season::current();

    let bundle_path =
        std::env::var("NPK_MODEL_PATH").unwrap_or_else(|_| DEFAULT_BUNDLE_PATH.to_string());
    let cache = BundleCache::new(bundle_path);
    let prediction = match cache
        .get_or_load()
        .and_then(|bundle| predict_crop(n, p, k, bundle.as_ref()))
    {
        Ok(pred) => Some(pred),
        Err(e) => {
            tracing::warn!("Skipping crop prediction ({:?}): {}", cache.path(), e);
            None
        }
    };

    let target_crop = match args.get(3) {
        Some(crop) => Some(crop.clone()),
        None => prediction
            .as_ref()
            .and_then(|pred| find_crop(&pred.crop))
            .map(|crop| crop.name.to_string()),
    };

    let mut report = json!({
        "reading": { "N": n, "P": p, "K": k },
        "status": statuses,
        "soil_health": {
            "score": health.score,
            "grade": health.grade.display_text(),
            "interpretation": health.grade.interpretation(),
            "breakdown": health,
        },
        "season": {
            "name": season.display_text(),
            "months": season.months_label(),
            "crops": season.crops(),
        },
    });

    if let Some(pred) = &prediction {
        let top: Vec<_> = pred
            .top(5)
            .into_iter()
            .map(|(crop, prob)| json!({ "crop": crop, "probability": prob }))
            .collect();
        report["prediction"] = json!({ "crop": pred.crop, "top": top });
    }

    if let Some(crop) = target_crop {
        let gaps = compute_gaps(n, p, k, &crop, strategy)?;
        let plan = plan_reduction(n, p, k, &crop, &gaps.targets);
        let requirements = require_crop(&crop)?.requirements;
        let statuses: Vec<_> = Nutrient::ALL
            .into_iter()
            .zip([n, p, k])
            .map(|(nut, value)| {
                json!({
                    "nutrient": nut.symbol(),
                    "status": gaps.status(nut).display_text(),
                    "in_optimal_range": requirements.get(nut).contains(value),
                })
            })
            .collect();

        report["target"] = json!({
            "crop": crop,
            "strategy": strategy.to_string(),
            "gaps": gaps,
            "gap_status": statuses,
            "has_excess": gaps.has_excess(),
            "reduction_plan": plan,
            "rotation": suggest_rotation(&crop),
            "rotation_chain": rotation_chain(&crop, CHAIN_SEASONS),
        });
    }

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
