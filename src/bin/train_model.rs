// Train the crop classifier bundle
//
// Usage: cargo run --release --bin train_model [config.json]
//
// Without a config file the defaults from `TrainingConfig` are used.

use std::fs;
use std::path::Path;

use anyhow::Context;
use npk_advisor::data::load_dataset;
use npk_advisor::training::{evaluate, fit_bundle, stratified_split};
use npk_advisor::TrainingConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "npk_advisor=info,train_model=info,warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => TrainingConfig::load(Path::new(&path))?,
        None => {
            tracing::info!("No config file given, using defaults");
            TrainingConfig::default()
        }
    };

    let dataset = load_dataset(&config.data.path)?;
    let (train, test) =
        stratified_split(&dataset, config.data.test_size, config.data.random_state)?;
    tracing::info!("Split: {} train rows, {} test rows", train.len(), test.len());

    let bundle = fit_bundle(&train, config.model.var_smoothing)?;
    let report = evaluate(&bundle, &test)?;
    let bundle = bundle.with_accuracy(report.accuracy);

    bundle.save(&config.output.bundle_path)?;
    tracing::info!("Saved bundle to {:?}", config.output.bundle_path);

    let metrics_path = &config.output.metrics_path;
    if let Some(parent) = metrics_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {:?}", parent))?;
    }
    let metrics = serde_json::to_string_pretty(&report).context("Failed to serialize metrics")?;
    fs::write(metrics_path, metrics)
        .with_context(|| format!("Failed to write metrics: {:?}", metrics_path))?;

    println!("\n=== Training Summary ===");
    println!("  Crops:     {}", bundle.metadata.target_names.len());
    println!("  Train:     {} rows", train.len());
    println!("  Test:      {} rows", test.len());
    println!("  Accuracy:  {:.4}", report.accuracy);
    println!("  Precision: {:.4}", report.precision);
    println!("  Recall:    {:.4}", report.recall);
    println!("  F1:        {:.4}", report.f1_score);
    println!("\nBundle:  {}", config.output.bundle_path.display());
    println!("Metrics: {}", metrics_path.display());

    Ok(())
}
