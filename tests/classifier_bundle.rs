// Classifier bundle lifecycle tests
//
// dataframe → split → fit → save → load → predict, plus shared loading
// through BundleCache.
// Run with: cargo test --test classifier_bundle

use std::sync::Arc;

use approx::assert_abs_diff_eq;
use npk_advisor::data::Dataset;
use npk_advisor::training::{evaluate, fit_bundle, stratified_split};
use npk_advisor::{predict_crop, AdvisorError, BundleCache, CropClassifier, ModelBundle};
use polars::prelude::*;
use tempfile::tempdir;

fn training_frame() -> DataFrame {
    let mut n = Vec::new();
    let mut p = Vec::new();
    let mut k = Vec::new();
    let mut crop = Vec::new();
    for i in 0..20 {
        let j = (i % 5) as i64;
        // rice: high N, low K
        n.push(85 + j);
        p.push(45 + j);
        k.push(40 + j);
        crop.push("rice");
        // chickpea: low N, high K
        n.push(35 + j);
        p.push(70 + j);
        k.push(80 + j);
        crop.push("chickpea");
        // banana: high everything
        n.push(100 + j);
        p.push(80 + j);
        k.push(50 + j);
        crop.push("banana");
    }
    df! {
        "N" => n,
        "P" => p,
        "K" => k,
        "Crop" => crop,
    }
    .unwrap()
}

fn trained_bundle() -> ModelBundle {
    let dataset = Dataset::from_dataframe(&training_frame()).unwrap();
    let (train, test) = stratified_split(&dataset, 0.2, 42).unwrap();
    let bundle = fit_bundle(&train, 1e-9).unwrap();
    let report = evaluate(&bundle, &test).unwrap();
    assert!(report.accuracy > 0.9);
    bundle.with_accuracy(report.accuracy)
}

#[test]
fn save_load_predict_round_trip() {
    let bundle = trained_bundle();
    let dir = tempdir().unwrap();
    // save creates the missing parent directory
    let path = dir.path().join("models").join("bundle.json");
    bundle.save(&path).unwrap();

    let loaded = ModelBundle::load(&path).unwrap();
    assert_eq!(loaded, bundle);
    assert_eq!(loaded.metadata().target_names, vec!["banana", "chickpea", "rice"]);

    let prediction = predict_crop(87.0, 47.0, 42.0, &loaded).unwrap();
    assert_eq!(prediction.crop, "rice");
    assert_eq!(prediction.probabilities.len(), 3);
    assert_abs_diff_eq!(prediction.probabilities.values().sum::<f64>(), 1.0, epsilon = 1e-9);
    assert_eq!(prediction.ranked()[0].0, "rice");
}

#[test]
fn prediction_is_deterministic() {
    let bundle = trained_bundle();
    let first = predict_crop(60.0, 60.0, 60.0, &bundle).unwrap();
    for _ in 0..10 {
        assert_eq!(predict_crop(60.0, 60.0, 60.0, &bundle).unwrap(), first);
    }
}

#[test]
fn prediction_rejects_zero_reading() {
    let bundle = trained_bundle();
    assert!(matches!(
        predict_crop(0.0, 40.0, 40.0, &bundle),
        Err(AdvisorError::InvalidInput(_))
    ));
}

#[test]
fn prediction_rejects_reading_beyond_model_range() {
    let bundle = trained_bundle();
    assert!(matches!(
        predict_crop(1e200, 50.0, 50.0, &bundle),
        Err(AdvisorError::InvalidInput(_))
    ));
}

#[test]
fn cache_loads_once_across_threads() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("bundle.json");
    trained_bundle().save(&path).unwrap();

    let cache = BundleCache::new(&path);
    assert_eq!(cache.path(), path.as_path());
    let loaded: Vec<Arc<ModelBundle>> = std::thread::scope(|s| {
        let handles: Vec<_> = (0..8).map(|_| s.spawn(|| cache.get_or_load().unwrap())).collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert!(cache.is_loaded());
    assert!(loaded.windows(2).all(|w| Arc::ptr_eq(&w[0], &w[1])));
}

#[test]
fn corrupt_bundle_is_model_unavailable() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("bundle.json");
    std::fs::write(&path, r#"{"model": {}, "feature_names": ["N", "P", "K"]}"#).unwrap();

    let cache = BundleCache::new(&path);
    assert!(matches!(cache.get_or_load(), Err(AdvisorError::ModelUnavailable(_))));
    assert!(!cache.is_loaded());
}
