//! Training Data Loading
//!
//! Reads the crop recommendation dataset with Polars. The CSV must carry
//! numeric `N`, `P`, `K` columns and a string `Crop` column; any other
//! columns (temperature, humidity, ...) are ignored.

use std::path::Path;

use anyhow::{bail, Context, Result};
use polars::prelude::*;

use crate::classifier::Features;

/// Feature columns in model order
pub const FEATURE_COLUMNS: [&str; 3] = ["N", "P", "K"];

/// Label column
pub const LABEL_COLUMN: &str = "Crop";

/// Labelled NPK rows ready for training
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    pub rows: Vec<Features>,
    pub labels: Vec<String>,
}

impl Dataset {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Extract N/P/K features and crop labels from a dataframe
    ///
    /// Integer feature columns are cast to f64. Nulls in any used column are
    /// rejected rather than silently dropped.
    pub fn from_dataframe(df: &DataFrame) -> Result<Self> {
        let mut features: Vec<Vec<f64>> = Vec::with_capacity(3);
        for name in FEATURE_COLUMNS {
            let column = df
                .column(name)
                .with_context(|| format!("Column '{}' not found", name))?
                .cast(&DataType::Float64)
                .with_context(|| format!("Column '{}' is not numeric", name))?;
            let values = column
                .f64()
                .with_context(|| format!("Column '{}' is not numeric", name))?;

            let mut out = Vec::with_capacity(df.height());
            for (idx, value) in values.into_iter().enumerate() {
                match value {
                    Some(v) => out.push(v),
                    None => bail!("Column '{}' has a null at row {}", name, idx),
                }
            }
            features.push(out);
        }

        let crops = df
            .column(LABEL_COLUMN)
            .with_context(|| format!("Column '{}' not found", LABEL_COLUMN))?
            .str()
            .with_context(|| format!("Column '{}' is not string type", LABEL_COLUMN))?;

        let mut labels = Vec::with_capacity(df.height());
        for (idx, crop) in crops.into_iter().enumerate() {
            match crop {
                Some(c) => labels.push(c.to_string()),
                None => bail!("Column '{}' has a null at row {}", LABEL_COLUMN, idx),
            }
        }

        let rows = (0..df.height())
            .map(|i| [features[0][i], features[1][i], features[2][i]])
            .collect();

        Ok(Self { rows, labels })
    }
}

/// Load the training dataset from CSV
pub fn load_dataset(path: &Path) -> Result<Dataset> {
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .with_context(|| format!("Failed to create CSV reader: {:?}", path))?
        .finish()
        .with_context(|| format!("Failed to load dataset: {:?}", path))?;

    let dataset = Dataset::from_dataframe(&df)?;
    tracing::info!("Loaded {} training rows from {:?}", dataset.len(), path);
    Ok(dataset)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_dataframe_casts_integers() {
        let df = df! {
            "N" => [90i64, 20],
            "P" => [42i64, 67],
            "K" => [43i64, 20],
            "temperature" => [20.8, 23.1],
            "Crop" => ["rice", "kidneybeans"],
        }
        .unwrap();

        let dataset = Dataset::from_dataframe(&df).unwrap();
        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.rows[0], [90.0, 42.0, 43.0]);
        assert_eq!(dataset.labels, vec!["rice", "kidneybeans"]);
    }

    #[test]
    fn test_missing_column_rejected() {
        let df = df! {
            "N" => [1.0],
            "P" => [2.0],
            "Crop" => ["rice"],
        }
        .unwrap();
        let err = Dataset::from_dataframe(&df).unwrap_err();
        assert!(err.to_string().contains("'K'"));
    }

    #[test]
    fn test_null_feature_rejected() {
        let df = df! {
            "N" => [Some(1.0), None],
            "P" => [2.0, 3.0],
            "K" => [2.0, 3.0],
            "Crop" => ["rice", "maize"],
        }
        .unwrap();
        assert!(Dataset::from_dataframe(&df).is_err());
    }

    #[test]
    fn test_missing_file() {
        assert!(load_dataset(Path::new("/nonexistent/crops.csv")).is_err());
    }
}
