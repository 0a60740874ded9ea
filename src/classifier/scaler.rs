//! Standard feature scaling: (x - mean) / std

use serde::{Deserialize, Serialize};

use super::Features;
use crate::error::{AdvisorError, Result};

/// Per-feature mean and scale fitted on training rows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardScaler {
    pub mean: Features,
    /// Population standard deviation; 1.0 for constant features
    pub scale: Features,
}

impl StandardScaler {
    pub fn fit(rows: &[Features]) -> Result<Self> {
        if rows.is_empty() {
            return Err(AdvisorError::invalid("cannot fit scaler on zero rows"));
        }
        let count = rows.len() as f64;

        let mut mean = [0.0; 3];
        for row in rows {
            for (m, x) in mean.iter_mut().zip(row) {
                *m += x / count;
            }
        }

        let mut scale = [0.0; 3];
        for row in rows {
            for i in 0..3 {
                scale[i] += (row[i] - mean[i]).powi(2) / count;
            }
        }
        for s in scale.iter_mut() {
            *s = s.sqrt();
            if *s == 0.0 {
                *s = 1.0;
            }
        }

        Ok(Self { mean, scale })
    }

    pub fn transform(&self, raw: &Features) -> Features {
        [
            (raw[0] - self.mean[0]) / self.scale[0],
            (raw[1] - self.mean[1]) / self.scale[1],
            (raw[2] - self.mean[2]) / self.scale[2],
        ]
    }

    pub(crate) fn is_valid(&self) -> bool {
        self.mean.iter().all(|m| m.is_finite())
            && self.scale.iter().all(|s| s.is_finite() && *s > 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_fit_transform_centres_data() {
        let rows = vec![[10.0, 1.0, 5.0], [20.0, 3.0, 5.0], [30.0, 5.0, 5.0]];
        let scaler = StandardScaler::fit(&rows).unwrap();
        assert_relative_eq!(scaler.mean[0], 20.0);
        assert_relative_eq!(scaler.scale[0], (200.0f64 / 3.0).sqrt());
        // Constant feature keeps unit scale
        assert_eq!(scaler.scale[2], 1.0);

        let scaled: Vec<Features> = rows.iter().map(|r| scaler.transform(r)).collect();
        let mean0: f64 = scaled.iter().map(|r| r[0]).sum::<f64>() / 3.0;
        assert_relative_eq!(mean0, 0.0, epsilon = 1e-12);
        assert_eq!(scaled[1], [0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_empty_rows_rejected() {
        assert!(StandardScaler::fit(&[]).is_err());
    }
}
