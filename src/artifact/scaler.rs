//! Per-feature standardization for detector inputs.

use super::{FeatureRow, FEATURE_COUNT};
use serde::{Deserialize, Serialize};

/// A fitted mean/standard-deviation transform over the feature space.
///
/// Fitted on the same rows, in the same feature order, as the anomaly
/// detector. A zero-variance feature scales by 1.0 so the transform stays
/// defined (the feature then contributes a constant zero after centering).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scaler {
    mean: FeatureRow,
    std: FeatureRow,
}

impl Scaler {
    pub(crate) fn fit(rows: &[FeatureRow]) -> Self {
        let n = rows.len().max(1) as f64;

        let mut mean = [0.0; FEATURE_COUNT];
        for row in rows {
            for (m, value) in mean.iter_mut().zip(row) {
                *m += value;
            }
        }
        for m in &mut mean {
            *m /= n;
        }

        let mut var = [0.0; FEATURE_COUNT];
        for row in rows {
            for ((v, value), m) in var.iter_mut().zip(row).zip(&mean) {
                *v += (value - m) * (value - m);
            }
        }

        let mut std = [0.0; FEATURE_COUNT];
        for (s, v) in std.iter_mut().zip(&var) {
            let sd = (v / n).sqrt();
            *s = if sd > 0.0 { sd } else { 1.0 };
        }

        Self { mean, std }
    }

    /// Center and scale one feature row.
    pub fn transform(&self, row: FeatureRow) -> FeatureRow {
        let mut out = [0.0; FEATURE_COUNT];
        for i in 0..FEATURE_COUNT {
            out[i] = (row[i] - self.mean[i]) / self.std[i];
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transform_centers_and_scales() {
        let rows = vec![[0.0, 100.0], [1.0, 200.0], [2.0, 300.0]];
        let scaler = Scaler::fit(&rows);

        // Means are (1, 200); population stds are (sqrt(2/3), sqrt(20000/3)).
        let mid = scaler.transform([1.0, 200.0]);
        assert!(mid[0].abs() < 1e-12);
        assert!(mid[1].abs() < 1e-12);

        let hi = scaler.transform([2.0, 300.0]);
        assert!((hi[0] - 1.224_744_871_391_589).abs() < 1e-9);
        assert!((hi[1] - 1.224_744_871_391_589).abs() < 1e-9);
    }

    #[test]
    fn test_zero_variance_feature_scales_by_one() {
        let rows = vec![[5.0, 100.0], [5.0, 200.0], [5.0, 300.0]];
        let scaler = Scaler::fit(&rows);

        let out = scaler.transform([5.0, 200.0]);
        assert_eq!(out[0], 0.0);
        assert!(out[1].abs() < 1e-12);

        // The constant feature passes through as an uncentered offset.
        let shifted = scaler.transform([7.0, 200.0]);
        assert_eq!(shifted[0], 2.0);
    }

    #[test]
    fn test_transformed_training_rows_have_unit_spread() {
        let rows = vec![[0.0, 10.0], [1.0, 20.0], [0.0, 30.0], [1.0, 40.0]];
        let scaler = Scaler::fit(&rows);

        let transformed: Vec<FeatureRow> = rows.iter().map(|r| scaler.transform(*r)).collect();
        for feature in 0..FEATURE_COUNT {
            let mean: f64 =
                transformed.iter().map(|r| r[feature]).sum::<f64>() / transformed.len() as f64;
            let var: f64 = transformed.iter().map(|r| (r[feature] - mean).powi(2)).sum::<f64>()
                / transformed.len() as f64;
            assert!(mean.abs() < 1e-12);
            assert!((var - 1.0).abs() < 1e-9);
        }
    }
}
