use ndarray::{Array2, Axis};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};

/// Standardizing feature scaler: per-column zero mean, unit variance.
///
/// Fitted on the training split only and applied to both splits, so the
/// held-out evaluation never leaks statistics. The scaler travels inside the
/// trained bundle and is never used apart from its paired classifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureScaler {
    means: Vec<f64>,
    stds: Vec<f64>,
}

impl FeatureScaler {
    /// Fit column statistics on a feature matrix.
    pub fn fit(features: &Array2<f64>) -> Result<Self> {
        let (n_samples, n_features) = features.dim();
        if n_samples == 0 || n_features == 0 {
            return Err(EngineError::EmptyFeatureSet);
        }

        let mut means = Vec::with_capacity(n_features);
        let mut stds = Vec::with_capacity(n_features);

        for column in features.axis_iter(Axis(1)) {
            let mean = column.sum() / n_samples as f64;
            let variance = column
                .iter()
                .map(|v| {
                    let d = v - mean;
                    d * d
                })
                .sum::<f64>()
                / n_samples as f64;
            let std = variance.sqrt();

            means.push(mean);
            // A constant column scales to zero rather than dividing by zero
            stds.push(if std > 0.0 { std } else { 1.0 });
        }

        Ok(Self { means, stds })
    }

    /// Scale a whole matrix.
    pub fn transform(&self, features: &Array2<f64>) -> Array2<f64> {
        let mut scaled = features.clone();
        for mut row in scaled.axis_iter_mut(Axis(0)) {
            for (j, value) in row.iter_mut().enumerate() {
                *value = (*value - self.means[j]) / self.stds[j];
            }
        }
        scaled
    }

    /// Scale one encoded vector.
    pub fn transform_row(&self, row: &[f64]) -> Vec<f64> {
        row.iter()
            .enumerate()
            .map(|(j, value)| (value - self.means[j]) / self.stds[j])
            .collect()
    }

    /// Number of columns this scaler was fitted on.
    pub fn len(&self) -> usize {
        self.means.len()
    }

    pub fn is_empty(&self) -> bool {
        self.means.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_fit_centers_and_scales() {
        let features = array![[1.0, 10.0], [3.0, 10.0], [5.0, 10.0]];
        let scaler = FeatureScaler::fit(&features).unwrap();
        let scaled = scaler.transform(&features);

        // Each column has zero mean after scaling
        for column in scaled.axis_iter(Axis(1)) {
            assert!(column.sum().abs() < 1e-9);
        }
    }

    #[test]
    fn test_constant_column_stays_finite() {
        let features = array![[2.0, 7.0], [2.0, 9.0]];
        let scaler = FeatureScaler::fit(&features).unwrap();
        let scaled = scaler.transform(&features);
        assert!(scaled.iter().all(|v| v.is_finite()));
        assert_eq!(scaled[[0, 0]], 0.0);
    }

    #[test]
    fn test_row_and_matrix_transform_agree() {
        let features = array![[1.0, 4.0], [3.0, 8.0], [5.0, 6.0]];
        let scaler = FeatureScaler::fit(&features).unwrap();

        let matrix = scaler.transform(&features);
        let row = scaler.transform_row(&[3.0, 8.0]);
        assert!((matrix[[1, 0]] - row[0]).abs() < 1e-12);
        assert!((matrix[[1, 1]] - row[1]).abs() < 1e-12);
    }

    #[test]
    fn test_empty_matrix_rejected() {
        let features = Array2::<f64>::zeros((0, 3));
        let err = FeatureScaler::fit(&features).unwrap_err();
        assert_eq!(err.error_code(), "EMPTY_FEATURE_SET");
    }
}
