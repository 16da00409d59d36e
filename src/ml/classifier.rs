use ndarray::Array2;
use serde::{Deserialize, Serialize};
use smartcore::ensemble::random_forest_classifier::{
    RandomForestClassifier, RandomForestClassifierParameters,
};
use smartcore::linalg::basic::matrix::DenseMatrix;
use smartcore::linear::logistic_regression::{LogisticRegression, LogisticRegressionParameters};
use std::collections::HashMap;
use strum::{Display, EnumString};

use crate::config::ForestConfig;
use crate::error::{EngineError, Result};
use crate::models::RiskLabel;

/// Candidate model families.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
pub enum ModelKind {
    #[strum(serialize = "Random Forest")]
    RandomForest,
    #[strum(serialize = "Logistic Regression")]
    LogisticRegression,
}

/// A fitted classifier, serializable as part of the trained bundle.
#[derive(Debug, Serialize, Deserialize)]
pub enum ModelArtifact {
    RandomForest(RandomForestClassifier<f64, i32, DenseMatrix<f64>, Vec<i32>>),
    LogisticRegression(LogisticRegression<f64, i32, DenseMatrix<f64>, Vec<i32>>),
}

impl ModelArtifact {
    /// Fit one candidate on scaled training features.
    pub fn fit(
        kind: ModelKind,
        x: &DenseMatrix<f64>,
        y: &[i32],
        forest: &ForestConfig,
        seed: u64,
    ) -> Result<Self> {
        match kind {
            ModelKind::RandomForest => {
                let params = RandomForestClassifierParameters::default()
                    .with_n_trees(forest.n_trees)
                    .with_max_depth(forest.max_depth)
                    .with_seed(seed);
                let model = RandomForestClassifier::fit(x, &y.to_vec(), params)
                    .map_err(|e| {
                        EngineError::Internal(format!("failed to fit random forest: {e}"))
                    })?;
                Ok(ModelArtifact::RandomForest(model))
            }
            ModelKind::LogisticRegression => {
                let params = LogisticRegressionParameters::default();
                let model = LogisticRegression::fit(x, &y.to_vec(), params).map_err(|e| {
                    EngineError::Internal(format!("failed to fit logistic regression: {e}"))
                })?;
                Ok(ModelArtifact::LogisticRegression(model))
            }
        }
    }

    /// Predict class indices for a feature matrix.
    pub fn predict(&self, x: &DenseMatrix<f64>) -> Result<Vec<i32>> {
        let predictions = match self {
            ModelArtifact::RandomForest(model) => model.predict(x),
            ModelArtifact::LogisticRegression(model) => model.predict(x),
        };
        predictions.map_err(|e| EngineError::Internal(format!("prediction failed: {e}")))
    }

    pub fn kind(&self) -> ModelKind {
        match self {
            ModelArtifact::RandomForest(_) => ModelKind::RandomForest,
            ModelArtifact::LogisticRegression(_) => ModelKind::LogisticRegression,
        }
    }
}

/// Convert the ndarray feature matrix into the matrix type the models consume.
pub fn to_dense_matrix(arr: &Array2<f64>) -> DenseMatrix<f64> {
    let shape = arr.shape();
    let data: Vec<f64> = arr.iter().copied().collect();
    DenseMatrix::new(shape[0], shape[1], data, false)
}

/// Exact-match accuracy.
pub fn accuracy(y_true: &[i32], y_pred: &[i32]) -> f64 {
    if y_true.is_empty() {
        return 0.0;
    }
    let correct = y_true
        .iter()
        .zip(y_pred.iter())
        .filter(|(t, p)| t == p)
        .count();
    correct as f64 / y_true.len() as f64
}

/// Held-out evaluation metrics for a fitted model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelMetrics {
    pub accuracy: f64,
    pub precision: f64,
    pub recall: f64,
    pub f1_score: f64,
    pub per_class: HashMap<String, ClassMetrics>,
}

/// Per-class evaluation metrics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassMetrics {
    pub precision: f64,
    pub recall: f64,
    pub f1_score: f64,
    pub support: usize,
}

impl ModelMetrics {
    /// Compute accuracy plus macro-averaged per-class metrics.
    pub fn compute(y_true: &[i32], y_pred: &[i32]) -> Self {
        let n_classes = RiskLabel::ALL.len();
        let mut per_class = HashMap::new();

        for label in RiskLabel::ALL {
            let class = label.as_index() as i32;

            let tp = y_true
                .iter()
                .zip(y_pred.iter())
                .filter(|(t, p)| **t == class && **p == class)
                .count();
            let fp = y_pred
                .iter()
                .zip(y_true.iter())
                .filter(|(p, t)| **p == class && **t != class)
                .count();
            let fn_count = y_true
                .iter()
                .zip(y_pred.iter())
                .filter(|(t, p)| **t == class && **p != class)
                .count();

            let precision = if tp + fp > 0 {
                tp as f64 / (tp + fp) as f64
            } else {
                0.0
            };
            let recall = if tp + fn_count > 0 {
                tp as f64 / (tp + fn_count) as f64
            } else {
                0.0
            };
            let f1 = if precision + recall > 0.0 {
                2.0 * precision * recall / (precision + recall)
            } else {
                0.0
            };
            let support = y_true.iter().filter(|&&t| t == class).count();

            per_class.insert(
                label.to_string(),
                ClassMetrics {
                    precision,
                    recall,
                    f1_score: f1,
                    support,
                },
            );
        }

        let precision =
            per_class.values().map(|m| m.precision).sum::<f64>() / n_classes as f64;
        let recall = per_class.values().map(|m| m.recall).sum::<f64>() / n_classes as f64;
        let f1_score =
            per_class.values().map(|m| m.f1_score).sum::<f64>() / n_classes as f64;

        Self {
            accuracy: accuracy(y_true, y_pred),
            precision,
            recall,
            f1_score,
            per_class,
        }
    }
}
