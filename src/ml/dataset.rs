use ndarray::Array2;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::collections::BTreeMap;

use crate::error::{EngineError, Result};
use crate::models::RiskLabel;

/// Encoded training batch: feature matrix plus one label per row.
#[derive(Debug, Clone)]
pub struct TrainingDataset {
    /// Feature matrix (n_samples x n_features)
    pub features: Array2<f64>,

    /// One derived label per row
    pub labels: Vec<RiskLabel>,

    pub n_samples: usize,
    pub n_features: usize,
}

impl TrainingDataset {
    /// Assemble a dataset from encoded rows.
    pub fn new(rows: Vec<Vec<f64>>, labels: Vec<RiskLabel>) -> Result<Self> {
        let n_samples = rows.len();
        let n_features = rows.first().map(|r| r.len()).unwrap_or(0);
        if n_samples == 0 || n_features == 0 {
            return Err(EngineError::EmptyFeatureSet);
        }
        debug_assert_eq!(n_samples, labels.len());

        let flat: Vec<f64> = rows.into_iter().flatten().collect();
        let features = Array2::from_shape_vec((n_samples, n_features), flat)
            .map_err(|e| EngineError::Internal(format!("feature matrix shape: {e}")))?;

        Ok(Self {
            features,
            labels,
            n_samples,
            n_features,
        })
    }

    /// Class labels as the i32 indices the classifiers consume.
    pub fn label_indices(&self) -> Vec<i32> {
        self.labels.iter().map(|l| l.as_index() as i32).collect()
    }

    /// Count of samples per label, keyed in ordinal order.
    pub fn label_distribution(&self) -> BTreeMap<RiskLabel, usize> {
        let mut counts = BTreeMap::new();
        for label in &self.labels {
            *counts.entry(*label).or_insert(0) += 1;
        }
        counts
    }

    /// Split into train/held-out sets preserving class proportions.
    ///
    /// Every class present in the batch lands on both sides of the split, so
    /// any class with fewer than 2 examples is `InsufficientData`. The
    /// shuffle is seeded; identical inputs produce identical splits.
    pub fn stratified_split(
        &self,
        test_fraction: f64,
        seed: u64,
    ) -> Result<(TrainingDataset, TrainingDataset)> {
        let mut by_class: BTreeMap<RiskLabel, Vec<usize>> = BTreeMap::new();
        for (index, label) in self.labels.iter().enumerate() {
            by_class.entry(*label).or_default().push(index);
        }

        for (label, members) in &by_class {
            if members.len() < 2 {
                return Err(EngineError::InsufficientData {
                    label: *label,
                    count: members.len(),
                });
            }
        }

        let mut rng = StdRng::seed_from_u64(seed);
        let mut train_rows = Vec::new();
        let mut test_rows = Vec::new();

        for members in by_class.values() {
            let mut members = members.clone();
            members.shuffle(&mut rng);

            let n_test = ((members.len() as f64) * test_fraction).round() as usize;
            let n_test = n_test.clamp(1, members.len() - 1);

            test_rows.extend_from_slice(&members[..n_test]);
            train_rows.extend_from_slice(&members[n_test..]);
        }

        train_rows.sort_unstable();
        test_rows.sort_unstable();

        Ok((self.subset(&train_rows), self.subset(&test_rows)))
    }

    fn subset(&self, indices: &[usize]) -> TrainingDataset {
        let mut features = Array2::zeros((indices.len(), self.n_features));
        let mut labels = Vec::with_capacity(indices.len());

        for (row, &index) in indices.iter().enumerate() {
            features.row_mut(row).assign(&self.features.row(index));
            labels.push(self.labels[index]);
        }

        TrainingDataset {
            features,
            labels,
            n_samples: indices.len(),
            n_features: self.n_features,
        }
    }
}
