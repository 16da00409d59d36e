use chrono::Utc;
use parking_lot::RwLock;
use rayon::prelude::*;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

use crate::config::TrainingConfig;
use crate::error::{EngineError, Result};
use crate::ml::bundle::{BundleMetadata, TrainedModelBundle};
use crate::ml::classifier::{accuracy, to_dense_matrix, ModelArtifact, ModelKind, ModelMetrics};
use crate::ml::dataset::TrainingDataset;
use crate::ml::features::FeatureSchema;
use crate::ml::labels::derive_labels;
use crate::ml::scaler::FeatureScaler;
use crate::models::{RiskPrediction, StudentRecord};

/// Held-out accuracy of one fitted candidate.
#[derive(Debug, Clone, Serialize)]
pub struct CandidateScore {
    pub kind: ModelKind,
    pub holdout_accuracy: f64,
}

/// A record dropped from a training batch, with the reason.
#[derive(Debug, Clone, Serialize)]
pub struct SkippedRecord {
    pub index: usize,
    pub student_id: String,
    pub reason: String,
}

/// Outcome of one training run.
#[derive(Debug, Clone, Serialize)]
pub struct TrainingReport {
    pub selected: ModelKind,
    pub holdout_accuracy: f64,
    pub candidates: Vec<CandidateScore>,
    pub metrics: ModelMetrics,
    pub n_samples: usize,
    pub n_features: usize,
    pub label_distribution: BTreeMap<String, usize>,
    pub skipped: Vec<SkippedRecord>,
}

/// The risk-scoring engine: owns the trained bundle and exposes the
/// train / predict / persist / restore surface.
///
/// State machine: Untrained until `train` or `restore` succeeds, Trained
/// afterwards. The bundle slot is swapped atomically under a write lock, so
/// no reader ever observes a half-trained bundle; once installed the bundle
/// is immutable and readers only clone the `Arc`.
pub struct RiskEngine {
    config: TrainingConfig,
    bundle: RwLock<Option<Arc<TrainedModelBundle>>>,
}

impl Default for RiskEngine {
    fn default() -> Self {
        Self::new(TrainingConfig::default())
    }
}

impl RiskEngine {
    pub fn new(config: TrainingConfig) -> Self {
        Self {
            config,
            bundle: RwLock::new(None),
        }
    }

    /// Whether a bundle is installed.
    pub fn is_trained(&self) -> bool {
        self.bundle.read().is_some()
    }

    /// The installed bundle, if any.
    pub fn bundle(&self) -> Option<Arc<TrainedModelBundle>> {
        self.bundle.read().clone()
    }

    /// Train on a historical batch and install the winning model.
    ///
    /// Labels are derived from the batch itself, the schema is frozen from
    /// the observed categories, and every configured candidate is fitted on
    /// the scaled training split and scored on the held-out split. Records
    /// that fail to encode are skipped and reported, not fatal.
    pub fn train(&self, records: &[StudentRecord]) -> Result<TrainingReport> {
        self.config.validate()?;
        if records.is_empty() {
            return Err(EngineError::EmptyFeatureSet);
        }

        info!(records = records.len(), "training risk classifier");

        let labels = derive_labels(records);
        let schema = FeatureSchema::build(records)?;

        let mut rows = Vec::with_capacity(records.len());
        let mut kept_labels = Vec::with_capacity(records.len());
        let mut skipped = Vec::new();
        for (index, (record, label)) in records.iter().zip(labels.iter()).enumerate() {
            match schema.encode(record) {
                Ok(vector) => {
                    rows.push(vector);
                    kept_labels.push(*label);
                }
                Err(e) => {
                    warn!(student_id = %record.student_id, error = %e, "skipping record");
                    skipped.push(SkippedRecord {
                        index,
                        student_id: record.student_id.clone(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        let dataset = TrainingDataset::new(rows, kept_labels)?;
        let label_distribution: BTreeMap<String, usize> = dataset
            .label_distribution()
            .into_iter()
            .map(|(label, count)| (label.to_string(), count))
            .collect();

        let (train_split, holdout_split) =
            dataset.stratified_split(self.config.test_fraction, self.config.seed)?;

        // Scaler statistics come from the training split only
        let scaler = FeatureScaler::fit(&train_split.features)?;
        let x_train = to_dense_matrix(&scaler.transform(&train_split.features));
        let x_holdout = to_dense_matrix(&scaler.transform(&holdout_split.features));
        let y_train = train_split.label_indices();
        let y_holdout = holdout_split.label_indices();

        let mut candidates = Vec::with_capacity(self.config.candidates.len());
        let mut best: Option<(ModelArtifact, f64)> = None;

        for kind in &self.config.candidates {
            let model = ModelArtifact::fit(
                *kind,
                &x_train,
                &y_train,
                &self.config.forest,
                self.config.seed,
            )?;
            let holdout_accuracy = accuracy(&y_holdout, &model.predict(&x_holdout)?);
            info!(model = %kind, accuracy = holdout_accuracy, "candidate scored");
            candidates.push(CandidateScore {
                kind: *kind,
                holdout_accuracy,
            });

            // Strict comparison keeps the earlier-listed candidate on ties
            let improves = match &best {
                None => true,
                Some((_, best_accuracy)) => holdout_accuracy > *best_accuracy,
            };
            if improves {
                best = Some((model, holdout_accuracy));
            }
        }

        let (model, holdout_accuracy) = best.ok_or_else(|| {
            EngineError::Configuration("no candidate models configured".to_string())
        })?;
        let metrics = ModelMetrics::compute(&y_holdout, &model.predict(&x_holdout)?);
        let selected = model.kind();
        info!(model = %selected, accuracy = holdout_accuracy, "selected classifier");

        let metadata = BundleMetadata {
            trained_at: Utc::now(),
            model: selected,
            holdout_accuracy,
            n_training_samples: dataset.n_samples,
            n_features: dataset.n_features,
        };
        let n_features = dataset.n_features;
        let bundle = TrainedModelBundle::new(model, scaler, schema, metadata)?;

        *self.bundle.write() = Some(Arc::new(bundle));

        Ok(TrainingReport {
            selected,
            holdout_accuracy,
            candidates,
            metrics,
            n_samples: dataset.n_samples,
            n_features,
            label_distribution,
            skipped,
        })
    }

    /// Predict the risk category for one record.
    pub fn predict(&self, record: &StudentRecord) -> Result<RiskPrediction> {
        let bundle = self.bundle().ok_or(EngineError::ModelNotReady)?;
        bundle.predict(record)
    }

    /// Predict a whole batch. Records are independent, so the work is
    /// parallelized; results keep batch order, one per record.
    pub fn predict_batch(&self, records: &[StudentRecord]) -> Vec<Result<RiskPrediction>> {
        let Some(bundle) = self.bundle() else {
            return records.iter().map(|_| Err(EngineError::ModelNotReady)).collect();
        };
        records
            .par_iter()
            .map(|record| bundle.predict(record))
            .collect()
    }

    /// Serialize the installed bundle.
    pub fn persist(&self) -> Result<Vec<u8>> {
        let bundle = self.bundle().ok_or(EngineError::ModelNotReady)?;
        bundle.persist()
    }

    /// Install a bundle from its persisted form.
    pub fn restore(&self, bytes: &[u8]) -> Result<()> {
        let bundle = TrainedModelBundle::restore(bytes)?;
        info!(model = %bundle.model_kind(), "restored trained bundle");
        *self.bundle.write() = Some(Arc::new(bundle));
        Ok(())
    }

    /// Write the installed bundle to a file.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let bundle = self.bundle().ok_or(EngineError::ModelNotReady)?;
        bundle.save_to(path)
    }

    /// Install a bundle from a file.
    pub fn load_from(&self, path: &Path) -> Result<()> {
        let bundle = TrainedModelBundle::load_from(path)?;
        *self.bundle.write() = Some(Arc::new(bundle));
        Ok(())
    }
}
