use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use smartcore::linalg::basic::matrix::DenseMatrix;
use std::path::Path;

use crate::error::{EngineError, Result};
use crate::ml::classifier::{ModelArtifact, ModelKind};
use crate::ml::features::FeatureSchema;
use crate::ml::scaler::FeatureScaler;
use crate::models::{RiskLabel, RiskPrediction, StudentRecord};

/// Version stamp written into every persisted bundle. Bump on any change to
/// the serialized layout.
pub const BUNDLE_FORMAT_VERSION: u32 = 1;

/// Descriptive metadata captured at training time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BundleMetadata {
    pub trained_at: DateTime<Utc>,
    pub model: ModelKind,
    pub holdout_accuracy: f64,
    pub n_training_samples: usize,
    pub n_features: usize,
}

/// The one persisted artifact: fitted classifier, fitted scaler, and the
/// frozen feature schema, treated as a single atomic unit.
///
/// The three parts are never used independently; swapping one without the
/// others silently misaligns columns, so they only ever travel together.
/// Immutable once constructed.
#[derive(Debug, Serialize, Deserialize)]
pub struct TrainedModelBundle {
    format_version: u32,
    model: ModelArtifact,
    scaler: FeatureScaler,
    schema: FeatureSchema,
    pub metadata: BundleMetadata,
}

impl TrainedModelBundle {
    pub(crate) fn new(
        model: ModelArtifact,
        scaler: FeatureScaler,
        schema: FeatureSchema,
        metadata: BundleMetadata,
    ) -> Result<Self> {
        if scaler.len() != schema.len() {
            return Err(EngineError::Internal(format!(
                "scaler fitted on {} columns but schema has {}",
                scaler.len(),
                schema.len()
            )));
        }
        Ok(Self {
            format_version: BUNDLE_FORMAT_VERSION,
            model,
            scaler,
            schema,
            metadata,
        })
    }

    /// Predict the risk category for one record.
    ///
    /// Pure function of (record, bundle): encode against the frozen schema,
    /// scale with the paired scaler, classify. Deterministic for a fixed
    /// bundle.
    pub fn predict(&self, record: &StudentRecord) -> Result<RiskPrediction> {
        let features = self.schema.encode(record)?;
        let scaled = self.scaler.transform_row(&features);
        let x = DenseMatrix::new(1, scaled.len(), scaled, false);

        let predicted = self.model.predict(&x)?;
        let index = *predicted.first().ok_or_else(|| {
            EngineError::Internal("classifier returned no prediction".to_string())
        })?;
        let label = RiskLabel::from_index(index as usize).ok_or_else(|| {
            EngineError::Internal(format!("classifier returned unknown class {index}"))
        })?;

        Ok(RiskPrediction::certain(label))
    }

    /// Serialize to the opaque persisted form.
    pub fn persist(&self) -> Result<Vec<u8>> {
        bincode::serialize(self).map_err(|e| EngineError::Serialization(e.to_string()))
    }

    /// Load a bundle persisted by [`TrainedModelBundle::persist`].
    ///
    /// A blob from a different format version, or one whose parts disagree
    /// about the column count, is rejected rather than allowed to misalign
    /// columns at prediction time.
    pub fn restore(bytes: &[u8]) -> Result<Self> {
        let bundle: TrainedModelBundle = bincode::deserialize(bytes)
            .map_err(|e| EngineError::IncompatibleBundle(format!("undecodable blob: {e}")))?;

        if bundle.format_version != BUNDLE_FORMAT_VERSION {
            return Err(EngineError::IncompatibleBundle(format!(
                "bundle format {} does not match supported format {}",
                bundle.format_version, BUNDLE_FORMAT_VERSION
            )));
        }
        if bundle.scaler.len() != bundle.schema.len() {
            return Err(EngineError::IncompatibleBundle(format!(
                "scaler covers {} columns but schema has {}",
                bundle.scaler.len(),
                bundle.schema.len()
            )));
        }

        Ok(bundle)
    }

    /// Write the persisted form to a file.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.persist()?)?;
        Ok(())
    }

    /// Read a bundle from a file written by [`TrainedModelBundle::save_to`].
    pub fn load_from(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)?;
        Self::restore(&bytes)
    }

    pub fn schema(&self) -> &FeatureSchema {
        &self.schema
    }

    pub fn model_kind(&self) -> ModelKind {
        self.model.kind()
    }
}
