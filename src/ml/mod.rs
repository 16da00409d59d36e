/// Risk-scoring pipeline: label derivation, feature encoding, candidate
/// training and selection, and the persisted model bundle.
///
/// Training flow: derive labels from indicator fields, freeze the feature
/// schema from the observed batch, stratified-split, scale on the training
/// split, fit every candidate, keep the best by held-out accuracy. The
/// fitted classifier, scaler, and schema then travel together as one bundle.
pub mod bundle;
pub mod classifier;
pub mod dataset;
pub mod engine;
pub mod features;
pub mod labels;
pub mod scaler;

pub use bundle::{BundleMetadata, TrainedModelBundle, BUNDLE_FORMAT_VERSION};
pub use classifier::{ModelKind, ModelMetrics};
pub use engine::{CandidateScore, RiskEngine, SkippedRecord, TrainingReport};
pub use features::FeatureSchema;
pub use labels::{derive_label, derive_labels};
pub use scaler::FeatureScaler;
