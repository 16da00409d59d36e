//! Dropout-risk scoring, recommendation, and early-warning engine.
//!
//! The crate takes a batch of student records, derives a training signal
//! from their risk indicators, trains and selects a classifier, and serves
//! per-student predictions alongside explanations, rule-based intervention
//! recommendations, trend warnings, and an urgency ranking. The trained
//! classifier, its feature scaler, and the frozen feature schema persist
//! together as a single versioned bundle.
//!
//! The library surface is synchronous and free of network I/O; serving
//! layers are expected to wrap [`RiskEngine`] and the advisory functions.

pub mod advisory;
pub mod analytics;
pub mod config;
pub mod error;
pub mod ingest;
pub mod ml;
pub mod models;

pub use advisory::{detect_trends, explain, rank_priority, recommend};
pub use analytics::{cohort_summary, CohortSummary};
pub use config::{ForestConfig, TrainingConfig};
pub use error::{EngineError, Result};
pub use ingest::{load_students, IngestReport};
pub use ml::{RiskEngine, TrainedModelBundle, TrainingReport};
pub use models::{
    Explanation, RankedStudent, Recommendation, RiskLabel, RiskPrediction, StudentRecord,
    TrendWarning,
};
