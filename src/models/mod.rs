/// Core data model: the student record contract, the derived risk label,
/// and the advisory entities returned across the consumed-by boundary.
pub mod advisory;
pub mod risk;
pub mod student;

pub use advisory::{
    Explanation, Priority, RankedStudent, Recommendation, RecommendationCategory, TrendKind,
    TrendWarning,
};
pub use risk::{RiskLabel, RiskPrediction};
pub use student::StudentRecord;
