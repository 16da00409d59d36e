use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::models::StudentRecord;

/// Priority tier shared by recommendations and trend warnings.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    High,
    Medium,
}

/// Which aspect of the student a recommendation targets.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationCategory {
    Attendance,
    Academic,
    Financial,
}

/// One actionable intervention, derived purely from raw record thresholds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub category: RecommendationCategory,
    pub priority: Priority,
    pub action: String,
    pub description: String,
}

/// Short-term decline detected by comparing two behavioral fields.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
pub enum TrendKind {
    #[strum(serialize = "Attendance Decline")]
    AttendanceDecline,
    #[strum(serialize = "Performance Decline")]
    PerformanceDecline,
}

/// One detected trend warning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendWarning {
    pub kind: TrendKind,
    pub severity: Priority,
    pub message: String,
}

/// Why a prediction came out the way it did, in counselor-readable form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Explanation {
    /// Contributing factors in rule order, values interpolated
    pub main_factors: Vec<String>,

    /// One-line narrative tying the factors to the asserted label
    pub summary: String,
}

/// A student paired with its intervention-urgency score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedStudent {
    pub record: StudentRecord,
    pub score: f64,
}
