use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use strum::{Display, EnumString};

/// Ordinal dropout-risk category.
///
/// Derived from indicator fields by the label deriver, never supplied by an
/// external source. `Low < Medium < High`.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
)]
#[serde(rename_all = "snake_case")]
pub enum RiskLabel {
    #[strum(serialize = "Low Risk")]
    Low,
    #[strum(serialize = "Medium Risk")]
    Medium,
    #[strum(serialize = "High Risk")]
    High,
}

impl RiskLabel {
    /// All labels in ordinal order.
    pub const ALL: [RiskLabel; 3] = [RiskLabel::Low, RiskLabel::Medium, RiskLabel::High];

    /// Stable class index used by the classifiers.
    pub fn as_index(&self) -> usize {
        match self {
            RiskLabel::Low => 0,
            RiskLabel::Medium => 1,
            RiskLabel::High => 2,
        }
    }

    /// Inverse of [`RiskLabel::as_index`].
    pub fn from_index(index: usize) -> Option<RiskLabel> {
        match index {
            0 => Some(RiskLabel::Low),
            1 => Some(RiskLabel::Medium),
            2 => Some(RiskLabel::High),
            _ => None,
        }
    }

    /// Key used in the per-class probability map.
    pub fn probability_key(&self) -> &'static str {
        match self {
            RiskLabel::Low => "low_risk",
            RiskLabel::Medium => "medium_risk",
            RiskLabel::High => "high_risk",
        }
    }
}

/// Classifier output for one student.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskPrediction {
    /// Predicted risk category
    pub label: RiskLabel,

    /// Confidence score, the maximum class probability
    pub confidence: f64,

    /// Per-class probabilities, summing to 1
    pub probabilities: HashMap<String, f64>,
}

impl RiskPrediction {
    /// Build a prediction whose probability mass sits entirely on `label`.
    pub fn certain(label: RiskLabel) -> Self {
        let probabilities = RiskLabel::ALL
            .iter()
            .map(|l| {
                (
                    l.probability_key().to_string(),
                    if l == &label { 1.0 } else { 0.0 },
                )
            })
            .collect();

        Self {
            label,
            confidence: 1.0,
            probabilities,
        }
    }
}
