use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::error::{EngineError, Result};
use crate::models::StudentRecord;

/// Names of the fixed numeric features, in encoding order. Must stay aligned
/// with [`StudentRecord::numeric_features`].
pub const NUMERIC_FEATURES: [&str; 8] = [
    "Attendance_Percentage",
    "Monthly_Attendance",
    "Avg_Test_Score",
    "Last_Test_Score",
    "Subjects_Failed",
    "Attempts_Exhausted",
    "Fee_Due_Days",
    "Semester",
];

/// Ordered feature-name schema frozen at training time.
///
/// The schema is the train/inference contract: every vector produced by
/// [`FeatureSchema::encode`] has exactly these columns in this order. It
/// travels inside the trained bundle and is never recomputed per call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureSchema {
    /// Full ordered column names: numerics, then department indicators,
    /// then fee-status indicators
    columns: Vec<String>,

    /// Department levels observed at training time, sorted
    departments: Vec<String>,

    /// Fee-status levels observed at training time, sorted
    fee_statuses: Vec<String>,
}

impl FeatureSchema {
    /// Enumerate the categories observed in a training batch and freeze the
    /// resulting ordered name list.
    pub fn build(batch: &[StudentRecord]) -> Result<Self> {
        if batch.is_empty() {
            return Err(EngineError::EmptyFeatureSet);
        }

        // Sorted sets so the frozen order is independent of batch order
        let departments: BTreeSet<&str> =
            batch.iter().map(|r| r.department.as_str()).collect();
        let fee_statuses: BTreeSet<&str> =
            batch.iter().map(|r| r.fee_status.as_str()).collect();

        let mut columns: Vec<String> =
            NUMERIC_FEATURES.iter().map(|n| n.to_string()).collect();
        columns.extend(departments.iter().map(|d| format!("Dept_{d}")));
        columns.extend(fee_statuses.iter().map(|f| format!("Fee_{f}")));

        Ok(Self {
            columns,
            departments: departments.into_iter().map(String::from).collect(),
            fee_statuses: fee_statuses.into_iter().map(String::from).collect(),
        })
    }

    /// Encode one record against the frozen schema.
    ///
    /// Pure transform. A department or fee status unseen at training time
    /// encodes to an all-zero indicator block for that group; a non-finite
    /// numeric value is a `MalformedRecord` failure.
    pub fn encode(&self, record: &StudentRecord) -> Result<Vec<f64>> {
        let numerics = record.numeric_features();
        for (name, value) in NUMERIC_FEATURES.iter().zip(numerics.iter()) {
            if !value.is_finite() {
                return Err(EngineError::MalformedRecord {
                    id: record.student_id.clone(),
                    reason: format!("{name} is not a finite number"),
                });
            }
        }

        let mut vector = Vec::with_capacity(self.columns.len());
        vector.extend_from_slice(&numerics);

        for department in &self.departments {
            vector.push(if *department == record.department { 1.0 } else { 0.0 });
        }
        for fee_status in &self.fee_statuses {
            vector.push(if *fee_status == record.fee_status { 1.0 } else { 0.0 });
        }

        Ok(vector)
    }

    /// Ordered column names.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Number of columns every encoded vector carries.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Offset and width of the department indicator block.
    pub fn department_block(&self) -> (usize, usize) {
        (NUMERIC_FEATURES.len(), self.departments.len())
    }
}
