use serde::{Deserialize, Serialize};
use validator::Validate;

/// One student record as supplied by the data-loading collaborator.
///
/// Field names are renamed to the upstream CSV column contract so records
/// deserialize directly from the dataset. Immutable within the core: every
/// operation takes it by shared reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct StudentRecord {
    /// Stable identifier
    #[serde(rename = "Student_ID")]
    #[validate(length(min = 1))]
    pub student_id: String,

    /// Full name
    #[serde(rename = "Name")]
    pub name: String,

    /// Roll number within the department
    #[serde(rename = "Roll_No")]
    pub roll_no: String,

    /// Department label (categorical)
    #[serde(rename = "Department")]
    #[validate(length(min = 1))]
    pub department: String,

    /// Current semester
    #[serde(rename = "Semester")]
    pub semester: u32,

    /// Assigned mentor
    #[serde(rename = "Mentor_ID")]
    pub mentor_id: String,

    /// Overall attendance percentage
    #[serde(rename = "Attendance_Percentage")]
    #[validate(range(min = 0.0, max = 100.0))]
    pub attendance_percentage: f64,

    /// Attendance percentage over the most recent month
    #[serde(rename = "Monthly_Attendance")]
    #[validate(range(min = 0.0, max = 100.0))]
    pub monthly_attendance: f64,

    /// Average test score across all assessments
    #[serde(rename = "Avg_Test_Score")]
    #[validate(range(min = 0.0, max = 100.0))]
    pub avg_test_score: f64,

    /// Most recent test score
    #[serde(rename = "Last_Test_Score")]
    #[validate(range(min = 0.0, max = 100.0))]
    pub last_test_score: f64,

    /// Number of subjects failed
    #[serde(rename = "Subjects_Failed")]
    pub subjects_failed: u32,

    /// Number of exam attempts exhausted
    #[serde(rename = "Attempts_Exhausted")]
    pub attempts_exhausted: u32,

    /// Fee payment status (categorical)
    #[serde(rename = "Fee_Status")]
    #[validate(length(min = 1))]
    pub fee_status: String,

    /// Days the fee payment is overdue
    #[serde(rename = "Fee_Due_Days")]
    pub fee_due_days: u32,

    /// Precomputed attendance risk flag (0 or 1)
    #[serde(rename = "Attendance_Flag")]
    #[validate(range(min = 0, max = 1))]
    pub attendance_flag: u8,

    /// Precomputed score risk flag (0 or 1)
    #[serde(rename = "Score_Flag")]
    #[validate(range(min = 0, max = 1))]
    pub score_flag: u8,

    /// Count of triggered risk flags, precomputed upstream
    #[serde(rename = "Total_Risk_Flags")]
    pub total_risk_flags: u32,
}

impl StudentRecord {
    /// Numeric fields that feed the feature encoder, in schema order.
    pub fn numeric_features(&self) -> [f64; 8] {
        [
            self.attendance_percentage,
            self.monthly_attendance,
            self.avg_test_score,
            self.last_test_score,
            self.subjects_failed as f64,
            self.attempts_exhausted as f64,
            self.fee_due_days as f64,
            self.semester as f64,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    fn sample_record() -> StudentRecord {
        StudentRecord {
            student_id: "STU-1001".to_string(),
            name: "Avery Lee".to_string(),
            roll_no: "CS-14".to_string(),
            department: "Computer Science".to_string(),
            semester: 4,
            mentor_id: "MNT-07".to_string(),
            attendance_percentage: 82.5,
            monthly_attendance: 79.0,
            avg_test_score: 68.0,
            last_test_score: 71.0,
            subjects_failed: 0,
            attempts_exhausted: 0,
            fee_status: "Paid".to_string(),
            fee_due_days: 0,
            attendance_flag: 0,
            score_flag: 0,
            total_risk_flags: 0,
        }
    }

    #[test]
    fn test_valid_record_passes_validation() {
        assert!(sample_record().validate().is_ok());
    }

    #[test]
    fn test_out_of_range_attendance_rejected() {
        let mut record = sample_record();
        record.attendance_percentage = 104.0;
        assert!(record.validate().is_err());
    }

    #[test]
    fn test_nan_score_rejected() {
        let mut record = sample_record();
        record.avg_test_score = f64::NAN;
        assert!(record.validate().is_err());
    }

    #[test]
    fn test_flag_must_be_binary() {
        let mut record = sample_record();
        record.attendance_flag = 2;
        assert!(record.validate().is_err());
    }

    #[test]
    fn test_csv_column_names_round_trip() {
        let record = sample_record();
        let json = serde_json::to_value(&record).unwrap();
        assert!(json.get("Student_ID").is_some());
        assert!(json.get("Attendance_Percentage").is_some());
        assert!(json.get("Total_Risk_Flags").is_some());

        let back: StudentRecord = serde_json::from_value(json).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn test_numeric_features_order() {
        let record = sample_record();
        let features = record.numeric_features();
        assert_eq!(features[0], 82.5);
        assert_eq!(features[7], 4.0);
    }
}
