use crate::models::{RiskLabel, StudentRecord};

/// Derive the training label for one record.
///
/// Rules are evaluated in strict priority order: any High condition wins
/// over the Medium condition, which wins over Low. The label is monotonic
/// non-decreasing in `total_risk_flags` with all other fields held fixed.
pub fn derive_label(record: &StudentRecord) -> RiskLabel {
    let high = record.total_risk_flags >= 3
        || (record.attendance_flag == 1 && record.score_flag == 1)
        || record.subjects_failed >= 3
        || record.attendance_percentage < 50.0;

    if high {
        RiskLabel::High
    } else if (1..=2).contains(&record.total_risk_flags) {
        RiskLabel::Medium
    } else {
        RiskLabel::Low
    }
}

/// Derive labels for a whole batch. Records are not mutated; the label is
/// the training signal, not a stored field.
pub fn derive_labels(batch: &[StudentRecord]) -> Vec<RiskLabel> {
    batch.iter().map(derive_label).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_record() -> StudentRecord {
        StudentRecord {
            student_id: "STU-2001".to_string(),
            name: "Nina Rao".to_string(),
            roll_no: "ME-03".to_string(),
            department: "Mechanical".to_string(),
            semester: 3,
            mentor_id: "MNT-02".to_string(),
            attendance_percentage: 80.0,
            monthly_attendance: 78.0,
            avg_test_score: 65.0,
            last_test_score: 60.0,
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
    fn test_clean_record_is_low() {
        assert_eq!(derive_label(&base_record()), RiskLabel::Low);
    }

    #[test]
    fn test_one_or_two_flags_is_medium() {
        let mut record = base_record();
        record.total_risk_flags = 1;
        assert_eq!(derive_label(&record), RiskLabel::Medium);
        record.total_risk_flags = 2;
        assert_eq!(derive_label(&record), RiskLabel::Medium);
    }

    #[test]
    fn test_flag_count_alone_forces_high() {
        // High triggered solely by the flag count, no individual indicators
        let mut record = base_record();
        record.total_risk_flags = 3;
        record.attendance_flag = 0;
        record.score_flag = 0;
        record.subjects_failed = 0;
        record.attendance_percentage = 80.0;
        assert_eq!(derive_label(&record), RiskLabel::High);
    }

    #[test]
    fn test_combined_indicator_flags_force_high() {
        let mut record = base_record();
        record.attendance_flag = 1;
        record.score_flag = 1;
        record.total_risk_flags = 2;
        // Satisfies both the Medium band and a High condition; High must win
        assert_eq!(derive_label(&record), RiskLabel::High);
    }

    #[test]
    fn test_failed_subjects_force_high() {
        let mut record = base_record();
        record.subjects_failed = 3;
        assert_eq!(derive_label(&record), RiskLabel::High);
    }

    #[test]
    fn test_critical_attendance_forces_high() {
        let mut record = base_record();
        record.attendance_percentage = 49.9;
        assert_eq!(derive_label(&record), RiskLabel::High);
    }

    #[test]
    fn test_label_monotonic_in_flag_count() {
        let mut previous = RiskLabel::Low;
        for flags in 0..=6 {
            let mut record = base_record();
            record.total_risk_flags = flags;
            let label = derive_label(&record);
            assert!(label >= previous, "label decreased at {flags} flags");
            previous = label;
        }
    }

    #[test]
    fn test_batch_matches_per_record_derivation() {
        let mut risky = base_record();
        risky.total_risk_flags = 4;
        let batch = vec![base_record(), risky.clone()];

        let labels = derive_labels(&batch);
        assert_eq!(labels, vec![derive_label(&batch[0]), derive_label(&risky)]);
    }
}
