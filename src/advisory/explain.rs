use crate::models::{Explanation, RiskPrediction, StudentRecord};

/// Explain a prediction in counselor-readable terms.
///
/// The factor rules are independent of the classifier: attendance below 75,
/// average score below 60, any failed subject, and any overdue fee each
/// contribute one factor with the underlying value interpolated. Purely
/// descriptive; the prediction is never altered.
pub fn explain(record: &StudentRecord, prediction: &RiskPrediction) -> Explanation {
    let mut main_factors = Vec::new();

    if record.attendance_percentage < 75.0 {
        main_factors.push(format!(
            "Low attendance: {:.1}%",
            record.attendance_percentage
        ));
    }
    if record.avg_test_score < 60.0 {
        main_factors.push(format!(
            "Poor academic performance: {:.1}%",
            record.avg_test_score
        ));
    }
    if record.subjects_failed > 0 {
        main_factors.push(format!("Failed subjects: {}", record.subjects_failed));
    }
    if record.fee_due_days > 0 {
        main_factors.push(format!("Overdue fees: {} days", record.fee_due_days));
    }

    let summary = if main_factors.is_empty() {
        format!("Student assessed as {} with no standout risk factors", prediction.label)
    } else {
        format!(
            "Student flagged as {} due to: {}",
            prediction.label,
            main_factors.join(", ")
        )
    };

    Explanation {
        main_factors,
        summary,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RiskLabel;

    fn record(attendance: f64, score: f64, failed: u32, fee_days: u32) -> StudentRecord {
        StudentRecord {
            student_id: "STU-3001".to_string(),
            name: "Priya Shah".to_string(),
            roll_no: "EC-21".to_string(),
            department: "Electronics".to_string(),
            semester: 5,
            mentor_id: "MNT-09".to_string(),
            attendance_percentage: attendance,
            monthly_attendance: attendance,
            avg_test_score: score,
            last_test_score: score,
            subjects_failed: failed,
            attempts_exhausted: 0,
            fee_status: "Pending".to_string(),
            fee_due_days: fee_days,
            attendance_flag: 0,
            score_flag: 0,
            total_risk_flags: 0,
        }
    }

    #[test]
    fn test_all_four_factors_fire() {
        let explanation = explain(
            &record(70.0, 55.0, 2, 45),
            &RiskPrediction::certain(RiskLabel::High),
        );

        assert_eq!(explanation.main_factors.len(), 4);
        assert_eq!(explanation.main_factors[0], "Low attendance: 70.0%");
        assert_eq!(
            explanation.main_factors[1],
            "Poor academic performance: 55.0%"
        );
        assert_eq!(explanation.main_factors[2], "Failed subjects: 2");
        assert_eq!(explanation.main_factors[3], "Overdue fees: 45 days");
        assert!(explanation.summary.starts_with("Student flagged as High Risk due to:"));
        assert!(explanation.summary.contains("Low attendance: 70.0%"));
    }

    #[test]
    fn test_clean_record_has_no_factors() {
        let explanation = explain(
            &record(90.0, 75.0, 0, 0),
            &RiskPrediction::certain(RiskLabel::Low),
        );

        assert!(explanation.main_factors.is_empty());
        assert!(explanation.summary.contains("Low Risk"));
    }

    #[test]
    fn test_threshold_boundaries_do_not_fire() {
        let explanation = explain(
            &record(75.0, 60.0, 0, 0),
            &RiskPrediction::certain(RiskLabel::Low),
        );
        assert!(explanation.main_factors.is_empty());
    }
}
