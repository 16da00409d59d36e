use crate::models::{Priority, Recommendation, RecommendationCategory, StudentRecord};

/// Generate prioritized action items from raw record thresholds.
///
/// Deliberately independent of the classifier output, so recommendations
/// stay stable across model swaps. Four checks run in fixed generation
/// order; each is independent and zero to four items may result. The two
/// thresholds inside the attendance, academic, and fee tiers are mutually
/// exclusive.
pub fn recommend(record: &StudentRecord) -> Vec<Recommendation> {
    let mut recommendations = Vec::new();

    if record.attendance_percentage < 60.0 {
        recommendations.push(Recommendation {
            category: RecommendationCategory::Attendance,
            priority: Priority::High,
            action: "Schedule immediate mentor meeting".to_string(),
            description: format!(
                "Attendance at {:.1}% - Critical intervention needed",
                record.attendance_percentage
            ),
        });
    } else if record.attendance_percentage < 75.0 {
        recommendations.push(Recommendation {
            category: RecommendationCategory::Attendance,
            priority: Priority::Medium,
            action: "Send attendance warning to student & parents".to_string(),
            description: format!(
                "Attendance at {:.1}% - Monitor closely",
                record.attendance_percentage
            ),
        });
    }

    if record.avg_test_score < 40.0 {
        recommendations.push(Recommendation {
            category: RecommendationCategory::Academic,
            priority: Priority::High,
            action: "Enroll in remedial classes".to_string(),
            description: format!(
                "Average score {:.1}% - Needs academic support",
                record.avg_test_score
            ),
        });
    } else if record.avg_test_score < 60.0 {
        recommendations.push(Recommendation {
            category: RecommendationCategory::Academic,
            priority: Priority::Medium,
            action: "Provide additional study resources".to_string(),
            description: format!(
                "Average score {:.1}% - Can improve with support",
                record.avg_test_score
            ),
        });
    }

    if record.fee_due_days > 60 {
        recommendations.push(Recommendation {
            category: RecommendationCategory::Financial,
            priority: Priority::High,
            action: "Urgent financial counseling required".to_string(),
            description: format!("Fees overdue by {} days", record.fee_due_days),
        });
    } else if record.fee_due_days > 30 {
        recommendations.push(Recommendation {
            category: RecommendationCategory::Financial,
            priority: Priority::Medium,
            action: "Contact for payment plan discussion".to_string(),
            description: format!("Fees overdue by {} days", record.fee_due_days),
        });
    }

    if record.subjects_failed >= 2 {
        recommendations.push(Recommendation {
            category: RecommendationCategory::Academic,
            priority: Priority::High,
            action: "Subject-specific tutoring required".to_string(),
            description: format!(
                "Failed {} subjects - Risk of academic probation",
                record.subjects_failed
            ),
        });
    }

    recommendations
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(attendance: f64, score: f64, fee_days: u32, failed: u32) -> StudentRecord {
        StudentRecord {
            student_id: "STU-4001".to_string(),
            name: "Dev Kumar".to_string(),
            roll_no: "CE-08".to_string(),
            department: "Civil".to_string(),
            semester: 6,
            mentor_id: "MNT-03".to_string(),
            attendance_percentage: attendance,
            monthly_attendance: attendance,
            avg_test_score: score,
            last_test_score: score,
            subjects_failed: failed,
            attempts_exhausted: 0,
            fee_status: "Overdue".to_string(),
            fee_due_days: fee_days,
            attendance_flag: 0,
            score_flag: 0,
            total_risk_flags: 0,
        }
    }

    #[test]
    fn test_worst_case_fires_all_four_checks_high() {
        let recommendations = recommend(&record(59.0, 39.0, 65, 2));

        assert_eq!(recommendations.len(), 4);
        assert!(recommendations.iter().all(|r| r.priority == Priority::High));
        assert_eq!(recommendations[0].category, RecommendationCategory::Attendance);
        assert_eq!(recommendations[1].category, RecommendationCategory::Academic);
        assert_eq!(recommendations[2].category, RecommendationCategory::Financial);
        assert_eq!(recommendations[3].category, RecommendationCategory::Academic);
    }

    #[test]
    fn test_attendance_tiers_are_mutually_exclusive() {
        let critical = recommend(&record(55.0, 80.0, 0, 0));
        assert_eq!(critical.len(), 1);
        assert_eq!(critical[0].priority, Priority::High);
        assert_eq!(critical[0].action, "Schedule immediate mentor meeting");

        let watch = recommend(&record(70.0, 80.0, 0, 0));
        assert_eq!(watch.len(), 1);
        assert_eq!(watch[0].priority, Priority::Medium);
        assert_eq!(watch[0].action, "Send attendance warning to student & parents");
    }

    #[test]
    fn test_fee_tier_boundaries() {
        // 30 days is inside the grace window, 31 starts the medium tier
        assert!(recommend(&record(90.0, 80.0, 30, 0)).is_empty());
        let medium = recommend(&record(90.0, 80.0, 31, 0));
        assert_eq!(medium[0].priority, Priority::Medium);

        // 60 days stays medium, 61 escalates
        let still_medium = recommend(&record(90.0, 80.0, 60, 0));
        assert_eq!(still_medium[0].priority, Priority::Medium);
        let high = recommend(&record(90.0, 80.0, 61, 0));
        assert_eq!(high[0].priority, Priority::High);
    }

    #[test]
    fn test_single_failed_subject_not_enough_for_tutoring() {
        assert!(recommend(&record(90.0, 80.0, 0, 1)).is_empty());
        let tutoring = recommend(&record(90.0, 80.0, 0, 2));
        assert_eq!(tutoring.len(), 1);
        assert_eq!(tutoring[0].action, "Subject-specific tutoring required");
    }

    #[test]
    fn test_healthy_record_yields_nothing() {
        assert!(recommend(&record(92.0, 81.0, 0, 0)).is_empty());
    }
}
