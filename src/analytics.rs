use serde::Serialize;
use std::collections::BTreeMap;

use crate::ml::labels::derive_label;
use crate::models::{RiskLabel, StudentRecord};

/// Cohort-level dashboard numbers.
#[derive(Debug, Clone, Serialize)]
pub struct CohortSummary {
    pub total_students: usize,
    pub department_distribution: BTreeMap<String, usize>,
    pub risk_distribution: RiskDistribution,
    pub attendance: AttendanceStats,
    pub academics: AcademicStats,
    pub fee_status_distribution: BTreeMap<String, usize>,
}

/// Students per derived risk category.
#[derive(Debug, Clone, Serialize)]
pub struct RiskDistribution {
    pub low: usize,
    pub medium: usize,
    pub high: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct AttendanceStats {
    pub average: f64,
    pub below_75: usize,
    pub below_60: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct AcademicStats {
    pub average_score: f64,
    pub students_failing: usize,
    pub below_40: usize,
}

/// Summarize a cohort for dashboard consumption.
///
/// The risk distribution uses the same label rule as training, so the
/// dashboard and the training signal cannot drift apart. An empty batch
/// summarizes to zeros.
pub fn cohort_summary(batch: &[StudentRecord]) -> CohortSummary {
    let total_students = batch.len();

    let mut department_distribution = BTreeMap::new();
    let mut fee_status_distribution = BTreeMap::new();
    let mut risk_distribution = RiskDistribution {
        low: 0,
        medium: 0,
        high: 0,
    };
    let mut attendance_sum = 0.0;
    let mut below_75 = 0;
    let mut below_60 = 0;
    let mut score_sum = 0.0;
    let mut students_failing = 0;
    let mut below_40 = 0;

    for record in batch {
        *department_distribution
            .entry(record.department.clone())
            .or_insert(0) += 1;
        *fee_status_distribution
            .entry(record.fee_status.clone())
            .or_insert(0) += 1;

        match derive_label(record) {
            RiskLabel::Low => risk_distribution.low += 1,
            RiskLabel::Medium => risk_distribution.medium += 1,
            RiskLabel::High => risk_distribution.high += 1,
        }

        attendance_sum += record.attendance_percentage;
        if record.attendance_percentage < 75.0 {
            below_75 += 1;
        }
        if record.attendance_percentage < 60.0 {
            below_60 += 1;
        }

        score_sum += record.avg_test_score;
        if record.subjects_failed > 0 {
            students_failing += 1;
        }
        if record.avg_test_score < 40.0 {
            below_40 += 1;
        }
    }

    let denominator = total_students.max(1) as f64;
    CohortSummary {
        total_students,
        department_distribution,
        risk_distribution,
        attendance: AttendanceStats {
            average: attendance_sum / denominator,
            below_75,
            below_60,
        },
        academics: AcademicStats {
            average_score: score_sum / denominator,
            students_failing,
            below_40,
        },
        fee_status_distribution,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(department: &str, attendance: f64, score: f64, flags: u32) -> StudentRecord {
        StudentRecord {
            student_id: format!("STU-{department}-{flags}"),
            name: "Test".to_string(),
            roll_no: "R-1".to_string(),
            department: department.to_string(),
            semester: 2,
            mentor_id: "MNT-01".to_string(),
            attendance_percentage: attendance,
            monthly_attendance: attendance,
            avg_test_score: score,
            last_test_score: score,
            subjects_failed: u32::from(score < 40.0),
            attempts_exhausted: 0,
            fee_status: "Paid".to_string(),
            fee_due_days: 0,
            attendance_flag: 0,
            score_flag: 0,
            total_risk_flags: flags,
        }
    }

    #[test]
    fn test_summary_counts_and_averages() {
        let batch = vec![
            record("Civil", 90.0, 80.0, 0),
            record("Civil", 70.0, 55.0, 1),
            record("Electrical", 50.0, 35.0, 4),
        ];
        let summary = cohort_summary(&batch);

        assert_eq!(summary.total_students, 3);
        assert_eq!(summary.department_distribution["Civil"], 2);
        assert_eq!(summary.department_distribution["Electrical"], 1);
        assert_eq!(summary.risk_distribution.low, 1);
        assert_eq!(summary.risk_distribution.medium, 1);
        assert_eq!(summary.risk_distribution.high, 1);
        assert!((summary.attendance.average - 70.0).abs() < 1e-9);
        assert_eq!(summary.attendance.below_75, 2);
        assert_eq!(summary.attendance.below_60, 1);
        assert_eq!(summary.academics.students_failing, 1);
        assert_eq!(summary.academics.below_40, 1);
        assert_eq!(summary.fee_status_distribution["Paid"], 3);
    }

    #[test]
    fn test_empty_batch_summarizes_to_zeros() {
        let summary = cohort_summary(&[]);
        assert_eq!(summary.total_students, 0);
        assert_eq!(summary.attendance.average, 0.0);
        assert!(summary.department_distribution.is_empty());
    }
}
