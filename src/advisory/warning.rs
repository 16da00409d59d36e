use crate::models::{Priority, RankedStudent, StudentRecord, TrendKind, TrendWarning};

/// Detect short-term declines by comparing two behavioral fields on one
/// record. Both checks are independent and both may fire.
pub fn detect_trends(record: &StudentRecord) -> Vec<TrendWarning> {
    let mut warnings = Vec::new();

    if record.monthly_attendance < record.attendance_percentage - 10.0 {
        warnings.push(TrendWarning {
            kind: TrendKind::AttendanceDecline,
            severity: Priority::Medium,
            message: format!(
                "Monthly attendance ({:.1}%) significantly lower than overall ({:.1}%)",
                record.monthly_attendance, record.attendance_percentage
            ),
        });
    }

    if record.last_test_score < record.avg_test_score - 15.0 {
        warnings.push(TrendWarning {
            kind: TrendKind::PerformanceDecline,
            severity: Priority::High,
            message: format!(
                "Latest test score ({:.1}%) much lower than average ({:.1}%)",
                record.last_test_score, record.avg_test_score
            ),
        });
    }

    warnings
}

/// Composite urgency score used only for ranking, never persisted.
pub fn urgency_score(record: &StudentRecord) -> f64 {
    let mut score = 0.0;
    if record.attendance_percentage < 60.0 {
        score += 3.0;
    }
    if record.avg_test_score < 40.0 {
        score += 3.0;
    }
    if record.subjects_failed >= 2 {
        score += 2.0;
    }
    if record.fee_due_days > 60 {
        score += 2.0;
    }
    score + 0.5 * record.total_risk_flags as f64
}

/// Rank a batch by intervention urgency, descending, truncated to `top_n`.
///
/// The sort is stable: students with equal scores keep their original batch
/// order. An empty batch ranks to an empty list.
pub fn rank_priority(batch: &[StudentRecord], top_n: usize) -> Vec<RankedStudent> {
    let mut ranked: Vec<RankedStudent> = batch
        .iter()
        .map(|record| RankedStudent {
            record: record.clone(),
            score: urgency_score(record),
        })
        .collect();

    ranked.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
    ranked.truncate(top_n);
    ranked
}
