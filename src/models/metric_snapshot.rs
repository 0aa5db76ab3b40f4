use crate::models::DashboardSummary;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

/// Percentage of `numerator` out of `denominator`, rounded to one decimal
/// place (round half away from zero). A zero denominator yields 0 rather
/// than NaN.
pub fn rate_percentage(numerator: i64, denominator: i64) -> f64 {
    if denominator > 0 {
        (numerator as f64 / denominator as f64 * 1000.0).round() / 10.0
    } else {
        0.0
    }
}

/// MetricSnapshot model: one row per UTC calendar day, holding the rollup
/// of compliance posture for that day. Rows are upserted in place by date
/// and never deleted.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct MetricSnapshot {
    pub id: Uuid,
    pub snapshot_date: NaiveDate,
    pub compliance_rate: f64,
    pub implemented_controls: i32,
    pub total_controls: i32,
    pub open_findings: i32,
    pub critical_findings: i32,
    pub assessment_completion_rate: f64,
    pub risk_closure_rate: f64,
    pub completed_assessments: i32,
    pub total_assessments: i32,
    pub approved_evidence: i32,
    pub metadata: Value, // JSONB stored as serde_json::Value
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl MetricSnapshot {
    /// Derive a snapshot for `date` from the current aggregate summary.
    /// The metadata block is refreshed on every derivation so the row keeps
    /// a trail of when the rollup was last recomputed.
    pub fn from_summary(date: NaiveDate, summary: &DashboardSummary) -> Self {
        let now = chrono::Utc::now();
        let closed_findings = summary.total_findings - summary.open_findings;

        Self {
            id: Uuid::new_v4(),
            snapshot_date: date,
            compliance_rate: rate_percentage(summary.implemented_controls, summary.total_controls),
            implemented_controls: summary.implemented_controls as i32,
            total_controls: summary.total_controls as i32,
            open_findings: summary.open_findings as i32,
            critical_findings: summary.critical_findings as i32,
            assessment_completion_rate: rate_percentage(
                summary.completed_assessments,
                summary.total_assessments,
            ),
            risk_closure_rate: rate_percentage(closed_findings, summary.total_findings),
            completed_assessments: summary.completed_assessments as i32,
            total_assessments: summary.total_assessments as i32,
            approved_evidence: summary.approved_evidence as i32,
            metadata: serde_json::json!({
                "policiesUnderReview": summary.policies_under_review,
                "timestamp": now.to_rfc3339(),
            }),
            created_at: now.naive_utc(),
            updated_at: now.naive_utc(),
        }
    }

    /// An all-zero placeholder for days before any history exists.
    pub fn zero(date: NaiveDate) -> Self {
        let now = chrono::Utc::now().naive_utc();
        Self {
            id: Uuid::new_v4(),
            snapshot_date: date,
            compliance_rate: 0.0,
            implemented_controls: 0,
            total_controls: 0,
            open_findings: 0,
            critical_findings: 0,
            assessment_completion_rate: 0.0,
            risk_closure_rate: 0.0,
            completed_assessments: 0,
            total_assessments: 0,
            approved_evidence: 0,
            metadata: serde_json::json!({}),
            created_at: now,
            updated_at: now,
        }
    }
}
