use serde::{Deserialize, Serialize};

/// Live aggregate counts of the compliance posture, computed from the
/// governance tables. This is the input a metric snapshot is derived from.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total_controls: i64,
    pub implemented_controls: i64,
    pub total_assessments: i64,
    pub completed_assessments: i64,
    pub total_findings: i64,
    pub open_findings: i64,
    pub critical_findings: i64,
    pub approved_evidence: i64,
    pub policies_under_review: i64,
}
