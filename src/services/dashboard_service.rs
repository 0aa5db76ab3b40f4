use crate::error::AppResult;
use crate::models::DashboardSummary;
use crate::repositories::{
    AssessmentRepository, ControlRepository, EvidenceRepository, FindingRepository,
    PolicyRepository,
};
use std::sync::Arc;

/// Service computing the live compliance posture rollup.
///
/// This is the single source the snapshot engine derives its daily rows
/// from; every count is read fresh from the governance tables.
pub struct DashboardService {
    policy_repo: Arc<PolicyRepository>,
    control_repo: Arc<ControlRepository>,
    assessment_repo: Arc<AssessmentRepository>,
    finding_repo: Arc<FindingRepository>,
    evidence_repo: Arc<EvidenceRepository>,
}

impl DashboardService {
    pub fn new(
        policy_repo: Arc<PolicyRepository>,
        control_repo: Arc<ControlRepository>,
        assessment_repo: Arc<AssessmentRepository>,
        finding_repo: Arc<FindingRepository>,
        evidence_repo: Arc<EvidenceRepository>,
    ) -> Self {
        Self {
            policy_repo,
            control_repo,
            assessment_repo,
            finding_repo,
            evidence_repo,
        }
    }

    /// Compute the current aggregate counts across all governance entities
    pub async fn compute_summary(&self) -> AppResult<DashboardSummary> {
        let total_controls = self.control_repo.count_total().await?;
        let implemented_controls = self.control_repo.count_implemented().await?;
        let total_assessments = self.assessment_repo.count_total().await?;
        let completed_assessments = self.assessment_repo.count_completed().await?;
        let total_findings = self.finding_repo.count_total().await?;
        let open_findings = self.finding_repo.count_open().await?;
        let critical_findings = self.finding_repo.count_critical().await?;
        let approved_evidence = self.evidence_repo.count_approved().await?;
        let policies_under_review = self.policy_repo.count_under_review().await?;

        Ok(DashboardSummary {
            total_controls,
            implemented_controls,
            total_assessments,
            completed_assessments,
            total_findings,
            open_findings,
            critical_findings,
            approved_evidence,
            policies_under_review,
        })
    }
}
