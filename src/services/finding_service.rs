use crate::error::{option_to_result, AppError, AppResult};
use crate::models::{Finding, FindingSeverity, FindingStatus};
use crate::repositories::{AssessmentRepository, ControlRepository, FindingRepository};
use chrono::NaiveDate;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

/// Service for managing compliance findings
pub struct FindingService {
    finding_repo: Arc<FindingRepository>,
    assessment_repo: Arc<AssessmentRepository>,
    control_repo: Arc<ControlRepository>,
}

impl FindingService {
    pub fn new(
        finding_repo: Arc<FindingRepository>,
        assessment_repo: Arc<AssessmentRepository>,
        control_repo: Arc<ControlRepository>,
    ) -> Self {
        Self {
            finding_repo,
            assessment_repo,
            control_repo,
        }
    }

    /// Create a new open finding
    pub async fn create_finding(
        &self,
        title: &str,
        description: Option<&str>,
        severity: &str,
        assessment_id: Option<Uuid>,
        control_id: Option<Uuid>,
        due_date: Option<NaiveDate>,
    ) -> AppResult<Finding> {
        if title.trim().is_empty() {
            return Err(AppError::Validation("Finding title cannot be empty".into()));
        }

        let severity = FindingSeverity::from_str(severity).map_err(AppError::Validation)?;

        if let Some(assessment_id) = assessment_id {
            if self.assessment_repo.find_by_id(assessment_id).await?.is_none() {
                return Err(AppError::NotFound("Linked assessment not found".into()));
            }
        }
        if let Some(control_id) = control_id {
            if self.control_repo.find_by_id(control_id).await?.is_none() {
                return Err(AppError::NotFound("Linked control not found".into()));
            }
        }

        info!("Creating {} finding: {}", severity.as_str(), title);

        let finding = Finding::new(
            title.to_string(),
            description.map(String::from),
            severity,
            assessment_id,
            control_id,
            due_date,
        );

        let created = self.finding_repo.create(&finding).await?;
        Ok(created)
    }

    /// Fetch a finding by id
    pub async fn get_finding(&self, id: Uuid) -> AppResult<Finding> {
        let finding = self.finding_repo.find_by_id(id).await?;
        option_to_result(finding, "Finding not found")
    }

    /// List findings, optionally filtered by status and/or severity
    pub async fn list_findings(
        &self,
        status: Option<&str>,
        severity: Option<&str>,
    ) -> AppResult<Vec<Finding>> {
        let status = match status {
            Some(s) => Some(FindingStatus::from_str(s).map_err(AppError::Validation)?),
            None => None,
        };
        let severity = match severity {
            Some(s) => Some(FindingSeverity::from_str(s).map_err(AppError::Validation)?),
            None => None,
        };

        let findings = self.finding_repo.find_all(status, severity).await?;
        Ok(findings)
    }

    /// Update a finding. Closing stamps `resolved_at`; reopening clears it.
    pub async fn update_finding(
        &self,
        id: Uuid,
        title: Option<&str>,
        description: Option<&str>,
        severity: Option<&str>,
        status: Option<&str>,
        due_date: Option<NaiveDate>,
    ) -> AppResult<Finding> {
        let mut finding = self.get_finding(id).await?;

        if let Some(title) = title {
            if title.trim().is_empty() {
                return Err(AppError::Validation("Finding title cannot be empty".into()));
            }
            finding.title = title.to_string();
        }
        if let Some(description) = description {
            finding.description = Some(description.to_string());
        }
        if let Some(severity) = severity {
            let severity = FindingSeverity::from_str(severity).map_err(AppError::Validation)?;
            finding.severity = severity.as_str().to_string();
        }
        if let Some(due_date) = due_date {
            finding.due_date = Some(due_date);
        }

        if let Some(status) = status {
            let next = FindingStatus::from_str(status).map_err(AppError::Validation)?;
            let was_closed = finding.status_enum() == FindingStatus::Closed;

            finding.status = next.as_str().to_string();
            if next == FindingStatus::Closed && !was_closed {
                finding.resolved_at = Some(chrono::Utc::now().naive_utc());
            } else if next != FindingStatus::Closed {
                finding.resolved_at = None;
            }
        }

        info!("Updating finding {}: {}", id, finding.title);

        let updated = self.finding_repo.update(&finding).await?;
        Ok(updated)
    }

    /// Delete a finding
    pub async fn delete_finding(&self, id: Uuid) -> AppResult<()> {
        let deleted = self.finding_repo.delete(id).await?;
        if !deleted {
            return Err(AppError::NotFound("Finding not found".into()));
        }

        info!("Deleted finding {}", id);
        Ok(())
    }
}
