use crate::error::{option_to_result, AppError, AppResult};
use crate::models::{Evidence, EvidenceStatus};
use crate::repositories::{ControlRepository, EvidenceRepository};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

/// Service for managing control evidence
pub struct EvidenceService {
    evidence_repo: Arc<EvidenceRepository>,
    control_repo: Arc<ControlRepository>,
}

impl EvidenceService {
    pub fn new(evidence_repo: Arc<EvidenceRepository>, control_repo: Arc<ControlRepository>) -> Self {
        Self {
            evidence_repo,
            control_repo,
        }
    }

    /// Create a new evidence record pending review
    pub async fn create_evidence(
        &self,
        name: &str,
        description: Option<&str>,
        control_id: Option<Uuid>,
        reference: Option<&str>,
    ) -> AppResult<Evidence> {
        if name.trim().is_empty() {
            return Err(AppError::Validation("Evidence name cannot be empty".into()));
        }

        if let Some(control_id) = control_id {
            if self.control_repo.find_by_id(control_id).await?.is_none() {
                return Err(AppError::NotFound("Linked control not found".into()));
            }
        }

        info!("Creating evidence: {}", name);

        let evidence = Evidence::new(
            name.to_string(),
            description.map(String::from),
            control_id,
            reference.map(String::from),
        );

        let created = self.evidence_repo.create(&evidence).await?;
        Ok(created)
    }

    /// Fetch an evidence record by id
    pub async fn get_evidence(&self, id: Uuid) -> AppResult<Evidence> {
        let evidence = self.evidence_repo.find_by_id(id).await?;
        option_to_result(evidence, "Evidence not found")
    }

    /// List evidence, optionally filtered by status
    pub async fn list_evidence(&self, status: Option<&str>) -> AppResult<Vec<Evidence>> {
        let status = match status {
            Some(s) => Some(EvidenceStatus::from_str(s).map_err(AppError::Validation)?),
            None => None,
        };

        let records = self.evidence_repo.find_all(status).await?;
        Ok(records)
    }

    /// Update an evidence record. Moving into approved or rejected requires
    /// a reviewer and stamps `reviewed_at`; moving back to pending clears
    /// the review trail.
    pub async fn update_evidence(
        &self,
        id: Uuid,
        name: Option<&str>,
        description: Option<&str>,
        reference: Option<&str>,
        status: Option<&str>,
        reviewer: Option<&str>,
    ) -> AppResult<Evidence> {
        let mut evidence = self.get_evidence(id).await?;

        if let Some(name) = name {
            if name.trim().is_empty() {
                return Err(AppError::Validation("Evidence name cannot be empty".into()));
            }
            evidence.name = name.to_string();
        }
        if let Some(description) = description {
            evidence.description = Some(description.to_string());
        }
        if let Some(reference) = reference {
            evidence.reference = Some(reference.to_string());
        }

        if let Some(status) = status {
            let next = EvidenceStatus::from_str(status).map_err(AppError::Validation)?;

            match next {
                EvidenceStatus::Approved | EvidenceStatus::Rejected => {
                    let reviewer = reviewer
                        .map(String::from)
                        .or_else(|| evidence.reviewer.clone())
                        .ok_or_else(|| {
                            AppError::Validation("A reviewer is required to review evidence".into())
                        })?;
                    evidence.reviewer = Some(reviewer);
                    evidence.reviewed_at = Some(chrono::Utc::now().naive_utc());
                }
                EvidenceStatus::Pending => {
                    evidence.reviewer = None;
                    evidence.reviewed_at = None;
                }
            }
            evidence.status = next.as_str().to_string();
        } else if let Some(reviewer) = reviewer {
            evidence.reviewer = Some(reviewer.to_string());
        }

        info!("Updating evidence {}: {}", id, evidence.name);

        let updated = self.evidence_repo.update(&evidence).await?;
        Ok(updated)
    }

    /// Delete an evidence record
    pub async fn delete_evidence(&self, id: Uuid) -> AppResult<()> {
        let deleted = self.evidence_repo.delete(id).await?;
        if !deleted {
            return Err(AppError::NotFound("Evidence not found".into()));
        }

        info!("Deleted evidence {}", id);
        Ok(())
    }
}
