use crate::error::{option_to_result, AppError, AppResult};
use crate::models::{Assessment, AssessmentStatus};
use crate::repositories::AssessmentRepository;
use chrono::NaiveDate;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

/// Service for managing compliance assessments
pub struct AssessmentService {
    assessment_repo: Arc<AssessmentRepository>,
}

impl AssessmentService {
    pub fn new(assessment_repo: Arc<AssessmentRepository>) -> Self {
        Self { assessment_repo }
    }

    /// Create a new assessment in planned state
    pub async fn create_assessment(
        &self,
        name: &str,
        description: Option<&str>,
        scope: Option<&str>,
        due_date: Option<NaiveDate>,
    ) -> AppResult<Assessment> {
        if name.trim().is_empty() {
            return Err(AppError::Validation("Assessment name cannot be empty".into()));
        }

        info!("Creating assessment: {}", name);

        let assessment = Assessment::new(
            name.to_string(),
            description.map(String::from),
            scope.map(String::from),
            due_date,
        );

        let created = self.assessment_repo.create(&assessment).await?;
        Ok(created)
    }

    /// Fetch an assessment by id
    pub async fn get_assessment(&self, id: Uuid) -> AppResult<Assessment> {
        let assessment = self.assessment_repo.find_by_id(id).await?;
        option_to_result(assessment, "Assessment not found")
    }

    /// List assessments, optionally filtered by status
    pub async fn list_assessments(&self, status: Option<&str>) -> AppResult<Vec<Assessment>> {
        let status = match status {
            Some(s) => Some(AssessmentStatus::from_str(s).map_err(AppError::Validation)?),
            None => None,
        };

        let assessments = self.assessment_repo.find_all(status).await?;
        Ok(assessments)
    }

    /// Update an assessment. Moving to completed stamps `completed_at`;
    /// moving back out of completed clears it.
    pub async fn update_assessment(
        &self,
        id: Uuid,
        name: Option<&str>,
        description: Option<&str>,
        scope: Option<&str>,
        status: Option<&str>,
        due_date: Option<NaiveDate>,
    ) -> AppResult<Assessment> {
        let mut assessment = self.get_assessment(id).await?;

        if let Some(name) = name {
            if name.trim().is_empty() {
                return Err(AppError::Validation("Assessment name cannot be empty".into()));
            }
            assessment.name = name.to_string();
        }
        if let Some(description) = description {
            assessment.description = Some(description.to_string());
        }
        if let Some(scope) = scope {
            assessment.scope = Some(scope.to_string());
        }
        if let Some(due_date) = due_date {
            assessment.due_date = Some(due_date);
        }

        if let Some(status) = status {
            let next = AssessmentStatus::from_str(status).map_err(AppError::Validation)?;
            let was_completed = assessment.is_completed();

            assessment.status = next.as_str().to_string();
            if next == AssessmentStatus::Completed && !was_completed {
                assessment.completed_at = Some(chrono::Utc::now().naive_utc());
            } else if next != AssessmentStatus::Completed {
                assessment.completed_at = None;
            }
        }

        info!("Updating assessment {}: {}", id, assessment.name);

        let updated = self.assessment_repo.update(&assessment).await?;
        Ok(updated)
    }

    /// Delete an assessment
    pub async fn delete_assessment(&self, id: Uuid) -> AppResult<()> {
        let deleted = self.assessment_repo.delete(id).await?;
        if !deleted {
            return Err(AppError::NotFound("Assessment not found".into()));
        }

        info!("Deleted assessment {}", id);
        Ok(())
    }
}
