use crate::error::{option_to_result, AppError, AppResult};
use crate::models::{Control, ControlStatus};
use crate::repositories::{ControlRepository, PolicyRepository};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

/// Service for managing compliance controls
pub struct ControlService {
    control_repo: Arc<ControlRepository>,
    policy_repo: Arc<PolicyRepository>,
}

impl ControlService {
    pub fn new(control_repo: Arc<ControlRepository>, policy_repo: Arc<PolicyRepository>) -> Self {
        Self {
            control_repo,
            policy_repo,
        }
    }

    /// Create a new control, not implemented by default
    pub async fn create_control(
        &self,
        control_code: &str,
        name: &str,
        description: Option<&str>,
        framework: &str,
        policy_id: Option<Uuid>,
        owner: Option<&str>,
    ) -> AppResult<Control> {
        if control_code.trim().is_empty() {
            return Err(AppError::Validation("Control code cannot be empty".into()));
        }
        if name.trim().is_empty() {
            return Err(AppError::Validation("Control name cannot be empty".into()));
        }

        // Reject duplicate codes up front for a friendlier error than the
        // unique-constraint violation
        if self.control_repo.find_by_code(control_code).await?.is_some() {
            return Err(AppError::BusinessLogic(format!(
                "Control code {} already exists",
                control_code
            )));
        }

        if let Some(policy_id) = policy_id {
            if self.policy_repo.find_by_id(policy_id).await?.is_none() {
                return Err(AppError::NotFound("Linked policy not found".into()));
            }
        }

        info!("Creating control {}: {}", control_code, name);

        let control = Control::new(
            control_code.to_string(),
            name.to_string(),
            description.map(String::from),
            framework.to_string(),
            policy_id,
            owner.map(String::from),
        );

        let created = self.control_repo.create(&control).await?;
        Ok(created)
    }

    /// Fetch a control by id
    pub async fn get_control(&self, id: Uuid) -> AppResult<Control> {
        let control = self.control_repo.find_by_id(id).await?;
        option_to_result(control, "Control not found")
    }

    /// List controls, optionally filtered by status
    pub async fn list_controls(&self, status: Option<&str>) -> AppResult<Vec<Control>> {
        let status = match status {
            Some(s) => Some(ControlStatus::from_str(s).map_err(AppError::Validation)?),
            None => None,
        };

        let controls = self.control_repo.find_all(status).await?;
        Ok(controls)
    }

    /// Update a control's fields, including its implementation status
    pub async fn update_control(
        &self,
        id: Uuid,
        name: Option<&str>,
        description: Option<&str>,
        framework: Option<&str>,
        status: Option<&str>,
        policy_id: Option<Uuid>,
        owner: Option<&str>,
    ) -> AppResult<Control> {
        let mut control = self.get_control(id).await?;

        if let Some(name) = name {
            if name.trim().is_empty() {
                return Err(AppError::Validation("Control name cannot be empty".into()));
            }
            control.name = name.to_string();
        }
        if let Some(description) = description {
            control.description = Some(description.to_string());
        }
        if let Some(framework) = framework {
            control.framework = framework.to_string();
        }
        if let Some(status) = status {
            let status = ControlStatus::from_str(status).map_err(AppError::Validation)?;
            control.status = status.as_str().to_string();
        }
        if let Some(policy_id) = policy_id {
            if self.policy_repo.find_by_id(policy_id).await?.is_none() {
                return Err(AppError::NotFound("Linked policy not found".into()));
            }
            control.policy_id = Some(policy_id);
        }
        if let Some(owner) = owner {
            control.owner = Some(owner.to_string());
        }

        info!("Updating control {} ({})", control.control_code, id);

        let updated = self.control_repo.update(&control).await?;
        Ok(updated)
    }

    /// Delete a control
    pub async fn delete_control(&self, id: Uuid) -> AppResult<()> {
        let deleted = self.control_repo.delete(id).await?;
        if !deleted {
            return Err(AppError::NotFound("Control not found".into()));
        }

        info!("Deleted control {}", id);
        Ok(())
    }
}
