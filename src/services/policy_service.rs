use crate::error::{option_to_result, AppError, AppResult};
use crate::models::{Policy, PolicyStatus};
use crate::repositories::PolicyRepository;
use chrono::NaiveDate;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

/// Service for managing governance policies
pub struct PolicyService {
    policy_repo: Arc<PolicyRepository>,
}

impl PolicyService {
    pub fn new(policy_repo: Arc<PolicyRepository>) -> Self {
        Self { policy_repo }
    }

    /// Create a new policy in draft state
    pub async fn create_policy(
        &self,
        title: &str,
        description: Option<&str>,
        category: &str,
        owner: Option<&str>,
        effective_date: Option<NaiveDate>,
    ) -> AppResult<Policy> {
        if title.trim().is_empty() {
            return Err(AppError::Validation("Policy title cannot be empty".into()));
        }
        if category.trim().is_empty() {
            return Err(AppError::Validation("Policy category cannot be empty".into()));
        }

        info!("Creating policy: {}", title);

        let policy = Policy::new(
            title.to_string(),
            description.map(String::from),
            category.to_string(),
            owner.map(String::from),
            effective_date,
        );

        let created = self.policy_repo.create(&policy).await?;
        Ok(created)
    }

    /// Fetch a policy by id
    pub async fn get_policy(&self, id: Uuid) -> AppResult<Policy> {
        let policy = self.policy_repo.find_by_id(id).await?;
        option_to_result(policy, "Policy not found")
    }

    /// List policies, optionally filtered by status
    pub async fn list_policies(&self, status: Option<&str>) -> AppResult<Vec<Policy>> {
        let status = match status {
            Some(s) => Some(PolicyStatus::from_str(s).map_err(AppError::Validation)?),
            None => None,
        };

        let policies = self.policy_repo.find_all(status).await?;
        Ok(policies)
    }

    /// Update a policy's fields and/or move it through its lifecycle.
    /// Publishing bumps the version; archived policies are immutable.
    pub async fn update_policy(
        &self,
        id: Uuid,
        title: Option<&str>,
        description: Option<&str>,
        category: Option<&str>,
        status: Option<&str>,
        owner: Option<&str>,
        effective_date: Option<NaiveDate>,
    ) -> AppResult<Policy> {
        let mut policy = self.get_policy(id).await?;

        let current = policy.status_enum();
        if current == PolicyStatus::Archived {
            return Err(AppError::BusinessLogic(
                "Archived policies cannot be modified".into(),
            ));
        }

        if let Some(title) = title {
            if title.trim().is_empty() {
                return Err(AppError::Validation("Policy title cannot be empty".into()));
            }
            policy.title = title.to_string();
        }
        if let Some(description) = description {
            policy.description = Some(description.to_string());
        }
        if let Some(category) = category {
            policy.category = category.to_string();
        }
        if let Some(owner) = owner {
            policy.owner = Some(owner.to_string());
        }
        if let Some(effective_date) = effective_date {
            policy.effective_date = Some(effective_date);
        }

        if let Some(status) = status {
            let next = PolicyStatus::from_str(status).map_err(AppError::Validation)?;
            if !Self::can_transition(current, next) {
                return Err(AppError::BusinessLogic(format!(
                    "Policy cannot move from {} to {}",
                    current.as_str(),
                    next.as_str()
                )));
            }
            if next == PolicyStatus::Published && current != PolicyStatus::Published {
                policy.version += 1;
            }
            policy.status = next.as_str().to_string();
        }

        info!("Updating policy {}: {}", id, policy.title);

        let updated = self.policy_repo.update(&policy).await?;
        Ok(updated)
    }

    /// Delete a policy
    pub async fn delete_policy(&self, id: Uuid) -> AppResult<()> {
        let deleted = self.policy_repo.delete(id).await?;
        if !deleted {
            return Err(AppError::NotFound("Policy not found".into()));
        }

        info!("Deleted policy {}", id);
        Ok(())
    }

    /// Lifecycle transitions: draft -> under_review -> published -> archived,
    /// with review rejection back to draft. Same-state writes are allowed.
    fn can_transition(from: PolicyStatus, to: PolicyStatus) -> bool {
        use PolicyStatus::*;
        match (from, to) {
            (a, b) if a == b => true,
            (Draft, UnderReview) => true,
            (UnderReview, Draft) => true,
            (UnderReview, Published) => true,
            (Draft, Archived) => true,
            (Published, Archived) => true,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_lifecycle_transitions() {
        use PolicyStatus::*;
        assert!(PolicyService::can_transition(Draft, UnderReview));
        assert!(PolicyService::can_transition(UnderReview, Published));
        assert!(PolicyService::can_transition(Published, Archived));
        assert!(PolicyService::can_transition(UnderReview, Draft));
        assert!(!PolicyService::can_transition(Draft, Published));
        assert!(!PolicyService::can_transition(Archived, Draft));
        assert!(!PolicyService::can_transition(Published, Draft));
    }
}
