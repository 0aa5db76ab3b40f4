use crate::error::RepoResult;
use crate::models::{Policy, PolicyStatus};
use sqlx::PgPool;
use uuid::Uuid;

/// Repository for policy data access
pub struct PolicyRepository {
    pool: PgPool,
}

impl PolicyRepository {
    /// Create a new PolicyRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new policy
    pub async fn create(&self, policy: &Policy) -> RepoResult<Policy> {
        let created = sqlx::query_as::<_, Policy>(
            r#"
            INSERT INTO policies (id, title, description, category, status, version, owner, effective_date)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING
                id, title, description, category, status, version, owner,
                effective_date, created_at, updated_at
            "#,
        )
        .bind(policy.id)
        .bind(&policy.title)
        .bind(&policy.description)
        .bind(&policy.category)
        .bind(&policy.status)
        .bind(policy.version)
        .bind(&policy.owner)
        .bind(policy.effective_date)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    /// Find a policy by UUID
    pub async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Policy>> {
        let policy = sqlx::query_as::<_, Policy>(
            r#"
            SELECT
                id, title, description, category, status, version, owner,
                effective_date, created_at, updated_at
            FROM policies
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(policy)
    }

    /// Find all policies, optionally filtered by status
    pub async fn find_all(&self, status: Option<PolicyStatus>) -> RepoResult<Vec<Policy>> {
        let policies = match status {
            Some(status) => {
                sqlx::query_as::<_, Policy>(
                    r#"
                    SELECT
                        id, title, description, category, status, version, owner,
                        effective_date, created_at, updated_at
                    FROM policies
                    WHERE status = $1
                    ORDER BY created_at DESC
                    "#,
                )
                .bind(status.as_str())
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, Policy>(
                    r#"
                    SELECT
                        id, title, description, category, status, version, owner,
                        effective_date, created_at, updated_at
                    FROM policies
                    ORDER BY created_at DESC
                    "#,
                )
                .fetch_all(&self.pool)
                .await?
            }
        };

        Ok(policies)
    }

    /// Update a policy in place
    pub async fn update(&self, policy: &Policy) -> RepoResult<Policy> {
        let updated = sqlx::query_as::<_, Policy>(
            r#"
            UPDATE policies
            SET title = $2,
                description = $3,
                category = $4,
                status = $5,
                version = $6,
                owner = $7,
                effective_date = $8,
                updated_at = NOW()
            WHERE id = $1
            RETURNING
                id, title, description, category, status, version, owner,
                effective_date, created_at, updated_at
            "#,
        )
        .bind(policy.id)
        .bind(&policy.title)
        .bind(&policy.description)
        .bind(&policy.category)
        .bind(&policy.status)
        .bind(policy.version)
        .bind(&policy.owner)
        .bind(policy.effective_date)
        .fetch_one(&self.pool)
        .await?;

        Ok(updated)
    }

    /// Delete a policy; returns whether a row was removed
    pub async fn delete(&self, id: Uuid) -> RepoResult<bool> {
        let result = sqlx::query("DELETE FROM policies WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Count policies currently waiting for review
    pub async fn count_under_review(&self) -> RepoResult<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM policies WHERE status = $1",
        )
        .bind(PolicyStatus::UnderReview.as_str())
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }
}
