use crate::error::RepoResult;
use crate::models::{Control, ControlStatus};
use sqlx::PgPool;
use uuid::Uuid;

/// Repository for control data access
pub struct ControlRepository {
    pool: PgPool,
}

impl ControlRepository {
    /// Create a new ControlRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new control
    pub async fn create(&self, control: &Control) -> RepoResult<Control> {
        let created = sqlx::query_as::<_, Control>(
            r#"
            INSERT INTO controls (id, control_code, name, description, framework, status, policy_id, owner)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING
                id, control_code, name, description, framework, status,
                policy_id, owner, created_at, updated_at
            "#,
        )
        .bind(control.id)
        .bind(&control.control_code)
        .bind(&control.name)
        .bind(&control.description)
        .bind(&control.framework)
        .bind(&control.status)
        .bind(control.policy_id)
        .bind(&control.owner)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    /// Find a control by UUID
    pub async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Control>> {
        let control = sqlx::query_as::<_, Control>(
            r#"
            SELECT
                id, control_code, name, description, framework, status,
                policy_id, owner, created_at, updated_at
            FROM controls
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(control)
    }

    /// Find a control by its human-readable code
    pub async fn find_by_code(&self, control_code: &str) -> RepoResult<Option<Control>> {
        let control = sqlx::query_as::<_, Control>(
            r#"
            SELECT
                id, control_code, name, description, framework, status,
                policy_id, owner, created_at, updated_at
            FROM controls
            WHERE control_code = $1
            "#,
        )
        .bind(control_code)
        .fetch_optional(&self.pool)
        .await?;

        Ok(control)
    }

    /// Find all controls, optionally filtered by status
    pub async fn find_all(&self, status: Option<ControlStatus>) -> RepoResult<Vec<Control>> {
        let controls = match status {
            Some(status) => {
                sqlx::query_as::<_, Control>(
                    r#"
                    SELECT
                        id, control_code, name, description, framework, status,
                        policy_id, owner, created_at, updated_at
                    FROM controls
                    WHERE status = $1
                    ORDER BY control_code ASC
                    "#,
                )
                .bind(status.as_str())
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, Control>(
                    r#"
                    SELECT
                        id, control_code, name, description, framework, status,
                        policy_id, owner, created_at, updated_at
                    FROM controls
                    ORDER BY control_code ASC
                    "#,
                )
                .fetch_all(&self.pool)
                .await?
            }
        };

        Ok(controls)
    }

    /// Update a control in place
    pub async fn update(&self, control: &Control) -> RepoResult<Control> {
        let updated = sqlx::query_as::<_, Control>(
            r#"
            UPDATE controls
            SET control_code = $2,
                name = $3,
                description = $4,
                framework = $5,
                status = $6,
                policy_id = $7,
                owner = $8,
                updated_at = NOW()
            WHERE id = $1
            RETURNING
                id, control_code, name, description, framework, status,
                policy_id, owner, created_at, updated_at
            "#,
        )
        .bind(control.id)
        .bind(&control.control_code)
        .bind(&control.name)
        .bind(&control.description)
        .bind(&control.framework)
        .bind(&control.status)
        .bind(control.policy_id)
        .bind(&control.owner)
        .fetch_one(&self.pool)
        .await?;

        Ok(updated)
    }

    /// Delete a control; returns whether a row was removed
    pub async fn delete(&self, id: Uuid) -> RepoResult<bool> {
        let result = sqlx::query("DELETE FROM controls WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Count all controls
    pub async fn count_total(&self) -> RepoResult<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM controls")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    /// Count controls marked implemented
    pub async fn count_implemented(&self) -> RepoResult<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM controls WHERE status = $1",
        )
        .bind(ControlStatus::Implemented.as_str())
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }
}
