use crate::error::RepoResult;
use crate::models::{Assessment, AssessmentStatus};
use sqlx::PgPool;
use uuid::Uuid;

/// Repository for assessment data access
pub struct AssessmentRepository {
    pool: PgPool,
}

impl AssessmentRepository {
    /// Create a new AssessmentRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new assessment
    pub async fn create(&self, assessment: &Assessment) -> RepoResult<Assessment> {
        let created = sqlx::query_as::<_, Assessment>(
            r#"
            INSERT INTO assessments (id, name, description, scope, status, due_date, completed_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING
                id, name, description, scope, status, due_date,
                completed_at, created_at, updated_at
            "#,
        )
        .bind(assessment.id)
        .bind(&assessment.name)
        .bind(&assessment.description)
        .bind(&assessment.scope)
        .bind(&assessment.status)
        .bind(assessment.due_date)
        .bind(assessment.completed_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    /// Find an assessment by UUID
    pub async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Assessment>> {
        let assessment = sqlx::query_as::<_, Assessment>(
            r#"
            SELECT
                id, name, description, scope, status, due_date,
                completed_at, created_at, updated_at
            FROM assessments
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(assessment)
    }

    /// Find all assessments, optionally filtered by status
    pub async fn find_all(&self, status: Option<AssessmentStatus>) -> RepoResult<Vec<Assessment>> {
        let assessments = match status {
            Some(status) => {
                sqlx::query_as::<_, Assessment>(
                    r#"
                    SELECT
                        id, name, description, scope, status, due_date,
                        completed_at, created_at, updated_at
                    FROM assessments
                    WHERE status = $1
                    ORDER BY created_at DESC
                    "#,
                )
                .bind(status.as_str())
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, Assessment>(
                    r#"
                    SELECT
                        id, name, description, scope, status, due_date,
                        completed_at, created_at, updated_at
                    FROM assessments
                    ORDER BY created_at DESC
                    "#,
                )
                .fetch_all(&self.pool)
                .await?
            }
        };

        Ok(assessments)
    }

    /// Update an assessment in place
    pub async fn update(&self, assessment: &Assessment) -> RepoResult<Assessment> {
        let updated = sqlx::query_as::<_, Assessment>(
            r#"
            UPDATE assessments
            SET name = $2,
                description = $3,
                scope = $4,
                status = $5,
                due_date = $6,
                completed_at = $7,
                updated_at = NOW()
            WHERE id = $1
            RETURNING
                id, name, description, scope, status, due_date,
                completed_at, created_at, updated_at
            "#,
        )
        .bind(assessment.id)
        .bind(&assessment.name)
        .bind(&assessment.description)
        .bind(&assessment.scope)
        .bind(&assessment.status)
        .bind(assessment.due_date)
        .bind(assessment.completed_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(updated)
    }

    /// Delete an assessment; returns whether a row was removed
    pub async fn delete(&self, id: Uuid) -> RepoResult<bool> {
        let result = sqlx::query("DELETE FROM assessments WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Count all assessments
    pub async fn count_total(&self) -> RepoResult<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM assessments")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    /// Count completed assessments
    pub async fn count_completed(&self) -> RepoResult<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM assessments WHERE status = $1",
        )
        .bind(AssessmentStatus::Completed.as_str())
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }
}
