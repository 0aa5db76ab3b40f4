use crate::error::RepoResult;
use crate::models::{Finding, FindingSeverity, FindingStatus};
use sqlx::PgPool;
use uuid::Uuid;

/// Repository for finding data access
pub struct FindingRepository {
    pool: PgPool,
}

impl FindingRepository {
    /// Create a new FindingRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new finding
    pub async fn create(&self, finding: &Finding) -> RepoResult<Finding> {
        let created = sqlx::query_as::<_, Finding>(
            r#"
            INSERT INTO findings
                (id, title, description, severity, status, assessment_id, control_id, due_date, resolved_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING
                id, title, description, severity, status, assessment_id,
                control_id, due_date, resolved_at, created_at, updated_at
            "#,
        )
        .bind(finding.id)
        .bind(&finding.title)
        .bind(&finding.description)
        .bind(&finding.severity)
        .bind(&finding.status)
        .bind(finding.assessment_id)
        .bind(finding.control_id)
        .bind(finding.due_date)
        .bind(finding.resolved_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    /// Find a finding by UUID
    pub async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Finding>> {
        let finding = sqlx::query_as::<_, Finding>(
            r#"
            SELECT
                id, title, description, severity, status, assessment_id,
                control_id, due_date, resolved_at, created_at, updated_at
            FROM findings
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(finding)
    }

    /// Find all findings, optionally filtered by status and/or severity
    pub async fn find_all(
        &self,
        status: Option<FindingStatus>,
        severity: Option<FindingSeverity>,
    ) -> RepoResult<Vec<Finding>> {
        // Filters are optional; NULL parameters disable the corresponding clause
        let findings = sqlx::query_as::<_, Finding>(
            r#"
            SELECT
                id, title, description, severity, status, assessment_id,
                control_id, due_date, resolved_at, created_at, updated_at
            FROM findings
            WHERE ($1::text IS NULL OR status = $1)
              AND ($2::text IS NULL OR severity = $2)
            ORDER BY created_at DESC
            "#,
        )
        .bind(status.map(|s| s.as_str()))
        .bind(severity.map(|s| s.as_str()))
        .fetch_all(&self.pool)
        .await?;

        Ok(findings)
    }

    /// Update a finding in place
    pub async fn update(&self, finding: &Finding) -> RepoResult<Finding> {
        let updated = sqlx::query_as::<_, Finding>(
            r#"
            UPDATE findings
            SET title = $2,
                description = $3,
                severity = $4,
                status = $5,
                assessment_id = $6,
                control_id = $7,
                due_date = $8,
                resolved_at = $9,
                updated_at = NOW()
            WHERE id = $1
            RETURNING
                id, title, description, severity, status, assessment_id,
                control_id, due_date, resolved_at, created_at, updated_at
            "#,
        )
        .bind(finding.id)
        .bind(&finding.title)
        .bind(&finding.description)
        .bind(&finding.severity)
        .bind(&finding.status)
        .bind(finding.assessment_id)
        .bind(finding.control_id)
        .bind(finding.due_date)
        .bind(finding.resolved_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(updated)
    }

    /// Delete a finding; returns whether a row was removed
    pub async fn delete(&self, id: Uuid) -> RepoResult<bool> {
        let result = sqlx::query("DELETE FROM findings WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Count all findings
    pub async fn count_total(&self) -> RepoResult<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM findings")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    /// Count findings that are not yet closed
    pub async fn count_open(&self) -> RepoResult<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM findings WHERE status <> $1",
        )
        .bind(FindingStatus::Closed.as_str())
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }

    /// Count critical findings that are not yet closed
    pub async fn count_critical(&self) -> RepoResult<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM findings WHERE severity = $1 AND status <> $2",
        )
        .bind(FindingSeverity::Critical.as_str())
        .bind(FindingStatus::Closed.as_str())
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }
}
