use crate::error::RepoResult;
use crate::models::{Evidence, EvidenceStatus};
use sqlx::PgPool;
use uuid::Uuid;

/// Repository for evidence data access
pub struct EvidenceRepository {
    pool: PgPool,
}

impl EvidenceRepository {
    /// Create a new EvidenceRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new evidence record
    pub async fn create(&self, evidence: &Evidence) -> RepoResult<Evidence> {
        let created = sqlx::query_as::<_, Evidence>(
            r#"
            INSERT INTO evidence
                (id, name, description, control_id, reference, status, reviewer, reviewed_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING
                id, name, description, control_id, reference, status,
                reviewer, reviewed_at, created_at, updated_at
            "#,
        )
        .bind(evidence.id)
        .bind(&evidence.name)
        .bind(&evidence.description)
        .bind(evidence.control_id)
        .bind(&evidence.reference)
        .bind(&evidence.status)
        .bind(&evidence.reviewer)
        .bind(evidence.reviewed_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    /// Find an evidence record by UUID
    pub async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Evidence>> {
        let evidence = sqlx::query_as::<_, Evidence>(
            r#"
            SELECT
                id, name, description, control_id, reference, status,
                reviewer, reviewed_at, created_at, updated_at
            FROM evidence
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(evidence)
    }

    /// Find all evidence, optionally filtered by status
    pub async fn find_all(&self, status: Option<EvidenceStatus>) -> RepoResult<Vec<Evidence>> {
        let records = match status {
            Some(status) => {
                sqlx::query_as::<_, Evidence>(
                    r#"
                    SELECT
                        id, name, description, control_id, reference, status,
                        reviewer, reviewed_at, created_at, updated_at
                    FROM evidence
                    WHERE status = $1
                    ORDER BY created_at DESC
                    "#,
                )
                .bind(status.as_str())
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, Evidence>(
                    r#"
                    SELECT
                        id, name, description, control_id, reference, status,
                        reviewer, reviewed_at, created_at, updated_at
                    FROM evidence
                    ORDER BY created_at DESC
                    "#,
                )
                .fetch_all(&self.pool)
                .await?
            }
        };

        Ok(records)
    }

    /// Update an evidence record in place
    pub async fn update(&self, evidence: &Evidence) -> RepoResult<Evidence> {
        let updated = sqlx::query_as::<_, Evidence>(
            r#"
            UPDATE evidence
            SET name = $2,
                description = $3,
                control_id = $4,
                reference = $5,
                status = $6,
                reviewer = $7,
                reviewed_at = $8,
                updated_at = NOW()
            WHERE id = $1
            RETURNING
                id, name, description, control_id, reference, status,
                reviewer, reviewed_at, created_at, updated_at
            "#,
        )
        .bind(evidence.id)
        .bind(&evidence.name)
        .bind(&evidence.description)
        .bind(evidence.control_id)
        .bind(&evidence.reference)
        .bind(&evidence.status)
        .bind(&evidence.reviewer)
        .bind(evidence.reviewed_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(updated)
    }

    /// Delete an evidence record; returns whether a row was removed
    pub async fn delete(&self, id: Uuid) -> RepoResult<bool> {
        let result = sqlx::query("DELETE FROM evidence WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Count approved evidence records
    pub async fn count_approved(&self) -> RepoResult<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM evidence WHERE status = $1",
        )
        .bind(EvidenceStatus::Approved.as_str())
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }
}
