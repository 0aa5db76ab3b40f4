use crate::error::RepoResult;
use crate::models::MetricSnapshot;
use chrono::NaiveDate;
use sqlx::PgPool;

/// Repository for daily metric snapshot access.
///
/// Snapshots are keyed by their UTC calendar day; writes go through an
/// atomic upsert on that key, so concurrent refreshes of the same day
/// resolve to last-writer-wins without a read-check-then-write race.
pub struct SnapshotRepository {
    pool: PgPool,
}

impl SnapshotRepository {
    /// Create a new SnapshotRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find the snapshot for an exact calendar day
    pub async fn find_by_date(&self, date: NaiveDate) -> RepoResult<Option<MetricSnapshot>> {
        let snapshot = sqlx::query_as::<_, MetricSnapshot>(
            r#"
            SELECT
                id, snapshot_date, compliance_rate, implemented_controls, total_controls,
                open_findings, critical_findings, assessment_completion_rate, risk_closure_rate,
                completed_assessments, total_assessments, approved_evidence, metadata,
                created_at, updated_at
            FROM metric_snapshots
            WHERE snapshot_date = $1
            "#,
        )
        .bind(date)
        .fetch_optional(&self.pool)
        .await?;

        Ok(snapshot)
    }

    /// Find all snapshots on or after `start_date`, ascending by date
    pub async fn find_since(&self, start_date: NaiveDate) -> RepoResult<Vec<MetricSnapshot>> {
        let snapshots = sqlx::query_as::<_, MetricSnapshot>(
            r#"
            SELECT
                id, snapshot_date, compliance_rate, implemented_controls, total_controls,
                open_findings, critical_findings, assessment_completion_rate, risk_closure_rate,
                completed_assessments, total_assessments, approved_evidence, metadata,
                created_at, updated_at
            FROM metric_snapshots
            WHERE snapshot_date >= $1
            ORDER BY snapshot_date ASC
            "#,
        )
        .bind(start_date)
        .fetch_all(&self.pool)
        .await?;

        Ok(snapshots)
    }

    /// Find the most recent snapshot, if any exists
    pub async fn find_latest(&self) -> RepoResult<Option<MetricSnapshot>> {
        let snapshot = sqlx::query_as::<_, MetricSnapshot>(
            r#"
            SELECT
                id, snapshot_date, compliance_rate, implemented_controls, total_controls,
                open_findings, critical_findings, assessment_completion_rate, risk_closure_rate,
                completed_assessments, total_assessments, approved_evidence, metadata,
                created_at, updated_at
            FROM metric_snapshots
            ORDER BY snapshot_date DESC
            LIMIT 1
            "#,
        )
        .fetch_optional(&self.pool)
        .await?;

        Ok(snapshot)
    }

    /// Insert the snapshot for its day, or overwrite the existing row in
    /// place if one is already stored for that date
    pub async fn upsert(&self, snapshot: &MetricSnapshot) -> RepoResult<MetricSnapshot> {
        let stored = sqlx::query_as::<_, MetricSnapshot>(
            r#"
            INSERT INTO metric_snapshots
                (id, snapshot_date, compliance_rate, implemented_controls, total_controls,
                 open_findings, critical_findings, assessment_completion_rate, risk_closure_rate,
                 completed_assessments, total_assessments, approved_evidence, metadata)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            ON CONFLICT (snapshot_date) DO UPDATE
            SET compliance_rate = EXCLUDED.compliance_rate,
                implemented_controls = EXCLUDED.implemented_controls,
                total_controls = EXCLUDED.total_controls,
                open_findings = EXCLUDED.open_findings,
                critical_findings = EXCLUDED.critical_findings,
                assessment_completion_rate = EXCLUDED.assessment_completion_rate,
                risk_closure_rate = EXCLUDED.risk_closure_rate,
                completed_assessments = EXCLUDED.completed_assessments,
                total_assessments = EXCLUDED.total_assessments,
                approved_evidence = EXCLUDED.approved_evidence,
                metadata = EXCLUDED.metadata,
                updated_at = NOW()
            RETURNING
                id, snapshot_date, compliance_rate, implemented_controls, total_controls,
                open_findings, critical_findings, assessment_completion_rate, risk_closure_rate,
                completed_assessments, total_assessments, approved_evidence, metadata,
                created_at, updated_at
            "#,
        )
        .bind(snapshot.id)
        .bind(snapshot.snapshot_date)
        .bind(snapshot.compliance_rate)
        .bind(snapshot.implemented_controls)
        .bind(snapshot.total_controls)
        .bind(snapshot.open_findings)
        .bind(snapshot.critical_findings)
        .bind(snapshot.assessment_completion_rate)
        .bind(snapshot.risk_closure_rate)
        .bind(snapshot.completed_assessments)
        .bind(snapshot.total_assessments)
        .bind(snapshot.approved_evidence)
        .bind(&snapshot.metadata)
        .fetch_one(&self.pool)
        .await?;

        Ok(stored)
    }
}
