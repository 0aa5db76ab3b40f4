//! Database-backed suites. These require a PostgreSQL instance (see
//! `TEST_DATABASE_URL`) and are ignored by default; run them with
//! `cargo test -- --ignored` against a disposable database.

mod helpers;

use chrono::{Duration, Utc};
use helpers::*;
use sqlx::{PgPool, Row};
use veritas_backend::models::*;
use veritas_backend::services::{AssessmentService, FindingService};

// ============================================================================
// Connection / migration sanity
// ============================================================================

#[sqlx::test]
#[ignore = "requires a PostgreSQL test database"]
async fn test_connection_pool_works(pool: PgPool) {
    let row = sqlx::query("SELECT 1 as test")
        .fetch_one(&pool)
        .await
        .expect("query failed");

    let value: i32 = row.get("test");
    assert_eq!(value, 1);
}

#[sqlx::test]
#[ignore = "requires a PostgreSQL test database"]
async fn test_migrations_created_tables(pool: PgPool) {
    let tables = [
        "policies",
        "controls",
        "assessments",
        "findings",
        "evidence",
        "metric_snapshots",
    ];

    for table in tables {
        let row = sqlx::query(
            "SELECT EXISTS (
                SELECT FROM information_schema.tables
                WHERE table_name = $1
            ) as present",
        )
        .bind(table)
        .fetch_one(&pool)
        .await
        .expect("query failed");

        let present: bool = row.get("present");
        assert!(present, "table {} missing", table);
    }
}

// ============================================================================
// Repository CRUD
// ============================================================================

#[sqlx::test]
#[ignore = "requires a PostgreSQL test database"]
async fn test_policy_crud_roundtrip(pool: PgPool) {
    let db = TestDatabase::from_pool(pool).await;
    db.cleanup().await;

    let policy = Policy::new(
        "Access Control Policy".to_string(),
        Some("Who may access what".to_string()),
        "security".to_string(),
        Some("alice".to_string()),
        None,
    );
    let created = db.policy_repo.create(&policy).await.expect("create failed");
    assert_eq!(created.title, "Access Control Policy");
    assert_eq!(created.status_enum(), PolicyStatus::Draft);

    let fetched = db
        .policy_repo
        .find_by_id(created.id)
        .await
        .expect("find failed")
        .expect("policy missing");
    assert_eq!(fetched.id, created.id);

    let mut to_update = fetched.clone();
    to_update.status = PolicyStatus::UnderReview.as_str().to_string();
    let updated = db.policy_repo.update(&to_update).await.expect("update failed");
    assert_eq!(updated.status_enum(), PolicyStatus::UnderReview);

    assert_eq!(db.policy_repo.count_under_review().await.unwrap(), 1);

    let deleted = db.policy_repo.delete(created.id).await.expect("delete failed");
    assert!(deleted);
    assert!(db
        .policy_repo
        .find_by_id(created.id)
        .await
        .unwrap()
        .is_none());
}

#[sqlx::test]
#[ignore = "requires a PostgreSQL test database"]
async fn test_control_counts(pool: PgPool) {
    let db = TestDatabase::from_pool(pool).await;
    db.cleanup().await;

    create_test_control(&db, "AC-1", ControlStatus::Implemented).await;
    create_test_control(&db, "AC-2", ControlStatus::Implemented).await;
    create_test_control(&db, "AC-3", ControlStatus::PartiallyImplemented).await;
    create_test_control(&db, "AC-4", ControlStatus::NotImplemented).await;

    assert_eq!(db.control_repo.count_total().await.unwrap(), 4);
    assert_eq!(db.control_repo.count_implemented().await.unwrap(), 2);
}

#[sqlx::test]
#[ignore = "requires a PostgreSQL test database"]
async fn test_finding_counts(pool: PgPool) {
    let db = TestDatabase::from_pool(pool).await;
    db.cleanup().await;

    create_test_finding(&db, "f1", FindingSeverity::Critical, FindingStatus::Open).await;
    create_test_finding(&db, "f2", FindingSeverity::Critical, FindingStatus::Closed).await;
    create_test_finding(&db, "f3", FindingSeverity::Low, FindingStatus::InRemediation).await;
    create_test_finding(&db, "f4", FindingSeverity::Medium, FindingStatus::Closed).await;

    assert_eq!(db.finding_repo.count_total().await.unwrap(), 4);
    // Open includes in_remediation
    assert_eq!(db.finding_repo.count_open().await.unwrap(), 2);
    // Critical counts only unresolved criticals
    assert_eq!(db.finding_repo.count_critical().await.unwrap(), 1);
}

// ============================================================================
// Snapshot store
// ============================================================================

#[sqlx::test]
#[ignore = "requires a PostgreSQL test database"]
async fn test_snapshot_upsert_overwrites_in_place(pool: PgPool) {
    let db = TestDatabase::from_pool(pool).await;
    db.cleanup().await;

    let today = Utc::now().date_naive();

    let first = MetricSnapshot::from_summary(
        today,
        &DashboardSummary {
            total_controls: 10,
            implemented_controls: 5,
            ..Default::default()
        },
    );
    let stored = db.snapshot_repo.upsert(&first).await.expect("upsert failed");
    assert_eq!(stored.compliance_rate, 50.0);

    let second = MetricSnapshot::from_summary(
        today,
        &DashboardSummary {
            total_controls: 10,
            implemented_controls: 8,
            ..Default::default()
        },
    );
    let stored = db.snapshot_repo.upsert(&second).await.expect("upsert failed");
    assert_eq!(stored.compliance_rate, 80.0);

    // Still a single row for the day
    let all = db
        .snapshot_repo
        .find_since(today - Duration::days(1))
        .await
        .expect("find failed");
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].compliance_rate, 80.0);
}

#[sqlx::test]
#[ignore = "requires a PostgreSQL test database"]
async fn test_snapshot_queries(pool: PgPool) {
    let db = TestDatabase::from_pool(pool).await;
    db.cleanup().await;

    let today = Utc::now().date_naive();
    for offset in [4i64, 2, 0] {
        let date = today - Duration::days(offset);
        let snapshot = MetricSnapshot::from_summary(
            date,
            &DashboardSummary {
                total_controls: 10,
                implemented_controls: 10 - offset,
                ..Default::default()
            },
        );
        db.snapshot_repo.upsert(&snapshot).await.expect("upsert failed");
    }

    let found = db
        .snapshot_repo
        .find_by_date(today - Duration::days(2))
        .await
        .expect("find failed");
    assert!(found.is_some());

    let since = db
        .snapshot_repo
        .find_since(today - Duration::days(3))
        .await
        .expect("find failed");
    assert_eq!(since.len(), 2);
    assert!(since[0].snapshot_date < since[1].snapshot_date);

    let latest = db
        .snapshot_repo
        .find_latest()
        .await
        .expect("find failed")
        .expect("no snapshot");
    assert_eq!(latest.snapshot_date, today);
}

// ============================================================================
// Service-level flows
// ============================================================================

#[sqlx::test]
#[ignore = "requires a PostgreSQL test database"]
async fn test_status_transitions_stamp_timestamps(pool: PgPool) {
    let db = TestDatabase::from_pool(pool).await;
    db.cleanup().await;

    let assessment_service = AssessmentService::new(db.assessment_repo.clone());
    let finding_service = FindingService::new(
        db.finding_repo.clone(),
        db.assessment_repo.clone(),
        db.control_repo.clone(),
    );

    let assessment = assessment_service
        .create_assessment("Q3 review", None, None, None)
        .await
        .expect("create failed");
    let completed = assessment_service
        .update_assessment(assessment.id, None, None, None, Some("completed"), None)
        .await
        .expect("update failed");
    assert!(completed.completed_at.is_some());

    let finding = finding_service
        .create_finding("MFA not enforced", None, "high", None, None, None)
        .await
        .expect("create failed");
    let closed = finding_service
        .update_finding(finding.id, None, None, None, Some("closed"), None)
        .await
        .expect("update failed");
    assert!(closed.resolved_at.is_some());

    let reopened = finding_service
        .update_finding(finding.id, None, None, None, Some("open"), None)
        .await
        .expect("update failed");
    assert!(reopened.resolved_at.is_none());
}

#[sqlx::test]
#[ignore = "requires a PostgreSQL test database"]
async fn test_capture_snapshot_is_idempotent(pool: PgPool) {
    let db = TestDatabase::from_pool(pool).await;
    db.cleanup().await;

    create_test_control(&db, "AC-1", ControlStatus::Implemented).await;
    create_test_control(&db, "AC-2", ControlStatus::NotImplemented).await;
    create_test_finding(&db, "f1", FindingSeverity::High, FindingStatus::Open).await;
    create_test_assessment(&db, "a1", AssessmentStatus::Completed).await;

    let trend_service = db.trend_service();
    let today = Utc::now().date_naive();

    let first = trend_service.capture_snapshot(today).await.expect("capture failed");
    let second = trend_service.capture_snapshot(today).await.expect("capture failed");

    assert_eq!(first.compliance_rate, 50.0);
    assert_eq!(second.compliance_rate, first.compliance_rate);
    assert_eq!(second.open_findings, first.open_findings);
    assert_eq!(second.assessment_completion_rate, first.assessment_completion_rate);
}

#[sqlx::test]
#[ignore = "requires a PostgreSQL test database"]
async fn test_get_trend_shape(pool: PgPool) {
    let db = TestDatabase::from_pool(pool).await;
    db.cleanup().await;

    create_test_control(&db, "AC-1", ControlStatus::Implemented).await;

    let trend_service = db.trend_service();
    let trend = trend_service.get_trend(Some(7)).await.expect("trend failed");

    assert_eq!(trend.history.len(), 7);
    assert_eq!(trend.forecast.len(), 14);

    let today = Utc::now().date_naive();
    assert_eq!(trend.latest_snapshot.date, today);
    assert_eq!(trend.history.last().unwrap().compliance_rate, 100.0);

    // Requested range below the minimum is widened to 7 days
    let clamped = trend_service.get_trend(Some(1)).await.expect("trend failed");
    assert_eq!(clamped.history.len(), 7);
}
