//! Veritas Backend Library
//!
//! This module exposes the backend components for use by tests and other consumers.

pub mod api;
pub mod config;
pub mod database;
pub mod error;
pub mod models;
pub mod repositories;
pub mod services;
pub mod trend;

// Re-export commonly used types
pub use config::AppConfig;
pub use error::{AppError, AppResult};

use database::Database;
use repositories::*;
use services::*;
use std::sync::Arc;

/// Application state containing all repositories and services
pub struct AppState {
    pub database: Database,
    pub policy_repo: Arc<PolicyRepository>,
    pub control_repo: Arc<ControlRepository>,
    pub assessment_repo: Arc<AssessmentRepository>,
    pub finding_repo: Arc<FindingRepository>,
    pub evidence_repo: Arc<EvidenceRepository>,
    pub snapshot_repo: Arc<SnapshotRepository>,
    pub policy_service: Arc<PolicyService>,
    pub control_service: Arc<ControlService>,
    pub assessment_service: Arc<AssessmentService>,
    pub finding_service: Arc<FindingService>,
    pub evidence_service: Arc<EvidenceService>,
    pub dashboard_service: Arc<DashboardService>,
    pub trend_service: Arc<TrendService>,
}

impl AppState {
    /// Create a new AppState with initialized repositories and services
    pub fn new(pool: sqlx::PgPool) -> Self {
        let database = Database::new(pool.clone());

        let policy_repo = Arc::new(PolicyRepository::new(pool.clone()));
        let control_repo = Arc::new(ControlRepository::new(pool.clone()));
        let assessment_repo = Arc::new(AssessmentRepository::new(pool.clone()));
        let finding_repo = Arc::new(FindingRepository::new(pool.clone()));
        let evidence_repo = Arc::new(EvidenceRepository::new(pool.clone()));
        let snapshot_repo = Arc::new(SnapshotRepository::new(pool));

        let dashboard_service = Arc::new(DashboardService::new(
            policy_repo.clone(),
            control_repo.clone(),
            assessment_repo.clone(),
            finding_repo.clone(),
            evidence_repo.clone(),
        ));
        let trend_service = Arc::new(TrendService::new(
            snapshot_repo.clone(),
            dashboard_service.clone(),
        ));

        Self {
            database,
            policy_service: Arc::new(PolicyService::new(policy_repo.clone())),
            control_service: Arc::new(ControlService::new(
                control_repo.clone(),
                policy_repo.clone(),
            )),
            assessment_service: Arc::new(AssessmentService::new(assessment_repo.clone())),
            finding_service: Arc::new(FindingService::new(
                finding_repo.clone(),
                assessment_repo.clone(),
                control_repo.clone(),
            )),
            evidence_service: Arc::new(EvidenceService::new(
                evidence_repo.clone(),
                control_repo.clone(),
            )),
            dashboard_service,
            trend_service,
            policy_repo,
            control_repo,
            assessment_repo,
            finding_repo,
            evidence_repo,
            snapshot_repo,
        }
    }
}
