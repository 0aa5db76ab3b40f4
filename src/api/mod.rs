//! REST surface for the Veritas backend.
//!
//! Thin handlers over the service layer: extract, delegate, serialize.
//! All JSON bodies are camelCase; dates are `YYYY-MM-DD` strings.

pub mod assessments;
pub mod controls;
pub mod dashboard;
pub mod evidence;
pub mod findings;
pub mod policies;

use crate::AppState;
use axum::routing::get;
use axum::{Json, Router};
use std::sync::Arc;

/// Build the application router
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route(
            "/api/policies",
            get(policies::list_policies).post(policies::create_policy),
        )
        .route(
            "/api/policies/{id}",
            get(policies::get_policy)
                .put(policies::update_policy)
                .delete(policies::delete_policy),
        )
        .route(
            "/api/controls",
            get(controls::list_controls).post(controls::create_control),
        )
        .route(
            "/api/controls/{id}",
            get(controls::get_control)
                .put(controls::update_control)
                .delete(controls::delete_control),
        )
        .route(
            "/api/assessments",
            get(assessments::list_assessments).post(assessments::create_assessment),
        )
        .route(
            "/api/assessments/{id}",
            get(assessments::get_assessment)
                .put(assessments::update_assessment)
                .delete(assessments::delete_assessment),
        )
        .route(
            "/api/findings",
            get(findings::list_findings).post(findings::create_finding),
        )
        .route(
            "/api/findings/{id}",
            get(findings::get_finding)
                .put(findings::update_finding)
                .delete(findings::delete_finding),
        )
        .route(
            "/api/evidence",
            get(evidence::list_evidence).post(evidence::create_evidence),
        )
        .route(
            "/api/evidence/{id}",
            get(evidence::get_evidence)
                .put(evidence::update_evidence)
                .delete(evidence::delete_evidence),
        )
        .route("/api/dashboard/summary", get(dashboard::get_summary))
        .route("/api/dashboard/trend", get(dashboard::get_trend))
        .with_state(state)
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}
