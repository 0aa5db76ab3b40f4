use crate::error::AppResult;
use crate::models::{rate_percentage, DashboardSummary};
use crate::trend::TrendResponse;
use crate::AppState;
use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Dashboard summary: the raw counts plus the derived posture rates
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummaryResponse {
    #[serde(flatten)]
    pub summary: DashboardSummary,
    pub compliance_rate: f64,
    pub assessment_completion_rate: f64,
    pub risk_closure_rate: f64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendQuery {
    pub range_days: Option<u32>,
}

pub async fn get_summary(
    State(state): State<Arc<AppState>>,
) -> AppResult<Json<DashboardSummaryResponse>> {
    let summary = state.dashboard_service.compute_summary().await?;

    let compliance_rate = rate_percentage(summary.implemented_controls, summary.total_controls);
    let assessment_completion_rate =
        rate_percentage(summary.completed_assessments, summary.total_assessments);
    let risk_closure_rate = rate_percentage(
        summary.total_findings - summary.open_findings,
        summary.total_findings,
    );

    Ok(Json(DashboardSummaryResponse {
        summary,
        compliance_rate,
        assessment_completion_rate,
        risk_closure_rate,
    }))
}

pub async fn get_trend(
    State(state): State<Arc<AppState>>,
    Query(query): Query<TrendQuery>,
) -> AppResult<Json<TrendResponse>> {
    let trend = state.trend_service.get_trend(query.range_days).await?;
    Ok(Json(trend))
}
