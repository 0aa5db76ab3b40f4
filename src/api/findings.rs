use crate::error::AppResult;
use crate::models::Finding;
use crate::AppState;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::NaiveDate;
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateFindingRequest {
    pub title: String,
    pub description: Option<String>,
    pub severity: String,
    pub assessment_id: Option<Uuid>,
    pub control_id: Option<Uuid>,
    pub due_date: Option<NaiveDate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFindingRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub severity: Option<String>,
    pub status: Option<String>,
    pub due_date: Option<NaiveDate>,
}

#[derive(Debug, Deserialize)]
pub struct ListFindingsQuery {
    pub status: Option<String>,
    pub severity: Option<String>,
}

pub async fn list_findings(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListFindingsQuery>,
) -> AppResult<Json<Vec<Finding>>> {
    let findings = state
        .finding_service
        .list_findings(query.status.as_deref(), query.severity.as_deref())
        .await?;
    Ok(Json(findings))
}

pub async fn create_finding(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateFindingRequest>,
) -> AppResult<(StatusCode, Json<Finding>)> {
    let finding = state
        .finding_service
        .create_finding(
            &req.title,
            req.description.as_deref(),
            &req.severity,
            req.assessment_id,
            req.control_id,
            req.due_date,
        )
        .await?;
    Ok((StatusCode::CREATED, Json(finding)))
}

pub async fn get_finding(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Finding>> {
    let finding = state.finding_service.get_finding(id).await?;
    Ok(Json(finding))
}

pub async fn update_finding(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateFindingRequest>,
) -> AppResult<Json<Finding>> {
    let finding = state
        .finding_service
        .update_finding(
            id,
            req.title.as_deref(),
            req.description.as_deref(),
            req.severity.as_deref(),
            req.status.as_deref(),
            req.due_date,
        )
        .await?;
    Ok(Json(finding))
}

pub async fn delete_finding(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    state.finding_service.delete_finding(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
