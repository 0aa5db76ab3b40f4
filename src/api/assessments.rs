use crate::error::AppResult;
use crate::models::Assessment;
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
pub struct CreateAssessmentRequest {
    pub name: String,
    pub description: Option<String>,
    pub scope: Option<String>,
    pub due_date: Option<NaiveDate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAssessmentRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub scope: Option<String>,
    pub status: Option<String>,
    pub due_date: Option<NaiveDate>,
}

#[derive(Debug, Deserialize)]
pub struct ListAssessmentsQuery {
    pub status: Option<String>,
}

pub async fn list_assessments(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListAssessmentsQuery>,
) -> AppResult<Json<Vec<Assessment>>> {
    let assessments = state
        .assessment_service
        .list_assessments(query.status.as_deref())
        .await?;
    Ok(Json(assessments))
}

pub async fn create_assessment(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateAssessmentRequest>,
) -> AppResult<(StatusCode, Json<Assessment>)> {
    let assessment = state
        .assessment_service
        .create_assessment(
            &req.name,
            req.description.as_deref(),
            req.scope.as_deref(),
            req.due_date,
        )
        .await?;
    Ok((StatusCode::CREATED, Json(assessment)))
}

pub async fn get_assessment(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Assessment>> {
    let assessment = state.assessment_service.get_assessment(id).await?;
    Ok(Json(assessment))
}

pub async fn update_assessment(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateAssessmentRequest>,
) -> AppResult<Json<Assessment>> {
    let assessment = state
        .assessment_service
        .update_assessment(
            id,
            req.name.as_deref(),
            req.description.as_deref(),
            req.scope.as_deref(),
            req.status.as_deref(),
            req.due_date,
        )
        .await?;
    Ok(Json(assessment))
}

pub async fn delete_assessment(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    state.assessment_service.delete_assessment(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
