use crate::error::AppResult;
use crate::models::Evidence;
use crate::AppState;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEvidenceRequest {
    pub name: String,
    pub description: Option<String>,
    pub control_id: Option<Uuid>,
    pub reference: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEvidenceRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub reference: Option<String>,
    pub status: Option<String>,
    pub reviewer: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ListEvidenceQuery {
    pub status: Option<String>,
}

pub async fn list_evidence(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListEvidenceQuery>,
) -> AppResult<Json<Vec<Evidence>>> {
    let records = state
        .evidence_service
        .list_evidence(query.status.as_deref())
        .await?;
    Ok(Json(records))
}

pub async fn create_evidence(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateEvidenceRequest>,
) -> AppResult<(StatusCode, Json<Evidence>)> {
    let evidence = state
        .evidence_service
        .create_evidence(
            &req.name,
            req.description.as_deref(),
            req.control_id,
            req.reference.as_deref(),
        )
        .await?;
    Ok((StatusCode::CREATED, Json(evidence)))
}

pub async fn get_evidence(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Evidence>> {
    let evidence = state.evidence_service.get_evidence(id).await?;
    Ok(Json(evidence))
}

pub async fn update_evidence(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateEvidenceRequest>,
) -> AppResult<Json<Evidence>> {
    let evidence = state
        .evidence_service
        .update_evidence(
            id,
            req.name.as_deref(),
            req.description.as_deref(),
            req.reference.as_deref(),
            req.status.as_deref(),
            req.reviewer.as_deref(),
        )
        .await?;
    Ok(Json(evidence))
}

pub async fn delete_evidence(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    state.evidence_service.delete_evidence(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
