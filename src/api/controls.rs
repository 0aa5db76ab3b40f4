use crate::error::AppResult;
use crate::models::Control;
use crate::AppState;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateControlRequest {
    pub control_code: String,
    pub name: String,
    pub description: Option<String>,
    pub framework: String,
    pub policy_id: Option<Uuid>,
    pub owner: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateControlRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub framework: Option<String>,
    pub status: Option<String>,
    pub policy_id: Option<Uuid>,
    pub owner: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ListControlsQuery {
    pub status: Option<String>,
}

pub async fn list_controls(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListControlsQuery>,
) -> AppResult<Json<Vec<Control>>> {
    let controls = state
        .control_service
        .list_controls(query.status.as_deref())
        .await?;
    Ok(Json(controls))
}

pub async fn create_control(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateControlRequest>,
) -> AppResult<(StatusCode, Json<Control>)> {
    let control = state
        .control_service
        .create_control(
            &req.control_code,
            &req.name,
            req.description.as_deref(),
            &req.framework,
            req.policy_id,
            req.owner.as_deref(),
        )
        .await?;
    Ok((StatusCode::CREATED, Json(control)))
}

pub async fn get_control(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Control>> {
    let control = state.control_service.get_control(id).await?;
    Ok(Json(control))
}

pub async fn update_control(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateControlRequest>,
) -> AppResult<Json<Control>> {
    let control = state
        .control_service
        .update_control(
            id,
            req.name.as_deref(),
            req.description.as_deref(),
            req.framework.as_deref(),
            req.status.as_deref(),
            req.policy_id,
            req.owner.as_deref(),
        )
        .await?;
    Ok(Json(control))
}

pub async fn delete_control(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    state.control_service.delete_control(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
