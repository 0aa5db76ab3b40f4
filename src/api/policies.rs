use crate::error::AppResult;
use crate::models::Policy;
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
pub struct CreatePolicyRequest {
    pub title: String,
    pub description: Option<String>,
    pub category: String,
    pub owner: Option<String>,
    pub effective_date: Option<NaiveDate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePolicyRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub status: Option<String>,
    pub owner: Option<String>,
    pub effective_date: Option<NaiveDate>,
}

#[derive(Debug, Deserialize)]
pub struct ListPoliciesQuery {
    pub status: Option<String>,
}

pub async fn list_policies(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListPoliciesQuery>,
) -> AppResult<Json<Vec<Policy>>> {
    let policies = state
        .policy_service
        .list_policies(query.status.as_deref())
        .await?;
    Ok(Json(policies))
}

pub async fn create_policy(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreatePolicyRequest>,
) -> AppResult<(StatusCode, Json<Policy>)> {
    let policy = state
        .policy_service
        .create_policy(
            &req.title,
            req.description.as_deref(),
            &req.category,
            req.owner.as_deref(),
            req.effective_date,
        )
        .await?;
    Ok((StatusCode::CREATED, Json(policy)))
}

pub async fn get_policy(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Policy>> {
    let policy = state.policy_service.get_policy(id).await?;
    Ok(Json(policy))
}

pub async fn update_policy(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdatePolicyRequest>,
) -> AppResult<Json<Policy>> {
    let policy = state
        .policy_service
        .update_policy(
            id,
            req.title.as_deref(),
            req.description.as_deref(),
            req.category.as_deref(),
            req.status.as_deref(),
            req.owner.as_deref(),
            req.effective_date,
        )
        .await?;
    Ok(Json(policy))
}

pub async fn delete_policy(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    state.policy_service.delete_policy(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
