// HTTP request handlers
use crate::domain::comparison::Side;
use crate::domain::error::AnalyticsError;
use crate::infrastructure::http_response::{accepts_brotli, json_response};
use crate::presentation::app_state::AppState;
use crate::presentation::error::AppError;
use crate::presentation::format::{comparison_view, dataset_view, workspace_view};
use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Deserialize)]
pub struct CompareQuery {
    pub dataset1: i64,
    pub dataset2: i64,
}

#[derive(Deserialize)]
pub struct SelectRequest {
    pub dataset_id: i64,
}

async fn respond<T: Serialize>(status: StatusCode, data: &T, headers: &HeaderMap) -> Response {
    match json_response(status, data, accepts_brotli(headers)).await {
        Ok(response) => response,
        Err(status) => status.into_response(),
    }
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Recent uploads
pub async fn list_history(
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Result<Response, AppError> {
    let history = state.dataset_service.list_history().await?;
    Ok(respond(StatusCode::OK, &history, &headers).await)
}

/// Summary, statistics, records and charts of the most recent upload
pub async fn latest_dataset(
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Result<Response, AppError> {
    let dashboard = state.dataset_service.dataset_dashboard(None).await?;
    Ok(respond(StatusCode::OK, &dataset_view(dashboard), &headers).await)
}

pub async fn dataset(
    Path(id): Path<i64>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Result<Response, AppError> {
    let dashboard = state.dataset_service.dataset_dashboard(Some(id)).await?;
    Ok(respond(StatusCode::OK, &dataset_view(dashboard), &headers).await)
}

/// One-shot comparison of two datasets
pub async fn compare(
    Query(query): Query<CompareQuery>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Result<Response, AppError> {
    if query.dataset1 == query.dataset2 {
        return Err(AnalyticsError::SameDataset(query.dataset2).into());
    }

    let dashboard = state
        .dataset_service
        .compare(query.dataset1, query.dataset2)
        .await?;
    Ok(respond(StatusCode::OK, &comparison_view(dashboard), &headers).await)
}

/// Current selection slots and, once both are ready, the comparison
pub async fn workspace(headers: HeaderMap, State(state): State<Arc<AppState>>) -> Response {
    let view = workspace_view(state.workspace.snapshot().await);
    respond(StatusCode::OK, &view, &headers).await
}

/// Select a dataset for slot 1 or 2; loading continues in the background
pub async fn select_slot(
    Path(slot): Path<u8>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
    Json(request): Json<SelectRequest>,
) -> Result<Response, AppError> {
    let side = Side::from_slot(slot)?;
    // The fetch task applies its own result; the handle is not awaited here
    let _pending = state.workspace.select(side, request.dataset_id).await?;

    let view = workspace_view(state.workspace.snapshot().await);
    Ok(respond(StatusCode::ACCEPTED, &view, &headers).await)
}

pub async fn clear_slot(
    Path(slot): Path<u8>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Result<Response, AppError> {
    let side = Side::from_slot(slot)?;
    state.workspace.clear(side).await;

    let view = workspace_view(state.workspace.snapshot().await);
    Ok(respond(StatusCode::OK, &view, &headers).await)
}
