// Error responses for HTTP handlers
use crate::application::dataset_repository::DatasetNotFound;
use crate::domain::error::AnalyticsError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

#[derive(Debug)]
pub enum AppError {
    NotFound(String),
    BadRequest(String),
    Upstream(String),
}

impl From<AnalyticsError> for AppError {
    fn from(err: AnalyticsError) -> Self {
        AppError::BadRequest(err.to_string())
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        if let Some(not_found) = err.downcast_ref::<DatasetNotFound>() {
            return AppError::NotFound(not_found.to_string());
        }
        if let Some(analytics) = err.downcast_ref::<AnalyticsError>() {
            return AppError::BadRequest(analytics.to_string());
        }
        tracing::error!("Upstream failure: {:#}", err);
        AppError::Upstream(format!("{:#}", err))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::NotFound(m) => (StatusCode::NOT_FOUND, m),
            AppError::BadRequest(m) => (StatusCode::BAD_REQUEST, m),
            AppError::Upstream(m) => (StatusCode::BAD_GATEWAY, m),
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}
