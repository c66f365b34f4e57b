use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

/// Unified error type for API responses and startup failures.
#[derive(Debug)]
pub enum AppError {
    Config(String),
    Db(String),
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(msg) => write!(f, "config_error: {msg}"),
            Self::Db(msg) => write!(f, "db_error: {msg}"),
        }
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_str) = match &self {
            Self::Config(msg) => (StatusCode::INTERNAL_SERVER_ERROR, format!("config_error:{msg}")),
            Self::Db(msg) => (StatusCode::INTERNAL_SERVER_ERROR, format!("db_error:{msg}")),
        };

        let body = json!({ "error": error_str });
        (status, axum::Json(body)).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        Self::Db(e.to_string())
    }
}
