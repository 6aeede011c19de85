use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Failure taxonomy of the analysis core.
///
/// All three are reported to the caller as structured failures, never as
/// default values that could be mistaken for a real prediction.
#[derive(Error, Debug)]
pub enum EngineError {
    /// Series shorter than the minimum required window. Also produced for
    /// an empty series, including one a failed provider fetch returned.
    #[error("insufficient history: got {got} bars, need at least {need}")]
    InsufficientHistory { got: usize, need: usize },

    /// Zero horizon, non-monotonic dates, or a non-positive close.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Propagated opaquely from the external fetch collaborator.
    #[error("provider failure: {0}")]
    Provider(String),
}

/// Application error types.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error(transparent)]
    Reqwest(#[from] reqwest::Error),

    #[error(transparent)]
    SerdeJson(#[from] serde_json::Error),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
            AppError::Engine(e) => {
                let status = match e {
                    EngineError::InsufficientHistory { .. } => StatusCode::UNPROCESSABLE_ENTITY,
                    EngineError::InvalidInput(_) => StatusCode::BAD_REQUEST,
                    EngineError::Provider(_) => StatusCode::BAD_GATEWAY,
                };
                (status, e.to_string())
            }
            AppError::Reqwest(e) => (StatusCode::BAD_GATEWAY, e.to_string()),
            AppError::SerdeJson(e) => (StatusCode::BAD_REQUEST, e.to_string()),
            AppError::Anyhow(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
        };

        let body = Json(json!({
            "error": message,
            "status": status.as_u16(),
        }));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
