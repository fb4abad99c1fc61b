use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

pub const PARSE_FAILURE_MESSAGE: &str = "Model returned unparsable JSON.";

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("{0}")]
    Conflict(String),

    /// Upstream model call failed; the message is what the caller sees.
    #[error("{0}")]
    Upstream(&'static str),

    #[error("{}", PARSE_FAILURE_MESSAGE)]
    Parse,

    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthError {
    #[error("Access token required")]
    MissingToken,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid email or password")]
    InvalidCredentials,
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Auth(_) => StatusCode::UNAUTHORIZED,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Upstream(_) | AppError::Parse | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let AppError::Internal(e) = &self {
            error!(error = %e, "internal error");
        }
        let status = self.status_code();
        let message = self.to_string();
        // `message` is kept for clients of the older auth responses.
        let body = json!({
            "success": false,
            "error": message,
            "message": message,
        });
        (status, Json(body)).into_response()
    }
}
