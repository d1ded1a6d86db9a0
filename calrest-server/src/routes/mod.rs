pub mod calendars;
pub mod events;

use axum::{
    Json, Router,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::state::AppState;

/// All REST routes, mounted under `/rest`.
pub fn app(state: AppState) -> Router {
    let api = calendars::router().merge(events::router(state.clone()));

    Router::new().nest("/rest", api).with_state(state)
}

/// Standard API error response
#[derive(Serialize)]
pub struct ErrorResponse {
    pub name: &'static str,
    pub message: String,
    pub status: u16,
    pub errors: Vec<ValidationIssue>,
}

/// One reason a request body was refused
#[derive(Debug, Serialize)]
pub struct ValidationIssue {
    pub message: String,
}

/// Handler failures, mapped onto HTTP statuses
#[derive(Debug)]
pub enum AppError {
    NotFound(String),
    BadRequest(String),
    /// Well-formed JSON that doesn't fit the expected shape.
    Validation {
        message: String,
        errors: Vec<ValidationIssue>,
    },
    Internal(anyhow::Error),
}

impl AppError {
    pub fn not_found(message: impl Into<String>) -> Self {
        AppError::NotFound(message.into())
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        AppError::BadRequest(message.into())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, name, message, errors) = match self {
            AppError::NotFound(message) => {
                (StatusCode::NOT_FOUND, "NOT_FOUND", message, Vec::new())
            }
            AppError::BadRequest(message) => {
                (StatusCode::BAD_REQUEST, "BAD_REQUEST", message, Vec::new())
            }
            AppError::Validation { message, errors } => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", message, errors)
            }
            AppError::Internal(err) => {
                tracing::error!(target: "calrest::server", error = %err, "Request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_SERVER_ERROR",
                    err.to_string(),
                    Vec::new(),
                )
            }
        };

        let body = Json(ErrorResponse {
            name,
            message,
            status: status.as_u16(),
            errors,
        });
        (status, body).into_response()
    }
}

/// Convert anyhow-compatible errors (store failures, etc.) to 500s
impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        AppError::Internal(err.into())
    }
}

/// Unwrap a JSON body, turning a malformed or incomplete one into a 400.
///
/// Bodies that parse but don't fit the target type become a validation
/// error carrying serde's description (field path included when nested).
pub fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    payload.map(|Json(body)| body).map_err(|rejection| {
        let message = rejection.body_text();
        match rejection {
            JsonRejection::JsonDataError(ref err) => {
                let detail = std::error::Error::source(err)
                    .map(|source| source.to_string())
                    .unwrap_or_else(|| message.clone());
                AppError::Validation {
                    message,
                    errors: vec![ValidationIssue { message: detail }],
                }
            }
            _ => AppError::bad_request(message),
        }
    })
}
