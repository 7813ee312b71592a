use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;
use validator::ValidationErrors;

pub type Result<T> = std::result::Result<T, AppError>;

/// A single rejected field in a request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Validation error: {0:?}")]
    Validation(Vec<FieldError>),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::Database(ref msg) => {
                tracing::error!("Database error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "Database error occurred" }),
                )
            }
            AppError::BadRequest(ref msg) => (StatusCode::BAD_REQUEST, json!({ "error": msg })),
            AppError::Validation(ref details) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                json!({ "error": "Validation failed", "details": details }),
            ),
            AppError::ServiceUnavailable(ref msg) => {
                tracing::warn!("Service unavailable: {}", msg);
                (StatusCode::SERVICE_UNAVAILABLE, json!({ "error": msg }))
            }
            AppError::Internal(ref msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "Internal server error" }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<mongodb::error::Error> for AppError {
    fn from(err: mongodb::error::Error) -> Self {
        AppError::Database(err.to_string())
    }
}

impl From<mongodb::bson::ser::Error> for AppError {
    fn from(err: mongodb::bson::ser::Error) -> Self {
        AppError::Internal(format!("Failed to encode document: {}", err))
    }
}

impl From<mongodb::bson::de::Error> for AppError {
    fn from(err: mongodb::bson::de::Error) -> Self {
        AppError::Database(format!("Malformed stored document: {}", err))
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let mut details: Vec<FieldError> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |err| {
                    let message = err
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("failed `{}` check", err.code));
                    FieldError::new(field.to_string(), message)
                })
            })
            .collect();
        // field_errors() is backed by a HashMap
        details.sort_by(|a, b| a.field.cmp(&b.field));
        AppError::Validation(details)
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::JsonDataError(err) => {
                AppError::Validation(vec![field_error_from_serde(&err.body_text())])
            }
            other => AppError::BadRequest(other.body_text()),
        }
    }
}

/// Pulls the offending field out of a deserialization message such as
/// "...target type: missing field `title` at line 1 column 2" or
/// "...target type: email: invalid type: integer `3`, expected a string at line 1 column 12".
fn field_error_from_serde(text: &str) -> FieldError {
    let detail = text
        .split_once("target type: ")
        .map(|(_, rest)| rest)
        .unwrap_or(text);
    let detail = detail
        .rsplit_once(" at line ")
        .map(|(head, _)| head)
        .unwrap_or(detail);

    if let Some(rest) = detail.strip_prefix("missing field `") {
        if let Some((field, _)) = rest.split_once('`') {
            return FieldError::new(field, "field required");
        }
    }

    match detail.split_once(": ") {
        Some((path, reason)) if !path.contains(' ') && path != "." => {
            FieldError::new(path, reason)
        }
        _ => FieldError::new("body", detail),
    }
}
