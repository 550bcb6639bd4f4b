//! Error taxonomy for directory operations and its HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

pub const MSG_NOT_FOUND: &str = "User not found";
pub const MSG_REQUIRED_FIELDS: &str = "Name and email are required";
pub const MSG_MISSING_BODY: &str = "Missing user data";
pub const MSG_INVALID_JSON: &str = "Invalid JSON format in request body";
pub const MSG_INTERNAL: &str = "Internal server error";

#[derive(Error, Debug)]
pub enum DirectoryError {
    #[error("{0}")]
    Validation(String),

    #[error("user {0} not found")]
    NotFound(u64),

    /// Id that could not be parsed as a number; nothing can match it
    #[error("user {0:?} not found")]
    UnknownId(String),

    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("Route not found")]
    RouteNotFound,

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl DirectoryError {
    pub fn required_fields() -> Self {
        DirectoryError::Validation(MSG_REQUIRED_FIELDS.to_string())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            DirectoryError::Validation(_) => StatusCode::BAD_REQUEST,
            DirectoryError::NotFound(_)
            | DirectoryError::UnknownId(_)
            | DirectoryError::RouteNotFound => StatusCode::NOT_FOUND,
            DirectoryError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            DirectoryError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Client-facing message. Internal details never go here.
    pub fn public_message(&self) -> String {
        match self {
            DirectoryError::Validation(msg) => msg.clone(),
            DirectoryError::NotFound(_) | DirectoryError::UnknownId(_) => {
                MSG_NOT_FOUND.to_string()
            }
            DirectoryError::MethodNotAllowed => "Method not allowed".to_string(),
            DirectoryError::RouteNotFound => "Not found".to_string(),
            DirectoryError::Internal(_) => MSG_INTERNAL.to_string(),
        }
    }

    /// Render with the underlying cause attached to 500 bodies
    pub fn into_detailed_response(self) -> Response {
        let error = match &self {
            DirectoryError::Internal(e) => Some(format!("{e:#}")),
            _ => None,
        };
        self.render(error)
    }

    fn render(self, error: Option<String>) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::debug!(status = status.as_u16(), error = %self, "request rejected");
        }
        let body = ErrorBody {
            message: self.public_message(),
            error,
        };
        (status, Json(body)).into_response()
    }
}

/// JSON error body
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl IntoResponse for DirectoryError {
    fn into_response(self) -> Response {
        self.render(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            DirectoryError::required_fields().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(DirectoryError::NotFound(3).status(), StatusCode::NOT_FOUND);
        assert_eq!(
            DirectoryError::UnknownId("abc".into()).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            DirectoryError::MethodNotAllowed.status(),
            StatusCode::METHOD_NOT_ALLOWED
        );
        assert_eq!(
            DirectoryError::Internal(anyhow::anyhow!("boom")).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_internal_message_hides_cause() {
        let err = DirectoryError::Internal(anyhow::anyhow!("secret detail"));
        assert_eq!(err.public_message(), MSG_INTERNAL);
    }

    #[test]
    fn test_error_body_omits_empty_error() {
        let body = ErrorBody {
            message: MSG_NOT_FOUND.to_string(),
            error: None,
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            serde_json::json!({"message": "User not found"})
        );
    }
}
