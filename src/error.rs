//! Domain errors and the terminal error handler.
//!
//! Every failure raised by a handler, extractor or middleware ends up as an
//! [`AppError`]. Its [`IntoResponse`] implementation is the single recovery
//! point: it picks the HTTP status and renders `templates/error.html`.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

/// Message shown when an error carries no usable message of its own.
pub const GENERIC_MESSAGE: &str = "Something went wrong!";

/// Message shown for requests that match no route.
pub const ROUTE_NOT_FOUND_MESSAGE: &str = "Page not found!";

/// Application-level failure carrying an HTTP status and message.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Rejected input. The message is the comma-joined list of field errors.
    #[error("{message}")]
    Validation { message: String },

    /// A listing or review that does not exist.
    #[error("{message}")]
    NotFound { message: String },

    /// No route matched the request.
    #[error("Page not found!")]
    RouteNotFound,

    /// Unexpected failure. The message is logged, never shown to the client.
    #[error("{message}")]
    Internal { message: String },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// HTTP status for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } | AppError::RouteNotFound => StatusCode::NOT_FOUND,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message rendered on the error page.
    ///
    /// Internal errors always show the generic message; blank messages fall
    /// back to it as well.
    pub fn public_message(&self) -> String {
        let message = match self {
            AppError::Validation { message } | AppError::NotFound { message } => message.trim(),
            AppError::RouteNotFound => ROUTE_NOT_FOUND_MESSAGE,
            AppError::Internal { .. } => GENERIC_MESSAGE,
        };

        if message.is_empty() {
            GENERIC_MESSAGE.to_string()
        } else {
            message.to_string()
        }
    }
}

/// Template for the error page.
///
/// Renders `templates/error.html` with the status code and message.
#[derive(Template, WebTemplate)]
#[template(path = "error.html")]
pub struct ErrorTemplate {
    pub status: u16,
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        match &self {
            AppError::Internal { message } => {
                tracing::error!(status = status.as_u16(), error = %message, "Request failed");
            }
            _ => tracing::debug!(status = status.as_u16(), error = %self, "Request rejected"),
        }

        let page = ErrorTemplate {
            status: status.as_u16(),
            message: self.public_message(),
        };

        (status, page).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        AppError::internal(format!("Database error: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AppError::bad_request("x").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::not_found("x").status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(AppError::RouteNotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            AppError::internal("x").status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_public_message_defaults() {
        assert_eq!(AppError::bad_request("   ").public_message(), GENERIC_MESSAGE);
        assert_eq!(AppError::not_found("").public_message(), GENERIC_MESSAGE);
        assert_eq!(
            AppError::RouteNotFound.public_message(),
            ROUTE_NOT_FOUND_MESSAGE
        );
    }

    #[test]
    fn test_internal_message_is_hidden() {
        let err = AppError::internal("Database error: connection refused");
        assert_eq!(err.public_message(), GENERIC_MESSAGE);
        assert_eq!(err.to_string(), "Database error: connection refused");
    }

    #[test]
    fn test_validation_message_is_shown() {
        let err = AppError::bad_request("\"listing.title\" is required");
        assert_eq!(err.public_message(), "\"listing.title\" is required");
    }

    #[test]
    fn test_into_response_status() {
        let response = AppError::not_found("Listing not found!").into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = AppError::internal("boom").into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
