//! Error types for the API server.
//!
//! [`ApiError`] unifies all failure modes into a single enum that can be
//! converted into an Axum HTTP response via its
//! [`IntoResponse`](axum::response::IntoResponse) implementation. Every
//! error body has the shape `{"error": "...", "status": <code>}`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use snowtooth_core::ResortError;

/// Errors that can occur in the API layer.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The requested entity or topic was not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// A status value outside `OPEN`, `HOLD`, `CLOSED`.
    #[error("invalid status: {0}")]
    InvalidStatus(String),

    /// An internal error occurred.
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<ResortError> for ApiError {
    fn from(err: ResortError) -> Self {
        match err {
            ResortError::NotFound { .. } => Self::NotFound(err.to_string()),
            ResortError::InvalidStatus(raw) => Self::InvalidStatus(raw),
            other => Self::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            Self::InvalidStatus(raw) => (
                StatusCode::BAD_REQUEST,
                format!("invalid status `{raw}`; expected OPEN, HOLD, or CLOSED"),
            ),
            Self::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
        };

        let body = serde_json::json!({
            "error": message,
            "status": status.as_u16(),
        });

        (status, axum::Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use snowtooth_types::Collection;

    use super::*;

    #[test]
    fn resort_not_found_maps_to_404() {
        let err = ApiError::from(ResortError::not_found(Collection::Trails, "gondola"));
        assert!(matches!(err, ApiError::NotFound(ref msg) if msg.contains("gondola")));
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn load_failures_map_to_500() {
        let err = ApiError::from(ResortError::DuplicateId {
            collection: Collection::Lifts,
            id: String::from("summit"),
        });
        assert!(matches!(err, ApiError::Internal(_)));
        assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn invalid_status_maps_to_400() {
        let err = ApiError::from(ResortError::InvalidStatus(String::from("open")));
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }
}
