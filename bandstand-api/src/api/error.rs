//! HTTP error mapping
//!
//! Every error response is JSON with a single `error` string. Internal
//! failures are logged with their detail and returned as a generic 500
//! body; nothing from the underlying error reaches the client.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::error;

use bandstand_common::Error;

/// Handler result: a JSON payload or a mapped error response
pub type ApiResult<T> = std::result::Result<Json<T>, ApiError>;

/// Wrapper turning shared errors into HTTP responses
#[derive(Debug)]
pub struct ApiError(pub Error);

impl From<Error> for ApiError {
    fn from(e: Error) -> Self {
        Self(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            Error::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            Error::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg.clone()),
            Error::Forbidden(msg) => (StatusCode::FORBIDDEN, msg.clone()),
            Error::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            Error::Conflict(msg) => (StatusCode::CONFLICT, msg.clone()),
            other => {
                error!("Internal error: {}", other);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_for(error: Error) -> StatusCode {
        ApiError(error).into_response().status()
    }

    #[test]
    fn test_error_taxonomy_maps_to_statuses() {
        assert_eq!(
            status_for(Error::InvalidInput("x".to_string())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_for(Error::Unauthorized("x".to_string())),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            status_for(Error::Forbidden("x".to_string())),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            status_for(Error::NotFound("x".to_string())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_for(Error::Conflict("x".to_string())),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_for(Error::Internal("secret detail".to_string())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
