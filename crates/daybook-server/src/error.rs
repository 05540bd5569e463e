use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use daybook_core::repo::StoreError;
use serde::Serialize;
use tracing::error;

/// Store error carried out of a handler; converted into a status code plus
/// a small JSON body on the way out.
#[derive(Debug)]
pub struct ApiError(pub StoreError);

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        Self(err)
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            StoreError::NotFound { .. } => StatusCode::NOT_FOUND,
            StoreError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            StoreError::Unavailable { .. } | StoreError::Corrupt { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        if status.is_server_error() {
            error!(%status, err = %self.0, "request failed");
        }
        let body = ErrorBody {
            error: self.0.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
