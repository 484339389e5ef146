//! JSON error responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::controller::ControllerError;
use crate::domain::ValidationError;
use crate::generation::GenerationError;

/// Everything a JSON handler can fail with.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Session not found: {0}")]
    SessionNotFound(String),

    #[error(transparent)]
    Controller(#[from] ControllerError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Generation(#[from] GenerationError),
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl ApiError {
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::SessionNotFound(_) => StatusCode::NOT_FOUND,
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Controller(e) => match e {
                ControllerError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
                ControllerError::RecipeNotFound(_) => StatusCode::NOT_FOUND,
                ControllerError::AlreadyLoading
                | ControllerError::NotEditable(_)
                | ControllerError::InvalidTransition { .. } => StatusCode::CONFLICT,
            },
            Self::Generation(GenerationError::NotConfigured(_)) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            Self::Generation(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(
                name: "api.error",
                status = status.as_u16(),
                error = %self,
                "Request failed"
            );
        } else {
            tracing::debug!(status = status.as_u16(), error = %self, "Request rejected");
        }

        (
            status,
            Json(ErrorBody {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}
