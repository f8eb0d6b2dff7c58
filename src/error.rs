use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::builder::BuildError;

/// Errors surfaced by HTTP handlers.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Build(#[from] BuildError),

    #[error("session store failure: {0}")]
    Session(#[from] tower_sessions::session::Error),

    #[error("no QR code has been generated in this session")]
    NoImage,
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Build(BuildError::Encode(_)) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Build(BuildError::Png(_)) | AppError::Session(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::NoImage => StatusCode::NOT_FOUND,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("{self}");
        } else {
            tracing::warn!("{self}");
        }
        (status, self.to_string()).into_response()
    }
}
