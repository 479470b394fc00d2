use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::error::AppError;

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Upstream(_) => StatusCode::BAD_GATEWAY,
            AppError::Render(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Plain-text response, used when even the error page fails to render
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = match self {
            AppError::NotFound => "Page not found",
            AppError::Upstream(_) => "The content service is unavailable",
            AppError::Render(_) => "Internal server error",
        };

        (self.status_code(), body).into_response()
    }
}
