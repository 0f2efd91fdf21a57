use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::error;

use crate::pages::html;

/// Infrastructure failures surfaced to the browser as a 500 page.
/// Expected outcomes (bad credentials, duplicate email, wrong role) are
/// handled in the handlers and never reach this type.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        error!(error = %self, "request failed");
        let page = html::layout(
            "Something went wrong",
            "<h1>Something went wrong</h1>\
             <p>The server could not complete your request. Please try again.</p>",
        );
        (StatusCode::INTERNAL_SERVER_ERROR, page).into_response()
    }
}
