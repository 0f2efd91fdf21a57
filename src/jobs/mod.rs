use axum::routing::{get, post};
use axum::Router;

use crate::state::AppState;

pub mod dto;
pub mod handlers;
pub mod repo;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/jobs/:id", get(handlers::job_detail))
        .route("/jobs/:id/apply", post(handlers::apply))
        .route("/employer", get(handlers::employer_dashboard))
        .route("/employer/jobs", post(handlers::post_job))
        .route("/employer/jobs/:id", get(handlers::job_applications))
}
