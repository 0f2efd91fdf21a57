use axum::routing::get;
use axum::Router;

use crate::state::AppState;

pub mod dto;
pub mod extractors;
pub mod handlers;
pub mod password;
pub mod repo;
pub mod session;

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/signup",
            get(handlers::get_signup).post(handlers::post_signup),
        )
        .route(
            "/signin",
            get(handlers::get_signin).post(handlers::post_signin),
        )
        .route("/logout", get(handlers::logout))
}
