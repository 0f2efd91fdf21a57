use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Redirect, Response},
    routing::get,
    Router,
};
use tracing::{instrument, warn};

use crate::auth::extractors::SessionUser;
use crate::auth::repo::{Role, User};
use crate::auth::session::clear_cookie;
use crate::error::AppError;
use crate::jobs::repo::{Application, Job};
use crate::state::AppState;

pub mod html;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(home))
        .route("/profile", get(profile))
}

#[instrument(skip(state))]
pub async fn home(State(state): State<AppState>) -> Result<Response, AppError> {
    let jobs = Job::list_recent(&state.db, 20).await?;

    let listing = if jobs.is_empty() {
        "<p>No jobs posted yet.</p>".to_string()
    } else {
        let items: String = jobs
            .iter()
            .map(|job| {
                let location = job
                    .location
                    .as_deref()
                    .map(|l| format!(" — {}", html::escape(l)))
                    .unwrap_or_default();
                format!(
                    "<li><a href=\"/jobs/{id}\">{title}</a>{location}</li>\n",
                    id = job.id,
                    title = html::escape(&job.title),
                )
            })
            .collect();
        format!("<ul>\n{items}</ul>")
    };

    let page = html::layout(
        "Jobs",
        &format!("<h1>Latest jobs</h1>\n{listing}"),
    );
    Ok(page.into_response())
}

#[instrument(skip(state, session))]
pub async fn profile(
    State(state): State<AppState>,
    session: SessionUser,
) -> Result<Response, AppError> {
    let SessionUser(claims) = session;
    let user = match User::find_by_id(&state.db, claims.sub).await? {
        Some(u) => u,
        None => {
            // Session outlived the account; drop the cookie.
            warn!(user_id = %claims.sub, "session for missing user");
            return Ok((
                [(header::SET_COOKIE, clear_cookie())],
                Redirect::to("/signin"),
            )
                .into_response());
        }
    };

    let extra = match user.role {
        Role::Employer => {
            "<p>Manage your postings on the <a href=\"/employer\">employer dashboard</a>.</p>"
                .to_string()
        }
        Role::Candidate => {
            let applications = Application::list_by_user(&state.db, user.id).await?;
            if applications.is_empty() {
                "<p>You have not applied to any jobs yet. <a href=\"/\">Browse jobs</a>.</p>"
                    .to_string()
            } else {
                let items: String = applications
                    .iter()
                    .map(|app| {
                        format!(
                            "<li><a href=\"/jobs/{job_id}\">{title}</a> ({applied})</li>\n",
                            job_id = app.job_id,
                            title = html::escape(&app.job_title),
                            applied = app.created_at.date(),
                        )
                    })
                    .collect();
                format!("<h2>Your applications</h2>\n<ul>\n{items}</ul>")
            }
        }
    };

    let page = html::layout(
        "Profile",
        &format!(
            "<h1>Profile</h1>\n\
             <p>Signed in as {email} ({role}).</p>\n\
             {extra}\n\
             <p><a href=\"/logout\">Log out</a></p>",
            email = html::escape(&user.email),
            role = user.role.as_str(),
        ),
    );
    Ok(page.into_response())
}
