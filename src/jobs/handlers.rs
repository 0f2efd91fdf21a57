use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    Form,
};
use tracing::{info, instrument, warn};

use crate::auth::extractors::{AuthRejection, CandidateUser, EmployerUser, SessionUser};
use crate::auth::repo::Role;
use crate::error::AppError;
use crate::jobs::dto::{blank_to_none, ApplyForm, NewJobForm};
use crate::jobs::repo::{Application, Job};
use crate::pages::html;
use crate::state::AppState;

fn job_not_found() -> Response {
    let page = html::layout(
        "Job not found",
        "<h1>Job not found</h1><p>This posting does not exist or was removed.</p>",
    );
    (StatusCode::NOT_FOUND, page).into_response()
}

#[instrument(skip(state, session))]
pub async fn employer_dashboard(
    State(state): State<AppState>,
    session: EmployerUser,
) -> Result<Response, AppError> {
    let EmployerUser(claims) = session;
    let jobs = Job::list_by_employer(&state.db, claims.sub).await?;

    let mut rows = String::new();
    for job in &jobs {
        rows.push_str(&format!(
            "<tr><td><a href=\"/employer/jobs/{id}\">{title}</a></td>\
             <td>{applicants}</td><td>{posted}</td></tr>\n",
            id = job.id,
            title = html::escape(&job.title),
            applicants = job.applicants,
            posted = job.created_at.date(),
        ));
    }
    let listing = if jobs.is_empty() {
        "<p>You have not posted any jobs yet.</p>".to_string()
    } else {
        format!(
            "<table>\n<tr><th>Job</th><th>Applicants</th><th>Posted</th></tr>\n{rows}</table>"
        )
    };

    let page = html::layout(
        "Employer dashboard",
        &format!(
            "<h1>Your jobs</h1>\n{listing}\n\
             <h2>Post a job</h2>\n\
             <form method=\"post\" action=\"/employer/jobs\">\n\
             <label>Title <input name=\"title\" required></label><br>\n\
             <label>Description <textarea name=\"description\" required></textarea></label><br>\n\
             <label>Location <input name=\"location\"></label><br>\n\
             <label>Salary <input name=\"salary\"></label><br>\n\
             <button type=\"submit\">Post</button>\n\
             </form>"
        ),
    );
    Ok(page.into_response())
}

#[instrument(skip(state, session, form))]
pub async fn post_job(
    State(state): State<AppState>,
    session: EmployerUser,
    Form(form): Form<NewJobForm>,
) -> Result<Response, AppError> {
    let EmployerUser(claims) = session;
    let title = form.title.trim();
    let description = form.description.trim();

    if title.is_empty() || description.is_empty() {
        warn!(user_id = %claims.sub, "job post missing title or description");
        let page = html::layout(
            "Post a job",
            &format!(
                "{}<p><a href=\"/employer\">Back to dashboard</a></p>",
                html::form_error("Title and description are required.")
            ),
        );
        return Ok((StatusCode::BAD_REQUEST, page).into_response());
    }

    let job = Job::create(
        &state.db,
        claims.sub,
        title,
        description,
        blank_to_none(&form.location),
        blank_to_none(&form.salary),
    )
    .await?;

    info!(job_id = %job.id, employer_id = %claims.sub, "job posted");
    Ok(Redirect::to("/employer").into_response())
}

#[instrument(skip(state, session))]
pub async fn job_applications(
    State(state): State<AppState>,
    session: EmployerUser,
    Path(job_id): Path<i64>,
) -> Result<Response, AppError> {
    let EmployerUser(claims) = session;
    let job = match Job::find_by_id(&state.db, job_id).await? {
        Some(j) => j,
        None => return Ok(job_not_found()),
    };
    // Employers only ever see applications to their own postings.
    if job.employer_id != claims.sub {
        warn!(job_id = %job.id, user_id = %claims.sub, "application list for another employer's job");
        return Ok(AuthRejection::Forbidden.into_response());
    }

    let applications = Application::list_by_job(&state.db, job.id).await?;
    let mut items = String::new();
    for app in &applications {
        let cover = app
            .cover_letter
            .as_deref()
            .filter(|c| !c.is_empty())
            .map(|c| format!("<blockquote>{}</blockquote>", html::escape(c)))
            .unwrap_or_default();
        items.push_str(&format!(
            "<li>{email} ({applied}){cover}</li>\n",
            email = html::escape(&app.applicant_email),
            applied = app.created_at.date(),
        ));
    }
    let listing = if applications.is_empty() {
        "<p>No applications yet.</p>".to_string()
    } else {
        format!("<ul>\n{items}</ul>")
    };

    let page = html::layout(
        &format!("Applications for {}", job.title),
        &format!(
            "<h1>Applications for {title}</h1>\n{listing}\n\
             <p><a href=\"/employer\">Back to dashboard</a></p>",
            title = html::escape(&job.title),
        ),
    );
    Ok(page.into_response())
}

#[instrument(skip(state, session))]
pub async fn job_detail(
    State(state): State<AppState>,
    session: Option<SessionUser>,
    Path(job_id): Path<i64>,
) -> Result<Response, AppError> {
    let job = match Job::find_by_id(&state.db, job_id).await? {
        Some(j) => j,
        None => return Ok(job_not_found()),
    };

    let apply = match session {
        Some(SessionUser(claims)) if claims.role == Role::Candidate => format!(
            "<h2>Apply</h2>\n\
             <form method=\"post\" action=\"/jobs/{id}/apply\">\n\
             <label>Cover letter <textarea name=\"cover_letter\"></textarea></label><br>\n\
             <button type=\"submit\">Apply</button>\n\
             </form>",
            id = job.id
        ),
        Some(_) => String::new(),
        None => "<p><a href=\"/signin\">Sign in</a> as a candidate to apply.</p>".to_string(),
    };

    let meta = [
        job.location.as_deref().map(|l| format!("Location: {}", html::escape(l))),
        job.salary.as_deref().map(|s| format!("Salary: {}", html::escape(s))),
    ]
    .into_iter()
    .flatten()
    .map(|line| format!("<p>{line}</p>\n"))
    .collect::<String>();

    let page = html::layout(
        &job.title,
        &format!(
            "<h1>{title}</h1>\n{meta}<p>{description}</p>\n{apply}",
            title = html::escape(&job.title),
            description = html::escape(&job.description),
        ),
    );
    Ok(page.into_response())
}

#[instrument(skip(state, session, form))]
pub async fn apply(
    State(state): State<AppState>,
    session: CandidateUser,
    Path(job_id): Path<i64>,
    Form(form): Form<ApplyForm>,
) -> Result<Response, AppError> {
    let CandidateUser(claims) = session;
    let job = match Job::find_by_id(&state.db, job_id).await? {
        Some(j) => j,
        None => return Ok(job_not_found()),
    };

    match Application::create(&state.db, job.id, claims.sub, blank_to_none(&form.cover_letter))
        .await
    {
        Ok(app) => {
            info!(application_id = %app.id, job_id = %job.id, user_id = %claims.sub, "application submitted");
            Ok(Redirect::to("/profile").into_response())
        }
        Err(e) if crate::auth::repo::is_unique_violation(&e) => {
            warn!(job_id = %job.id, user_id = %claims.sub, "duplicate application");
            let page = html::layout(
                &job.title,
                &format!(
                    "{}<p><a href=\"/jobs/{}\">Back to the job</a></p>",
                    html::form_error("You have already applied to this job."),
                    job.id
                ),
            );
            Ok((StatusCode::CONFLICT, page).into_response())
        }
        Err(e) => Err(e.into()),
    }
}
