use axum::{
    extract::{FromRef, State},
    http::{header, StatusCode},
    response::{IntoResponse, Redirect, Response},
    Form,
};
use lazy_static::lazy_static;
use regex::Regex;
use tracing::{info, instrument, warn};

use crate::auth::dto::{SigninForm, SignupForm};
use crate::auth::password::{hash_password, verify_password};
use crate::auth::repo::{is_unique_violation, User};
use crate::auth::session::{clear_cookie, SessionKeys};
use crate::error::AppError;
use crate::pages::html;
use crate::state::AppState;

fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

fn signup_page(error: Option<&str>, email: &str) -> axum::response::Html<String> {
    let error = error.map(html::form_error).unwrap_or_default();
    html::layout(
        "Sign up",
        &format!(
            "<h1>Sign up</h1>\n{error}\
             <form method=\"post\" action=\"/signup\">\n\
             <label>Email <input type=\"email\" name=\"email\" value=\"{email}\" required></label><br>\n\
             <label>Password <input type=\"password\" name=\"password\" required></label><br>\n\
             <label>I am a <select name=\"role\">\
             <option value=\"candidate\">Candidate</option>\
             <option value=\"employer\">Employer</option>\
             </select></label><br>\n\
             <button type=\"submit\">Create account</button>\n\
             </form>\n\
             <p>Already registered? <a href=\"/signin\">Sign in</a>.</p>",
            email = html::escape(email),
        ),
    )
}

fn signin_page(error: Option<&str>, email: &str) -> axum::response::Html<String> {
    let error = error.map(html::form_error).unwrap_or_default();
    html::layout(
        "Sign in",
        &format!(
            "<h1>Sign in</h1>\n{error}\
             <form method=\"post\" action=\"/signin\">\n\
             <label>Email <input type=\"email\" name=\"email\" value=\"{email}\" required></label><br>\n\
             <label>Password <input type=\"password\" name=\"password\" required></label><br>\n\
             <button type=\"submit\">Sign in</button>\n\
             </form>\n\
             <p>New here? <a href=\"/signup\">Sign up</a>.</p>",
            email = html::escape(email),
        ),
    )
}

pub async fn get_signup() -> impl IntoResponse {
    signup_page(None, "")
}

pub async fn get_signin() -> impl IntoResponse {
    signin_page(None, "")
}

/// Sign the session and answer with cookie + redirect to the profile.
fn signed_in_response(state: &AppState, user: &User) -> Result<Response, AppError> {
    let keys = SessionKeys::from_ref(state);
    let token = keys.sign(user.id, user.role)?;
    Ok((
        [(header::SET_COOKIE, keys.cookie(&token))],
        Redirect::to("/profile"),
    )
        .into_response())
}

#[instrument(skip(state, form))]
pub async fn post_signup(
    State(state): State<AppState>,
    Form(mut form): Form<SignupForm>,
) -> Result<Response, AppError> {
    form.email = form.email.trim().to_lowercase();

    if !is_valid_email(&form.email) {
        warn!(email = %form.email, "signup invalid email");
        let page = signup_page(Some("Please enter a valid email address."), &form.email);
        return Ok((StatusCode::BAD_REQUEST, page).into_response());
    }
    if form.password.len() < 8 {
        warn!("signup password too short");
        let page = signup_page(
            Some("Password must be at least 8 characters."),
            &form.email,
        );
        return Ok((StatusCode::BAD_REQUEST, page).into_response());
    }

    let hash = hash_password(&form.password)?;
    let user = match User::create(&state.db, &form.email, &hash, form.role).await {
        Ok(u) => u,
        Err(e) if is_unique_violation(&e) => {
            warn!(email = %form.email, "signup email already registered");
            let page = signup_page(Some("That email is already registered."), &form.email);
            return Ok((StatusCode::CONFLICT, page).into_response());
        }
        Err(e) => return Err(e.into()),
    };

    info!(user_id = %user.id, email = %user.email, role = user.role.as_str(), "user registered");
    signed_in_response(&state, &user)
}

#[instrument(skip(state, form))]
pub async fn post_signin(
    State(state): State<AppState>,
    Form(mut form): Form<SigninForm>,
) -> Result<Response, AppError> {
    form.email = form.email.trim().to_lowercase();

    // Unknown email and wrong password answer identically, and the
    // missing-user path still does hashing work.
    let invalid = || {
        let page = signin_page(Some("Invalid email or password."), &form.email);
        Ok((StatusCode::UNAUTHORIZED, page).into_response())
    };

    let user = match User::find_by_email(&state.db, &form.email).await? {
        Some(u) => u,
        None => {
            let _ = hash_password(&form.password);
            warn!(email = %form.email, "signin unknown email");
            return invalid();
        }
    };

    if !verify_password(&form.password, &user.password_hash)? {
        warn!(email = %form.email, user_id = %user.id, "signin invalid password");
        return invalid();
    }

    info!(user_id = %user.id, email = %user.email, "user signed in");
    signed_in_response(&state, &user)
}

#[instrument]
pub async fn logout() -> impl IntoResponse {
    info!("user signed out");
    (
        [(header::SET_COOKIE, clear_cookie())],
        Redirect::to("/signin"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_validation() {
        assert!(is_valid_email("user@example.com"));
        assert!(is_valid_email("a+b@sub.domain.org"));
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("spaces in@example.com"));
        assert!(!is_valid_email("user@nodot"));
    }
}
