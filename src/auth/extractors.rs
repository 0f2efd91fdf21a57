use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::{header, request::Parts, StatusCode},
    response::{IntoResponse, Redirect, Response},
};
use tracing::warn;

use crate::auth::repo::Role;
use crate::auth::session::{cookie_from_header, SessionClaims, SessionKeys, SESSION_COOKIE};
use crate::pages::html;

/// Why a guard refused the request.
pub enum AuthRejection {
    /// No usable session; the browser is sent to the signin form.
    SignedOut,
    /// Valid session, wrong role for this route.
    Forbidden,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        match self {
            AuthRejection::SignedOut => Redirect::to("/signin").into_response(),
            AuthRejection::Forbidden => {
                let page = html::layout(
                    "Forbidden",
                    "<h1>Forbidden</h1><p>Your account does not have access to this page.</p>",
                );
                (StatusCode::FORBIDDEN, page).into_response()
            }
        }
    }
}

/// Resolves the session cookie to claims. Any signed-in user passes.
pub struct SessionUser(pub SessionClaims);

#[async_trait]
impl<S> FromRequestParts<S> for SessionUser
where
    S: Send + Sync,
    SessionKeys: FromRef<S>,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let keys = SessionKeys::from_ref(state);
        let token = parts
            .headers
            .get(header::COOKIE)
            .and_then(|v| v.to_str().ok())
            .and_then(|h| cookie_from_header(h, SESSION_COOKIE))
            .ok_or(AuthRejection::SignedOut)?;

        match keys.verify(token) {
            Ok(claims) => Ok(SessionUser(claims)),
            Err(_) => {
                warn!("invalid or expired session cookie");
                Err(AuthRejection::SignedOut)
            }
        }
    }
}

async fn require_role<S>(parts: &mut Parts, state: &S, role: Role) -> Result<SessionClaims, AuthRejection>
where
    S: Send + Sync,
    SessionKeys: FromRef<S>,
{
    let SessionUser(claims) = SessionUser::from_request_parts(parts, state).await?;
    if claims.role != role {
        warn!(user_id = %claims.sub, have = claims.role.as_str(), need = role.as_str(), "role check failed");
        return Err(AuthRejection::Forbidden);
    }
    Ok(claims)
}

/// Guard for employer-only routes.
pub struct EmployerUser(pub SessionClaims);

#[async_trait]
impl<S> FromRequestParts<S> for EmployerUser
where
    S: Send + Sync,
    SessionKeys: FromRef<S>,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        Ok(EmployerUser(require_role(parts, state, Role::Employer).await?))
    }
}

/// Guard for candidate-only routes.
pub struct CandidateUser(pub SessionClaims);

#[async_trait]
impl<S> FromRequestParts<S> for CandidateUser
where
    S: Send + Sync,
    SessionKeys: FromRef<S>,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        Ok(CandidateUser(require_role(parts, state, Role::Candidate).await?))
    }
}
