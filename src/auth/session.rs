use std::time::Duration;

use axum::extract::FromRef;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use time::{Duration as TimeDuration, OffsetDateTime};
use tracing::debug;

use crate::auth::repo::Role;
use crate::config::SessionConfig;
use crate::state::AppState;

pub const SESSION_COOKIE: &str = "session";

/// Payload of the signed session cookie.
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionClaims {
    pub sub: i64,   // user ID
    pub role: Role, // role at signin time
    pub iat: usize, // issued at
    pub exp: usize, // expiration time
}

/// HMAC keys plus session lifetime, derived from config.
#[derive(Clone)]
pub struct SessionKeys {
    pub encoding: EncodingKey,
    pub decoding: DecodingKey,
    pub ttl: Duration,
}

impl FromRef<AppState> for SessionKeys {
    fn from_ref(state: &AppState) -> Self {
        let SessionConfig {
            secret,
            ttl_minutes,
        } = state.config.session.clone();
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl: Duration::from_secs((ttl_minutes as u64) * 60),
        }
    }
}

impl SessionKeys {
    pub fn sign(&self, user_id: i64, role: Role) -> anyhow::Result<String> {
        let now = OffsetDateTime::now_utc();
        let exp = now + TimeDuration::seconds(self.ttl.as_secs() as i64);
        let claims = SessionClaims {
            sub: user_id,
            role,
            iat: now.unix_timestamp() as usize,
            exp: exp.unix_timestamp() as usize,
        };
        let token = encode(&Header::default(), &claims, &self.encoding)?;
        debug!(user_id = %user_id, role = role.as_str(), "session signed");
        Ok(token)
    }

    pub fn verify(&self, token: &str) -> anyhow::Result<SessionClaims> {
        let data = decode::<SessionClaims>(token, &self.decoding, &Validation::default())?;
        debug!(user_id = %data.claims.sub, "session verified");
        Ok(data.claims)
    }

    /// Set-Cookie value establishing the session in the browser.
    pub fn cookie(&self, token: &str) -> String {
        format!(
            "{SESSION_COOKIE}={token}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
            self.ttl.as_secs()
        )
    }
}

/// Set-Cookie value removing the session cookie.
pub fn clear_cookie() -> String {
    format!("{SESSION_COOKIE}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
}

/// Pull a named cookie out of a Cookie request header.
pub fn cookie_from_header<'a>(header: &'a str, name: &str) -> Option<&'a str> {
    header.split(';').find_map(|pair| {
        let (k, v) = pair.trim().split_once('=')?;
        (k == name).then_some(v)
    })
}
