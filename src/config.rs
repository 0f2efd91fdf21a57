use serde::Deserialize;
use tracing::warn;

/// Fallback used when SESSION_SECRET is unset. Fine for local development,
/// useless for anything exposed to a network.
pub const INSECURE_DEFAULT_SECRET: &str = "insecure-dev-secret-change-me";

#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    pub secret: String,
    pub ttl_minutes: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub session: SessionConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url =
            std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite:jobboard.db".into());
        let secret = match std::env::var("SESSION_SECRET") {
            Ok(s) if !s.is_empty() => s,
            _ => {
                warn!("SESSION_SECRET not set, using insecure default");
                INSECURE_DEFAULT_SECRET.into()
            }
        };
        let session = SessionConfig {
            secret,
            ttl_minutes: std::env::var("SESSION_TTL_MINUTES")
                .ok()
                .and_then(|v| v.parse::<i64>().ok())
                .unwrap_or(60 * 24 * 7),
        };
        Ok(Self {
            database_url,
            session,
        })
    }
}
