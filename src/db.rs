use std::str::FromStr;

use anyhow::Context;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

/// Open (and create, on first run) the SQLite database.
pub async fn connect(database_url: &str) -> anyhow::Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(database_url)
        .context("parse DATABASE_URL")?
        .create_if_missing(true)
        .foreign_keys(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await
        .context("connect to database")?;
    Ok(pool)
}

/// Create missing tables. Non-destructive; safe to run on every startup.
pub async fn init_schema(pool: &SqlitePool) -> anyhow::Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            email TEXT UNIQUE NOT NULL,
            password_hash TEXT NOT NULL,
            role TEXT NOT NULL DEFAULT 'candidate',
            created_at TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS jobs (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            employer_id INTEGER NOT NULL REFERENCES users(id),
            title TEXT NOT NULL,
            description TEXT NOT NULL,
            location TEXT,
            salary TEXT,
            created_at TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS applications (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            job_id INTEGER NOT NULL REFERENCES jobs(id),
            user_id INTEGER NOT NULL REFERENCES users(id),
            cover_letter TEXT,
            created_at TEXT NOT NULL,
            UNIQUE (job_id, user_id)
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// Support for this crate's own tests; not part of the application API.
#[doc(hidden)]
pub mod test_support {
    use std::sync::Arc;

    use sqlx::sqlite::SqlitePoolOptions;

    use crate::config::{AppConfig, SessionConfig};
    use crate::state::AppState;

    /// In-memory state for unit tests. A single connection keeps every
    /// query on the same :memory: database.
    pub async fn memory_state() -> AppState {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("in-memory sqlite");
        super::init_schema(&pool).await.expect("schema");
        let config = Arc::new(AppConfig {
            database_url: "sqlite::memory:".into(),
            session: SessionConfig {
                secret: "test-secret".into(),
                ttl_minutes: 60,
            },
        });
        AppState::from_parts(pool, config)
    }
}
