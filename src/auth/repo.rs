use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};
use time::OffsetDateTime;

/// Account classification gating role-specific routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum Role {
    Candidate,
    Employer,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Candidate => "candidate",
            Role::Employer => "employer",
        }
    }
}

/// User record in the database.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub password_hash: String, // argon2 PHC string, never cleartext
    pub role: Role,
    pub created_at: OffsetDateTime,
}

impl User {
    pub async fn find_by_email(db: &SqlitePool, email: &str) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, password_hash, role, created_at
            FROM users
            WHERE email = ?1
            "#,
        )
        .bind(email)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }

    pub async fn find_by_id(db: &SqlitePool, id: i64) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, password_hash, role, created_at
            FROM users
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }

    /// Insert a new user. Email uniqueness is enforced by the schema;
    /// callers map the unique violation to a form error.
    pub async fn create(
        db: &SqlitePool,
        email: &str,
        password_hash: &str,
        role: Role,
    ) -> Result<User, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (email, password_hash, role, created_at)
            VALUES (?1, ?2, ?3, ?4)
            RETURNING id, email, password_hash, role, created_at
            "#,
        )
        .bind(email)
        .bind(password_hash)
        .bind(role)
        .bind(OffsetDateTime::now_utc())
        .fetch_one(db)
        .await
    }
}

/// True when the error is the UNIQUE constraint firing, i.e. the value
/// already exists.
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_unique_violation())
}
