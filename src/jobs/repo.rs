use sqlx::{FromRow, SqlitePool};
use time::OffsetDateTime;

/// Job posting owned by an employer.
#[derive(Debug, Clone, FromRow)]
pub struct Job {
    pub id: i64,
    pub employer_id: i64,
    pub title: String,
    pub description: String,
    pub location: Option<String>,
    pub salary: Option<String>,
    pub created_at: OffsetDateTime,
}

/// Job row on the employer dashboard, with its applicant count.
#[derive(Debug, Clone, FromRow)]
pub struct JobWithApplicants {
    pub id: i64,
    pub title: String,
    pub applicants: i64,
    pub created_at: OffsetDateTime,
}

impl Job {
    pub async fn create(
        db: &SqlitePool,
        employer_id: i64,
        title: &str,
        description: &str,
        location: Option<&str>,
        salary: Option<&str>,
    ) -> anyhow::Result<Job> {
        let job = sqlx::query_as::<_, Job>(
            r#"
            INSERT INTO jobs (employer_id, title, description, location, salary, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            RETURNING id, employer_id, title, description, location, salary, created_at
            "#,
        )
        .bind(employer_id)
        .bind(title)
        .bind(description)
        .bind(location)
        .bind(salary)
        .bind(OffsetDateTime::now_utc())
        .fetch_one(db)
        .await?;
        Ok(job)
    }

    pub async fn find_by_id(db: &SqlitePool, id: i64) -> anyhow::Result<Option<Job>> {
        let job = sqlx::query_as::<_, Job>(
            r#"
            SELECT id, employer_id, title, description, location, salary, created_at
            FROM jobs
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await?;
        Ok(job)
    }

    pub async fn list_recent(db: &SqlitePool, limit: i64) -> anyhow::Result<Vec<Job>> {
        let rows = sqlx::query_as::<_, Job>(
            r#"
            SELECT id, employer_id, title, description, location, salary, created_at
            FROM jobs
            ORDER BY created_at DESC, id DESC
            LIMIT ?1
            "#,
        )
        .bind(limit)
        .fetch_all(db)
        .await?;
        Ok(rows)
    }

    pub async fn list_by_employer(
        db: &SqlitePool,
        employer_id: i64,
    ) -> anyhow::Result<Vec<JobWithApplicants>> {
        let rows = sqlx::query_as::<_, JobWithApplicants>(
            r#"
            SELECT j.id, j.title, COUNT(a.id) AS applicants, j.created_at
            FROM jobs j
            LEFT JOIN applications a ON a.job_id = j.id
            WHERE j.employer_id = ?1
            GROUP BY j.id
            ORDER BY j.created_at DESC, j.id DESC
            "#,
        )
        .bind(employer_id)
        .fetch_all(db)
        .await?;
        Ok(rows)
    }
}

/// Candidate application to a job.
#[derive(Debug, Clone, FromRow)]
pub struct Application {
    pub id: i64,
    pub job_id: i64,
    pub user_id: i64,
    pub cover_letter: Option<String>,
    pub created_at: OffsetDateTime,
}

/// Application listed on a candidate's profile, joined with the job title.
#[derive(Debug, Clone, FromRow)]
pub struct ApplicationWithJob {
    pub id: i64,
    pub job_id: i64,
    pub job_title: String,
    pub created_at: OffsetDateTime,
}

/// Application listed on the employer's per-job page, joined with the
/// applicant's email.
#[derive(Debug, Clone, FromRow)]
pub struct ApplicationWithApplicant {
    pub id: i64,
    pub applicant_email: String,
    pub cover_letter: Option<String>,
    pub created_at: OffsetDateTime,
}

impl Application {
    /// One application per candidate per job; the UNIQUE constraint fires
    /// on a second attempt.
    pub async fn create(
        db: &SqlitePool,
        job_id: i64,
        user_id: i64,
        cover_letter: Option<&str>,
    ) -> Result<Application, sqlx::Error> {
        sqlx::query_as::<_, Application>(
            r#"
            INSERT INTO applications (job_id, user_id, cover_letter, created_at)
            VALUES (?1, ?2, ?3, ?4)
            RETURNING id, job_id, user_id, cover_letter, created_at
            "#,
        )
        .bind(job_id)
        .bind(user_id)
        .bind(cover_letter)
        .bind(OffsetDateTime::now_utc())
        .fetch_one(db)
        .await
    }

    pub async fn list_by_user(
        db: &SqlitePool,
        user_id: i64,
    ) -> anyhow::Result<Vec<ApplicationWithJob>> {
        let rows = sqlx::query_as::<_, ApplicationWithJob>(
            r#"
            SELECT a.id, a.job_id, j.title AS job_title, a.created_at
            FROM applications a
            JOIN jobs j ON j.id = a.job_id
            WHERE a.user_id = ?1
            ORDER BY a.created_at DESC, a.id DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(db)
        .await?;
        Ok(rows)
    }

    pub async fn list_by_job(
        db: &SqlitePool,
        job_id: i64,
    ) -> anyhow::Result<Vec<ApplicationWithApplicant>> {
        let rows = sqlx::query_as::<_, ApplicationWithApplicant>(
            r#"
            SELECT a.id, u.email AS applicant_email, a.cover_letter, a.created_at
            FROM applications a
            JOIN users u ON u.id = a.user_id
            WHERE a.job_id = ?1
            ORDER BY a.created_at DESC, a.id DESC
            "#,
        )
        .bind(job_id)
        .fetch_all(db)
        .await?;
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::repo::{is_unique_violation, Role, User};
    use crate::db::test_support::memory_state;

    async fn seed_users(db: &SqlitePool) -> (User, User) {
        let employer = User::create(db, "boss@example.com", "hash", Role::Employer)
            .await
            .expect("employer");
        let candidate = User::create(db, "dev@example.com", "hash", Role::Candidate)
            .await
            .expect("candidate");
        (employer, candidate)
    }

    #[tokio::test]
    async fn create_and_list_jobs() {
        let state = memory_state().await;
        let (employer, _) = seed_users(&state.db).await;

        let job = Job::create(
            &state.db,
            employer.id,
            "Backend engineer",
            "Build the backend.",
            Some("Remote"),
            None,
        )
        .await
        .expect("create job");
        assert_eq!(job.employer_id, employer.id);
        assert_eq!(job.location.as_deref(), Some("Remote"));
        assert!(job.salary.is_none());

        let recent = Job::list_recent(&state.db, 10).await.expect("list");
        assert_eq!(recent.len(), 1);
        assert_eq!(recent[0].title, "Backend engineer");

        let found = Job::find_by_id(&state.db, job.id)
            .await
            .expect("query")
            .expect("present");
        assert_eq!(found.description, "Build the backend.");
        assert!(Job::find_by_id(&state.db, job.id + 100)
            .await
            .expect("query")
            .is_none());
    }

    #[tokio::test]
    async fn dashboard_counts_applicants() {
        let state = memory_state().await;
        let (employer, candidate) = seed_users(&state.db).await;
        let job = Job::create(&state.db, employer.id, "Role A", "Desc", None, None)
            .await
            .expect("job");
        let empty = Job::create(&state.db, employer.id, "Role B", "Desc", None, None)
            .await
            .expect("job");

        Application::create(&state.db, job.id, candidate.id, Some("Hi"))
            .await
            .expect("apply");

        let rows = Job::list_by_employer(&state.db, employer.id)
            .await
            .expect("dashboard");
        assert_eq!(rows.len(), 2);
        let by_id = |id| rows.iter().find(|r| r.id == id).expect("row");
        assert_eq!(by_id(job.id).applicants, 1);
        assert_eq!(by_id(empty.id).applicants, 0);
    }

    #[tokio::test]
    async fn duplicate_application_rejected() {
        let state = memory_state().await;
        let (employer, candidate) = seed_users(&state.db).await;
        let job = Job::create(&state.db, employer.id, "Role", "Desc", None, None)
            .await
            .expect("job");

        Application::create(&state.db, job.id, candidate.id, None)
            .await
            .expect("first apply");
        let err = Application::create(&state.db, job.id, candidate.id, None)
            .await
            .unwrap_err();
        assert!(is_unique_violation(&err));
    }

    #[tokio::test]
    async fn application_joins() {
        let state = memory_state().await;
        let (employer, candidate) = seed_users(&state.db).await;
        let job = Job::create(&state.db, employer.id, "Role", "Desc", None, None)
            .await
            .expect("job");
        Application::create(&state.db, job.id, candidate.id, Some("Cover"))
            .await
            .expect("apply");

        let mine = Application::list_by_user(&state.db, candidate.id)
            .await
            .expect("by user");
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].job_title, "Role");

        let theirs = Application::list_by_job(&state.db, job.id)
            .await
            .expect("by job");
        assert_eq!(theirs.len(), 1);
        assert_eq!(theirs[0].applicant_email, "dev@example.com");
        assert_eq!(theirs[0].cover_letter.as_deref(), Some("Cover"));
    }
}
