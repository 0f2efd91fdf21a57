mod common;

use axum::http::StatusCode;

use common::*;

async fn post_job(app: &axum::Router, cookie: &str, title: &str) {
    let body = format!("title={title}&description=Build+things&location=Remote&salary=");
    let res = post_form(app, "/employer/jobs", &body, Some(cookie)).await;
    assert_redirect(&res, "/employer");
}

#[tokio::test]
async fn employer_posts_a_job_and_it_is_listed() {
    let app = test_app().await;
    let cookie = signup(&app, "boss@example.com", "password123", "employer").await;

    post_job(&app, &cookie, "Backend+engineer").await;

    let res = get(&app, "/employer", Some(&cookie)).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert!(body_text(res).await.contains("Backend engineer"));

    // The posting is public on the home page and its detail page.
    let res = get(&app, "/", None).await;
    assert!(body_text(res).await.contains("Backend engineer"));
    let res = get(&app, "/jobs/1", None).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body = body_text(res).await;
    assert!(body.contains("Build things"));
    assert!(body.contains("Remote"));
}

#[tokio::test]
async fn job_post_requires_title_and_description() {
    let app = test_app().await;
    let cookie = signup(&app, "boss@example.com", "password123", "employer").await;

    let res = post_form(
        &app,
        "/employer/jobs",
        "title=+&description=&location=&salary=",
        Some(&cookie),
    )
    .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert!(body_text(res).await.contains("required"));
}

#[tokio::test]
async fn candidate_applies_and_employer_reviews() {
    let app = test_app().await;
    let boss = signup(&app, "boss@example.com", "password123", "employer").await;
    post_job(&app, &boss, "Backend+engineer").await;

    let cand = signup(&app, "dev@example.com", "password123", "candidate").await;
    let res = post_form(
        &app,
        "/jobs/1/apply",
        "cover_letter=I+would+be+great+at+this",
        Some(&cand),
    )
    .await;
    assert_redirect(&res, "/profile");

    // Candidate sees the application on the profile page.
    let res = get(&app, "/profile", Some(&cand)).await;
    let body = body_text(res).await;
    assert!(body.contains("Your applications"));
    assert!(body.contains("Backend engineer"));

    // Employer sees the applicant and the cover letter.
    let res = get(&app, "/employer/jobs/1", Some(&boss)).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body = body_text(res).await;
    assert!(body.contains("dev@example.com"));
    assert!(body.contains("I would be great at this"));

    // Applying a second time is rejected.
    let res = post_form(&app, "/jobs/1/apply", "cover_letter=again", Some(&cand)).await;
    assert_eq!(res.status(), StatusCode::CONFLICT);
    assert!(body_text(res).await.contains("already applied"));
}

#[tokio::test]
async fn apply_is_candidate_only() {
    let app = test_app().await;
    let boss = signup(&app, "boss@example.com", "password123", "employer").await;
    post_job(&app, &boss, "Role").await;

    // Unauthenticated: sent to signin.
    let res = post_form(&app, "/jobs/1/apply", "cover_letter=", None).await;
    assert_redirect(&res, "/signin");

    // An employer session is the wrong role.
    let res = post_form(&app, "/jobs/1/apply", "cover_letter=", Some(&boss)).await;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn employers_cannot_read_each_others_applications() {
    let app = test_app().await;
    let boss = signup(&app, "boss@example.com", "password123", "employer").await;
    post_job(&app, &boss, "Role").await;

    let rival = signup(&app, "rival@example.com", "password123", "employer").await;
    let res = get(&app, "/employer/jobs/1", Some(&rival)).await;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn unknown_job_is_not_found() {
    let app = test_app().await;
    let res = get(&app, "/jobs/999", None).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let cand = signup(&app, "dev@example.com", "password123", "candidate").await;
    let res = post_form(&app, "/jobs/999/apply", "cover_letter=", Some(&cand)).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}
