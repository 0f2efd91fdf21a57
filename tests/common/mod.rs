use axum::body::Body;
use axum::http::{header, Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use jobboard::app::build_app;
use jobboard::db::test_support::memory_state;

/// Router over a fresh in-memory database.
pub async fn test_app() -> Router {
    build_app(memory_state().await)
}

pub async fn get(app: &Router, uri: &str, cookie: Option<&str>) -> Response<Body> {
    let mut req = Request::builder().uri(uri);
    if let Some(cookie) = cookie {
        req = req.header(header::COOKIE, cookie);
    }
    app.clone()
        .oneshot(req.body(Body::empty()).expect("request"))
        .await
        .expect("response")
}

pub async fn post_form(
    app: &Router,
    uri: &str,
    body: &str,
    cookie: Option<&str>,
) -> Response<Body> {
    let mut req = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(cookie) = cookie {
        req = req.header(header::COOKIE, cookie);
    }
    app.clone()
        .oneshot(req.body(Body::from(body.to_string())).expect("request"))
        .await
        .expect("response")
}

/// What a browser would keep from the response's Set-Cookie: the session
/// pair, or None when the cookie was cleared (Max-Age=0) or absent.
pub fn session_cookie(res: &Response<Body>) -> Option<String> {
    let set_cookie = res.headers().get(header::SET_COOKIE)?.to_str().ok()?;
    if set_cookie.contains("Max-Age=0") {
        return None;
    }
    let pair = set_cookie.split(';').next()?.trim();
    pair.starts_with("session=").then(|| pair.to_string())
}

pub async fn body_text(res: Response<Body>) -> String {
    let bytes = res
        .into_body()
        .collect()
        .await
        .expect("collect body")
        .to_bytes();
    String::from_utf8(bytes.to_vec()).expect("utf-8 body")
}

pub fn assert_redirect(res: &Response<Body>, location: &str) {
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        res.headers()
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok()),
        Some(location)
    );
}

/// Signup through the real handler and hand back the browser's cookie.
pub async fn signup(app: &Router, email: &str, password: &str, role: &str) -> String {
    let body = format!(
        "email={}&password={password}&role={role}",
        email.replace('@', "%40")
    );
    let res = post_form(app, "/signup", &body, None).await;
    assert_redirect(&res, "/profile");
    session_cookie(&res).expect("session cookie set on signup")
}
