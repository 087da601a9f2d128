mod support;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::json;
use tower::Service;
use uuid::Uuid;

use models::user::Role;
use support::{build_app, cookie_for, seed_user};

fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap()
}

#[tokio::test]
async fn test_register_and_login_flow() -> anyhow::Result<()> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return Ok(());
    }
    let (mut app, _db) = build_app().await?;

    let email = format!("user_{}@example.com", Uuid::new_v4());
    let password = "S3curePass!";

    let resp = app
        .call(json_request(
            "POST",
            "/api/auth/register",
            json!({"name": "Tester", "email": email, "password": password}),
        ))
        .await?;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let resp = app
        .call(json_request(
            "POST",
            "/api/auth/login",
            json!({"email": email, "password": password}),
        ))
        .await?;
    assert_eq!(resp.status(), StatusCode::OK);
    // Must set the session cookie
    let cookie = resp.headers().get("set-cookie").and_then(|v| v.to_str().ok());
    assert!(cookie.is_some_and(|c| c.starts_with("token=")));
    Ok(())
}

#[tokio::test]
async fn test_logout_clears_session_cookie() -> anyhow::Result<()> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return Ok(());
    }
    let (mut app, _db) = build_app().await?;

    let resp = app
        .call(
            Request::builder()
                .method("POST")
                .uri("/api/auth/logout")
                .body(Body::empty())?,
        )
        .await?;
    assert_eq!(resp.status(), StatusCode::OK);
    // The removal cookie must match the Path the login cookie was set with.
    let cookie = resp
        .headers()
        .get("set-cookie")
        .and_then(|v| v.to_str().ok())
        .expect("logout must emit a set-cookie header");
    assert!(cookie.starts_with("token="));
    assert!(cookie.contains("Path=/"));
    Ok(())
}

#[tokio::test]
async fn test_login_wrong_password() -> anyhow::Result<()> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return Ok(());
    }
    let (mut app, _db) = build_app().await?;

    let email = format!("user_{}@example.com", Uuid::new_v4());
    let resp = app
        .call(json_request(
            "POST",
            "/api/auth/register",
            json!({"name": "Tester", "email": email, "password": "StrongPass123"}),
        ))
        .await?;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let resp = app
        .call(json_request(
            "POST",
            "/api/auth/login",
            json!({"email": email, "password": "wrong"}),
        ))
        .await?;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn test_register_short_password_rejected() -> anyhow::Result<()> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return Ok(());
    }
    let (mut app, _db) = build_app().await?;

    let resp = app
        .call(json_request(
            "POST",
            "/api/auth/register",
            json!({"name": "A", "email": "a@b.com", "password": "short"}),
        ))
        .await?;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn test_register_admin_role_rejected() -> anyhow::Result<()> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return Ok(());
    }
    let (mut app, _db) = build_app().await?;

    let resp = app
        .call(json_request(
            "POST",
            "/api/auth/register",
            json!({
                "name": "Mallory",
                "email": format!("m_{}@example.com", Uuid::new_v4()),
                "password": "LongEnough1",
                "role": "admin"
            }),
        ))
        .await?;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn test_guarded_endpoints_reject_missing_token() -> anyhow::Result<()> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return Ok(());
    }
    let (mut app, _db) = build_app().await?;

    for (method, uri) in [
        ("GET", "/api/user/data"),
        ("GET", "/api/vendor/dashboard"),
        ("GET", "/api/vendor/bookings"),
        ("GET", "/api/admin/getuser"),
        ("GET", "/api/admin/contact-submissions"),
    ] {
        let resp = app
            .call(Request::builder().method(method).uri(uri).body(Body::empty())?)
            .await?;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED, "{method} {uri}");
    }
    Ok(())
}

#[tokio::test]
async fn test_role_mismatch_is_forbidden() -> anyhow::Result<()> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return Ok(());
    }
    let (mut app, db) = build_app().await?;

    let customer = seed_user(&db, Role::Customer).await?;
    let cookie = cookie_for(&customer);

    let resp = app
        .call(
            Request::builder()
                .method("GET")
                .uri("/api/vendor/dashboard")
                .header("cookie", &cookie)
                .body(Body::empty())?,
        )
        .await?;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let resp = app
        .call(
            Request::builder()
                .method("GET")
                .uri("/api/admin/getuser")
                .header("cookie", &cookie)
                .body(Body::empty())?,
        )
        .await?;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    models::user::hard_delete(&db, customer.id).await?;
    Ok(())
}
