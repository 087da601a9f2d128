mod support;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use serde_json::{json, Value};
use tower::Service;
use uuid::Uuid;

use models::user::Role;
use support::{build_app, cookie_for, seed_user};

fn request(method: &str, uri: &str, cookie: &str, body: Option<Value>) -> Request<Body> {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("cookie", cookie);
    match body {
        Some(v) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&v).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn json_body(resp: axum::response::Response) -> anyhow::Result<Value> {
    let bytes = to_bytes(resp.into_body(), usize::MAX).await?;
    Ok(serde_json::from_slice(&bytes)?)
}

fn listing_payload() -> Value {
    json!({
        "title": "Premium Wedding Photography",
        "description": "Full day coverage with two photographers",
        "category": "Photography",
        "location": "Colombo",
        "price_type": "starting",
        "base_price": 85000,
        "price_unit": "event",
        "comes_with": ["Albums", "Drone shots"],
        "extra_services": [
            {"name": "Pre-shoot", "description": "Outdoor session", "price": 25000},
            {"name": "Same-day edit", "price": 40000}
        ]
    })
}

#[tokio::test]
async fn test_booking_lifecycle() -> anyhow::Result<()> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return Ok(());
    }
    let (mut app, db) = build_app().await?;

    let vendor = seed_user(&db, Role::Vendor).await?;
    let admin = seed_user(&db, Role::Admin).await?;
    let customer = seed_user(&db, Role::Customer).await?;
    let vendor_cookie = cookie_for(&vendor);
    let admin_cookie = cookie_for(&admin);
    let customer_cookie = cookie_for(&customer);

    // Vendor creates a listing; it starts out pending.
    let resp = app
        .call(request("POST", "/api/vendor/services", &vendor_cookie, Some(listing_payload())))
        .await?;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body = json_body(resp).await?;
    let listing = &body["service"];
    assert_eq!(listing["status"], "pending");
    assert_eq!(listing["comes_with"], json!(["Albums", "Drone shots"]));
    let service_id = listing["id"].as_str().unwrap().to_string();

    // Pending listings are invisible to the public catalog.
    let resp = app
        .call(
            Request::builder()
                .uri(format!("/api/services/{service_id}"))
                .body(Body::empty())?,
        )
        .await?;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    // Admin approves it.
    let resp = app
        .call(request(
            "PUT",
            &format!("/api/admin/services/{service_id}/status"),
            &admin_cookie,
            Some(json!({"status": "approved"})),
        ))
        .await?;
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = app
        .call(
            Request::builder()
                .uri(format!("/api/services/{service_id}"))
                .body(Body::empty())?,
        )
        .await?;
    assert_eq!(resp.status(), StatusCode::OK);

    // Customer books the listing with one extra service.
    let resp = app
        .call(request(
            "POST",
            "/api/bookings",
            &customer_cookie,
            Some(json!({
                "service_id": service_id,
                "name": "Nimal Perera",
                "email": "nimal@example.com",
                "phone": "0771234567",
                "location": "Kandy",
                "event_date": "2026-12-20T10:00:00Z",
                "event_type": "Wedding",
                "guest_count": 150,
                "extra_service_names": ["Pre-shoot"]
            })),
        ))
        .await?;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body = json_body(resp).await?;
    let booking = &body["booking"];
    assert_eq!(booking["status"], "pending");
    assert_eq!(booking["payment_status"], "pending");
    // Snapshot total: base 85000 + pre-shoot 25000.
    assert_eq!(booking["total_price"], 110000);
    let booking_id = booking["id"].as_str().unwrap().to_string();

    // Vendor confirms.
    let resp = app
        .call(request(
            "PUT",
            &format!("/api/vendor/bookings/{booking_id}/status"),
            &vendor_cookie,
            Some(json!({"status": "confirmed"})),
        ))
        .await?;
    assert_eq!(resp.status(), StatusCode::OK);

    // A listing with an active booking cannot be deleted.
    let resp = app
        .call(request(
            "DELETE",
            &format!("/api/vendor/services/{service_id}"),
            &vendor_cookie,
            None,
        ))
        .await?;
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    // Completing stamps completed_at.
    let resp = app
        .call(request(
            "PUT",
            &format!("/api/vendor/bookings/{booking_id}/status"),
            &vendor_cookie,
            Some(json!({"status": "completed"})),
        ))
        .await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = json_body(resp).await?;
    assert!(body["booking"]["completed_at"].is_string());

    // Terminal states have no successors.
    let resp = app
        .call(request(
            "PUT",
            &format!("/api/vendor/bookings/{booking_id}/status"),
            &vendor_cookie,
            Some(json!({"status": "cancelled"})),
        ))
        .await?;
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    // With the booking settled, deletion goes through.
    let resp = app
        .call(request(
            "DELETE",
            &format!("/api/vendor/services/{service_id}"),
            &vendor_cookie,
            None,
        ))
        .await?;
    assert_eq!(resp.status(), StatusCode::OK);

    for u in [&vendor, &admin, &customer] {
        models::user::hard_delete(&db, u.id).await?;
    }
    Ok(())
}

#[tokio::test]
async fn test_foreign_vendor_bookings_read_as_missing() -> anyhow::Result<()> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return Ok(());
    }
    let (mut app, db) = build_app().await?;

    let vendor = seed_user(&db, Role::Vendor).await?;
    let other_vendor = seed_user(&db, Role::Vendor).await?;
    let admin = seed_user(&db, Role::Admin).await?;
    let customer = seed_user(&db, Role::Customer).await?;
    let vendor_cookie = cookie_for(&vendor);
    let other_cookie = cookie_for(&other_vendor);

    let resp = app
        .call(request("POST", "/api/vendor/services", &vendor_cookie, Some(listing_payload())))
        .await?;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body = json_body(resp).await?;
    let service_id = body["service"]["id"].as_str().unwrap().to_string();

    let resp = app
        .call(request(
            "PUT",
            &format!("/api/admin/services/{service_id}/status"),
            &cookie_for(&admin),
            Some(json!({"status": "approved"})),
        ))
        .await?;
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = app
        .call(request(
            "POST",
            "/api/bookings",
            &cookie_for(&customer),
            Some(json!({
                "service_id": service_id,
                "name": "Ayesha Fernando",
                "email": "ayesha@example.com",
                "phone": "0719876543",
                "location": "Galle",
                "event_date": "2027-01-15T09:00:00Z"
            })),
        ))
        .await?;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body = json_body(resp).await?;
    let booking_id = body["booking"]["id"].as_str().unwrap().to_string();

    // Another vendor can neither see the booking nor move its status.
    let resp = app
        .call(request(
            "GET",
            &format!("/api/vendor/bookings/{booking_id}"),
            &other_cookie,
            None,
        ))
        .await?;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = app
        .call(request(
            "PUT",
            &format!("/api/vendor/bookings/{booking_id}/status"),
            &other_cookie,
            Some(json!({"status": "confirmed"})),
        ))
        .await?;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    // The owning vendor still sees it untouched.
    let resp = app
        .call(request(
            "GET",
            &format!("/api/vendor/bookings/{booking_id}"),
            &vendor_cookie,
            None,
        ))
        .await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = json_body(resp).await?;
    assert_eq!(body["booking"]["status"], "pending");

    for u in [&vendor, &other_vendor, &admin, &customer] {
        models::user::hard_delete(&db, u.id).await?;
    }
    Ok(())
}

#[tokio::test]
async fn test_create_service_rejects_oversized_comes_with() -> anyhow::Result<()> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return Ok(());
    }
    let (mut app, db) = build_app().await?;

    let vendor = seed_user(&db, Role::Vendor).await?;
    let mut payload = listing_payload();
    payload["comes_with"] = json!((0..11).map(|i| format!("Item {i}")).collect::<Vec<_>>());

    let resp = app
        .call(request("POST", "/api/vendor/services", &cookie_for(&vendor), Some(payload)))
        .await?;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    models::user::hard_delete(&db, vendor.id).await?;
    Ok(())
}

#[tokio::test]
async fn test_invalid_status_value_is_bad_request() -> anyhow::Result<()> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return Ok(());
    }
    let (mut app, db) = build_app().await?;

    let admin = seed_user(&db, Role::Admin).await?;
    let resp = app
        .call(request(
            "PUT",
            &format!("/api/admin/services/{}/status", Uuid::new_v4()),
            &cookie_for(&admin),
            Some(json!({"status": "archived"})),
        ))
        .await?;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    models::user::hard_delete(&db, admin.id).await?;
    Ok(())
}

#[tokio::test]
async fn test_admin_cannot_delete_admin() -> anyhow::Result<()> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return Ok(());
    }
    let (mut app, db) = build_app().await?;

    let admin = seed_user(&db, Role::Admin).await?;
    let other_admin = seed_user(&db, Role::Admin).await?;

    let resp = app
        .call(request(
            "DELETE",
            &format!("/api/admin/delete/{}", other_admin.id),
            &cookie_for(&admin),
            None,
        ))
        .await?;
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    for u in [&admin, &other_admin] {
        models::user::hard_delete(&db, u.id).await?;
    }
    Ok(())
}

#[tokio::test]
async fn test_delete_vendor_rejects_non_vendor() -> anyhow::Result<()> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return Ok(());
    }
    let (mut app, db) = build_app().await?;

    let admin = seed_user(&db, Role::Admin).await?;
    let customer = seed_user(&db, Role::Customer).await?;

    let resp = app
        .call(request(
            "DELETE",
            &format!("/api/admin/vendor/{}", customer.id),
            &cookie_for(&admin),
            None,
        ))
        .await?;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    for u in [&admin, &customer] {
        models::user::hard_delete(&db, u.id).await?;
    }
    Ok(())
}
