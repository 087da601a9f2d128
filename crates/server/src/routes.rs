use axum::{
    middleware,
    routing::{delete, get, post, put},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use common::types::Health;

pub mod admin;
pub mod auth;
pub mod public;
pub mod user;
pub mod vendor;

use auth::ServerState;

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK")))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Build the full application router: public, user, vendor, and admin routes.
pub fn build_router(cors: CorsLayer, state: ServerState) -> Router {
    let public = Router::new()
        .route("/health", get(health))
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/logout", post(auth::logout))
        .route("/api/admin/contact", post(public::submit_contact))
        .route("/api/services", get(public::list_services))
        .route("/api/services/:id", get(public::get_service));

    // Any authenticated account
    let user_routes = Router::new()
        .route("/api/user/data", get(user::get_data))
        .route("/api/bookings", post(user::create_booking))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::require_user));

    let vendor_routes = Router::new()
        .route("/api/vendor/dashboard", get(vendor::dashboard))
        .route("/api/vendor/profile", put(vendor::update_profile))
        .route(
            "/api/vendor/services",
            get(vendor::list_services).post(vendor::create_service),
        )
        .route(
            "/api/vendor/services/:id",
            put(vendor::update_service).delete(vendor::delete_service),
        )
        .route("/api/vendor/bookings", get(vendor::list_bookings))
        .route("/api/vendor/bookings/:id", get(vendor::get_booking))
        .route("/api/vendor/bookings/:id/status", put(vendor::update_booking_status))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::require_vendor));

    // `/api/admin/users` is kept as an alias of `/api/admin/getuser` for
    // older clients; both go through the same guarded handler.
    let admin_routes = Router::new()
        .route("/api/admin/getuser", get(admin::list_users))
        .route("/api/admin/users", get(admin::list_users))
        .route("/api/admin/getvendors", get(admin::list_vendors))
        .route("/api/admin/getservices", get(admin::list_services))
        .route("/api/admin/delete/:id", delete(admin::delete_user))
        .route("/api/admin/vendor/:id", delete(admin::delete_vendor))
        .route("/api/admin/services/:id/status", put(admin::update_service_status))
        .route("/api/admin/services/:id", delete(admin::delete_service))
        .route("/api/admin/contact-submissions", get(admin::list_contacts))
        .route("/api/admin/contact-submissions/:id/read", put(admin::mark_contact_read))
        .route("/api/admin/contact-submissions/:id", delete(admin::delete_contact))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::require_admin));

    public
        .merge(user_routes)
        .merge(vendor_routes)
        .merge(admin_routes)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", crate::openapi::ApiDoc::openapi()))
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
