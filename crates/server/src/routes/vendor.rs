//! Vendor surface: profile, listing authoring, and the booking lifecycle.
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use serde::Deserialize;
use uuid::Uuid;

use models::booking::BookingStatus;
use service::booking_service;
use service::catalog_service::{self, CreateListingInput, UpdateListingInput};
use service::account_service;

use crate::errors::ApiError;
use crate::routes::auth::{CurrentUser, ServerState, SessionUser};

pub async fn dashboard(
    Extension(CurrentUser(vendor)): Extension<CurrentUser>,
) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "success": true,
        "message": "Vendor dashboard data fetched successfully",
        "vendor": SessionUser::from(&vendor),
        "member_since": vendor.created_at,
    }))
}

#[derive(Debug, Deserialize)]
pub struct UpdateProfileInput {
    pub name: String,
}

pub async fn update_profile(
    State(state): State<ServerState>,
    Extension(CurrentUser(vendor)): Extension<CurrentUser>,
    Json(input): Json<UpdateProfileInput>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let updated = account_service::update_profile_name(&state.db, vendor.id, &input.name).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Vendor profile updated successfully",
        "vendor": SessionUser::from(&updated),
    })))
}

pub async fn list_services(
    State(state): State<ServerState>,
    Extension(CurrentUser(vendor)): Extension<CurrentUser>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let services = catalog_service::list_for_vendor(&state.db, vendor.id).await?;
    Ok(Json(serde_json::json!({ "success": true, "services": services })))
}

#[utoipa::path(post, path = "/api/vendor/services", tag = "vendor", responses((status = 201, description = "Created"), (status = 400, description = "Bad Request"), (status = 401, description = "Unauthorized"), (status = 403, description = "Forbidden")))]
pub async fn create_service(
    State(state): State<ServerState>,
    Extension(CurrentUser(vendor)): Extension<CurrentUser>,
    Json(input): Json<CreateListingInput>,
) -> Result<(StatusCode, Json<serde_json::Value>), ApiError> {
    let created = catalog_service::create_listing(&state.db, vendor.id, input).await?;
    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({ "success": true, "service": created })),
    ))
}

pub async fn update_service(
    State(state): State<ServerState>,
    Extension(CurrentUser(vendor)): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
    Json(input): Json<UpdateListingInput>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let updated = catalog_service::update_listing(&state.db, vendor.id, id, input).await?;
    Ok(Json(serde_json::json!({ "success": true, "service": updated })))
}

pub async fn delete_service(
    State(state): State<ServerState>,
    Extension(CurrentUser(vendor)): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    catalog_service::delete_listing_for_vendor(&state.db, vendor.id, id).await?;
    Ok(Json(serde_json::json!({ "success": true, "message": "Service deleted successfully" })))
}

pub async fn list_bookings(
    State(state): State<ServerState>,
    Extension(CurrentUser(vendor)): Extension<CurrentUser>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let bookings = booking_service::list_for_vendor(&state.db, vendor.id).await?;
    Ok(Json(serde_json::json!({ "success": true, "bookings": bookings })))
}

pub async fn get_booking(
    State(state): State<ServerState>,
    Extension(CurrentUser(vendor)): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let booking = booking_service::get_for_vendor(&state.db, vendor.id, id).await?;
    Ok(Json(serde_json::json!({ "success": true, "booking": booking })))
}

#[derive(Debug, Deserialize)]
pub struct UpdateBookingStatusInput {
    pub status: String,
}

fn parse_booking_status(raw: &str) -> Result<BookingStatus, ApiError> {
    match raw {
        "pending" => Ok(BookingStatus::Pending),
        "confirmed" => Ok(BookingStatus::Confirmed),
        "completed" => Ok(BookingStatus::Completed),
        "cancelled" => Ok(BookingStatus::Cancelled),
        other => Err(ApiError::bad_request(format!("Invalid status value: '{other}'"))),
    }
}

#[utoipa::path(put, path = "/api/vendor/bookings/{id}/status", tag = "vendor", responses((status = 200, description = "Updated"), (status = 400, description = "Bad Request"), (status = 404, description = "Not Found"), (status = 409, description = "Invalid transition")))]
pub async fn update_booking_status(
    State(state): State<ServerState>,
    Extension(CurrentUser(vendor)): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
    Json(input): Json<UpdateBookingStatusInput>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let target = parse_booking_status(&input.status)?;
    let updated = booking_service::transition_booking(&state.db, vendor.id, id, target).await?;
    Ok(Json(serde_json::json!({ "success": true, "booking": updated })))
}
