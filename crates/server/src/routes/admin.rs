//! Admin moderation surface: accounts, listings, and the contact inbox.
use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use models::service::ServiceStatus;
use service::account_service;
use service::catalog_service;
use service::contact_service;

use crate::errors::ApiError;
use crate::routes::auth::{ServerState, SessionUser};

#[utoipa::path(get, path = "/api/admin/getuser", tag = "admin", responses((status = 200, description = "OK"), (status = 401, description = "Unauthorized"), (status = 403, description = "Forbidden")))]
pub async fn list_users(
    State(state): State<ServerState>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let users: Vec<SessionUser> = account_service::list_users(&state.db)
        .await?
        .iter()
        .map(SessionUser::from)
        .collect();
    Ok(Json(serde_json::json!({ "success": true, "users": users })))
}

pub async fn list_vendors(
    State(state): State<ServerState>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let vendors: Vec<SessionUser> = account_service::list_vendors(&state.db)
        .await?
        .iter()
        .map(SessionUser::from)
        .collect();
    Ok(Json(serde_json::json!({ "success": true, "vendors": vendors })))
}

pub async fn delete_user(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let deleted = account_service::delete_user(&state.db, id).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "User deleted successfully",
        "user": SessionUser::from(&deleted),
    })))
}

pub async fn delete_vendor(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let deleted = account_service::delete_vendor(&state.db, id).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Vendor deleted successfully",
        "vendor": SessionUser::from(&deleted),
    })))
}

pub async fn list_services(
    State(state): State<ServerState>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let services = catalog_service::list_all(&state.db).await?;
    Ok(Json(serde_json::json!({ "success": true, "services": services })))
}

#[derive(Debug, Deserialize)]
pub struct UpdateServiceStatusInput {
    pub status: String,
}

fn parse_service_status(raw: &str) -> Result<ServiceStatus, ApiError> {
    match raw {
        "pending" => Ok(ServiceStatus::Pending),
        "approved" => Ok(ServiceStatus::Approved),
        "rejected" => Ok(ServiceStatus::Rejected),
        _ => Err(ApiError::bad_request(
            "Invalid status value. Only 'pending', 'approved' and 'rejected' are allowed.",
        )),
    }
}

#[utoipa::path(put, path = "/api/admin/services/{id}/status", tag = "admin", responses((status = 200, description = "Updated"), (status = 400, description = "Bad Request"), (status = 404, description = "Not Found")))]
pub async fn update_service_status(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    Json(input): Json<UpdateServiceStatusInput>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let status = parse_service_status(&input.status)?;
    let updated = catalog_service::set_listing_status(&state.db, id, status).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Service status updated successfully",
        "service": updated,
    })))
}

pub async fn delete_service(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    catalog_service::delete_listing_admin(&state.db, id).await?;
    Ok(Json(serde_json::json!({ "success": true, "message": "Service deleted successfully" })))
}

pub async fn list_contacts(
    State(state): State<ServerState>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let submissions = contact_service::list(&state.db).await?;
    Ok(Json(serde_json::json!({ "success": true, "submissions": submissions })))
}

pub async fn mark_contact_read(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let submission = contact_service::mark_read(&state.db, id).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Submission marked as read",
        "submission": submission,
    })))
}

pub async fn delete_contact(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    contact_service::delete(&state.db, id).await?;
    Ok(Json(serde_json::json!({ "success": true, "message": "Submission deleted successfully" })))
}
