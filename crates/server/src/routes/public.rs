//! Unauthenticated surface: catalog browsing and the contact form.
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use service::catalog_service;
use service::contact_service::{self, ContactInput};
use service::pagination::Pagination;

use crate::errors::ApiError;
use crate::routes::auth::ServerState;

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub per_page: Option<u32>,
}

impl PageQuery {
    fn pagination(&self) -> Pagination {
        let d = Pagination::default();
        Pagination { page: self.page.unwrap_or(d.page), per_page: self.per_page.unwrap_or(d.per_page) }
    }
}

/// Approved listings only; pending and rejected ones stay invisible here.
pub async fn list_services(
    State(state): State<ServerState>,
    Query(q): Query<PageQuery>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let services = catalog_service::list_approved(&state.db, q.pagination()).await?;
    Ok(Json(serde_json::json!({ "success": true, "services": services })))
}

pub async fn get_service(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let found = catalog_service::get_approved(&state.db, id).await?;
    Ok(Json(serde_json::json!({ "success": true, "service": found })))
}

#[utoipa::path(post, path = "/api/admin/contact", tag = "contact", request_body = crate::openapi::ContactRequest, responses((status = 201, description = "Submitted"), (status = 400, description = "Bad Request")))]
pub async fn submit_contact(
    State(state): State<ServerState>,
    Json(input): Json<ContactInput>,
) -> Result<(StatusCode, Json<serde_json::Value>), ApiError> {
    let created = contact_service::submit(&state.db, input).await?;
    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({
            "success": true,
            "message": "Thank you for contacting us!",
            "contact": created,
        })),
    ))
}
