//! Endpoints available to any authenticated account.
use axum::extract::State;
use axum::http::StatusCode;
use axum::{Extension, Json};

use service::booking_service::{self, CreateBookingInput};

use crate::errors::ApiError;
use crate::routes::auth::{CurrentUser, ServerState, SessionUser};

pub async fn get_data(
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Json<serde_json::Value> {
    Json(serde_json::json!({ "success": true, "user": SessionUser::from(&user) }))
}

/// Customer booking action; the acting user comes from the session, the
/// vendor and price snapshot from the stored listing.
pub async fn create_booking(
    State(state): State<ServerState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Json(input): Json<CreateBookingInput>,
) -> Result<(StatusCode, Json<serde_json::Value>), ApiError> {
    let created = booking_service::create_booking(&state.db, user.id, input).await?;
    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({ "success": true, "booking": created })),
    ))
}
