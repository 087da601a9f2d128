use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse {
    pub status: String,
}

#[derive(ToSchema)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    /// "user" or "vendor"; admin accounts are never self-service.
    pub role: Option<String>,
}

#[derive(ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(ToSchema)]
pub struct ContactRequest {
    pub full_name: String,
    pub email: String,
    pub contact_no: Option<String>,
    pub mobile_no: Option<String>,
    pub message: String,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::auth::register,
        crate::routes::auth::login,
        crate::routes::public::submit_contact,
        crate::routes::vendor::create_service,
        crate::routes::vendor::update_booking_status,
        crate::routes::admin::list_users,
        crate::routes::admin::update_service_status,
    ),
    components(
        schemas(
            HealthResponse,
            RegisterRequest,
            LoginRequest,
            ContactRequest,
        )
    ),
    tags(
        (name = "health"),
        (name = "auth"),
        (name = "contact"),
        (name = "vendor"),
        (name = "admin")
    )
)]
pub struct ApiDoc;
