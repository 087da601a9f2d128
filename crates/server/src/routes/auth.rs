use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::Response;
use axum::Json;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use sea_orm::{DatabaseConnection, EntityTrait};
use serde::Serialize;
use uuid::Uuid;

use models::user::{self, Role};
use service::auth::repo::seaorm::SeaOrmAuthRepository;
use service::auth::service::{AuthConfig, AuthService, TokenClaims};
use service::auth::domain::{LoginInput, RegisterInput};

use crate::errors::ApiError;

/// Cookie carrying the signed session token.
pub const AUTH_COOKIE: &str = "token";

#[derive(Clone)]
pub struct ServerAuthConfig {
    pub jwt_secret: String,
    pub token_ttl_hours: i64,
}

#[derive(Clone)]
pub struct ServerState {
    pub db: DatabaseConnection,
    pub auth: ServerAuthConfig,
}

impl ServerState {
    fn auth_service(&self) -> AuthService<SeaOrmAuthRepository> {
        let repo = Arc::new(SeaOrmAuthRepository { db: self.db.clone() });
        AuthService::new(
            repo,
            AuthConfig {
                jwt_secret: Some(self.auth.jwt_secret.clone()),
                token_ttl_hours: self.auth.token_ttl_hours,
                ..AuthConfig::default()
            },
        )
    }
}

/// Authenticated user attached to the request by the guards; handlers read
/// it via `Extension`, never from ambient client state.
#[derive(Clone)]
pub struct CurrentUser(pub user::Model);

#[derive(Serialize)]
pub struct SessionUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: Role,
}

impl From<&user::Model> for SessionUser {
    fn from(u: &user::Model) -> Self {
        Self { id: u.id, name: u.name.clone(), email: u.email.clone(), role: u.role }
    }
}

fn session_cookie(token: String) -> Cookie<'static> {
    let mut cookie = Cookie::new(AUTH_COOKIE, token);
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookie.set_secure(false);
    cookie.set_same_site(SameSite::Lax);
    cookie
}

#[utoipa::path(post, path = "/api/auth/register", tag = "auth", request_body = crate::openapi::RegisterRequest, responses((status = 201, description = "Registered"), (status = 400, description = "Bad Request"), (status = 409, description = "Conflict")))]
pub async fn register(
    State(state): State<ServerState>,
    Json(input): Json<RegisterInput>,
) -> Result<(StatusCode, Json<serde_json::Value>), ApiError> {
    user::validate_email(&input.email).map_err(|e| ApiError::bad_request(e.to_string()))?;
    user::validate_name(&input.name).map_err(|e| ApiError::bad_request(e.to_string()))?;

    let created = state.auth_service().register(input).await?;
    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({ "success": true, "user": created })),
    ))
}

#[utoipa::path(post, path = "/api/auth/login", tag = "auth", request_body = crate::openapi::LoginRequest, responses((status = 200, description = "Logged In"), (status = 401, description = "Unauthorized")))]
pub async fn login(
    State(state): State<ServerState>,
    jar: CookieJar,
    Json(input): Json<LoginInput>,
) -> Result<(CookieJar, Json<serde_json::Value>), ApiError> {
    let session = state.auth_service().login(input).await?;
    let token = session
        .token
        .ok_or_else(|| ApiError::internal("token generation failed"))?;
    let jar = jar.add(session_cookie(token));
    Ok((jar, Json(serde_json::json!({ "success": true, "user": session.user }))))
}

pub async fn logout(jar: CookieJar) -> (CookieJar, Json<serde_json::Value>) {
    // Removal must carry the same Path as the cookie set at login, or
    // browsers keep the session cookie alive.
    let jar = jar.remove(Cookie::build((AUTH_COOKIE, "")).path("/"));
    (jar, Json(serde_json::json!({ "success": true, "message": "Logged out" })))
}

/// Resolve the acting user from the `token` cookie: verify signature and
/// expiry, then load the referenced account. Missing/invalid token and an
/// unknown user all collapse to 401.
async fn authenticate(state: &ServerState, jar: &CookieJar) -> Result<user::Model, ApiError> {
    let token = jar
        .get(AUTH_COOKIE)
        .map(|c| c.value().to_string())
        .ok_or_else(|| ApiError::unauthorized("Unauthorized: No token provided"))?;

    let key = DecodingKey::from_secret(state.auth.jwt_secret.as_bytes());
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;
    let data = decode::<TokenClaims>(&token, &key, &validation)
        .map_err(|_| ApiError::unauthorized("Invalid or expired token"))?;

    let uid = Uuid::parse_str(&data.claims.uid)
        .map_err(|_| ApiError::unauthorized("Invalid or expired token"))?;
    let found = user::Entity::find_by_id(uid)
        .one(&state.db)
        .await
        .map_err(ApiError::internal)?;
    found.ok_or_else(|| ApiError::unauthorized("User not found"))
}

async fn run_guarded(
    state: ServerState,
    jar: CookieJar,
    mut req: Request,
    next: Next,
    check: fn(Role) -> Result<(), ApiError>,
) -> Result<Response, ApiError> {
    let user = authenticate(&state, &jar).await?;
    check(user.role)?;
    req.extensions_mut().insert(CurrentUser(user));
    Ok(next.run(req).await)
}

/// Guard: any authenticated account.
pub async fn require_user(
    State(state): State<ServerState>,
    jar: CookieJar,
    req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    run_guarded(state, jar, req, next, |_| Ok(())).await
}

/// Guard: authenticated vendor.
pub async fn require_vendor(
    State(state): State<ServerState>,
    jar: CookieJar,
    req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    run_guarded(state, jar, req, next, |role| {
        if role.can_publish_services() {
            Ok(())
        } else {
            Err(ApiError::forbidden("Unauthorized: User is not a vendor"))
        }
    })
    .await
}

/// Guard: authenticated admin.
pub async fn require_admin(
    State(state): State<ServerState>,
    jar: CookieJar,
    req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    run_guarded(state, jar, req, next, |role| {
        if role.can_moderate() {
            Ok(())
        } else {
            Err(ApiError::forbidden("Access denied. Admin privileges required."))
        }
    })
    .await
}
