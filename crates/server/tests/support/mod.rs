use axum::Router;
use jsonwebtoken::{encode, EncodingKey, Header};
use migration::MigratorTrait;
use sea_orm::DatabaseConnection;
use tower_http::cors::CorsLayer;

use models::user::{self, Role};
use server::routes::{self, auth};
use service::auth::service::TokenClaims;

pub const TEST_SECRET: &str = "test-secret";

pub async fn build_app() -> anyhow::Result<(Router, DatabaseConnection)> {
    let db = models::db::connect().await?;
    migration::Migrator::up(&db, None).await?;
    let state = auth::ServerState {
        db: db.clone(),
        auth: auth::ServerAuthConfig {
            jwt_secret: TEST_SECRET.into(),
            token_ttl_hours: 12,
        },
    };
    Ok((routes::build_router(CorsLayer::very_permissive(), state), db))
}

/// Mint a session cookie for an existing account, bypassing the login
/// endpoint so tests can authenticate as directly-seeded users.
pub fn cookie_for(user: &user::Model) -> String {
    let claims = TokenClaims {
        sub: user.email.clone(),
        uid: user.id.to_string(),
        role: user.role,
        exp: (chrono::Utc::now() + chrono::Duration::hours(1)).timestamp() as usize,
    };
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
    )
    .expect("encode token");
    format!("token={token}")
}

pub async fn seed_user(db: &DatabaseConnection, role: Role) -> anyhow::Result<user::Model> {
    let email = format!("{}_{}@example.com", role.as_str(), uuid::Uuid::new_v4());
    Ok(user::create(db, "Test Account", &email, role).await?)
}
