//! Account administration and profile updates: user/vendor listings and the
//! moderation delete rules.
use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};
use tracing::{info, instrument};
use uuid::Uuid;

use models::user::{self, Role};

use crate::errors::ServiceError;

pub async fn get_user(db: &DatabaseConnection, id: Uuid) -> Result<user::Model, ServiceError> {
    user::Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
        .ok_or_else(|| ServiceError::not_found("user"))
}

/// All accounts; credentials live in a separate table and never serialize
/// through this path.
pub async fn list_users(db: &DatabaseConnection) -> Result<Vec<user::Model>, ServiceError> {
    user::Entity::find()
        .all(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))
}

pub async fn list_vendors(db: &DatabaseConnection) -> Result<Vec<user::Model>, ServiceError> {
    Ok(user::list_by_role(db, Role::Vendor).await?)
}

/// Admin delete. Admin accounts are not deletable through this path, which
/// also covers the admin deleting themselves.
#[instrument(skip(db), fields(user_id = %id))]
pub async fn delete_user(db: &DatabaseConnection, id: Uuid) -> Result<user::Model, ServiceError> {
    let found = get_user(db, id).await?;
    if found.role.can_moderate() {
        return Err(ServiceError::Conflict("You cannot delete yourself".into()));
    }
    user::hard_delete(db, id).await?;
    info!(user_id = %id, "user_deleted");
    Ok(found)
}

/// Admin delete of a vendor account; rejects non-vendor targets.
#[instrument(skip(db), fields(vendor_id = %id))]
pub async fn delete_vendor(db: &DatabaseConnection, id: Uuid) -> Result<user::Model, ServiceError> {
    let found = user::Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
        .ok_or_else(|| ServiceError::not_found("vendor"))?;
    if found.role != Role::Vendor {
        return Err(ServiceError::Validation("User is not a vendor".into()));
    }
    user::hard_delete(db, id).await?;
    info!(vendor_id = %id, "vendor_deleted");
    Ok(found)
}

/// Profile update: display name only.
#[instrument(skip(db), fields(user_id = %id))]
pub async fn update_profile_name(
    db: &DatabaseConnection,
    id: Uuid,
    name: &str,
) -> Result<user::Model, ServiceError> {
    user::validate_name(name)?;
    let mut am: user::ActiveModel = get_user(db, id).await?.into();
    am.name = Set(name.to_string());
    am.updated_at = Set(Utc::now().into());
    am.update(db).await.map_err(|e| ServiceError::Db(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::get_db;

    #[tokio::test]
    async fn admin_accounts_survive_delete_attempts() -> Result<(), anyhow::Error> {
        if std::env::var("SKIP_DB_TESTS").is_ok() {
            return Ok(());
        }
        let db = get_db().await?;

        let email = format!("admin_{}@example.com", Uuid::new_v4());
        let admin = user::create(&db, "Root", &email, Role::Admin).await?;

        let err = delete_user(&db, admin.id).await.unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(_)));
        assert!(get_user(&db, admin.id).await.is_ok());

        user::hard_delete(&db, admin.id).await?;
        Ok(())
    }

    #[tokio::test]
    async fn vendor_delete_rejects_plain_customers() -> Result<(), anyhow::Error> {
        if std::env::var("SKIP_DB_TESTS").is_ok() {
            return Ok(());
        }
        let db = get_db().await?;

        let email = format!("cust_{}@example.com", Uuid::new_v4());
        let customer = user::create(&db, "Cara", &email, Role::Customer).await?;

        let err = delete_vendor(&db, customer.id).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));

        user::hard_delete(&db, customer.id).await?;
        Ok(())
    }

    #[tokio::test]
    async fn vendor_listing_only_returns_vendors() -> Result<(), anyhow::Error> {
        if std::env::var("SKIP_DB_TESTS").is_ok() {
            return Ok(());
        }
        let db = get_db().await?;

        let vendor = user::create(
            &db,
            "Vee",
            &format!("v_{}@example.com", Uuid::new_v4()),
            Role::Vendor,
        )
        .await?;
        let customer = user::create(
            &db,
            "Cee",
            &format!("c_{}@example.com", Uuid::new_v4()),
            Role::Customer,
        )
        .await?;

        let vendors = list_vendors(&db).await?;
        assert!(vendors.iter().all(|u| u.role == Role::Vendor));
        assert!(vendors.iter().any(|u| u.id == vendor.id));

        user::hard_delete(&db, vendor.id).await?;
        user::hard_delete(&db, customer.id).await?;
        Ok(())
    }
}
