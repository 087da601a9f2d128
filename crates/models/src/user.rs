use sea_orm::{entity::prelude::*, DatabaseConnection, QueryFilter, Set};
use uuid::Uuid;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::errors;

/// Closed role enumeration; the wire value for `Customer` stays `user` for
/// compatibility with existing clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum Role {
    #[sea_orm(string_value = "user")]
    #[serde(rename = "user")]
    Customer,
    #[sea_orm(string_value = "vendor")]
    #[serde(rename = "vendor")]
    Vendor,
    #[sea_orm(string_value = "admin")]
    #[serde(rename = "admin")]
    Admin,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Customer => "user",
            Role::Vendor => "vendor",
            Role::Admin => "admin",
        }
    }

    /// Moderation rights: service approval, account deletion, contact inbox.
    pub fn can_moderate(self) -> bool {
        matches!(self, Role::Admin)
    }

    /// Listing authorship and booking lifecycle control.
    pub fn can_publish_services(self) -> bool {
        matches!(self, Role::Vendor)
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub is_account_verified: bool,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Credentials,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Credentials => Entity::belongs_to(crate::user_credentials::Entity)
                .from(Column::Id)
                .to(crate::user_credentials::Column::UserId)
                .into(),
        }
    }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_email(email: &str) -> Result<(), errors::ModelError> {
    if !email.contains('@') {
        return Err(errors::ModelError::Validation("invalid email".into()));
    }
    Ok(())
}

pub fn validate_name(name: &str) -> Result<(), errors::ModelError> {
    if name.trim().is_empty() {
        return Err(errors::ModelError::Validation("name required".into()));
    }
    Ok(())
}

pub async fn create(
    db: &DatabaseConnection,
    name: &str,
    email: &str,
    role: Role,
) -> Result<Model, errors::ModelError> {
    validate_email(email)?;
    validate_name(name)?;
    let now = Utc::now().into();
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(name.to_string()),
        email: Set(email.to_string()),
        role: Set(role),
        is_account_verified: Set(false),
        created_at: Set(now),
        updated_at: Set(now),
    };
    am.insert(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}

pub async fn find_by_email(
    db: &DatabaseConnection,
    email: &str,
) -> Result<Option<Model>, errors::ModelError> {
    Entity::find()
        .filter(Column::Email.eq(email))
        .one(db)
        .await
        .map_err(|e| errors::ModelError::Db(e.to_string()))
}

pub async fn list_by_role(
    db: &DatabaseConnection,
    role: Role,
) -> Result<Vec<Model>, errors::ModelError> {
    Entity::find()
        .filter(Column::Role.eq(role))
        .all(db)
        .await
        .map_err(|e| errors::ModelError::Db(e.to_string()))
}

pub async fn hard_delete(db: &DatabaseConnection, id: Uuid) -> Result<(), errors::ModelError> {
    Entity::delete_by_id(id)
        .exec(db)
        .await
        .map_err(|e| errors::ModelError::Db(e.to_string()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_wire_values_are_stable() {
        assert_eq!(Role::Customer.as_str(), "user");
        assert_eq!(Role::Vendor.as_str(), "vendor");
        assert_eq!(Role::Admin.as_str(), "admin");
    }

    #[test]
    fn capability_checks_are_exclusive() {
        assert!(Role::Admin.can_moderate());
        assert!(!Role::Admin.can_publish_services());
        assert!(Role::Vendor.can_publish_services());
        assert!(!Role::Vendor.can_moderate());
        assert!(!Role::Customer.can_moderate());
        assert!(!Role::Customer.can_publish_services());
    }

    #[test]
    fn credentials_relation_resolves() {
        let _ = Relation::Credentials.def();
    }

    #[test]
    fn validation_rejects_bad_input() {
        assert!(validate_email("not-an-email").is_err());
        assert!(validate_email("a@b.com").is_ok());
        assert!(validate_name("  ").is_err());
    }
}
