//! Anonymous contact-form submissions and the admin inbox over them.
use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};
use tracing::{info, instrument};
use uuid::Uuid;

use models::contact::{self, ContactStatus};

use crate::errors::ServiceError;

#[derive(Debug, Clone, serde::Deserialize)]
pub struct ContactInput {
    pub full_name: String,
    pub email: String,
    #[serde(default)]
    pub contact_no: Option<String>,
    #[serde(default)]
    pub mobile_no: Option<String>,
    pub message: String,
}

#[instrument(skip(db, input), fields(email = %input.email))]
pub async fn submit(
    db: &DatabaseConnection,
    input: ContactInput,
) -> Result<contact::Model, ServiceError> {
    for (field, value) in [
        ("full_name", &input.full_name),
        ("email", &input.email),
        ("message", &input.message),
    ] {
        if value.trim().is_empty() {
            return Err(ServiceError::Validation(format!("{field} is required")));
        }
    }
    models::user::validate_email(&input.email)?;

    let am = contact::ActiveModel {
        id: Set(Uuid::new_v4()),
        full_name: Set(input.full_name),
        email: Set(input.email),
        contact_no: Set(input.contact_no),
        mobile_no: Set(input.mobile_no),
        message: Set(input.message),
        status: Set(ContactStatus::Unread),
        created_at: Set(Utc::now().into()),
    };
    let created = am.insert(db).await.map_err(|e| ServiceError::Db(e.to_string()))?;
    info!(contact_id = %created.id, "contact_submitted");
    Ok(created)
}

pub async fn list(db: &DatabaseConnection) -> Result<Vec<contact::Model>, ServiceError> {
    Ok(contact::list_newest_first(db).await?)
}

#[instrument(skip(db), fields(contact_id = %id))]
pub async fn mark_read(db: &DatabaseConnection, id: Uuid) -> Result<contact::Model, ServiceError> {
    let found = contact::Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
        .ok_or_else(|| ServiceError::not_found("submission"))?;
    let mut am: contact::ActiveModel = found.into();
    am.status = Set(ContactStatus::Read);
    am.update(db).await.map_err(|e| ServiceError::Db(e.to_string()))
}

#[instrument(skip(db), fields(contact_id = %id))]
pub async fn delete(db: &DatabaseConnection, id: Uuid) -> Result<(), ServiceError> {
    if !contact::hard_delete(db, id).await? {
        return Err(ServiceError::not_found("submission"));
    }
    info!(contact_id = %id, "contact_deleted");
    Ok(())
}
