//! Vendor-owned service listings: authoring, moderation, and the
//! active-booking deletion guard.
use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, Set};
use sea_orm::ColumnTrait;
use tracing::{info, instrument};
use uuid::Uuid;

use models::booking;
use models::service::{self, ComesWith, ExtraService, ExtraServices, PriceType, ServiceStatus};

use crate::errors::ServiceError;
use crate::pagination::Pagination;

#[derive(Debug, Clone, serde::Deserialize)]
pub struct CreateListingInput {
    pub title: String,
    pub description: String,
    pub category: String,
    pub location: String,
    pub price_type: PriceType,
    pub base_price: i64,
    #[serde(default)]
    pub max_price: Option<i64>,
    #[serde(default)]
    pub price_unit: Option<String>,
    #[serde(default)]
    pub discount_percent: Option<i32>,
    #[serde(default)]
    pub comes_with: Vec<String>,
    #[serde(default)]
    pub extra_services: Vec<ExtraService>,
    #[serde(default)]
    pub team_size: Option<i32>,
    #[serde(default)]
    pub years_in_business: Option<i32>,
    #[serde(default)]
    pub events_completed: Option<i32>,
    #[serde(default)]
    pub image: Option<String>,
}

/// Distinguishes an explicit JSON `null` (clear the stored value, outer
/// `Some(None)`) from an absent field (keep it, outer `None`).
fn clearable<'de, T, D>(de: D) -> Result<Option<Option<T>>, D::Error>
where
    T: serde::Deserialize<'de>,
    D: serde::Deserializer<'de>,
{
    serde::Deserialize::deserialize(de).map(Some)
}

/// Partial update; absent fields keep their stored value, and for the
/// nullable columns an explicit JSON `null` clears it. The vendor reference
/// and the moderation status are not updatable through this path.
#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct UpdateListingInput {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub location: Option<String>,
    pub price_type: Option<PriceType>,
    pub base_price: Option<i64>,
    #[serde(default, deserialize_with = "clearable")]
    pub max_price: Option<Option<i64>>,
    #[serde(default, deserialize_with = "clearable")]
    pub price_unit: Option<Option<String>>,
    #[serde(default, deserialize_with = "clearable")]
    pub discount_percent: Option<Option<i32>>,
    pub comes_with: Option<Vec<String>>,
    pub extra_services: Option<Vec<ExtraService>>,
    #[serde(default, deserialize_with = "clearable")]
    pub team_size: Option<Option<i32>>,
    #[serde(default, deserialize_with = "clearable")]
    pub years_in_business: Option<Option<i32>>,
    #[serde(default, deserialize_with = "clearable")]
    pub events_completed: Option<Option<i32>>,
    #[serde(default, deserialize_with = "clearable")]
    pub image: Option<Option<String>>,
}

fn require(field: &str, value: &str) -> Result<(), ServiceError> {
    if value.trim().is_empty() {
        return Err(ServiceError::Validation(format!("{field} is required")));
    }
    Ok(())
}

/// Create a listing owned by `vendor_id`; the status always starts pending.
#[instrument(skip(db, input), fields(vendor_id = %vendor_id, title = %input.title))]
pub async fn create_listing(
    db: &DatabaseConnection,
    vendor_id: Uuid,
    input: CreateListingInput,
) -> Result<service::Model, ServiceError> {
    require("title", &input.title)?;
    require("description", &input.description)?;
    require("category", &input.category)?;
    require("location", &input.location)?;
    service::validate_comes_with(&input.comes_with)?;
    service::validate_pricing(input.price_type, input.base_price, input.max_price)?;

    let now = Utc::now().into();
    let am = service::ActiveModel {
        id: Set(Uuid::new_v4()),
        vendor_id: Set(vendor_id),
        title: Set(input.title),
        description: Set(input.description),
        category: Set(input.category),
        location: Set(input.location),
        price_type: Set(input.price_type),
        base_price: Set(input.base_price),
        max_price: Set(input.max_price),
        price_unit: Set(input.price_unit),
        discount_percent: Set(input.discount_percent),
        comes_with: Set(ComesWith(input.comes_with)),
        extra_services: Set(ExtraServices(input.extra_services)),
        team_size: Set(input.team_size),
        years_in_business: Set(input.years_in_business),
        events_completed: Set(input.events_completed),
        image: Set(input.image),
        status: Set(ServiceStatus::Pending),
        created_at: Set(now),
        updated_at: Set(now),
    };
    let created = am.insert(db).await.map_err(|e| ServiceError::Db(e.to_string()))?;
    info!(service_id = %created.id, "listing_created");
    Ok(created)
}

/// Owner-scoped update; a listing belonging to another vendor reads as
/// missing rather than forbidden.
#[instrument(skip(db, input), fields(vendor_id = %vendor_id, service_id = %id))]
pub async fn update_listing(
    db: &DatabaseConnection,
    vendor_id: Uuid,
    id: Uuid,
    input: UpdateListingInput,
) -> Result<service::Model, ServiceError> {
    let found = service::Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
        .filter(|s| s.vendor_id == vendor_id)
        .ok_or_else(|| ServiceError::not_found("service"))?;

    if let Some(items) = &input.comes_with {
        service::validate_comes_with(items)?;
    }
    let price_type = input.price_type.unwrap_or(found.price_type);
    let base_price = input.base_price.unwrap_or(found.base_price);
    let max_price = match input.max_price {
        Some(v) => v,
        None => found.max_price,
    };
    service::validate_pricing(price_type, base_price, max_price)?;

    let mut am: service::ActiveModel = found.into();
    if let Some(v) = input.title { require("title", &v)?; am.title = Set(v); }
    if let Some(v) = input.description { require("description", &v)?; am.description = Set(v); }
    if let Some(v) = input.category { require("category", &v)?; am.category = Set(v); }
    if let Some(v) = input.location { require("location", &v)?; am.location = Set(v); }
    if let Some(v) = input.price_type { am.price_type = Set(v); }
    if let Some(v) = input.base_price { am.base_price = Set(v); }
    if let Some(v) = input.max_price { am.max_price = Set(v); }
    if let Some(v) = input.price_unit { am.price_unit = Set(v); }
    if let Some(v) = input.discount_percent { am.discount_percent = Set(v); }
    if let Some(v) = input.comes_with { am.comes_with = Set(ComesWith(v)); }
    if let Some(v) = input.extra_services { am.extra_services = Set(ExtraServices(v)); }
    if let Some(v) = input.team_size { am.team_size = Set(v); }
    if let Some(v) = input.years_in_business { am.years_in_business = Set(v); }
    if let Some(v) = input.events_completed { am.events_completed = Set(v); }
    if let Some(v) = input.image { am.image = Set(v); }
    am.updated_at = Set(Utc::now().into());

    am.update(db).await.map_err(|e| ServiceError::Db(e.to_string()))
}

/// Admin moderation: move a listing between pending/approved/rejected.
#[instrument(skip(db), fields(service_id = %id, status = ?status))]
pub async fn set_listing_status(
    db: &DatabaseConnection,
    id: Uuid,
    status: ServiceStatus,
) -> Result<service::Model, ServiceError> {
    let found = service::Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
        .ok_or_else(|| ServiceError::not_found("service"))?;
    let mut am: service::ActiveModel = found.into();
    am.status = Set(status);
    am.updated_at = Set(Utc::now().into());
    let updated = am.update(db).await.map_err(|e| ServiceError::Db(e.to_string()))?;
    info!(service_id = %updated.id, status = ?updated.status, "listing_status_updated");
    Ok(updated)
}

async fn guard_no_active_bookings(db: &DatabaseConnection, id: Uuid) -> Result<(), ServiceError> {
    let active = booking::count_active_for_service(db, id).await?;
    if active > 0 {
        return Err(ServiceError::Conflict(
            "service has active bookings and cannot be deleted".into(),
        ));
    }
    Ok(())
}

/// Vendor-initiated delete; owner-scoped and blocked by active bookings.
#[instrument(skip(db), fields(vendor_id = %vendor_id, service_id = %id))]
pub async fn delete_listing_for_vendor(
    db: &DatabaseConnection,
    vendor_id: Uuid,
    id: Uuid,
) -> Result<(), ServiceError> {
    let owned = service::Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
        .filter(|s| s.vendor_id == vendor_id)
        .is_some();
    if !owned {
        return Err(ServiceError::not_found("service"));
    }
    guard_no_active_bookings(db, id).await?;
    service::hard_delete(db, id).await?;
    info!(service_id = %id, "listing_deleted");
    Ok(())
}

/// Admin delete; still blocked by active bookings.
#[instrument(skip(db), fields(service_id = %id))]
pub async fn delete_listing_admin(db: &DatabaseConnection, id: Uuid) -> Result<(), ServiceError> {
    guard_no_active_bookings(db, id).await?;
    if !service::hard_delete(db, id).await? {
        return Err(ServiceError::not_found("service"));
    }
    info!(service_id = %id, "listing_deleted_by_admin");
    Ok(())
}

pub async fn list_all(db: &DatabaseConnection) -> Result<Vec<service::Model>, ServiceError> {
    service::Entity::find()
        .all(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))
}

pub async fn list_for_vendor(
    db: &DatabaseConnection,
    vendor_id: Uuid,
) -> Result<Vec<service::Model>, ServiceError> {
    Ok(service::find_by_vendor(db, vendor_id).await?)
}

/// Public browse: approved listings only, paginated.
pub async fn list_approved(
    db: &DatabaseConnection,
    opts: Pagination,
) -> Result<Vec<service::Model>, ServiceError> {
    let (page_idx, per_page) = opts.normalize();
    service::Entity::find()
        .filter(service::Column::Status.eq(ServiceStatus::Approved))
        .paginate(db, per_page)
        .fetch_page(page_idx)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))
}

/// Public detail view; unapproved listings read as missing.
pub async fn get_approved(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<service::Model, ServiceError> {
    service::Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
        .filter(|s| s.status == ServiceStatus::Approved)
        .ok_or_else(|| ServiceError::not_found("service"))
}

#[cfg(test)]
mod tests {
    use super::UpdateListingInput;

    #[test]
    fn update_input_distinguishes_null_from_absent() {
        let input: UpdateListingInput =
            serde_json::from_str(r#"{"image": null, "price_unit": "per event"}"#).unwrap();
        // explicit null clears the stored value
        assert_eq!(input.image, Some(None));
        // a value replaces it
        assert_eq!(input.price_unit, Some(Some("per event".into())));
        // an absent field keeps it
        assert!(input.max_price.is_none());
    }

    #[test]
    fn update_input_accepts_cleared_numeric_fields() {
        let input: UpdateListingInput =
            serde_json::from_str(r#"{"max_price": null, "discount_percent": 15}"#).unwrap();
        assert_eq!(input.max_price, Some(None));
        assert_eq!(input.discount_percent, Some(Some(15)));
    }
}
