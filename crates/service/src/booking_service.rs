//! Booking creation and the vendor-driven status lifecycle.
//!
//! The transition table itself lives on `models::booking::BookingStatus`;
//! this layer adds ownership scoping and persistence.
use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use models::booking::{self, BookingStatus, PaymentStatus, SelectedService, SelectedServices};
use models::service::{self, ServiceStatus};

use crate::errors::ServiceError;

#[derive(Debug, Clone, serde::Deserialize)]
pub struct CreateBookingInput {
    pub service_id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub event_date: DateTime<Utc>,
    #[serde(default)]
    pub event_type: Option<String>,
    #[serde(default)]
    pub guest_count: Option<i32>,
    #[serde(default)]
    pub special_requests: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    /// Names of the listing's extra services to include; the snapshot and
    /// total are always rebuilt server-side from the stored listing.
    #[serde(default)]
    pub extra_service_names: Vec<String>,
}

fn require(field: &str, value: &str) -> Result<(), ServiceError> {
    if value.trim().is_empty() {
        return Err(ServiceError::Validation(format!("{field} is required")));
    }
    Ok(())
}

/// Build the price snapshot from the listing and the selected add-on names.
/// Unknown names are rejected rather than silently dropped.
pub fn build_snapshot(
    listing: &service::Model,
    extra_names: &[String],
) -> Result<SelectedServices, ServiceError> {
    let mut rows = vec![SelectedService {
        service_id: listing.id,
        title: listing.title.clone(),
        base_price: listing.base_price,
        description: Some(listing.description.clone()),
        is_main_service: true,
    }];
    for name in extra_names {
        let extra = listing
            .extra_services
            .0
            .iter()
            .find(|e| e.name == *name)
            .ok_or_else(|| {
                ServiceError::Validation(format!("unknown extra service: {name}"))
            })?;
        rows.push(SelectedService {
            service_id: listing.id,
            title: extra.name.clone(),
            base_price: extra.price,
            description: extra.description.clone(),
            is_main_service: false,
        });
    }
    Ok(SelectedServices(rows))
}

/// Customer books an approved listing. Vendor id and the snapshot come from
/// the stored listing, never from the request body.
#[instrument(skip(db, input), fields(customer_id = %customer_id, service_id = %input.service_id))]
pub async fn create_booking(
    db: &DatabaseConnection,
    customer_id: Uuid,
    input: CreateBookingInput,
) -> Result<booking::Model, ServiceError> {
    require("name", &input.name)?;
    require("email", &input.email)?;
    require("phone", &input.phone)?;
    require("location", &input.location)?;

    let listing = service::Entity::find_by_id(input.service_id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
        .ok_or_else(|| ServiceError::not_found("service"))?;
    if listing.status != ServiceStatus::Approved {
        return Err(ServiceError::Validation("service is not open for booking".into()));
    }

    let snapshot = build_snapshot(&listing, &input.extra_service_names)?;
    let total = snapshot.total_price();

    let now = Utc::now().into();
    let am = booking::ActiveModel {
        id: Set(Uuid::new_v4()),
        service_id: Set(listing.id),
        customer_id: Set(customer_id),
        vendor_id: Set(listing.vendor_id),
        name: Set(input.name),
        email: Set(input.email),
        phone: Set(input.phone),
        location: Set(input.location),
        event_date: Set(input.event_date.into()),
        event_type: Set(input.event_type),
        guest_count: Set(input.guest_count),
        special_requests: Set(input.special_requests),
        notes: Set(input.notes),
        selected_services: Set(snapshot),
        total_price: Set(total),
        status: Set(BookingStatus::Pending),
        payment_status: Set(PaymentStatus::Pending),
        completed_at: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
    };
    let created = am.insert(db).await.map_err(|e| ServiceError::Db(e.to_string()))?;
    info!(booking_id = %created.id, vendor_id = %created.vendor_id, total, "booking_created");
    Ok(created)
}

pub async fn list_for_vendor(
    db: &DatabaseConnection,
    vendor_id: Uuid,
) -> Result<Vec<booking::Model>, ServiceError> {
    Ok(booking::find_by_vendor(db, vendor_id).await?)
}

/// Owner-scoped fetch; a booking belonging to another vendor reads as missing.
pub async fn get_for_vendor(
    db: &DatabaseConnection,
    vendor_id: Uuid,
    id: Uuid,
) -> Result<booking::Model, ServiceError> {
    booking::Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
        .filter(|b| b.vendor_id == vendor_id)
        .ok_or_else(|| ServiceError::not_found("booking"))
}

/// Apply a status transition on behalf of the owning vendor.
///
/// Fails with NotFound when the booking is missing or owned by another
/// vendor, and with InvalidTransition when the target is not in the current
/// state's successor set. Transitioning into `completed` stamps
/// `completed_at`. Single-row write, last-write-wins.
#[instrument(skip(db), fields(vendor_id = %vendor_id, booking_id = %id, target = ?target))]
pub async fn transition_booking(
    db: &DatabaseConnection,
    vendor_id: Uuid,
    id: Uuid,
    target: BookingStatus,
) -> Result<booking::Model, ServiceError> {
    let found = get_for_vendor(db, vendor_id, id).await?;

    if !found.status.can_transition_to(target) {
        warn!(from = ?found.status, to = ?target, "booking_transition_rejected");
        return Err(ServiceError::InvalidTransition { from: found.status, to: target });
    }

    let mut am: booking::ActiveModel = found.into();
    am.status = Set(target);
    if target == BookingStatus::Completed {
        am.completed_at = Set(Some(Utc::now().into()));
    }
    am.updated_at = Set(Utc::now().into());
    let updated = am.update(db).await.map_err(|e| ServiceError::Db(e.to_string()))?;
    info!(booking_id = %updated.id, status = ?updated.status, "booking_transitioned");
    Ok(updated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use models::service::{ComesWith, ExtraService, ExtraServices, PriceType};

    fn listing_with_extras() -> service::Model {
        service::Model {
            id: Uuid::new_v4(),
            vendor_id: Uuid::new_v4(),
            title: "Banquet hall".into(),
            description: "Seats 400".into(),
            category: "venue".into(),
            location: "Pune".into(),
            price_type: PriceType::Fixed,
            base_price: 200_000,
            max_price: None,
            price_unit: Some("per event".into()),
            discount_percent: None,
            comes_with: ComesWith(vec!["Parking".into(), "Catering staff".into()]),
            extra_services: ExtraServices(vec![
                ExtraService { name: "DJ".into(), description: None, price: 15_000 },
                ExtraService { name: "Decor".into(), description: Some("Floral".into()), price: 30_000 },
            ]),
            team_size: Some(12),
            years_in_business: Some(8),
            events_completed: Some(350),
            image: None,
            status: ServiceStatus::Approved,
            created_at: Utc::now().into(),
            updated_at: Utc::now().into(),
        }
    }

    #[test]
    fn snapshot_starts_with_the_main_service() {
        let listing = listing_with_extras();
        let snap = build_snapshot(&listing, &[]).unwrap();
        assert_eq!(snap.0.len(), 1);
        assert!(snap.0[0].is_main_service);
        assert_eq!(snap.total_price(), 200_000);
    }

    #[test]
    fn snapshot_includes_selected_extras_in_order() {
        let listing = listing_with_extras();
        let snap = build_snapshot(&listing, &["DJ".into(), "Decor".into()]).unwrap();
        assert_eq!(snap.0.len(), 3);
        assert_eq!(snap.0[1].title, "DJ");
        assert_eq!(snap.0[2].title, "Decor");
        assert_eq!(snap.total_price(), 245_000);
    }

    #[test]
    fn snapshot_rejects_unknown_extras() {
        let listing = listing_with_extras();
        let err = build_snapshot(&listing, &["Fireworks".into()]).unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
    }
}
