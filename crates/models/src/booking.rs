use sea_orm::{entity::prelude::*, DatabaseConnection, FromJsonQueryResult, QueryFilter};
use uuid::Uuid;
use serde::{Deserialize, Serialize};

use crate::errors;

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "confirmed")]
    Confirmed,
    #[sea_orm(string_value = "completed")]
    Completed,
    #[sea_orm(string_value = "cancelled")]
    Cancelled,
}

impl BookingStatus {
    /// Allowed-successor table. `Completed` and `Cancelled` are terminal.
    pub fn successors(self) -> &'static [BookingStatus] {
        match self {
            BookingStatus::Pending => &[BookingStatus::Confirmed, BookingStatus::Cancelled],
            BookingStatus::Confirmed => &[BookingStatus::Completed, BookingStatus::Cancelled],
            BookingStatus::Completed | BookingStatus::Cancelled => &[],
        }
    }

    pub fn can_transition_to(self, target: BookingStatus) -> bool {
        self.successors().contains(&target)
    }

    pub fn is_terminal(self) -> bool {
        self.successors().is_empty()
    }

    /// Statuses that block deletion of the referenced service.
    pub fn is_active(self) -> bool {
        matches!(self, BookingStatus::Pending | BookingStatus::Confirmed)
    }
}

/// Recorded on every booking; stays `pending` until a payment
/// integration exists to advance it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "paid")]
    Paid,
    #[sea_orm(string_value = "refunded")]
    Refunded,
}

/// Snapshot row of a service (or one of its add-ons) as selected at booking
/// time; stays stable when the vendor later edits the listing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedService {
    pub service_id: Uuid,
    pub title: String,
    pub base_price: i64,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub is_main_service: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct SelectedServices(pub Vec<SelectedService>);

impl SelectedServices {
    /// Sum of snapshot prices; the stored total is always recomputed from
    /// the snapshot, never trusted from the client.
    pub fn total_price(&self) -> i64 {
        self.0.iter().map(|s| s.base_price).sum()
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "booking")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub service_id: Uuid,
    pub customer_id: Uuid,
    pub vendor_id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub event_date: DateTimeWithTimeZone,
    pub event_type: Option<String>,
    pub guest_count: Option<i32>,
    pub special_requests: Option<String>,
    pub notes: Option<String>,
    pub selected_services: SelectedServices,
    pub total_price: i64,
    pub status: BookingStatus,
    pub payment_status: PaymentStatus,
    pub completed_at: Option<DateTimeWithTimeZone>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Service,
    Customer,
    Vendor,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Service => Entity::belongs_to(crate::service::Entity)
                .from(Column::ServiceId)
                .to(crate::service::Column::Id)
                .into(),
            Relation::Customer => Entity::belongs_to(crate::user::Entity)
                .from(Column::CustomerId)
                .to(crate::user::Column::Id)
                .into(),
            Relation::Vendor => Entity::belongs_to(crate::user::Entity)
                .from(Column::VendorId)
                .to(crate::user::Column::Id)
                .into(),
        }
    }
}

impl ActiveModelBehavior for ActiveModel {}

pub async fn find_by_vendor(
    db: &DatabaseConnection,
    vendor_id: Uuid,
) -> Result<Vec<Model>, errors::ModelError> {
    Entity::find()
        .filter(Column::VendorId.eq(vendor_id))
        .all(db)
        .await
        .map_err(|e| errors::ModelError::Db(e.to_string()))
}

pub async fn count_active_for_service(
    db: &DatabaseConnection,
    service_id: Uuid,
) -> Result<u64, errors::ModelError> {
    use sea_orm::PaginatorTrait;
    Entity::find()
        .filter(Column::ServiceId.eq(service_id))
        .filter(
            Column::Status
                .is_in([BookingStatus::Pending, BookingStatus::Confirmed]),
        )
        .count(db)
        .await
        .map_err(|e| errors::ModelError::Db(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::BookingStatus::*;

    #[test]
    fn pending_fans_out_to_confirmed_and_cancelled() {
        assert!(Pending.can_transition_to(Confirmed));
        assert!(Pending.can_transition_to(Cancelled));
        assert!(!Pending.can_transition_to(Completed));
        assert!(!Pending.can_transition_to(Pending));
    }

    #[test]
    fn confirmed_fans_out_to_completed_and_cancelled() {
        assert!(Confirmed.can_transition_to(Completed));
        assert!(Confirmed.can_transition_to(Cancelled));
        assert!(!Confirmed.can_transition_to(Pending));
    }

    #[test]
    fn terminal_states_have_no_successors() {
        for terminal in [Completed, Cancelled] {
            assert!(terminal.is_terminal());
            for target in [Pending, Confirmed, Completed, Cancelled] {
                assert!(!terminal.can_transition_to(target));
            }
        }
    }

    #[test]
    fn only_pending_and_confirmed_block_service_deletion() {
        assert!(Pending.is_active());
        assert!(Confirmed.is_active());
        assert!(!Completed.is_active());
        assert!(!Cancelled.is_active());
    }

    #[test]
    fn snapshot_total_sums_all_rows() {
        use super::{SelectedService, SelectedServices};
        let snap = SelectedServices(vec![
            SelectedService {
                service_id: uuid::Uuid::new_v4(),
                title: "Photography".into(),
                base_price: 50_000,
                description: None,
                is_main_service: true,
            },
            SelectedService {
                service_id: uuid::Uuid::new_v4(),
                title: "Drone coverage".into(),
                base_price: 12_000,
                description: Some("Aerial shots".into()),
                is_main_service: false,
            },
        ]);
        assert_eq!(snap.total_price(), 62_000);
    }
}
