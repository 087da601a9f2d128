use sea_orm::{entity::prelude::*, DatabaseConnection, FromJsonQueryResult, QueryFilter};
use uuid::Uuid;
use serde::{Deserialize, Serialize};

use crate::errors;

/// Hard cap on the "what's included" list of a listing.
pub const MAX_COMES_WITH: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "lowercase")]
pub enum ServiceStatus {
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "approved")]
    Approved,
    #[sea_orm(string_value = "rejected")]
    Rejected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "lowercase")]
pub enum PriceType {
    #[sea_orm(string_value = "fixed")]
    Fixed,
    #[sea_orm(string_value = "starting")]
    Starting,
    #[sea_orm(string_value = "range")]
    Range,
}

/// Optional add-on offering embedded in the listing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtraService {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: i64,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct ComesWith(pub Vec<String>);

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct ExtraServices(pub Vec<ExtraService>);

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "service")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Owning vendor; never changes after creation.
    pub vendor_id: Uuid,
    pub title: String,
    pub description: String,
    pub category: String,
    pub location: String,
    pub price_type: PriceType,
    pub base_price: i64,
    pub max_price: Option<i64>,
    pub price_unit: Option<String>,
    pub discount_percent: Option<i32>,
    pub comes_with: ComesWith,
    pub extra_services: ExtraServices,
    pub team_size: Option<i32>,
    pub years_in_business: Option<i32>,
    pub events_completed: Option<i32>,
    pub image: Option<String>,
    pub status: ServiceStatus,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Vendor,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Vendor => Entity::belongs_to(crate::user::Entity)
                .from(Column::VendorId)
                .to(crate::user::Column::Id)
                .into(),
        }
    }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_comes_with(items: &[String]) -> Result<(), errors::ModelError> {
    if items.len() > MAX_COMES_WITH {
        return Err(errors::ModelError::Validation(format!(
            "comes_with supports at most {} items",
            MAX_COMES_WITH
        )));
    }
    Ok(())
}

pub fn validate_pricing(
    price_type: PriceType,
    base_price: i64,
    max_price: Option<i64>,
) -> Result<(), errors::ModelError> {
    if base_price < 0 {
        return Err(errors::ModelError::Validation("base price must not be negative".into()));
    }
    if price_type == PriceType::Range {
        match max_price {
            Some(max) if max >= base_price => {}
            Some(_) => {
                return Err(errors::ModelError::Validation(
                    "max price must not be below base price".into(),
                ))
            }
            None => {
                return Err(errors::ModelError::Validation(
                    "range pricing requires a max price".into(),
                ))
            }
        }
    }
    Ok(())
}

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

pub async fn hard_delete(db: &DatabaseConnection, id: Uuid) -> Result<bool, errors::ModelError> {
    let res = Entity::delete_by_id(id)
        .exec(db)
        .await
        .map_err(|e| errors::ModelError::Db(e.to_string()))?;
    Ok(res.rows_affected > 0)
}
