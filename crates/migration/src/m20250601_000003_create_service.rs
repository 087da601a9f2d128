//! Create `service` table with FK to the owning vendor (`user`).
//!
//! `comes_with` and `extra_services` are JSONB; the vendor reference is
//! immutable after creation (enforced in the service layer).
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Service::Table)
                    .if_not_exists()
                    .col(uuid(Service::Id).primary_key())
                    .col(uuid(Service::VendorId).not_null())
                    .col(string_len(Service::Title, 255).not_null())
                    .col(text(Service::Description).not_null())
                    .col(string_len(Service::Category, 64).not_null())
                    .col(string_len(Service::Location, 255).not_null())
                    .col(string_len(Service::PriceType, 16).not_null())
                    .col(big_integer(Service::BasePrice).not_null())
                    .col(big_integer_null(Service::MaxPrice))
                    .col(string_len_null(Service::PriceUnit, 32))
                    .col(integer_null(Service::DiscountPercent))
                    .col(json_binary(Service::ComesWith).not_null())
                    .col(json_binary(Service::ExtraServices).not_null())
                    .col(integer_null(Service::TeamSize))
                    .col(integer_null(Service::YearsInBusiness))
                    .col(integer_null(Service::EventsCompleted))
                    .col(string_len_null(Service::Image, 255))
                    .col(string_len(Service::Status, 16).not_null())
                    .col(timestamp_with_time_zone(Service::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Service::UpdatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_service_vendor")
                            .from(Service::Table, Service::VendorId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Service::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Service {
    Table,
    Id,
    VendorId,
    Title,
    Description,
    Category,
    Location,
    PriceType,
    BasePrice,
    MaxPrice,
    PriceUnit,
    DiscountPercent,
    ComesWith,
    ExtraServices,
    TeamSize,
    YearsInBusiness,
    EventsCompleted,
    Image,
    Status,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum User { Table, Id }
