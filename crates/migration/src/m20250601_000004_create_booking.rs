//! Create `booking` table with FKs to `service` and `user` (customer and
//! vendor). `selected_services` is a JSONB snapshot taken at creation time.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Booking::Table)
                    .if_not_exists()
                    .col(uuid(Booking::Id).primary_key())
                    .col(uuid(Booking::ServiceId).not_null())
                    .col(uuid(Booking::CustomerId).not_null())
                    .col(uuid(Booking::VendorId).not_null())
                    .col(string_len(Booking::Name, 128).not_null())
                    .col(string_len(Booking::Email, 255).not_null())
                    .col(string_len(Booking::Phone, 32).not_null())
                    .col(string_len(Booking::Location, 255).not_null())
                    .col(timestamp_with_time_zone(Booking::EventDate).not_null())
                    .col(string_len_null(Booking::EventType, 64))
                    .col(integer_null(Booking::GuestCount))
                    .col(text_null(Booking::SpecialRequests))
                    .col(text_null(Booking::Notes))
                    .col(json_binary(Booking::SelectedServices).not_null())
                    .col(big_integer(Booking::TotalPrice).not_null())
                    .col(string_len(Booking::Status, 16).not_null())
                    .col(string_len(Booking::PaymentStatus, 16).not_null())
                    .col(timestamp_with_time_zone_null(Booking::CompletedAt))
                    .col(timestamp_with_time_zone(Booking::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Booking::UpdatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_booking_service")
                            .from(Booking::Table, Booking::ServiceId)
                            .to(Service::Table, Service::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_booking_customer")
                            .from(Booking::Table, Booking::CustomerId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_booking_vendor")
                            .from(Booking::Table, Booking::VendorId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Booking::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Booking {
    Table,
    Id,
    ServiceId,
    CustomerId,
    VendorId,
    Name,
    Email,
    Phone,
    Location,
    EventDate,
    EventType,
    GuestCount,
    SpecialRequests,
    Notes,
    SelectedServices,
    TotalPrice,
    Status,
    PaymentStatus,
    CompletedAt,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Service { Table, Id }

#[derive(DeriveIden)]
enum User { Table, Id }
