//! Create `contact` table for anonymous contact-form submissions.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Contact::Table)
                    .if_not_exists()
                    .col(uuid(Contact::Id).primary_key())
                    .col(string_len(Contact::FullName, 128).not_null())
                    .col(string_len(Contact::Email, 255).not_null())
                    .col(string_len_null(Contact::ContactNo, 32))
                    .col(string_len_null(Contact::MobileNo, 32))
                    .col(text(Contact::Message).not_null())
                    .col(string_len(Contact::Status, 16).not_null())
                    .col(timestamp_with_time_zone(Contact::CreatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Contact::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Contact { Table, Id, FullName, Email, ContactNo, MobileNo, Message, Status, CreatedAt }
