//! Create `customer` table with FKs to `country` and `city`.
//!
//! Both references restrict deletion of the parent while a customer points at it.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Customer::Table)
                    .if_not_exists()
                    .col(pk_auto(Customer::Id))
                    .col(string_len(Customer::FullName, 256).not_null())
                    .col(date(Customer::DateOfBirth).not_null())
                    .col(string_len(Customer::Gender, 16).not_null())
                    .col(string_len(Customer::Email, 255).unique_key().not_null())
                    .col(integer(Customer::CountryId).not_null())
                    .col(integer(Customer::CityId).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_customer_country")
                            .from(Customer::Table, Customer::CountryId)
                            .to(Country::Table, Country::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_customer_city")
                            .from(Customer::Table, Customer::CityId)
                            .to(City::Table, City::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Customer::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Customer { Table, Id, FullName, DateOfBirth, Gender, Email, CountryId, CityId }

#[derive(DeriveIden)]
enum Country { Table, Id }

#[derive(DeriveIden)]
enum City { Table, Id }
