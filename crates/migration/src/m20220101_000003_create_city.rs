//! Create `city` table with FK to `country`.
//!
//! Cities go away with their country.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(City::Table)
                    .if_not_exists()
                    .col(pk_auto(City::Id))
                    .col(string_len(City::Name, 128).not_null())
                    .col(integer(City::CountryId).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_city_country")
                            .from(City::Table, City::CountryId)
                            .to(Country::Table, Country::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(City::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum City { Table, Id, Name, CountryId }

#[derive(DeriveIden)]
enum Country { Table, Id }
