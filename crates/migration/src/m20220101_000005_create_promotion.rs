//! Create `promotion` table with FKs to `section` and `country`.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Promotion::Table)
                    .if_not_exists()
                    .col(pk_auto(Promotion::Id))
                    .col(integer(Promotion::SectionId).not_null())
                    .col(integer(Promotion::CountryId).not_null())
                    .col(date_time(Promotion::StartDate).not_null())
                    .col(date_time(Promotion::EndDate).not_null())
                    .col(string_len_null(Promotion::ProductName, 256))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_promotion_section")
                            .from(Promotion::Table, Promotion::SectionId)
                            .to(Section::Table, Section::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_promotion_country")
                            .from(Promotion::Table, Promotion::CountryId)
                            .to(Country::Table, Country::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Promotion::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Promotion { Table, Id, SectionId, CountryId, StartDate, EndDate, ProductName }

#[derive(DeriveIden)]
enum Section { Table, Id }

#[derive(DeriveIden)]
enum Country { Table, Id }
