//! Migrator registering entity-specific migrations in dependency order.
//! Parents are created before children; secondary indexes are applied last.
pub use sea_orm_migration::prelude::*;

mod m20220101_000001_create_country;
mod m20220101_000002_create_section;
mod m20220101_000003_create_city;
mod m20220101_000004_create_customer;
mod m20220101_000005_create_promotion;
mod m20220101_000006_create_customer_section;
mod m20220101_000007_add_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20220101_000001_create_country::Migration),
            Box::new(m20220101_000002_create_section::Migration),
            Box::new(m20220101_000003_create_city::Migration),
            Box::new(m20220101_000004_create_customer::Migration),
            Box::new(m20220101_000005_create_promotion::Migration),
            Box::new(m20220101_000006_create_customer_section::Migration),
            // Indexes should always be applied last
            Box::new(m20220101_000007_add_indexes::Migration),
        ]
    }
}
