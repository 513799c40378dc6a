use chrono::{NaiveDate, NaiveDateTime};
use sea_orm::DatabaseConnection;
use tracing::{info, instrument};
use migration::MigratorTrait;

use models::db::{connect_with_config, DatabaseConfig};
use models::{city, country, customer, promotion, section};
use crate::errors::ServiceError;
use crate::queries::{CityView, PromotionView};
use crate::{city_service, country_service, customer_service, promotion_service, queries, section_service};

/// Owned handle on the mailing list database.
///
/// Every mutating method validates before it writes and runs inside its own
/// transaction; a returned error means nothing was changed.
pub struct MailingListStore {
    db: DatabaseConnection,
}

impl MailingListStore {
    /// Connect and make sure the schema exists.
    pub async fn open(cfg: &DatabaseConfig) -> Result<Self, ServiceError> {
        let db = connect_with_config(cfg).await.map_err(ServiceError::storage)?;
        migration::Migrator::up(&db, None).await.map_err(ServiceError::storage)?;
        info!(in_memory = cfg.is_in_memory(), "mailing list store opened");
        Ok(Self { db })
    }

    pub async fn open_in_memory() -> Result<Self, ServiceError> {
        Self::open(&DatabaseConfig::in_memory()).await
    }

    /// Wrap an already-migrated connection.
    pub fn from_connection(db: DatabaseConnection) -> Self { Self { db } }

    pub fn connection(&self) -> &DatabaseConnection { &self.db }

    pub async fn close(self) -> Result<(), ServiceError> {
        self.db.close().await.map_err(ServiceError::storage)?;
        info!("mailing list store closed");
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn add_country(&self, name: &str) -> Result<country::Model, ServiceError> {
        country_service::add_country(&self.db, name).await
    }

    #[instrument(skip(self))]
    pub async fn add_city(&self, name: &str, country_name: &str) -> Result<city::Model, ServiceError> {
        city_service::add_city(&self.db, name, country_name).await
    }

    #[instrument(skip(self))]
    pub async fn add_section(&self, name: &str) -> Result<section::Model, ServiceError> {
        section_service::add_section(&self.db, name).await
    }

    #[instrument(skip(self))]
    pub async fn add_promotion(
        &self,
        section_name: &str,
        country_name: &str,
        start_date: NaiveDateTime,
        end_date: NaiveDateTime,
        product_name: Option<&str>,
    ) -> Result<promotion::Model, ServiceError> {
        promotion_service::add_promotion(&self.db, section_name, country_name, start_date, end_date, product_name).await
    }

    #[instrument(skip(self))]
    pub async fn add_customer(
        &self,
        full_name: &str,
        date_of_birth: NaiveDate,
        gender: &str,
        email: &str,
        country_name: &str,
        city_name: &str,
    ) -> Result<customer::Model, ServiceError> {
        customer_service::add_customer(&self.db, full_name, date_of_birth, gender, email, country_name, city_name).await
    }

    #[instrument(skip(self))]
    pub async fn link_customer_section(&self, customer_id: i32, section_name: &str) -> Result<bool, ServiceError> {
        customer_service::link_customer_section(&self.db, customer_id, section_name).await
    }

    #[instrument(skip(self))]
    pub async fn update_customer_name(&self, customer_id: i32, name: &str) -> Result<customer::Model, ServiceError> {
        customer_service::update_customer_name(&self.db, customer_id, name).await
    }

    #[instrument(skip(self))]
    pub async fn delete_country(&self, id: i32) -> Result<(), ServiceError> {
        country_service::delete_country(&self.db, id).await
    }

    #[instrument(skip(self))]
    pub async fn delete_city(&self, id: i32) -> Result<(), ServiceError> {
        city_service::delete_city(&self.db, id).await
    }

    #[instrument(skip(self))]
    pub async fn delete_section(&self, id: i32) -> Result<(), ServiceError> {
        section_service::delete_section(&self.db, id).await
    }

    #[instrument(skip(self))]
    pub async fn delete_customer(&self, id: i32) -> Result<(), ServiceError> {
        customer_service::delete_customer(&self.db, id).await
    }

    pub async fn find_country_by_name(&self, name: &str) -> Result<Option<country::Model>, ServiceError> {
        country_service::find_country_by_name(&self.db, name).await
    }

    pub async fn find_section_by_name(&self, name: &str) -> Result<Option<section::Model>, ServiceError> {
        section_service::find_section_by_name(&self.db, name).await
    }

    pub async fn find_customer_by_email(&self, email: &str) -> Result<Option<customer::Model>, ServiceError> {
        customer_service::find_customer_by_email(&self.db, email).await
    }

    pub async fn get_customer(&self, id: i32) -> Result<Option<customer::Model>, ServiceError> {
        customer_service::get_customer(&self.db, id).await
    }

    pub async fn list_customers(&self) -> Result<Vec<customer::Model>, ServiceError> {
        queries::list_customers(&self.db).await
    }

    pub async fn list_emails(&self) -> Result<Vec<String>, ServiceError> {
        queries::list_emails(&self.db).await
    }

    pub async fn list_countries(&self) -> Result<Vec<country::Model>, ServiceError> {
        queries::list_countries(&self.db).await
    }

    pub async fn list_cities(&self) -> Result<Vec<CityView>, ServiceError> {
        queries::list_cities(&self.db).await
    }

    pub async fn list_sections(&self) -> Result<Vec<section::Model>, ServiceError> {
        queries::list_sections(&self.db).await
    }

    pub async fn list_promotions(&self) -> Result<Vec<PromotionView>, ServiceError> {
        queries::list_promotions(&self.db).await
    }

    pub async fn list_customers_by_city(&self, city_name: &str) -> Result<Vec<customer::Model>, ServiceError> {
        queries::list_customers_by_city(&self.db, city_name).await
    }

    pub async fn list_customers_by_country(&self, country_name: &str) -> Result<Vec<customer::Model>, ServiceError> {
        queries::list_customers_by_country(&self.db, country_name).await
    }

    pub async fn list_promotions_by_country(&self, country_name: &str) -> Result<Vec<PromotionView>, ServiceError> {
        queries::list_promotions_by_country(&self.db, country_name).await
    }

    pub async fn list_promotions_by_section(&self, section_name: &str) -> Result<Vec<PromotionView>, ServiceError> {
        queries::list_promotions_by_section(&self.db, section_name).await
    }

    pub async fn list_sections_by_customer(&self, customer_id: i32) -> Result<Vec<section::Model>, ServiceError> {
        queries::list_sections_by_customer(&self.db, customer_id).await
    }

    pub async fn list_promotions_by_customer(&self, customer_id: i32) -> Result<Vec<PromotionView>, ServiceError> {
        queries::list_promotions_by_customer(&self.db, customer_id).await
    }

    pub async fn list_promotions_by_city(&self, city_name: &str) -> Result<Vec<PromotionView>, ServiceError> {
        queries::list_promotions_by_city(&self.db, city_name).await
    }
}
