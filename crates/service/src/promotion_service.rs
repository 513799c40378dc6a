use chrono::NaiveDateTime;
use sea_orm::{ConnectionTrait, DatabaseConnection, EntityTrait, TransactionTrait};
use tracing::info;

use models::promotion;
use crate::country_service::require_country;
use crate::errors::ServiceError;
use crate::section_service::require_section;

/// Get a promotion by id.
pub async fn get_promotion<C: ConnectionTrait>(db: &C, id: i32) -> Result<Option<promotion::Model>, ServiceError> {
    promotion::Entity::find_by_id(id).one(db).await.map_err(ServiceError::storage)
}

/// Create a promotion for a section in a country.
///
/// The date range is not checked; `start_date` may follow `end_date`.
pub async fn add_promotion(
    db: &DatabaseConnection,
    section_name: &str,
    country_name: &str,
    start_date: NaiveDateTime,
    end_date: NaiveDateTime,
    product_name: Option<&str>,
) -> Result<promotion::Model, ServiceError> {
    let txn = db.begin().await.map_err(ServiceError::storage)?;
    let section = require_section(&txn, section_name).await?;
    let country = require_country(&txn, country_name).await?;
    let created = promotion::create(&txn, section.id, country.id, start_date, end_date, product_name).await?;
    txn.commit().await.map_err(ServiceError::storage)?;
    info!(
        promotion_id = created.id,
        section_id = section.id,
        country_id = country.id,
        product = product_name.unwrap_or_default(),
        "promotion added"
    );
    Ok(created)
}
