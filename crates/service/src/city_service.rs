use sea_orm::{ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, TransactionTrait};
use tracing::{info, warn};

use models::{city, customer};
use crate::country_service::require_country;
use crate::errors::ServiceError;

/// Find a city by name inside one country.
pub async fn find_city_in_country<C: ConnectionTrait>(db: &C, name: &str, country_id: i32) -> Result<Option<city::Model>, ServiceError> {
    city::Entity::find()
        .filter(city::Column::Name.eq(name))
        .filter(city::Column::CountryId.eq(country_id))
        .one(db).await.map_err(ServiceError::storage)
}

/// Resolve the city a new customer points at.
///
/// A city of that name under `country_id` wins; otherwise the oldest city with that
/// name in any country is used. The customer's country is not cross-checked.
pub(crate) async fn resolve_city<C: ConnectionTrait>(db: &C, name: &str, country_id: i32) -> Result<city::Model, ServiceError> {
    if let Some(found) = find_city_in_country(db, name, country_id).await? {
        return Ok(found);
    }
    city::Entity::find()
        .filter(city::Column::Name.eq(name))
        .order_by_asc(city::Column::Id)
        .one(db).await.map_err(ServiceError::storage)?
        .ok_or_else(|| ServiceError::NotFound(format!("city '{}' not found", name)))
}

/// Get city by id.
pub async fn get_city<C: ConnectionTrait>(db: &C, id: i32) -> Result<Option<city::Model>, ServiceError> {
    city::Entity::find_by_id(id).one(db).await.map_err(ServiceError::storage)
}

/// Create a city under an existing country; names are unique per country.
pub async fn add_city(db: &DatabaseConnection, name: &str, country_name: &str) -> Result<city::Model, ServiceError> {
    city::validate_name(name)?;
    let txn = db.begin().await.map_err(ServiceError::storage)?;
    let country = require_country(&txn, country_name).await?;
    if find_city_in_country(&txn, name, country.id).await?.is_some() {
        warn!(%name, country = %country_name, "city already exists");
        return Err(ServiceError::DuplicateName(format!("city '{}' already exists in '{}'", name, country_name)));
    }
    let created = city::create(&txn, name, country.id).await?;
    txn.commit().await.map_err(ServiceError::storage)?;
    info!(city_id = created.id, country_id = country.id, %name, "city added");
    Ok(created)
}

/// Delete a city. Rejected with `InUse` while a customer lives there.
pub async fn delete_city(db: &DatabaseConnection, id: i32) -> Result<(), ServiceError> {
    let txn = db.begin().await.map_err(ServiceError::storage)?;
    let found = city::Entity::find_by_id(id)
        .one(&txn).await.map_err(ServiceError::storage)?
        .ok_or_else(|| ServiceError::not_found("city"))?;
    let residents = customer::Entity::find()
        .filter(customer::Column::CityId.eq(id))
        .count(&txn).await.map_err(ServiceError::storage)?;
    if residents > 0 {
        warn!(city_id = id, residents, "city still has customers");
        return Err(ServiceError::InUse(format!("city '{}' has {} customer(s)", found.name, residents)));
    }
    city::Entity::delete_by_id(id).exec(&txn).await.map_err(ServiceError::storage)?;
    txn.commit().await.map_err(ServiceError::storage)?;
    info!(city_id = id, "city deleted");
    Ok(())
}
