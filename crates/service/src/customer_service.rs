use chrono::NaiveDate;
use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter, Set, TransactionTrait};
use tracing::{info, warn};

use models::{customer, customer_section};
use crate::city_service::resolve_city;
use crate::country_service::require_country;
use crate::errors::ServiceError;
use crate::section_service::require_section;

/// Get a customer by id.
pub async fn get_customer<C: ConnectionTrait>(db: &C, id: i32) -> Result<Option<customer::Model>, ServiceError> {
    customer::Entity::find_by_id(id).one(db).await.map_err(ServiceError::storage)
}

/// Find a customer by email.
pub async fn find_customer_by_email<C: ConnectionTrait>(db: &C, email: &str) -> Result<Option<customer::Model>, ServiceError> {
    customer::Entity::find()
        .filter(customer::Column::Email.eq(email))
        .one(db).await.map_err(ServiceError::storage)
}

async fn require_customer<C: ConnectionTrait>(db: &C, id: i32) -> Result<customer::Model, ServiceError> {
    get_customer(db, id).await?.ok_or_else(|| ServiceError::not_found("customer"))
}

/// Create a customer living in an existing country and city.
///
/// Checks run in order: field validation, country, city, email uniqueness. The new
/// customer has no interested sections.
pub async fn add_customer(
    db: &DatabaseConnection,
    full_name: &str,
    date_of_birth: NaiveDate,
    gender: &str,
    email: &str,
    country_name: &str,
    city_name: &str,
) -> Result<customer::Model, ServiceError> {
    customer::validate_name(full_name)?;
    customer::validate_email(email)?;
    let txn = db.begin().await.map_err(ServiceError::storage)?;
    let country = require_country(&txn, country_name).await?;
    let city = resolve_city(&txn, city_name, country.id).await?;
    if find_customer_by_email(&txn, email).await?.is_some() {
        warn!(%email, "customer email already registered");
        return Err(ServiceError::DuplicateEmail(format!("email '{}' already registered", email)));
    }
    let created = customer::create(&txn, full_name, date_of_birth, gender, email, country.id, city.id).await?;
    txn.commit().await.map_err(ServiceError::storage)?;
    info!(customer_id = created.id, country_id = country.id, city_id = city.id, "customer added");
    Ok(created)
}

/// Subscribe a customer to a section. Returns `false` when already subscribed.
pub async fn link_customer_section(db: &DatabaseConnection, customer_id: i32, section_name: &str) -> Result<bool, ServiceError> {
    let txn = db.begin().await.map_err(ServiceError::storage)?;
    require_customer(&txn, customer_id).await?;
    let section = require_section(&txn, section_name).await?;
    let existing = customer_section::Entity::find_by_id((customer_id, section.id))
        .one(&txn).await.map_err(ServiceError::storage)?;
    if existing.is_some() {
        return Ok(false);
    }
    customer_section::create(&txn, customer_id, section.id).await?;
    txn.commit().await.map_err(ServiceError::storage)?;
    info!(customer_id, section_id = section.id, "customer linked to section");
    Ok(true)
}

/// Update a customer's full name.
pub async fn update_customer_name(db: &DatabaseConnection, id: i32, name: &str) -> Result<customer::Model, ServiceError> {
    customer::validate_name(name)?;
    let txn = db.begin().await.map_err(ServiceError::storage)?;
    let mut am: customer::ActiveModel = require_customer(&txn, id).await?.into();
    am.full_name = Set(name.to_string());
    let updated = am.update(&txn).await.map_err(ServiceError::storage)?;
    txn.commit().await.map_err(ServiceError::storage)?;
    info!(customer_id = id, "customer renamed");
    Ok(updated)
}

/// Delete a customer and its section subscriptions.
pub async fn delete_customer(db: &DatabaseConnection, id: i32) -> Result<(), ServiceError> {
    let txn = db.begin().await.map_err(ServiceError::storage)?;
    require_customer(&txn, id).await?;
    let links = customer_section::Entity::delete_many()
        .filter(customer_section::Column::CustomerId.eq(id))
        .exec(&txn).await.map_err(ServiceError::storage)?;
    customer::Entity::delete_by_id(id).exec(&txn).await.map_err(ServiceError::storage)?;
    txn.commit().await.map_err(ServiceError::storage)?;
    info!(customer_id = id, links = links.rows_affected, "customer deleted");
    Ok(())
}
