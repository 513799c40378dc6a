use sea_orm::{ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter, TransactionTrait};
use tracing::{info, warn};

use models::{customer_section, promotion, section};
use crate::errors::ServiceError;

/// Find a section by its unique name.
pub async fn find_section_by_name<C: ConnectionTrait>(db: &C, name: &str) -> Result<Option<section::Model>, ServiceError> {
    section::Entity::find()
        .filter(section::Column::Name.eq(name))
        .one(db).await.map_err(ServiceError::storage)
}

pub(crate) async fn require_section<C: ConnectionTrait>(db: &C, name: &str) -> Result<section::Model, ServiceError> {
    find_section_by_name(db, name).await?
        .ok_or_else(|| ServiceError::NotFound(format!("section '{}' not found", name)))
}

/// Get section by id.
pub async fn get_section<C: ConnectionTrait>(db: &C, id: i32) -> Result<Option<section::Model>, ServiceError> {
    section::Entity::find_by_id(id).one(db).await.map_err(ServiceError::storage)
}

/// Create a section; names are unique.
pub async fn add_section(db: &DatabaseConnection, name: &str) -> Result<section::Model, ServiceError> {
    section::validate_name(name)?;
    let txn = db.begin().await.map_err(ServiceError::storage)?;
    if find_section_by_name(&txn, name).await?.is_some() {
        warn!(%name, "section already exists");
        return Err(ServiceError::DuplicateName(format!("section '{}' already exists", name)));
    }
    let created = section::create(&txn, name).await?;
    txn.commit().await.map_err(ServiceError::storage)?;
    info!(section_id = created.id, %name, "section added");
    Ok(created)
}

/// Delete a section with its promotions and customer subscriptions.
pub async fn delete_section(db: &DatabaseConnection, id: i32) -> Result<(), ServiceError> {
    let txn = db.begin().await.map_err(ServiceError::storage)?;
    section::Entity::find_by_id(id)
        .one(&txn).await.map_err(ServiceError::storage)?
        .ok_or_else(|| ServiceError::not_found("section"))?;
    let promotions = promotion::Entity::delete_many()
        .filter(promotion::Column::SectionId.eq(id))
        .exec(&txn).await.map_err(ServiceError::storage)?;
    let links = customer_section::Entity::delete_many()
        .filter(customer_section::Column::SectionId.eq(id))
        .exec(&txn).await.map_err(ServiceError::storage)?;
    section::Entity::delete_by_id(id).exec(&txn).await.map_err(ServiceError::storage)?;
    txn.commit().await.map_err(ServiceError::storage)?;
    info!(
        section_id = id,
        promotions = promotions.rows_affected,
        links = links.rows_affected,
        "section deleted"
    );
    Ok(())
}
