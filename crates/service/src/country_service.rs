use sea_orm::{ColumnTrait, Condition, ConnectionTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QuerySelect, TransactionTrait};
use tracing::{info, warn};

use models::{city, country, customer, promotion};
use crate::errors::ServiceError;

/// Find a country by its unique name.
pub async fn find_country_by_name<C: ConnectionTrait>(db: &C, name: &str) -> Result<Option<country::Model>, ServiceError> {
    country::Entity::find()
        .filter(country::Column::Name.eq(name))
        .one(db).await.map_err(ServiceError::storage)
}

pub(crate) async fn require_country<C: ConnectionTrait>(db: &C, name: &str) -> Result<country::Model, ServiceError> {
    find_country_by_name(db, name).await?
        .ok_or_else(|| ServiceError::NotFound(format!("country '{}' not found", name)))
}

/// Get country by id.
pub async fn get_country<C: ConnectionTrait>(db: &C, id: i32) -> Result<Option<country::Model>, ServiceError> {
    country::Entity::find_by_id(id).one(db).await.map_err(ServiceError::storage)
}

/// Create a country; names are unique.
pub async fn add_country(db: &DatabaseConnection, name: &str) -> Result<country::Model, ServiceError> {
    country::validate_name(name)?;
    let txn = db.begin().await.map_err(ServiceError::storage)?;
    if find_country_by_name(&txn, name).await?.is_some() {
        warn!(%name, "country already exists");
        return Err(ServiceError::DuplicateName(format!("country '{}' already exists", name)));
    }
    let created = country::create(&txn, name).await?;
    txn.commit().await.map_err(ServiceError::storage)?;
    info!(country_id = created.id, %name, "country added");
    Ok(created)
}

/// Delete a country together with its cities and promotions.
///
/// Rejected with `InUse` while any customer lives in the country or in one of its
/// cities, whatever country that customer is registered under.
pub async fn delete_country(db: &DatabaseConnection, id: i32) -> Result<(), ServiceError> {
    let txn = db.begin().await.map_err(ServiceError::storage)?;
    let found = country::Entity::find_by_id(id)
        .one(&txn).await.map_err(ServiceError::storage)?
        .ok_or_else(|| ServiceError::not_found("country"))?;

    let city_ids: Vec<i32> = city::Entity::find()
        .select_only()
        .column(city::Column::Id)
        .filter(city::Column::CountryId.eq(id))
        .into_tuple()
        .all(&txn).await.map_err(ServiceError::storage)?;
    let residents = customer::Entity::find()
        .filter(
            Condition::any()
                .add(customer::Column::CountryId.eq(id))
                .add(customer::Column::CityId.is_in(city_ids.clone())),
        )
        .count(&txn).await.map_err(ServiceError::storage)?;
    if residents > 0 {
        warn!(country_id = id, residents, "country still has customers");
        return Err(ServiceError::InUse(format!("country '{}' has {} customer(s)", found.name, residents)));
    }

    let promotions = promotion::Entity::delete_many()
        .filter(promotion::Column::CountryId.eq(id))
        .exec(&txn).await.map_err(ServiceError::storage)?;
    let cities = city::Entity::delete_many()
        .filter(city::Column::CountryId.eq(id))
        .exec(&txn).await.map_err(ServiceError::storage)?;
    country::Entity::delete_by_id(id).exec(&txn).await.map_err(ServiceError::storage)?;
    txn.commit().await.map_err(ServiceError::storage)?;

    info!(
        country_id = id,
        cities = cities.rows_affected,
        promotions = promotions.rows_affected,
        "country deleted"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{date, datetime, get_db};

    #[tokio::test]
    async fn add_country_assigns_fresh_ids() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let a = add_country(&db, "A").await?;
        let b = add_country(&db, "B").await?;
        assert_ne!(a.id, b.id);

        let found = find_country_by_name(&db, "A").await?.unwrap();
        assert_eq!(found, a);
        assert_eq!(get_country(&db, b.id).await?, Some(b));
        Ok(())
    }

    #[tokio::test]
    async fn duplicate_country_rejected() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        add_country(&db, "A").await?;
        let err = add_country(&db, "A").await.unwrap_err();
        assert!(matches!(err, ServiceError::DuplicateName(_)));
        assert_eq!(country::Entity::find().count(&db).await?, 1);
        Ok(())
    }

    #[tokio::test]
    async fn blank_country_rejected() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        assert!(matches!(add_country(&db, " ").await, Err(ServiceError::Validation(_))));
        Ok(())
    }

    #[tokio::test]
    async fn delete_missing_country() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        assert!(matches!(delete_country(&db, 42).await, Err(ServiceError::NotFound(_))));
        Ok(())
    }

    #[tokio::test]
    async fn delete_country_cascades_cities_and_promotions() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let a = add_country(&db, "A").await?;
        let b = add_country(&db, "B").await?;
        city::create(&db, "X", a.id).await?;
        city::create(&db, "Y", b.id).await?;
        let s = models::section::create(&db, "S").await?;
        promotion::create(&db, s.id, a.id, datetime(2024, 1, 1), datetime(2024, 2, 1), Some("P")).await?;
        promotion::create(&db, s.id, b.id, datetime(2024, 1, 1), datetime(2024, 2, 1), Some("Q")).await?;

        delete_country(&db, a.id).await?;

        assert!(get_country(&db, a.id).await?.is_none());
        let cities = city::Entity::find().all(&db).await?;
        assert_eq!(cities.len(), 1);
        assert_eq!(cities[0].country_id, b.id);
        let promos = promotion::Entity::find().all(&db).await?;
        assert_eq!(promos.len(), 1);
        assert_eq!(promos[0].product_name.as_deref(), Some("Q"));
        Ok(())
    }

    #[tokio::test]
    async fn delete_country_restricted_by_resident() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let a = add_country(&db, "A").await?;
        let x = city::create(&db, "X", a.id).await?;
        let cu = customer::create(&db, "Jane", date(1990, 1, 1), "F", "jane@example.com", a.id, x.id).await?;

        let err = delete_country(&db, a.id).await.unwrap_err();
        assert!(matches!(err, ServiceError::InUse(_)));
        assert!(get_country(&db, a.id).await?.is_some());
        assert!(city::Entity::find_by_id(x.id).one(&db).await?.is_some());
        assert!(customer::Entity::find_by_id(cu.id).one(&db).await?.is_some());
        Ok(())
    }

    #[tokio::test]
    async fn delete_country_restricted_by_customer_of_other_country() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let a = add_country(&db, "A").await?;
        let b = add_country(&db, "B").await?;
        let x = city::create(&db, "X", a.id).await?;
        // registered under B but living in a city of A
        customer::create(&db, "Jane", date(1990, 1, 1), "F", "jane@example.com", b.id, x.id).await?;

        assert!(matches!(delete_country(&db, a.id).await, Err(ServiceError::InUse(_))));
        assert!(city::Entity::find_by_id(x.id).one(&db).await?.is_some());
        Ok(())
    }
}
