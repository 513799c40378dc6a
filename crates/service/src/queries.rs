//! Read-only traversals of the mailing list relations.
//!
//! Every query names its join path explicitly and returns rows in creation (id)
//! order. A name or id that matches nothing yields an empty list, not an error.

use std::collections::HashMap;

use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, JoinType, QueryFilter, QueryOrder, QuerySelect, RelationTrait};
use serde::Serialize;

use models::{city, country, customer, customer_section, promotion, section};
use crate::errors::ServiceError;

/// City joined with the name of its country.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CityView {
    #[serde(flatten)]
    pub city: city::Model,
    pub country_name: String,
}

/// Promotion joined with its section and country names.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PromotionView {
    #[serde(flatten)]
    pub promotion: promotion::Model,
    pub section_name: String,
    pub country_name: String,
}

pub async fn list_customers<C: ConnectionTrait>(db: &C) -> Result<Vec<customer::Model>, ServiceError> {
    customer::Entity::find()
        .order_by_asc(customer::Column::Id)
        .all(db).await.map_err(ServiceError::storage)
}

pub async fn list_emails<C: ConnectionTrait>(db: &C) -> Result<Vec<String>, ServiceError> {
    customer::Entity::find()
        .select_only()
        .column(customer::Column::Email)
        .order_by_asc(customer::Column::Id)
        .into_tuple()
        .all(db).await.map_err(ServiceError::storage)
}

pub async fn list_countries<C: ConnectionTrait>(db: &C) -> Result<Vec<country::Model>, ServiceError> {
    country::Entity::find()
        .order_by_asc(country::Column::Id)
        .all(db).await.map_err(ServiceError::storage)
}

pub async fn list_sections<C: ConnectionTrait>(db: &C) -> Result<Vec<section::Model>, ServiceError> {
    section::Entity::find()
        .order_by_asc(section::Column::Id)
        .all(db).await.map_err(ServiceError::storage)
}

/// Cities with their country names.
pub async fn list_cities<C: ConnectionTrait>(db: &C) -> Result<Vec<CityView>, ServiceError> {
    let cities = city::Entity::find()
        .order_by_asc(city::Column::Id)
        .all(db).await.map_err(ServiceError::storage)?;
    let names = country_names(db, cities.iter().map(|c| c.country_id).collect()).await?;
    Ok(cities
        .into_iter()
        .map(|city| CityView {
            country_name: names.get(&city.country_id).cloned().unwrap_or_default(),
            city,
        })
        .collect())
}

/// All promotions with their section and country names.
pub async fn list_promotions<C: ConnectionTrait>(db: &C) -> Result<Vec<PromotionView>, ServiceError> {
    let promotions = promotion::Entity::find()
        .order_by_asc(promotion::Column::Id)
        .all(db).await.map_err(ServiceError::storage)?;
    promotion_views(db, promotions).await
}

/// Customers living in any city with this name (City → Customers).
pub async fn list_customers_by_city<C: ConnectionTrait>(db: &C, city_name: &str) -> Result<Vec<customer::Model>, ServiceError> {
    let city_ids = city_ids_named(db, city_name).await?;
    customers_in_cities(db, city_ids).await
}

/// Customers registered under this country (Country → Customers).
pub async fn list_customers_by_country<C: ConnectionTrait>(db: &C, country_name: &str) -> Result<Vec<customer::Model>, ServiceError> {
    customer::Entity::find()
        .join(JoinType::InnerJoin, customer::Relation::Country.def())
        .filter(country::Column::Name.eq(country_name))
        .order_by_asc(customer::Column::Id)
        .all(db).await.map_err(ServiceError::storage)
}

/// Promotions run in this country (Country → Promotions).
pub async fn list_promotions_by_country<C: ConnectionTrait>(db: &C, country_name: &str) -> Result<Vec<PromotionView>, ServiceError> {
    let promotions = promotion::Entity::find()
        .join(JoinType::InnerJoin, promotion::Relation::Country.def())
        .filter(country::Column::Name.eq(country_name))
        .order_by_asc(promotion::Column::Id)
        .all(db).await.map_err(ServiceError::storage)?;
    promotion_views(db, promotions).await
}

/// Promotions of this section (Section → Promotions).
pub async fn list_promotions_by_section<C: ConnectionTrait>(db: &C, section_name: &str) -> Result<Vec<PromotionView>, ServiceError> {
    let promotions = promotion::Entity::find()
        .join(JoinType::InnerJoin, promotion::Relation::Section.def())
        .filter(section::Column::Name.eq(section_name))
        .order_by_asc(promotion::Column::Id)
        .all(db).await.map_err(ServiceError::storage)?;
    promotion_views(db, promotions).await
}

/// Sections a customer is interested in (Customer → CustomerSection → Sections).
pub async fn list_sections_by_customer<C: ConnectionTrait>(db: &C, customer_id: i32) -> Result<Vec<section::Model>, ServiceError> {
    let section_ids = section_ids_of_customers(db, vec![customer_id]).await?;
    section::Entity::find()
        .filter(section::Column::Id.is_in(section_ids))
        .order_by_asc(section::Column::Id)
        .all(db).await.map_err(ServiceError::storage)
}

/// Promotions reachable from a customer's sections, each promotion once
/// (Customer → CustomerSection → Sections → Promotions).
pub async fn list_promotions_by_customer<C: ConnectionTrait>(db: &C, customer_id: i32) -> Result<Vec<PromotionView>, ServiceError> {
    let section_ids = section_ids_of_customers(db, vec![customer_id]).await?;
    let promotions = promotions_in_sections(db, section_ids).await?;
    promotion_views(db, promotions).await
}

/// Promotions reachable from the customers of any city with this name, each
/// promotion once (City → Customers → CustomerSection → Sections → Promotions).
pub async fn list_promotions_by_city<C: ConnectionTrait>(db: &C, city_name: &str) -> Result<Vec<PromotionView>, ServiceError> {
    let city_ids = city_ids_named(db, city_name).await?;
    let customer_ids = customers_in_cities(db, city_ids).await?.into_iter().map(|c| c.id).collect();
    let section_ids = section_ids_of_customers(db, customer_ids).await?;
    let promotions = promotions_in_sections(db, section_ids).await?;
    promotion_views(db, promotions).await
}

async fn city_ids_named<C: ConnectionTrait>(db: &C, name: &str) -> Result<Vec<i32>, ServiceError> {
    city::Entity::find()
        .select_only()
        .column(city::Column::Id)
        .filter(city::Column::Name.eq(name))
        .into_tuple()
        .all(db).await.map_err(ServiceError::storage)
}

async fn customers_in_cities<C: ConnectionTrait>(db: &C, city_ids: Vec<i32>) -> Result<Vec<customer::Model>, ServiceError> {
    customer::Entity::find()
        .filter(customer::Column::CityId.is_in(city_ids))
        .order_by_asc(customer::Column::Id)
        .all(db).await.map_err(ServiceError::storage)
}

async fn section_ids_of_customers<C: ConnectionTrait>(db: &C, customer_ids: Vec<i32>) -> Result<Vec<i32>, ServiceError> {
    customer_section::Entity::find()
        .select_only()
        .column(customer_section::Column::SectionId)
        .filter(customer_section::Column::CustomerId.is_in(customer_ids))
        .distinct()
        .into_tuple()
        .all(db).await.map_err(ServiceError::storage)
}

/// Each promotion row matches at most once, so the result is distinct by id.
async fn promotions_in_sections<C: ConnectionTrait>(db: &C, section_ids: Vec<i32>) -> Result<Vec<promotion::Model>, ServiceError> {
    promotion::Entity::find()
        .filter(promotion::Column::SectionId.is_in(section_ids))
        .order_by_asc(promotion::Column::Id)
        .all(db).await.map_err(ServiceError::storage)
}

async fn country_names<C: ConnectionTrait>(db: &C, ids: Vec<i32>) -> Result<HashMap<i32, String>, ServiceError> {
    let rows = country::Entity::find()
        .filter(country::Column::Id.is_in(ids))
        .all(db).await.map_err(ServiceError::storage)?;
    Ok(rows.into_iter().map(|c| (c.id, c.name)).collect())
}

async fn section_names<C: ConnectionTrait>(db: &C, ids: Vec<i32>) -> Result<HashMap<i32, String>, ServiceError> {
    let rows = section::Entity::find()
        .filter(section::Column::Id.is_in(ids))
        .all(db).await.map_err(ServiceError::storage)?;
    Ok(rows.into_iter().map(|s| (s.id, s.name)).collect())
}

async fn promotion_views<C: ConnectionTrait>(db: &C, promotions: Vec<promotion::Model>) -> Result<Vec<PromotionView>, ServiceError> {
    let sections = section_names(db, promotions.iter().map(|p| p.section_id).collect()).await?;
    let countries = country_names(db, promotions.iter().map(|p| p.country_id).collect()).await?;
    Ok(promotions
        .into_iter()
        .map(|promotion| PromotionView {
            section_name: sections.get(&promotion.section_id).cloned().unwrap_or_default(),
            country_name: countries.get(&promotion.country_id).cloned().unwrap_or_default(),
            promotion,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::DatabaseConnection;
    use crate::city_service::add_city;
    use crate::country_service::add_country;
    use crate::customer_service::{add_customer, link_customer_section};
    use crate::promotion_service::add_promotion;
    use crate::section_service::add_section;
    use crate::test_support::{date, datetime, get_db};

    /// A{X, Y}, B{X}; sections S, T; promotions P(S,A), Q(T,A), R(S,B).
    async fn seed(db: &DatabaseConnection) -> Result<(), ServiceError> {
        add_country(db, "A").await?;
        add_country(db, "B").await?;
        add_city(db, "X", "A").await?;
        add_city(db, "Y", "A").await?;
        add_city(db, "X", "B").await?;
        add_section(db, "S").await?;
        add_section(db, "T").await?;
        let (start, end) = (datetime(2024, 1, 1), datetime(2024, 2, 1));
        add_promotion(db, "S", "A", start, end, Some("P")).await?;
        add_promotion(db, "T", "A", start, end, Some("Q")).await?;
        add_promotion(db, "S", "B", start, end, Some("R")).await?;
        Ok(())
    }

    fn products(views: &[PromotionView]) -> Vec<&str> {
        views.iter().filter_map(|v| v.promotion.product_name.as_deref()).collect()
    }

    #[tokio::test]
    async fn empty_store_yields_empty_lists() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        assert!(list_customers(&db).await?.is_empty());
        assert!(list_emails(&db).await?.is_empty());
        assert!(list_countries(&db).await?.is_empty());
        assert!(list_cities(&db).await?.is_empty());
        assert!(list_sections(&db).await?.is_empty());
        assert!(list_promotions(&db).await?.is_empty());
        assert!(list_customers_by_city(&db, "X").await?.is_empty());
        assert!(list_customers_by_country(&db, "A").await?.is_empty());
        assert!(list_promotions_by_country(&db, "A").await?.is_empty());
        assert!(list_promotions_by_section(&db, "S").await?.is_empty());
        assert!(list_sections_by_customer(&db, 1).await?.is_empty());
        assert!(list_promotions_by_customer(&db, 1).await?.is_empty());
        assert!(list_promotions_by_city(&db, "X").await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn listings_carry_parent_names_in_creation_order() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        seed(&db).await?;

        let cities = list_cities(&db).await?;
        let pairs: Vec<(&str, &str)> = cities.iter().map(|c| (c.city.name.as_str(), c.country_name.as_str())).collect();
        assert_eq!(pairs, vec![("X", "A"), ("Y", "A"), ("X", "B")]);

        let promos = list_promotions(&db).await?;
        assert_eq!(products(&promos), vec!["P", "Q", "R"]);
        assert_eq!(promos[1].section_name, "T");
        assert_eq!(promos[2].country_name, "B");

        let names: Vec<String> = list_countries(&db).await?.into_iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["A", "B"]);
        let sections: Vec<String> = list_sections(&db).await?.into_iter().map(|s| s.name).collect();
        assert_eq!(sections, vec!["S", "T"]);
        Ok(())
    }

    #[tokio::test]
    async fn promotions_by_country_and_section() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        seed(&db).await?;
        assert_eq!(products(&list_promotions_by_country(&db, "A").await?), vec!["P", "Q"]);
        assert_eq!(products(&list_promotions_by_country(&db, "B").await?), vec!["R"]);
        assert_eq!(products(&list_promotions_by_section(&db, "S").await?), vec!["P", "R"]);
        assert!(list_promotions_by_section(&db, "Nope").await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn customers_by_city_and_country() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        seed(&db).await?;
        let ann = add_customer(&db, "Ann", date(1990, 1, 1), "F", "ann@example.com", "A", "X").await?;
        let bob = add_customer(&db, "Bob", date(1985, 5, 5), "M", "bob@example.com", "B", "X").await?;
        let cat = add_customer(&db, "Cat", date(1970, 7, 7), "F", "cat@example.com", "A", "Y").await?;

        let in_x: Vec<i32> = list_customers_by_city(&db, "X").await?.iter().map(|c| c.id).collect();
        assert_eq!(in_x, vec![ann.id, bob.id]);
        let in_a: Vec<i32> = list_customers_by_country(&db, "A").await?.iter().map(|c| c.id).collect();
        assert_eq!(in_a, vec![ann.id, cat.id]);
        assert_eq!(
            list_emails(&db).await?,
            vec!["ann@example.com", "bob@example.com", "cat@example.com"]
        );
        Ok(())
    }

    #[tokio::test]
    async fn promotions_by_customer_follow_interested_sections() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        seed(&db).await?;
        let ann = add_customer(&db, "Ann", date(1990, 1, 1), "F", "ann@example.com", "A", "X").await?;
        assert!(list_promotions_by_customer(&db, ann.id).await?.is_empty());

        link_customer_section(&db, ann.id, "S").await?;
        link_customer_section(&db, ann.id, "S").await?;
        link_customer_section(&db, ann.id, "T").await?;

        let sections: Vec<String> = list_sections_by_customer(&db, ann.id).await?.into_iter().map(|s| s.name).collect();
        assert_eq!(sections, vec!["S", "T"]);

        let promos = list_promotions_by_customer(&db, ann.id).await?;
        assert_eq!(products(&promos), vec!["P", "Q", "R"]);
        let mut ids: Vec<i32> = promos.iter().map(|p| p.promotion.id).collect();
        ids.dedup();
        assert_eq!(ids.len(), promos.len());
        Ok(())
    }

    #[tokio::test]
    async fn promotions_by_city_are_distinct() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        seed(&db).await?;
        let ann = add_customer(&db, "Ann", date(1990, 1, 1), "F", "ann@example.com", "A", "X").await?;
        let bob = add_customer(&db, "Bob", date(1985, 5, 5), "M", "bob@example.com", "A", "X").await?;
        let cat = add_customer(&db, "Cat", date(1970, 7, 7), "F", "cat@example.com", "A", "Y").await?;
        link_customer_section(&db, ann.id, "S").await?;
        link_customer_section(&db, bob.id, "S").await?;
        link_customer_section(&db, cat.id, "T").await?;

        let in_x = list_promotions_by_city(&db, "X").await?;
        assert_eq!(products(&in_x), vec!["P", "R"]);
        let in_y = list_promotions_by_city(&db, "Y").await?;
        assert_eq!(products(&in_y), vec!["Q"]);
        assert_eq!(in_y[0].section_name, "T");
        assert_eq!(in_y[0].country_name, "A");
        Ok(())
    }

    #[tokio::test]
    async fn views_serialize_flat() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        seed(&db).await?;
        let view = &list_promotions_by_country(&db, "B").await?[0];
        let json = serde_json::to_value(view)?;
        assert_eq!(json["product_name"], "R");
        assert_eq!(json["section_name"], "S");
        assert_eq!(json["country_name"], "B");
        Ok(())
    }
}
