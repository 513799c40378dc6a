use sea_orm::{entity::prelude::*, ConnectionTrait, Set};
use serde::{Deserialize, Serialize};

use crate::errors;
use crate::{city, country};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "customer")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub full_name: String,
    pub date_of_birth: Date,
    pub gender: String,
    #[sea_orm(unique)]
    pub email: String,
    pub country_id: i32,
    pub city_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Country,
    City,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Country => Entity::belongs_to(country::Entity).from(Column::CountryId).to(country::Column::Id).into(),
            Relation::City => Entity::belongs_to(city::Entity).from(Column::CityId).to(city::Column::Id).into(),
        }
    }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_name(name: &str) -> Result<(), errors::ModelError> {
    if name.trim().is_empty() { return Err(errors::ModelError::Validation("full name required".into())); }
    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), errors::ModelError> {
    if !email.contains('@') { return Err(errors::ModelError::Validation("invalid email".into())); }
    Ok(())
}

/// Insert a customer; the caller has already resolved `country_id` and `city_id`.
#[allow(clippy::too_many_arguments)]
pub async fn create<C: ConnectionTrait>(
    db: &C,
    full_name: &str,
    date_of_birth: Date,
    gender: &str,
    email: &str,
    country_id: i32,
    city_id: i32,
) -> Result<Model, errors::ModelError> {
    validate_name(full_name)?;
    validate_email(email)?;
    let am = ActiveModel {
        full_name: Set(full_name.to_string()),
        date_of_birth: Set(date_of_birth),
        gender: Set(gender.to_string()),
        email: Set(email.to_string()),
        country_id: Set(country_id),
        city_id: Set(city_id),
        ..Default::default()
    };
    am.insert(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}
