use sea_orm::{entity::prelude::*, ConnectionTrait, Set};
use serde::{Deserialize, Serialize};

use crate::errors;
use crate::country;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "city")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub country_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Country,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self { Relation::Country => Entity::belongs_to(country::Entity).from(Column::CountryId).to(country::Column::Id).into() }
    }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_name(name: &str) -> Result<(), errors::ModelError> {
    if name.trim().is_empty() { return Err(errors::ModelError::Validation("city name required".into())); }
    Ok(())
}

pub async fn create<C: ConnectionTrait>(db: &C, name: &str, country_id: i32) -> Result<Model, errors::ModelError> {
    validate_name(name)?;
    let am = ActiveModel {
        name: Set(name.to_string()),
        country_id: Set(country_id),
        ..Default::default()
    };
    am.insert(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}
