use sea_orm::{entity::prelude::*, ConnectionTrait, Set};
use serde::{Deserialize, Serialize};

use crate::errors;
use crate::{country, section};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "promotion")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub section_id: i32,
    pub country_id: i32,
    pub start_date: DateTime,
    pub end_date: DateTime,
    pub product_name: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { Section, Country }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Section => Entity::belongs_to(section::Entity).from(Column::SectionId).to(section::Column::Id).into(),
            Relation::Country => Entity::belongs_to(country::Entity).from(Column::CountryId).to(country::Column::Id).into(),
        }
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Insert a promotion. The date range is stored as given.
pub async fn create<C: ConnectionTrait>(
    db: &C,
    section_id: i32,
    country_id: i32,
    start_date: DateTime,
    end_date: DateTime,
    product_name: Option<&str>,
) -> Result<Model, errors::ModelError> {
    let am = ActiveModel {
        section_id: Set(section_id),
        country_id: Set(country_id),
        start_date: Set(start_date),
        end_date: Set(end_date),
        product_name: Set(product_name.map(str::to_string)),
        ..Default::default()
    };
    am.insert(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}
