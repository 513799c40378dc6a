use sea_orm::{entity::prelude::*, ConnectionTrait, Set};
use serde::{Deserialize, Serialize};

use crate::errors;
use crate::{customer, section};

/// Join row of the customer/section many-to-many ("interested sections").
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "customer_section")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub customer_id: i32,
    #[sea_orm(primary_key, auto_increment = false)]
    pub section_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { Customer, Section }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Customer => Entity::belongs_to(customer::Entity).from(Column::CustomerId).to(customer::Column::Id).into(),
            Relation::Section => Entity::belongs_to(section::Entity).from(Column::SectionId).to(section::Column::Id).into(),
        }
    }
}

impl ActiveModelBehavior for ActiveModel {}

pub async fn create<C: ConnectionTrait>(db: &C, customer_id: i32, section_id: i32) -> Result<Model, errors::ModelError> {
    let am = ActiveModel {
        customer_id: Set(customer_id),
        section_id: Set(section_id),
    };
    Entity::insert(am)
        .exec_without_returning(db)
        .await
        .map_err(|e| errors::ModelError::Db(e.to_string()))?;
    Ok(Model { customer_id, section_id })
}
