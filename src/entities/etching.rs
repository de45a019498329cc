use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A part identified by the code etched onto it.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "etchings")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub part_name: String,
    pub etching: String,
    pub status: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
