use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One append-only movement record. Rows are never updated or deleted.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[sea_orm(table_name = "partslog")]
#[schema(as = PartsLogEntry)]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Creation time in epoch milliseconds; strictly increasing per insert
    #[sea_orm(column_name = "_ts")]
    #[serde(rename = "_ts")]
    pub ts: i64,
    pub part_name: String,
    pub etching: String,
    pub last_move_date: String,
    pub last_location: String,
    pub reason_to_last: String,
    pub current_move_date: String,
    pub next_location: String,
    pub reason_to_next: String,
    pub part_status: String,
    pub issues: String,
    pub dept: String,
    pub submitted_by: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
