use crate::{
    db::DbPool,
    entities::etching::{self, Entity as EtchingEntity},
    errors::ServiceError,
};
use sea_orm::{EntityTrait, QueryOrder};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::instrument;
use utoipa::ToSchema;

/// A known (part, etching) pair as exposed to clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct EtchingView {
    #[schema(example = "Widget A")]
    pub part_name: String,
    #[schema(example = "A-100")]
    pub etching: String,
    #[schema(example = "In Service")]
    pub status: String,
}

impl From<etching::Model> for EtchingView {
    fn from(model: etching::Model) -> Self {
        Self {
            part_name: model.part_name,
            etching: model.etching,
            status: model.status,
        }
    }
}

/// Read-only access to the etchings catalog
#[derive(Clone)]
pub struct EtchingService {
    db_pool: Arc<DbPool>,
}

impl EtchingService {
    pub fn new(db_pool: Arc<DbPool>) -> Self {
        Self { db_pool }
    }

    /// All etchings in insertion order
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<EtchingView>, ServiceError> {
        let db = &*self.db_pool;
        let rows = EtchingEntity::find()
            .order_by_asc(etching::Column::Id)
            .all(db)
            .await
            .map_err(ServiceError::db_error)?;

        Ok(rows.into_iter().map(EtchingView::from).collect())
    }
}
