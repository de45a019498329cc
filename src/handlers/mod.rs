pub mod common;
pub mod etchings;
pub mod health;
pub mod parts_log;
pub mod submitters;

use crate::db::DbPool;
use crate::services::{
    etchings::EtchingService, parts_log::PartsLogService, submitters::SubmitterService,
};
use std::sync::Arc;

/// Services layer that encapsulates business logic used by HTTP handlers
#[derive(Clone)]
pub struct AppServices {
    pub etchings: Arc<EtchingService>,
    pub submitters: Arc<SubmitterService>,
    pub parts_log: Arc<PartsLogService>,
}

impl AppServices {
    pub fn new(db_pool: Arc<DbPool>) -> Self {
        Self {
            etchings: Arc::new(EtchingService::new(db_pool.clone())),
            submitters: Arc::new(SubmitterService::new(db_pool.clone())),
            parts_log: Arc::new(PartsLogService::new(db_pool)),
        }
    }
}
