use crate::{
    db::DbPool,
    entities::submitter::{self, Entity as SubmitterEntity},
    errors::ServiceError,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};
use std::sync::Arc;
use tracing::{info, instrument, warn};

pub const NAME_REQUIRED: &str = "Name is required";
pub const NAME_TAKEN: &str = "Name already registered";

/// Service for the registry of people allowed to submit movements
#[derive(Clone)]
pub struct SubmitterService {
    db_pool: Arc<DbPool>,
}

impl SubmitterService {
    pub fn new(db_pool: Arc<DbPool>) -> Self {
        Self { db_pool }
    }

    /// Registered names in ascending order
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<String>, ServiceError> {
        let db = &*self.db_pool;
        let names = SubmitterEntity::find()
            .select_only()
            .column(submitter::Column::Name)
            .order_by_asc(submitter::Column::Name)
            .into_tuple::<String>()
            .all(db)
            .await
            .map_err(ServiceError::db_error)?;

        Ok(names)
    }

    /// Registers a new submitter and returns the stored (trimmed) name.
    ///
    /// Names are compared exactly after trimming; "alice" and "Alice" are distinct.
    #[instrument(skip(self))]
    pub async fn register(&self, name: Option<String>) -> Result<String, ServiceError> {
        let name = normalize_name(name.as_deref())
            .ok_or_else(|| ServiceError::ValidationError(NAME_REQUIRED.to_string()))?;

        let db = &*self.db_pool;
        let existing = SubmitterEntity::find()
            .filter(submitter::Column::Name.eq(name.as_str()))
            .one(db)
            .await
            .map_err(ServiceError::db_error)?;
        if existing.is_some() {
            return Err(ServiceError::Conflict(NAME_TAKEN.to_string()));
        }

        let stored = submitter::ActiveModel {
            name: Set(name),
            ..Default::default()
        }
        .insert(db)
        .await
        .map_err(|e| {
            // A concurrent registration of the same name can win between the check and the insert
            if ServiceError::is_unique_violation(&e) {
                warn!("Submitter registered concurrently");
                ServiceError::Conflict(NAME_TAKEN.to_string())
            } else {
                ServiceError::db_error(e)
            }
        })?;

        info!(id = stored.id, name = %stored.name, "Submitter registered");
        Ok(stored.name)
    }
}

/// Trims a candidate name; blank or absent names yield `None`.
///
/// A byte-order mark counts as whitespace here.
pub fn normalize_name(raw: Option<&str>) -> Option<String> {
    raw.map(|name| name.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}'))
        .filter(|name| !name.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(None)]
    #[case(Some(""))]
    #[case(Some("   "))]
    #[case(Some("\t\n"))]
    #[case(Some("\u{feff}"))]
    fn blank_names_are_rejected(#[case] raw: Option<&str>) {
        assert_eq!(normalize_name(raw), None);
    }

    #[test]
    fn names_are_trimmed() {
        assert_eq!(
            normalize_name(Some("  New Person ")),
            Some("New Person".to_string())
        );
    }

    #[test]
    fn byte_order_mark_is_trimmed() {
        assert_eq!(
            normalize_name(Some("\u{feff}New Person\u{feff} ")),
            Some("New Person".to_string())
        );
    }
}
