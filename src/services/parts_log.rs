use crate::{
    db::DbPool,
    entities::parts_log::{self, Column, Entity as PartsLogEntity, Model as PartsLogEntry},
    errors::ServiceError,
};
use chrono::Utc;
use sea_orm::{
    sea_query::{Expr, Query, SimpleExpr},
    ConnectionTrait, EntityTrait, QueryOrder,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info, instrument};
use utoipa::ToSchema;

/// CSV header, in column order
pub const CSV_COLUMNS: [&str; 13] = [
    "_ts",
    "part_name",
    "etching",
    "last_move_date",
    "last_location",
    "reason_to_last",
    "current_move_date",
    "next_location",
    "reason_to_next",
    "part_status",
    "issues",
    "dept",
    "submitted_by",
];

pub const CSV_CONTENT_TYPE: &str = "text/csv";
pub const CSV_FILENAME: &str = "partslog.csv";

/// A movement record as submitted. Every field is optional and stored as "" when absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct NewPartsLogEntry {
    #[schema(example = "Widget A")]
    pub part_name: Option<String>,
    #[schema(example = "A-100")]
    pub etching: Option<String>,
    pub last_move_date: Option<String>,
    pub last_location: Option<String>,
    pub reason_to_last: Option<String>,
    #[schema(example = "2025-11-12")]
    pub current_move_date: Option<String>,
    pub next_location: Option<String>,
    pub reason_to_next: Option<String>,
    pub part_status: Option<String>,
    pub issues: Option<String>,
    pub dept: Option<String>,
    pub submitted_by: Option<String>,
}

impl NewPartsLogEntry {
    /// Column/value pairs for the twelve text columns, absent fields as ""
    fn text_values(self) -> [(Column, String); 12] {
        [
            (Column::PartName, self.part_name.unwrap_or_default()),
            (Column::Etching, self.etching.unwrap_or_default()),
            (Column::LastMoveDate, self.last_move_date.unwrap_or_default()),
            (Column::LastLocation, self.last_location.unwrap_or_default()),
            (Column::ReasonToLast, self.reason_to_last.unwrap_or_default()),
            (
                Column::CurrentMoveDate,
                self.current_move_date.unwrap_or_default(),
            ),
            (Column::NextLocation, self.next_location.unwrap_or_default()),
            (Column::ReasonToNext, self.reason_to_next.unwrap_or_default()),
            (Column::PartStatus, self.part_status.unwrap_or_default()),
            (Column::Issues, self.issues.unwrap_or_default()),
            (Column::Dept, self.dept.unwrap_or_default()),
            (Column::SubmittedBy, self.submitted_by.unwrap_or_default()),
        ]
    }
}

/// Timestamp for a new row: wall-clock millis, bumped past the newest stored row.
///
/// Evaluated inside the INSERT so the read of MAX(_ts) and the write are one statement.
fn next_timestamp_expr(now_millis: i64) -> SimpleExpr {
    Expr::cust_with_values(
        r#"MAX(?, COALESCE((SELECT MAX("_ts") FROM "partslog") + 1, 0))"#,
        [now_millis],
    )
}

/// Service for the append-only movement log
#[derive(Clone)]
pub struct PartsLogService {
    db_pool: Arc<DbPool>,
}

impl PartsLogService {
    pub fn new(db_pool: Arc<DbPool>) -> Self {
        Self { db_pool }
    }

    /// Appends an entry and returns the stored row as read back from the database
    #[instrument(skip(self, entry), fields(part_name = ?entry.part_name, etching = ?entry.etching))]
    pub async fn submit(&self, entry: NewPartsLogEntry) -> Result<PartsLogEntry, ServiceError> {
        let db = &*self.db_pool;
        let (columns, values): (Vec<Column>, Vec<SimpleExpr>) = entry
            .text_values()
            .into_iter()
            .map(|(column, value)| (column, SimpleExpr::from(value)))
            .unzip();

        let mut insert = Query::insert();
        insert
            .into_table(PartsLogEntity)
            .columns(std::iter::once(Column::Ts).chain(columns))
            .values(std::iter::once(next_timestamp_expr(Utc::now().timestamp_millis())).chain(values))
            .map_err(|e| ServiceError::InternalError(format!("building insert: {}", e)))?;

        let result = db
            .execute(db.get_database_backend().build(&insert))
            .await
            .map_err(|e| {
                error!("Failed to insert parts log entry: {}", e);
                ServiceError::db_error(e)
            })?;

        let id = i32::try_from(result.last_insert_id()).map_err(|_| {
            ServiceError::InternalError(format!(
                "insert id {} out of range",
                result.last_insert_id()
            ))
        })?;

        let stored = PartsLogEntity::find_by_id(id)
            .one(db)
            .await
            .map_err(|e| {
                error!(id, "Failed to read back parts log entry: {}", e);
                ServiceError::db_error(e)
            })?
            .ok_or_else(|| {
                ServiceError::InternalError(format!("parts log entry {} missing after insert", id))
            })?;

        info!(id = stored.id, ts = stored.ts, "Parts log entry recorded");
        Ok(stored)
    }

    /// All entries, newest first
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<PartsLogEntry>, ServiceError> {
        let db = &*self.db_pool;
        let entries = PartsLogEntity::find()
            .order_by_desc(Column::Ts)
            .order_by_desc(Column::Id)
            .all(db)
            .await
            .map_err(ServiceError::db_error)?;

        Ok(entries)
    }

    /// CSV rendering of [`Self::list`]
    #[instrument(skip(self))]
    pub async fn export_csv(&self) -> Result<String, ServiceError> {
        let entries = self.list().await?;
        Ok(render_csv(&entries))
    }
}

/// Renders entries as CSV: a header line and one fully quoted line per entry.
///
/// An empty slice renders as an empty string (no header).
pub fn render_csv(entries: &[parts_log::Model]) -> String {
    if entries.is_empty() {
        return String::new();
    }

    let mut lines = Vec::with_capacity(entries.len() + 1);
    lines.push(CSV_COLUMNS.join(","));

    for entry in entries {
        let row = csv_values(entry)
            .iter()
            .map(|value| escape_field(value))
            .collect::<Vec<_>>();
        lines.push(row.join(","));
    }

    lines.join("\n")
}

fn csv_values(entry: &parts_log::Model) -> [String; 13] {
    [
        entry.ts.to_string(),
        entry.part_name.clone(),
        entry.etching.clone(),
        entry.last_move_date.clone(),
        entry.last_location.clone(),
        entry.reason_to_last.clone(),
        entry.current_move_date.clone(),
        entry.next_location.clone(),
        entry.reason_to_next.clone(),
        entry.part_status.clone(),
        entry.issues.clone(),
        entry.dept.clone(),
        entry.submitted_by.clone(),
    ]
}

/// Quotes a field, doubling embedded quotes and flattening newlines to spaces
pub fn escape_field(value: &str) -> String {
    let escaped = value.replace('"', "\"\"").replace('\n', " ");
    format!("\"{escaped}\"")
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn entry(id: i32, ts: i64, part_name: &str, issues: &str) -> parts_log::Model {
        parts_log::Model {
            id,
            ts,
            part_name: part_name.to_string(),
            etching: "A-100".to_string(),
            last_move_date: String::new(),
            last_location: String::new(),
            reason_to_last: String::new(),
            current_move_date: "2025-11-12".to_string(),
            next_location: String::new(),
            reason_to_next: String::new(),
            part_status: String::new(),
            issues: issues.to_string(),
            dept: String::new(),
            submitted_by: "Judah Jodrey".to_string(),
        }
    }

    #[test]
    fn empty_log_renders_empty_body() {
        assert_eq!(render_csv(&[]), "");
    }

    #[test]
    fn header_matches_fixed_column_order() {
        let csv = render_csv(&[entry(1, 10, "Widget A", "")]);
        let header = csv.lines().next().unwrap();
        assert_eq!(
            header,
            "_ts,part_name,etching,last_move_date,last_location,reason_to_last,current_move_date,next_location,reason_to_next,part_status,issues,dept,submitted_by"
        );
    }

    #[test]
    fn rows_are_quoted_and_escaped() {
        let csv = render_csv(&[entry(1, 1731400000000, "Widget \"A\"", "bent\nflange")]);
        let lines: Vec<&str> = csv.split('\n').collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[1],
            r#""1731400000000","Widget ""A""","A-100","","","","2025-11-12","","","","bent flange","","Judah Jodrey""#
        );
    }

    #[test]
    fn one_line_per_entry_without_trailing_newline() {
        let csv = render_csv(&[entry(2, 20, "B", ""), entry(1, 10, "A", "")]);
        assert!(!csv.ends_with('\n'));
        assert_eq!(csv.split('\n').count(), 3);
    }

    #[test]
    fn absent_fields_default_to_empty_strings() {
        let values = NewPartsLogEntry {
            part_name: Some("UnitTestPart".into()),
            ..Default::default()
        }
        .text_values();

        assert_eq!(values[0].1, "UnitTestPart");
        assert!(values[1..].iter().all(|(_, v)| v.is_empty()));
    }

    proptest! {
        #[test]
        fn escaped_field_round_trips(value in ".*") {
            let escaped = escape_field(&value);
            prop_assert!(escaped.starts_with('"') && escaped.ends_with('"'));
            prop_assert!(!escaped.contains('\n'));

            let inner = &escaped[1..escaped.len() - 1];
            prop_assert_eq!(inner.replace("\"\"", "\""), value.replace('\n', " "));
        }
    }
}
