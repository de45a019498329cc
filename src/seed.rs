//! Default rows inserted into empty tables on first start.
//!
//! Each table is gated on its own row count. The count and the inserts run in
//! one transaction that takes the SQLite write lock before counting, so a
//! concurrent seeder waits for the first one to commit and then sees rows.

use crate::db::DbPool;
use crate::entities::{etching, submitter};
use crate::errors::ServiceError;
use sea_orm::{
    sea_query::{Expr, Query},
    ActiveModelTrait, ConnectionTrait, DatabaseTransaction, EntityTrait,
    PaginatorTrait, Set, TransactionTrait,
};
use tracing::{debug, info, instrument};

/// (part_name, etching, status)
pub const DEFAULT_ETCHINGS: [(&str, &str, &str); 4] = [
    ("Widget A", "A-100", "In Service"),
    ("Widget A", "A-101", "In Service"),
    ("Widget B", "B-200", "In Service"),
    ("Widget C", "C-300", "Retired"),
];

pub const DEFAULT_SUBMITTERS: [&str; 4] = [
    "Judah Jodrey",
    "Kaitlyn Arlotta",
    "David Pitman",
    "Madelyn Ricepelekpo",
];

/// Rows inserted by a seeding pass
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeedReport {
    pub etchings: usize,
    pub submitters: usize,
}

/// Seeds both tables, skipping any table that already has rows.
#[instrument(skip(db))]
pub async fn seed_defaults(db: &DbPool) -> Result<SeedReport, ServiceError> {
    let report = SeedReport {
        etchings: seed_etchings(db).await?,
        submitters: seed_submitters(db).await?,
    };

    info!(
        etchings = report.etchings,
        submitters = report.submitters,
        "Seeding finished"
    );
    Ok(report)
}

async fn seed_etchings(db: &DbPool) -> Result<usize, ServiceError> {
    let txn = db.begin().await?;
    lock_for_write(&txn, etching::Entity).await?;

    if etching::Entity::find().count(&txn).await? > 0 {
        txn.rollback().await?;
        return Ok(0);
    }

    for (part_name, code, status) in DEFAULT_ETCHINGS {
        etching::ActiveModel {
            part_name: Set(part_name.to_string()),
            etching: Set(code.to_string()),
            status: Set(status.to_string()),
            ..Default::default()
        }
        .insert(&txn)
        .await?;
    }

    txn.commit().await?;
    Ok(DEFAULT_ETCHINGS.len())
}

async fn seed_submitters(db: &DbPool) -> Result<usize, ServiceError> {
    let txn = db.begin().await?;
    lock_for_write(&txn, submitter::Entity).await?;

    if submitter::Entity::find().count(&txn).await? > 0 {
        txn.rollback().await?;
        return Ok(0);
    }

    for name in DEFAULT_SUBMITTERS {
        submitter::ActiveModel {
            name: Set(name.to_string()),
            ..Default::default()
        }
        .insert(&txn)
        .await?;
    }

    txn.commit().await?;
    Ok(DEFAULT_SUBMITTERS.len())
}

/// Takes the database write lock for `txn` without changing any row.
///
/// Must run before the first read: a transaction that reads and then writes
/// fails with "database is locked" against a concurrent writer instead of
/// waiting out the busy timeout.
async fn lock_for_write<E>(txn: &DatabaseTransaction, table: E) -> Result<(), ServiceError>
where
    E: EntityTrait,
{
    let noop_delete = Query::delete()
        .from_table(table)
        .and_where(Expr::cust("0"))
        .to_owned();
    txn.execute(txn.get_database_backend().build(&noop_delete))
        .await?;
    debug!("Seed transaction holds the write lock");
    Ok(())
}
