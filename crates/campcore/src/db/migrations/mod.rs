//! Embedded camp schema.
//!
//! Each step is one SQL file applied at most once. The last applied step is
//! recorded in `PRAGMA user_version`, so step numbers start at 1 and never
//! skip.

use crate::db::{DbError, DbResult};
use log::info;
use rusqlite::Connection;
use std::cmp::Ordering;

const STEPS: [(u32, &str); 2] = [
    (1, include_str!("0001_camps.sql")),
    (2, include_str!("0002_speakers_talks.sql")),
];

/// Schema version this build creates and expects.
pub fn latest_version() -> u32 {
    STEPS.last().map_or(0, |(version, _)| *version)
}

/// Brings the schema up to `latest_version()` in one transaction.
///
/// Returns the version the database was at before the call.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<u32> {
    let found = current_user_version(conn)?;
    let supported = latest_version();
    match found.cmp(&supported) {
        Ordering::Greater => return Err(DbError::SchemaTooNew { found, supported }),
        Ordering::Equal => return Ok(found),
        Ordering::Less => {}
    }

    let tx = conn.transaction()?;
    for (version, sql) in STEPS.iter().filter(|(version, _)| *version > found) {
        tx.execute_batch(sql)?;
        tx.pragma_update(None, "user_version", version)?;
    }
    tx.commit()?;

    info!("event=db_migrate module=db status=ok from_version={found} to_version={supported}");
    Ok(found)
}

/// Schema version recorded on the connection; 0 for a fresh database.
pub fn current_user_version(conn: &Connection) -> DbResult<u32> {
    Ok(conn.pragma_query_value(None, "user_version", |row| row.get(0))?)
}
