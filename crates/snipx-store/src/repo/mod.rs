//! Repository layer
//!
//! Associated functions over a borrowed `Connection`. A `Transaction`
//! derefs to `Connection`, so the same functions work inside one.

pub mod accounts;
pub mod sqlite_repo;

pub use accounts::{AccountsRepo, StoredUser};
pub use sqlite_repo::{SnippetFilter, SqliteRepo};

use crate::errors::{corrupt_row, Result};
use chrono::{DateTime, TimeZone, Utc};

/// Timestamps are stored as Unix milliseconds
pub(crate) fn to_millis(at: DateTime<Utc>) -> i64 {
    at.timestamp_millis()
}

pub(crate) fn from_millis(table: &str, ms: i64) -> Result<DateTime<Utc>> {
    Utc.timestamp_millis_opt(ms)
        .single()
        .ok_or_else(|| corrupt_row(table, &format!("timestamp out of range: {}", ms)))
}
