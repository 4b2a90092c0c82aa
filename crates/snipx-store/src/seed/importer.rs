//! Seed importer

use crate::errors::{from_rusqlite, Result};
use crate::repo::{AccountsRepo, SqliteRepo};
use crate::seed::format_v0::SeedV0;
use crate::seed::parser::{parse_seed_file, parse_seed_str};
use rusqlite::Connection;
use snipx_core::credentials::hash_password;
use std::path::Path;

/// What an import changed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedImportReport {
    pub languages_inserted: usize,
    pub languages_updated: usize,
    pub users_inserted: usize,
    pub users_skipped: usize,
}

/// Parse, validate and import a seed file
pub fn import_seed(path: &Path, conn: &mut Connection) -> Result<SeedImportReport> {
    let seed = parse_seed_file(path)?;
    import(&seed, conn)
}

pub fn import_seed_str(content: &str, conn: &mut Connection) -> Result<SeedImportReport> {
    let seed = parse_seed_str(content)?;
    import(&seed, conn)
}

/// Apply a validated seed in one transaction
///
/// Languages are matched by slug and renamed in place; users that already
/// exist are left untouched, password included.
fn import(seed: &SeedV0, conn: &mut Connection) -> Result<SeedImportReport> {
    let mut report = SeedImportReport::default();
    let now = chrono::Utc::now();
    let tx = conn.transaction().map_err(from_rusqlite)?;

    for language in &seed.languages {
        let slug = language.effective_slug();
        let (_, inserted) = SqliteRepo::upsert_language(&tx, language.name.trim(), &slug)?;
        if inserted {
            report.languages_inserted += 1;
        } else {
            report.languages_updated += 1;
        }
    }

    for user in &seed.users {
        if AccountsRepo::get_user_by_username(&tx, &user.username)?.is_some() {
            tracing::debug!(username = %user.username, "seed user exists, skipped");
            report.users_skipped += 1;
            continue;
        }
        let hash = hash_password(&user.password)?;
        AccountsRepo::insert_user(&tx, &user.username, user.email.as_deref(), &hash, now)?;
        report.users_inserted += 1;
    }

    tx.commit().map_err(from_rusqlite)?;
    tracing::debug!(?report, "seed imported");
    Ok(report)
}
