pub mod language;
pub mod migrate;
pub mod seed;
pub mod serve;
pub mod user;

use anyhow::Context;
use rusqlite::Connection;

use crate::config::DbArgs;

/// Open the database and bring its schema up to date
pub(crate) fn open_db(args: &DbArgs) -> anyhow::Result<Connection> {
    snipx_store::db::open_migrated(&args.db)
        .with_context(|| format!("cannot open database {}", args.db.display()))
}
