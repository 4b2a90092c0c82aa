//! Schema migrations
//!
//! SQL files are embedded at compile time, applied in order, and recorded in
//! `schema_version` with their SHA-256 checksum.

mod checksums;
mod embedded;
mod runner;

pub use checksums::compute_checksum;
pub use embedded::{get_migrations, Migration};
pub use runner::{applied_migrations, apply_migrations, AppliedMigration};
