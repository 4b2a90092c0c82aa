//! SnipX Store - SQLite persistence and seed import
//!
//! Provides:
//! - Connection setup (foreign keys, WAL)
//! - Embedded migrations with checksums
//! - Repositories for languages, snippets, users and sessions
//! - Seed Format v0 parser and importer

pub mod db;
pub mod errors;
pub mod migrations;
pub mod repo;
pub mod seed;

pub use errors::Result;
pub use repo::{AccountsRepo, SnippetFilter, SqliteRepo, StoredUser};
