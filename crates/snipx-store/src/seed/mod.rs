//! Seed import
//!
//! Provides:
//! - Seed Format v0 schema
//! - YAML parser with validation
//! - Importer running in a single transaction

pub mod format_v0;
pub mod importer;
pub mod parser;

pub use format_v0::{SeedLanguage, SeedUser, SeedV0};
pub use importer::{import_seed, import_seed_str, SeedImportReport};
pub use parser::{parse_seed_file, parse_seed_str};
