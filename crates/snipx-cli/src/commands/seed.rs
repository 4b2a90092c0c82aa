//! Seed import command
//!
//! Usage: snipx seed import <PATH>

use std::path::PathBuf;

use clap::{Args, Subcommand};
use snipx_store::seed::import_seed;

use crate::config::DbArgs;

#[derive(Debug, Args)]
pub struct SeedArgs {
    #[command(subcommand)]
    pub command: SeedCommand,
}

#[derive(Debug, Subcommand)]
pub enum SeedCommand {
    /// Import a seed YAML file or a directory of them
    Import(ImportArgs),
}

#[derive(Debug, Args)]
pub struct ImportArgs {
    pub path: PathBuf,

    #[command(flatten)]
    pub db: DbArgs,
}

pub fn execute(args: SeedArgs) -> anyhow::Result<()> {
    match args.command {
        SeedCommand::Import(import_args) => execute_import(import_args),
    }
}

fn execute_import(args: ImportArgs) -> anyhow::Result<()> {
    let mut conn = super::open_db(&args.db)?;

    let seed_files = if args.path.is_dir() {
        // Sorted so a directory imports in a stable order
        let mut files: Vec<PathBuf> = std::fs::read_dir(&args.path)?
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| {
                p.extension()
                    .map(|ext| ext == "yaml" || ext == "yml")
                    .unwrap_or(false)
            })
            .collect();
        files.sort();
        files
    } else {
        vec![args.path]
    };

    for seed_file in seed_files {
        println!("Importing {}...", seed_file.display());
        let report = import_seed(&seed_file, &mut conn)?;
        println!(
            "Imported: {} language(s) added, {} updated; {} user(s) added, {} skipped",
            report.languages_inserted,
            report.languages_updated,
            report.users_inserted,
            report.users_skipped
        );
    }
    Ok(())
}
