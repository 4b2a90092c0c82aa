use clap::{Args, Subcommand};
use snipx_core::model::Viewer;
use snipx_engine::commands::admin::language_add;
use snipx_engine::{apply_engine_query, EngineQuery};

use crate::config::DbArgs;

#[derive(Debug, Args)]
pub struct LanguageArgs {
    #[command(subcommand)]
    pub command: LanguageCommand,
}

#[derive(Debug, Subcommand)]
pub enum LanguageCommand {
    /// Add a language to the catalog
    Add(AddArgs),
    /// List the catalog
    List(DbArgs),
}

#[derive(Debug, Args)]
pub struct AddArgs {
    /// Display name, e.g. "Objective-C"
    pub name: String,

    /// URL slug; derived from the name when omitted
    #[arg(long)]
    pub slug: Option<String>,

    #[command(flatten)]
    pub db: DbArgs,
}

pub fn execute(args: LanguageArgs) -> anyhow::Result<()> {
    match args.command {
        LanguageCommand::Add(add) => {
            let conn = super::open_db(&add.db)?;
            let language = language_add(&add.name, add.slug.as_deref(), &conn)?;
            println!("Added {} ({})", language.name, language.slug);
        }
        LanguageCommand::List(db) => {
            let conn = super::open_db(&db)?;
            let languages =
                apply_engine_query(EngineQuery::LanguageList, &conn, &Viewer::Anonymous)?
                    .into_languages()?;
            for language in languages {
                println!("{}\t{}", language.slug, language.name);
            }
        }
    }
    Ok(())
}
