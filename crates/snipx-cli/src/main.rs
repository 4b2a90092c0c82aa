//! SnipX CLI
//!
//! Runs the web server and the administrative commands that have no web
//! form: migrations, seed import, language and user management.

use clap::{Parser, Subcommand};

mod commands;
mod config;

#[derive(Debug, Parser)]
#[command(name = "snipx")]
#[command(version, about = "SnipX - code snippet sharing", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run the web server
    Serve(config::ServeArgs),
    /// Apply pending schema migrations
    Migrate(config::DbArgs),
    /// Seed import operations
    Seed(commands::seed::SeedArgs),
    /// Language catalog operations
    Language(commands::language::LanguageArgs),
    /// User account operations
    User(commands::user::UserArgs),
}

#[tokio::main]
async fn main() {
    // A missing .env is fine
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Serve(args) => commands::serve::execute(args).await,
        Commands::Migrate(args) => commands::migrate::execute(args),
        Commands::Seed(args) => commands::seed::execute(args),
        Commands::Language(args) => commands::language::execute(args),
        Commands::User(args) => commands::user::execute(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
