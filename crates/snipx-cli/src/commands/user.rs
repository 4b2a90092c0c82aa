use clap::{Args, Subcommand};
use snipx_core::core_types::Sensitive;
use snipx_engine::commands::admin::user_add;

use crate::config::DbArgs;

#[derive(Debug, Args)]
pub struct UserArgs {
    #[command(subcommand)]
    pub command: UserCommand,
}

#[derive(Debug, Subcommand)]
pub enum UserCommand {
    /// Create an account
    Add(AddArgs),
}

#[derive(Debug, Args)]
pub struct AddArgs {
    pub username: String,

    /// Address for creation notices
    #[arg(long)]
    pub email: Option<String>,

    /// Environment variable: `SNIPX_USER_PASSWORD`
    #[arg(long, env = "SNIPX_USER_PASSWORD", hide_env_values = true)]
    pub password: String,

    #[command(flatten)]
    pub db: DbArgs,
}

pub fn execute(args: UserArgs) -> anyhow::Result<()> {
    match args.command {
        UserCommand::Add(add) => {
            let conn = super::open_db(&add.db)?;
            let password = Sensitive::new(add.password);
            let user = user_add(&add.username, add.email.as_deref(), &password, &conn)?;
            println!("Added user {} (id {})", user.username, user.id);
        }
    }
    Ok(())
}
