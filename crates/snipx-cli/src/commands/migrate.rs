use anyhow::Context;
use snipx_store::migrations::{applied_migrations, apply_migrations};

use crate::config::DbArgs;

pub fn execute(args: DbArgs) -> anyhow::Result<()> {
    let mut conn = snipx_store::db::open(&args.db)
        .with_context(|| format!("cannot open database {}", args.db.display()))?;
    let applied = apply_migrations(&mut conn)?;

    if applied.is_empty() {
        println!("Schema up to date");
    }
    for id in &applied {
        println!("Applied {}", id);
    }
    for migration in applied_migrations(&conn)? {
        println!("  {} {}", migration.migration_id, migration.checksum);
    }
    Ok(())
}
