use chrono::{DateTime, Duration, TimeZone, Utc};
use rusqlite::Connection;
use snipx_core::model::{Language, SnippetDraft, User};
use snipx_store::repo::{AccountsRepo, SqliteRepo};
use snipx_store::{db, migrations};

/// Fresh migrated in-memory database
#[allow(dead_code)]
pub fn setup() -> Connection {
    let mut conn = db::open_in_memory().unwrap();
    migrations::apply_migrations(&mut conn).unwrap();
    conn
}

#[allow(dead_code)]
pub fn at(minutes: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap() + Duration::minutes(minutes)
}

#[allow(dead_code)]
pub fn add_user(conn: &Connection, username: &str) -> User {
    AccountsRepo::insert_user(conn, username, None, "$argon2id$placeholder", at(0)).unwrap()
}

#[allow(dead_code)]
pub fn add_language(conn: &Connection, name: &str, slug: &str) -> Language {
    SqliteRepo::insert_language(conn, name, slug).unwrap()
}

#[allow(dead_code)]
pub fn draft(name: &str, slug: &str, public: bool) -> SnippetDraft {
    SnippetDraft {
        name: name.to_string(),
        description: format!("{name} description"),
        language_slug: slug.to_string(),
        public,
        body: "fn main() {}".to_string(),
    }
}
