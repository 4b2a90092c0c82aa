use rusqlite::Connection;
use snipx_core::core_types::Sensitive;
use snipx_core::model::{SnippetDraft, User, Viewer};
use snipx_engine::commands::admin::{language_add, user_add};
use snipx_store::{db, migrations};

/// Migrated database with alice (has email), bob (no email), python and rust
#[allow(dead_code)]
pub struct Fixture {
    pub conn: Connection,
    pub alice: User,
    pub bob: User,
}

#[allow(dead_code)]
pub fn setup() -> Fixture {
    let mut conn = db::open_in_memory().unwrap();
    migrations::apply_migrations(&mut conn).unwrap();

    let alice = user_add("alice", Some("alice@example.com"), &password("alice-pw"), &conn).unwrap();
    let bob = user_add("bob", None, &password("bob-pw"), &conn).unwrap();
    language_add("Python", None, &conn).unwrap();
    language_add("Rust", None, &conn).unwrap();

    Fixture { conn, alice, bob }
}

#[allow(dead_code)]
pub fn password(raw: &str) -> Sensitive<String> {
    Sensitive::new(raw.to_string())
}

#[allow(dead_code)]
pub fn as_viewer(user: &User) -> Viewer {
    Viewer::User(user.clone())
}

#[allow(dead_code)]
pub fn draft(name: &str, public: bool) -> SnippetDraft {
    SnippetDraft {
        name: name.to_string(),
        description: "Sorts a list".to_string(),
        language_slug: "python".to_string(),
        public,
        body: "def qs(xs):\n    return sorted(xs)\n".to_string(),
    }
}
