use chrono::{TimeZone, Utc};
use snipx_core::{Language, Snippet, User, Viewer, Visibility};

#[allow(dead_code)]
pub fn user(id: i64, username: &str) -> User {
    User::new(id, username, Some(format!("{username}@example.com")))
}

#[allow(dead_code)]
pub fn logged_in(username: &str) -> Viewer {
    Viewer::User(user(100, username))
}

/// Snippet owned by `owner` in Python with fixed timestamps
#[allow(dead_code)]
pub fn snippet(id: i64, owner: &str, visibility: Visibility) -> Snippet {
    let at = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
    Snippet {
        id,
        owner: user(1, owner),
        name: format!("snippet {id}"),
        description: "test snippet".to_string(),
        body: "print('hello')".to_string(),
        language: Language::new(1, "Python", "python"),
        visibility,
        created_at: at,
        updated_at: at,
    }
}
