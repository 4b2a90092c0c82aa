//! Users and login sessions

use super::to_millis;
use crate::errors::{from_rusqlite, Result};
use chrono::{DateTime, Utc};
use rusqlite::{Connection, OptionalExtension};
use snipx_core::model::User;

/// A user together with their stored password hash
#[derive(Debug, Clone)]
pub struct StoredUser {
    pub user: User,
    pub password_hash: String,
}

pub struct AccountsRepo;

impl AccountsRepo {
    /// Insert a user; a taken username is `AlreadyExists`
    pub fn insert_user(
        conn: &Connection,
        username: &str,
        email: Option<&str>,
        password_hash: &str,
        now: DateTime<Utc>,
    ) -> Result<User> {
        conn.execute(
            "INSERT INTO users (username, email, password_hash, created_at) VALUES (?1, ?2, ?3, ?4)",
            rusqlite::params![username, email, password_hash, to_millis(now)],
        )
        .map_err(from_rusqlite)?;
        let id = conn.last_insert_rowid();
        tracing::debug!(user_id = id, username, "user inserted");
        Ok(User::new(id, username, email.map(str::to_string)))
    }

    pub fn get_user_by_username(conn: &Connection, username: &str) -> Result<Option<User>> {
        conn.query_row(
            "SELECT id, username, email FROM users WHERE username = ?1",
            [username],
            |row| Ok(User::new(row.get(0)?, row.get::<_, String>(1)?, row.get(2)?)),
        )
        .optional()
        .map_err(from_rusqlite)
    }

    /// Lookup for login
    pub fn get_credentials(conn: &Connection, username: &str) -> Result<Option<StoredUser>> {
        conn.query_row(
            "SELECT id, username, email, password_hash FROM users WHERE username = ?1",
            [username],
            |row| {
                Ok(StoredUser {
                    user: User::new(row.get(0)?, row.get::<_, String>(1)?, row.get(2)?),
                    password_hash: row.get(3)?,
                })
            },
        )
        .optional()
        .map_err(from_rusqlite)
    }

    // ===== Sessions =====

    pub fn insert_session(
        conn: &Connection,
        token: &str,
        user_id: i64,
        now: DateTime<Utc>,
    ) -> Result<()> {
        conn.execute(
            "INSERT INTO sessions (token, user_id, created_at) VALUES (?1, ?2, ?3)",
            rusqlite::params![token, user_id, to_millis(now)],
        )
        .map_err(from_rusqlite)?;
        Ok(())
    }

    /// The user a session token belongs to
    ///
    /// Sessions created before `not_before` are expired and resolve to `None`.
    pub fn get_session_user(
        conn: &Connection,
        token: &str,
        not_before: DateTime<Utc>,
    ) -> Result<Option<User>> {
        conn.query_row(
            "SELECT u.id, u.username, u.email
             FROM sessions s JOIN users u ON u.id = s.user_id
             WHERE s.token = ?1 AND s.created_at >= ?2",
            rusqlite::params![token, to_millis(not_before)],
            |row| Ok(User::new(row.get(0)?, row.get::<_, String>(1)?, row.get(2)?)),
        )
        .optional()
        .map_err(from_rusqlite)
    }

    /// Drop every session created before `cutoff`; returns how many went
    pub fn delete_sessions_before(conn: &Connection, cutoff: DateTime<Utc>) -> Result<usize> {
        conn.execute(
            "DELETE FROM sessions WHERE created_at < ?1",
            [to_millis(cutoff)],
        )
        .map_err(from_rusqlite)
    }

    /// Returns `false` if the token was unknown
    pub fn delete_session(conn: &Connection, token: &str) -> Result<bool> {
        let changed = conn
            .execute("DELETE FROM sessions WHERE token = ?1", [token])
            .map_err(from_rusqlite)?;
        Ok(changed > 0)
    }
}
