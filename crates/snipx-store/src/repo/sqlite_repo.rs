//! Languages and snippets

use super::{from_millis, to_millis};
use crate::errors::{corrupt_row, from_rusqlite, Result};
use chrono::{DateTime, Utc};
use rusqlite::{Connection, OptionalExtension, Row};
use snipx_core::model::{Language, Snippet, SnippetDraft, User, Visibility};

/// Listing filter; `None` fields do not constrain
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SnippetFilter {
    pub language_slug: Option<String>,
    pub owner_username: Option<String>,
    pub visibility: Option<Visibility>,
}

impl SnippetFilter {
    /// Every snippet, any visibility
    pub fn all() -> Self {
        Self::default()
    }

    pub fn public() -> Self {
        Self {
            visibility: Some(Visibility::Public),
            ..Self::default()
        }
    }

    pub fn with_language(mut self, slug: impl Into<String>) -> Self {
        self.language_slug = Some(slug.into());
        self
    }

    pub fn with_owner(mut self, username: impl Into<String>) -> Self {
        self.owner_username = Some(username.into());
        self
    }
}

const SNIPPET_SELECT: &str = "SELECT s.id, s.name, s.description, s.body, s.visibility,
        s.created_at, s.updated_at, u.id, u.username, u.email, l.id, l.name, l.slug
     FROM snippets s
     JOIN users u ON u.id = s.owner_id
     JOIN languages l ON l.id = s.language_id";

/// Raw snippet row before visibility and timestamps are decoded
struct SnippetRow {
    id: i64,
    name: String,
    description: String,
    body: String,
    visibility: String,
    created_at: i64,
    updated_at: i64,
    owner: User,
    language: Language,
}

impl SnippetRow {
    fn read(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            name: row.get(1)?,
            description: row.get(2)?,
            body: row.get(3)?,
            visibility: row.get(4)?,
            created_at: row.get(5)?,
            updated_at: row.get(6)?,
            owner: User::new(row.get(7)?, row.get::<_, String>(8)?, row.get(9)?),
            language: Language::new(row.get(10)?, row.get::<_, String>(11)?, row.get::<_, String>(12)?),
        })
    }

    fn into_snippet(self) -> Result<Snippet> {
        let visibility = Visibility::parse(&self.visibility).ok_or_else(|| {
            corrupt_row(
                "snippets",
                &format!("unknown visibility '{}' on snippet {}", self.visibility, self.id),
            )
        })?;
        Ok(Snippet {
            id: self.id,
            owner: self.owner,
            name: self.name,
            description: self.description,
            body: self.body,
            language: self.language,
            visibility,
            created_at: from_millis("snippets", self.created_at)?,
            updated_at: from_millis("snippets", self.updated_at)?,
        })
    }
}

/// SQLite repository for the language catalog and snippets
pub struct SqliteRepo;

impl SqliteRepo {
    // ===== Languages =====

    /// Insert a language; a duplicate name or slug is `AlreadyExists`
    pub fn insert_language(conn: &Connection, name: &str, slug: &str) -> Result<Language> {
        conn.execute(
            "INSERT INTO languages (name, slug) VALUES (?1, ?2)",
            rusqlite::params![name, slug],
        )
        .map_err(from_rusqlite)?;
        let id = conn.last_insert_rowid();
        tracing::debug!(language_id = id, slug, "language inserted");
        Ok(Language::new(id, name, slug))
    }

    /// Insert, or rename the language that already has `slug`
    ///
    /// Returns the stored language and whether it was newly inserted.
    pub fn upsert_language(conn: &Connection, name: &str, slug: &str) -> Result<(Language, bool)> {
        match Self::get_language_by_slug(conn, slug)? {
            Some(existing) => {
                if existing.name != name {
                    conn.execute(
                        "UPDATE languages SET name = ?1 WHERE id = ?2",
                        rusqlite::params![name, existing.id],
                    )
                    .map_err(from_rusqlite)?;
                }
                Ok((Language::new(existing.id, name, slug), false))
            }
            None => Ok((Self::insert_language(conn, name, slug)?, true)),
        }
    }

    pub fn get_language_by_slug(conn: &Connection, slug: &str) -> Result<Option<Language>> {
        conn.query_row(
            "SELECT id, name, slug FROM languages WHERE slug = ?1",
            [slug],
            |row| Ok(Language::new(row.get(0)?, row.get::<_, String>(1)?, row.get::<_, String>(2)?)),
        )
        .optional()
        .map_err(from_rusqlite)
    }

    /// Whole catalog, ordered by name
    pub fn list_languages(conn: &Connection) -> Result<Vec<Language>> {
        let mut stmt = conn
            .prepare("SELECT id, name, slug FROM languages ORDER BY name COLLATE NOCASE, id")
            .map_err(from_rusqlite)?;
        let languages = stmt
            .query_map([], |row| {
                Ok(Language::new(row.get(0)?, row.get::<_, String>(1)?, row.get::<_, String>(2)?))
            })
            .map_err(from_rusqlite)?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(from_rusqlite)?;
        Ok(languages)
    }

    // ===== Snippets =====

    /// Insert a snippet and return its id
    pub fn insert_snippet(
        conn: &Connection,
        owner_id: i64,
        language_id: i64,
        draft: &SnippetDraft,
        now: DateTime<Utc>,
    ) -> Result<i64> {
        conn.execute(
            "INSERT INTO snippets (owner_id, language_id, name, description, body, visibility, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?7)",
            rusqlite::params![
                owner_id,
                language_id,
                draft.name.trim(),
                draft.description,
                draft.body,
                draft.visibility().as_str(),
                to_millis(now),
            ],
        )
        .map_err(from_rusqlite)?;
        let id = conn.last_insert_rowid();
        tracing::debug!(snippet_id = id, owner_id, "snippet inserted");
        Ok(id)
    }

    /// Overwrite the editable fields; returns `false` if the row is gone
    pub fn update_snippet(
        conn: &Connection,
        snippet_id: i64,
        language_id: i64,
        draft: &SnippetDraft,
        now: DateTime<Utc>,
    ) -> Result<bool> {
        let changed = conn
            .execute(
                "UPDATE snippets
                 SET language_id = ?1, name = ?2, description = ?3, body = ?4,
                     visibility = ?5, updated_at = ?6
                 WHERE id = ?7",
                rusqlite::params![
                    language_id,
                    draft.name.trim(),
                    draft.description,
                    draft.body,
                    draft.visibility().as_str(),
                    to_millis(now),
                    snippet_id,
                ],
            )
            .map_err(from_rusqlite)?;
        tracing::debug!(snippet_id, changed, "snippet updated");
        Ok(changed > 0)
    }

    /// Hard delete; returns `false` if the row was already gone
    pub fn delete_snippet(conn: &Connection, snippet_id: i64) -> Result<bool> {
        let changed = conn
            .execute("DELETE FROM snippets WHERE id = ?1", [snippet_id])
            .map_err(from_rusqlite)?;
        tracing::debug!(snippet_id, changed, "snippet deleted");
        Ok(changed > 0)
    }

    pub fn get_snippet(conn: &Connection, snippet_id: i64) -> Result<Option<Snippet>> {
        let sql = format!("{} WHERE s.id = ?1", SNIPPET_SELECT);
        let row = conn
            .query_row(&sql, [snippet_id], SnippetRow::read)
            .optional()
            .map_err(from_rusqlite)?;
        row.map(SnippetRow::into_snippet).transpose()
    }

    /// Snippets matching `filter`, newest first
    pub fn list_snippets(conn: &Connection, filter: &SnippetFilter) -> Result<Vec<Snippet>> {
        let sql = format!(
            "{} WHERE (?1 IS NULL OR l.slug = ?1)
               AND (?2 IS NULL OR u.username = ?2)
               AND (?3 IS NULL OR s.visibility = ?3)
             ORDER BY s.created_at DESC, s.id DESC",
            SNIPPET_SELECT
        );
        let mut stmt = conn.prepare(&sql).map_err(from_rusqlite)?;
        let rows = stmt
            .query_map(
                rusqlite::params![
                    filter.language_slug,
                    filter.owner_username,
                    filter.visibility.map(|v| v.as_str()),
                ],
                SnippetRow::read,
            )
            .map_err(from_rusqlite)?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(from_rusqlite)?;
        rows.into_iter().map(SnippetRow::into_snippet).collect()
    }
}
