//! Catalog and account administration
//!
//! Used by the CLI; there is no viewer, so no access rule applies.

use rusqlite::Connection;
use snipx_core::core_types::Sensitive;
use snipx_core::credentials::hash_password;
use snipx_core::errors::{ExError, ExErrorKind};
use snipx_core::model::language::{slugify, validate_slug};
use snipx_core::model::user::validate_username;
use snipx_core::model::{Language, User};
use snipx_core::{log_op_end, log_op_error, log_op_start};
use snipx_store::errors::Result;
use snipx_store::repo::{AccountsRepo, SqliteRepo};

use super::elapsed_ms;

/// Add a language; the slug is derived from the name when not given
///
/// ## Errors
///
/// - `InvalidInput`: empty name or invalid slug
/// - `AlreadyExists`: name or slug taken
pub fn language_add(name: &str, slug: Option<&str>, conn: &Connection) -> Result<Language> {
    log_op_start!("language_add", name = name);
    let start = std::time::Instant::now();

    let result = language_add_impl(name, slug, conn);
    match &result {
        Ok(language) => {
            log_op_end!(
                "language_add",
                duration_ms = elapsed_ms(start),
                language_slug = %language.slug
            );
        }
        Err(e) => {
            log_op_error!("language_add", e.clone(), duration_ms = elapsed_ms(start));
        }
    }
    result
}

fn language_add_impl(name: &str, slug: Option<&str>, conn: &Connection) -> Result<Language> {
    let name = name.trim();
    let slug = match slug {
        Some(slug) => slug.to_string(),
        None => slugify(name),
    };
    if name.is_empty() {
        return Err(ExError::new(ExErrorKind::InvalidInput)
            .with_op("language_add")
            .with_message("language name must not be empty"));
    }
    validate_slug(&slug)?;
    SqliteRepo::insert_language(conn, name, &slug)
}

/// Register a user account
///
/// ## Errors
///
/// - `InvalidInput`: username not URL-safe
/// - `AlreadyExists`: username taken
pub fn user_add(
    username: &str,
    email: Option<&str>,
    password: &Sensitive<String>,
    conn: &Connection,
) -> Result<User> {
    log_op_start!("user_add", username = username);
    let start = std::time::Instant::now();

    let result = user_add_impl(username, email, password, conn);
    match &result {
        Ok(user) => {
            log_op_end!("user_add", duration_ms = elapsed_ms(start), user_id = user.id);
        }
        Err(e) => {
            log_op_error!("user_add", e.clone(), duration_ms = elapsed_ms(start));
        }
    }
    result
}

fn user_add_impl(
    username: &str,
    email: Option<&str>,
    password: &Sensitive<String>,
    conn: &Connection,
) -> Result<User> {
    validate_username(username)?;
    let email = email.map(str::trim).filter(|e| !e.is_empty());
    let hash = hash_password(password)?;
    AccountsRepo::insert_user(conn, username, email, &hash, chrono::Utc::now())
}
