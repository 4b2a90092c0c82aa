//! Login sessions
//!
//! A session is an opaque v4 token mapped to a user id. Tokens never
//! appear in logs. A session lives for the policy's TTL from login; older
//! tokens resolve to the anonymous viewer and are purged on the next login.
//!
//! Login is split into three steps so a caller holding a shared connection
//! can run the password hash check without it: `find_credentials` and
//! `open_session` need the connection, `check_credentials` does not.

use chrono::{DateTime, Duration, Utc};
use rusqlite::Connection;
use snipx_core::core_types::Sensitive;
use snipx_core::credentials::verify_password;
use snipx_core::errors::{ExError, SnipError};
use snipx_core::model::{User, Viewer};
use snipx_core::{log_op_end, log_op_error, log_op_start};
use snipx_store::errors::Result;
use snipx_store::repo::{AccountsRepo, StoredUser};

use super::elapsed_ms;

/// How long a session stays valid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionPolicy {
    pub ttl: Duration,
}

impl SessionPolicy {
    pub const DEFAULT_TTL_DAYS: i64 = 14;

    pub fn new(ttl: Duration) -> Self {
        Self { ttl }
    }

    /// Sessions created before this instant are expired
    pub fn cutoff(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        now.checked_sub_signed(self.ttl)
            .unwrap_or(DateTime::<Utc>::MIN_UTC)
    }

    /// Cookie lifetime matching the TTL
    pub fn max_age_secs(&self) -> i64 {
        self.ttl.num_seconds()
    }
}

impl Default for SessionPolicy {
    fn default() -> Self {
        Self::new(Duration::days(Self::DEFAULT_TTL_DAYS))
    }
}

/// A successful login
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub token: Sensitive<String>,
    pub user: User,
}

/// Check credentials and open a session
///
/// ## Errors
///
/// - `InvalidCredentials`: unknown user or wrong password (indistinguishable)
/// - `Persistence`: database error
pub fn login(
    username: &str,
    password: &Sensitive<String>,
    policy: &SessionPolicy,
    conn: &Connection,
) -> Result<LoginOutcome> {
    log_op_start!("login", username = username);
    let start = std::time::Instant::now();

    let outcome = find_credentials(username, conn)
        .and_then(|stored| check_credentials(stored, password))
        .and_then(|user| open_session(user, policy, conn))
        .map_err(|e| {
            log_op_error!("login", e.clone(), duration_ms = elapsed_ms(start));
            e
        })?;

    log_op_end!(
        "login",
        duration_ms = elapsed_ms(start),
        user_id = outcome.user.id
    );
    Ok(outcome)
}

/// Stored credentials for `username`, if the account exists
pub fn find_credentials(username: &str, conn: &Connection) -> Result<Option<StoredUser>> {
    AccountsRepo::get_credentials(conn, username.trim())
}

/// Verify a password against the stored hash
///
/// A missing account fails exactly like a wrong password.
pub fn check_credentials(
    stored: Option<StoredUser>,
    password: &Sensitive<String>,
) -> Result<User> {
    let stored = stored.ok_or_else(|| ExError::from(SnipError::InvalidCredentials))?;
    if !verify_password(password, &stored.password_hash) {
        return Err(SnipError::InvalidCredentials.into());
    }
    Ok(stored.user)
}

/// Purge expired sessions and open a new one for `user`
pub fn open_session(user: User, policy: &SessionPolicy, conn: &Connection) -> Result<LoginOutcome> {
    let now = Utc::now();
    let purged = AccountsRepo::delete_sessions_before(conn, policy.cutoff(now))?;
    if purged > 0 {
        tracing::debug!(purged, "expired sessions removed");
    }

    let token = uuid::Uuid::new_v4().to_string();
    AccountsRepo::insert_session(conn, &token, user.id, now)?;

    Ok(LoginOutcome {
        token: Sensitive::new(token),
        user,
    })
}

/// Destroy a session; returns `false` when the token was already unknown
pub fn logout(token: &str, conn: &Connection) -> Result<bool> {
    log_op_start!("logout");
    let start = std::time::Instant::now();

    let removed = AccountsRepo::delete_session(conn, token).map_err(|e| {
        log_op_error!("logout", e.clone(), duration_ms = elapsed_ms(start));
        e
    })?;

    log_op_end!("logout", duration_ms = elapsed_ms(start), removed = removed);
    Ok(removed)
}

/// Map a session token to the viewer it belongs to
///
/// A missing, unknown or expired token is an anonymous viewer, not an error.
pub fn resolve_session(
    token: Option<&str>,
    policy: &SessionPolicy,
    conn: &Connection,
) -> Result<Viewer> {
    let Some(token) = token.filter(|t| !t.is_empty()) else {
        return Ok(Viewer::Anonymous);
    };
    let user = AccountsRepo::get_session_user(conn, token, policy.cutoff(Utc::now()))?;
    tracing::debug!(authenticated = user.is_some(), "session resolved");
    Ok(Viewer::from(user))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy_is_two_weeks() {
        let policy = SessionPolicy::default();
        assert_eq!(policy.max_age_secs(), 14 * 24 * 60 * 60);
        let now = Utc::now();
        assert_eq!(now - policy.cutoff(now), Duration::days(14));
    }

    #[test]
    fn test_cutoff_saturates_for_huge_ttl() {
        let policy = SessionPolicy::new(Duration::MAX);
        assert_eq!(policy.cutoff(Utc::now()), DateTime::<Utc>::MIN_UTC);
    }

    #[test]
    fn test_missing_account_is_invalid_credentials() {
        let err = check_credentials(None, &Sensitive::new("pw".to_string())).unwrap_err();
        assert_eq!(err.kind(), snipx_core::ExErrorKind::InvalidCredentials);
    }
}
