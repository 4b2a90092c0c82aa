use serde::{Deserialize, Serialize};

use crate::errors::{Result, SnipError};

/// An account that can own snippets
///
/// The password hash is kept out of this type; only the accounts repository
/// and the credential module ever see it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: Option<String>,
}

impl User {
    pub fn new(id: i64, username: impl Into<String>, email: Option<String>) -> Self {
        Self {
            id,
            username: username.into(),
            email,
        }
    }

    /// Address for notifications, if the user has a non-blank email
    pub fn notification_address(&self) -> Option<&str> {
        self.email
            .as_deref()
            .map(str::trim)
            .filter(|email| !email.is_empty())
    }
}

/// Usernames appear in listing URLs, so they are restricted to `[A-Za-z0-9_-]+`
///
/// # Errors
///
/// Returns `SnipError::InvalidUsername` when the name is empty or contains a
/// disallowed character.
pub fn validate_username(username: &str) -> Result<()> {
    if username.is_empty() {
        return Err(SnipError::InvalidUsername {
            username: username.to_string(),
            reason: "username must not be empty".to_string(),
        });
    }
    if let Some(bad) = username
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || *c == '-' || *c == '_'))
    {
        return Err(SnipError::InvalidUsername {
            username: username.to_string(),
            reason: format!("character '{}' is not allowed", bad),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notification_address_skips_blank() {
        let mut user = User::new(1, "alice", Some("alice@example.com".to_string()));
        assert_eq!(user.notification_address(), Some("alice@example.com"));

        user.email = Some("   ".to_string());
        assert_eq!(user.notification_address(), None);

        user.email = None;
        assert_eq!(user.notification_address(), None);
    }

    #[test]
    fn test_validate_username() {
        assert!(validate_username("alice").is_ok());
        assert!(validate_username("Bob_2-x").is_ok());
        assert!(validate_username("").is_err());
        assert!(validate_username("al ice").is_err());
        assert!(validate_username("al/ice").is_err());
    }
}
