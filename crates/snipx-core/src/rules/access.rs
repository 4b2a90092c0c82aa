//! Access decisions for snippet actions
//!
//! Pure functions of the viewer and the target. Callers run `authorize`
//! before touching the store, and map `Denied` onto the silent-deny
//! response (only an anonymous create is sent to the login page).

use crate::errors::SnipError;
use crate::model::{Snippet, Viewer};

/// Something a viewer wants to do
#[derive(Debug, Clone, Copy)]
pub enum Action<'a> {
    /// Public listing, optionally filtered by language or owner
    ListPublic,
    /// Every snippet of one user, private ones included
    ListAllForUser { username: &'a str },
    View(&'a Snippet),
    Create,
    Edit(&'a Snippet),
    Delete(&'a Snippet),
}

impl Action<'_> {
    pub fn name(&self) -> &'static str {
        match self {
            Action::ListPublic => "list_public",
            Action::ListAllForUser { .. } => "list_all_for_user",
            Action::View(_) => "view",
            Action::Create => "create",
            Action::Edit(_) => "edit",
            Action::Delete(_) => "delete",
        }
    }
}

/// Proof that a check passed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Allowed;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Denied {
    /// The action needs a logged-in viewer
    Unauthenticated,
    Forbidden,
}

impl Denied {
    /// Domain error for a denial of `action`
    pub fn into_error(self, action: &Action<'_>) -> SnipError {
        let action = action.name().to_string();
        match self {
            Denied::Unauthenticated => SnipError::AuthenticationRequired { action },
            Denied::Forbidden => SnipError::AccessDenied { action },
        }
    }
}

/// Decide whether `viewer` may perform `action`
///
/// # Errors
///
/// `Denied::Unauthenticated` for an anonymous create, `Denied::Forbidden`
/// for every other refusal.
pub fn authorize(viewer: &Viewer, action: &Action<'_>) -> Result<Allowed, Denied> {
    let allowed = match action {
        Action::ListPublic => true,
        Action::ListAllForUser { username } => viewer.is(username),
        Action::View(snippet) => snippet.is_public() || is_owner(viewer, snippet),
        Action::Create => {
            if !viewer.is_authenticated() {
                return Err(Denied::Unauthenticated);
            }
            true
        }
        Action::Edit(snippet) | Action::Delete(snippet) => is_owner(viewer, snippet),
    };

    if allowed {
        Ok(Allowed)
    } else {
        Err(Denied::Forbidden)
    }
}

fn is_owner(viewer: &Viewer, snippet: &Snippet) -> bool {
    viewer.is(&snippet.owner.username)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Language, User, Visibility};
    use chrono::Utc;

    fn snippet(owner: &str, visibility: Visibility) -> Snippet {
        let now = Utc::now();
        Snippet {
            id: 1,
            owner: User::new(1, owner, None),
            name: "Quick sort".to_string(),
            description: String::new(),
            body: "pass".to_string(),
            language: Language::new(1, "Python", "python"),
            visibility,
            created_at: now,
            updated_at: now,
        }
    }

    fn viewer(username: &str) -> Viewer {
        Viewer::User(User::new(9, username, None))
    }

    #[test]
    fn test_anonymous_create_is_unauthenticated() {
        assert_eq!(
            authorize(&Viewer::Anonymous, &Action::Create),
            Err(Denied::Unauthenticated)
        );
        assert_eq!(authorize(&viewer("alice"), &Action::Create), Ok(Allowed));
    }

    #[test]
    fn test_private_view_owner_only() {
        let s = snippet("alice", Visibility::Private);
        assert!(authorize(&viewer("alice"), &Action::View(&s)).is_ok());
        assert_eq!(
            authorize(&viewer("bob"), &Action::View(&s)),
            Err(Denied::Forbidden)
        );
        assert_eq!(
            authorize(&Viewer::Anonymous, &Action::View(&s)),
            Err(Denied::Forbidden)
        );
    }

    #[test]
    fn test_edit_denied_to_non_owner_even_when_public() {
        let s = snippet("alice", Visibility::Public);
        assert_eq!(
            authorize(&viewer("bob"), &Action::Edit(&s)),
            Err(Denied::Forbidden)
        );
        assert_eq!(
            authorize(&Viewer::Anonymous, &Action::Delete(&s)),
            Err(Denied::Forbidden)
        );
    }

    #[test]
    fn test_list_all_for_user() {
        let action = Action::ListAllForUser { username: "alice" };
        assert!(authorize(&viewer("alice"), &action).is_ok());
        assert!(authorize(&viewer("Alice"), &action).is_err());
        assert!(authorize(&Viewer::Anonymous, &action).is_err());
    }

    #[test]
    fn test_denied_maps_to_domain_error() {
        let err = Denied::Unauthenticated.into_error(&Action::Create);
        assert!(matches!(err, SnipError::AuthenticationRequired { .. }));
        let s = snippet("alice", Visibility::Public);
        let err = Denied::Forbidden.into_error(&Action::Delete(&s));
        assert_eq!(
            err,
            SnipError::AccessDenied {
                action: "delete".to_string()
            }
        );
    }
}
