use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::language::Language;
use super::user::User;

/// Two-state visibility flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Public,
    Private,
}

impl Visibility {
    /// Stored representation (`public` / `private`)
    pub fn as_str(&self) -> &'static str {
        match self {
            Visibility::Public => "public",
            Visibility::Private => "private",
        }
    }

    /// Parse the stored representation; anything else is `None`
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "public" => Some(Visibility::Public),
            "private" => Some(Visibility::Private),
            _ => None,
        }
    }

    pub fn from_public_flag(public: bool) -> Self {
        if public {
            Visibility::Public
        } else {
            Visibility::Private
        }
    }

    pub fn is_public(&self) -> bool {
        matches!(self, Visibility::Public)
    }
}

impl std::fmt::Display for Visibility {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stored snippet with its owner and language resolved
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snippet {
    pub id: i64,
    pub owner: User,
    pub name: String,
    pub description: String,
    pub body: String,
    pub language: Language,
    pub visibility: Visibility,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Snippet {
    pub fn is_public(&self) -> bool {
        self.visibility.is_public()
    }
}

/// User-submitted snippet fields, prior to validation
///
/// Used for both create and edit. The language is referenced by slug and
/// resolved against the catalog by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SnippetDraft {
    pub name: String,
    pub description: String,
    pub language_slug: String,
    pub public: bool,
    pub body: String,
}

impl SnippetDraft {
    pub fn visibility(&self) -> Visibility {
        Visibility::from_public_flag(self.public)
    }

    /// Prefill a draft from an existing snippet (edit form)
    pub fn from_snippet(snippet: &Snippet) -> Self {
        Self {
            name: snippet.name.clone(),
            description: snippet.description.clone(),
            language_slug: snippet.language.slug.clone(),
            public: snippet.is_public(),
            body: snippet.body.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visibility_stored_form() {
        assert_eq!(Visibility::parse("public"), Some(Visibility::Public));
        assert_eq!(Visibility::parse("private"), Some(Visibility::Private));
        assert_eq!(Visibility::parse("Public"), None);
        assert_eq!(Visibility::Private.to_string(), "private");
    }

    #[test]
    fn test_public_flag() {
        assert_eq!(Visibility::from_public_flag(true), Visibility::Public);
        assert_eq!(Visibility::from_public_flag(false), Visibility::Private);
    }
}
