use serde::{Deserialize, Serialize};

use crate::errors::{Result, SnipError};

/// Language catalog entry
///
/// Referenced by snippets, never owned by them. Both `name` and `slug` are
/// unique across the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Language {
    pub id: i64,
    pub name: String,
    pub slug: String,
}

impl Language {
    pub fn new(id: i64, name: impl Into<String>, slug: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            slug: slug.into(),
        }
    }
}

/// Derive a URL-safe slug from a display name
///
/// ASCII alphanumerics are lowercased, `+` becomes `p` and `#` becomes
/// `sharp`. Any other run of characters collapses to one `-`, and leading or
/// trailing dashes are dropped. `"C++"` gives `"cpp"`, `"Objective C"` gives
/// `"objective-c"`.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_dash = false;

    for ch in name.chars() {
        let piece: Option<&str> = match ch {
            '+' => Some("p"),
            '#' => Some("sharp"),
            _ => None,
        };
        if ch.is_ascii_alphanumeric() || piece.is_some() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            match piece {
                Some(p) => slug.push_str(p),
                None => slug.push(ch.to_ascii_lowercase()),
            }
        } else {
            pending_dash = true;
        }
    }

    slug
}

/// Check that a slug is non-empty and only uses `[a-z0-9_-]`
///
/// # Errors
///
/// Returns `SnipError::InvalidSlug` naming the first problem found.
pub fn validate_slug(slug: &str) -> Result<()> {
    if slug.is_empty() {
        return Err(SnipError::InvalidSlug {
            slug: slug.to_string(),
            reason: "slug must not be empty".to_string(),
        });
    }
    if let Some(bad) = slug
        .chars()
        .find(|c| !(c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '-' || *c == '_'))
    {
        return Err(SnipError::InvalidSlug {
            slug: slug.to_string(),
            reason: format!("character '{}' is not allowed", bad),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_common_names() {
        assert_eq!(slugify("Python"), "python");
        assert_eq!(slugify("C++"), "cpp");
        assert_eq!(slugify("C#"), "csharp");
        assert_eq!(slugify("F#"), "fsharp");
        assert_eq!(slugify("Objective C"), "objective-c");
        assert_eq!(slugify("  Shell / Bash  "), "shell-bash");
    }

    #[test]
    fn test_slugify_output_is_valid() {
        for name in ["Rust", "Visual Basic .NET", "Common Lisp", "x86 asm"] {
            let slug = slugify(name);
            assert!(validate_slug(&slug).is_ok(), "{name} -> {slug}");
        }
    }

    #[test]
    fn test_slugify_all_punctuation_is_empty() {
        assert_eq!(slugify("---"), "");
        assert!(validate_slug(&slugify("!!")).is_err());
    }

    #[test]
    fn test_validate_slug_rejects_uppercase_and_spaces() {
        assert!(validate_slug("python").is_ok());
        assert!(validate_slug("objective_c").is_ok());
        assert!(matches!(
            validate_slug("Python"),
            Err(SnipError::InvalidSlug { .. })
        ));
        assert!(validate_slug("two words").is_err());
        assert!(validate_slug("").is_err());
    }
}
