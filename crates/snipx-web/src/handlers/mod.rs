//! Route handlers

pub mod auth;
pub mod snippets;

use axum::http::HeaderMap;
use serde::Deserialize;
use snipx_core::errors::{ExError, SnipError};
use snipx_core::model::{SnippetDraft, Viewer};
use snipx_engine::commands::session::resolve_session;

use crate::session::session_token;
use crate::state::AppState;

/// Resolve the session cookie to a viewer
pub(crate) fn current_viewer(state: &AppState, headers: &HeaderMap) -> Result<Viewer, ExError> {
    let token = session_token(headers);
    state.with_conn(|conn| resolve_session(token.as_deref(), state.sessions(), conn))
}

/// Parse a snippet id path segment; anything non-numeric is a missing snippet
pub(crate) fn parse_snippet_id(raw: &str) -> Result<i64, ExError> {
    raw.parse::<i64>().map_err(|_| {
        ExError::from(SnipError::SnippetNotFound { snippet_id: 0 }).with_entity_id(raw)
    })
}

/// Create/edit form body
///
/// Browsers omit unchecked checkboxes, so `public` is present-or-absent.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SnippetForm {
    pub name: String,
    pub description: String,
    pub language: String,
    pub public: Option<String>,
    pub code: String,
}

impl SnippetForm {
    pub fn into_draft(self) -> SnippetDraft {
        SnippetDraft {
            name: self.name,
            description: self.description,
            language_slug: self.language,
            public: self.public.is_some(),
            body: self.code,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use snipx_core::errors::ExErrorKind;

    #[test]
    fn test_checkbox_presence_means_public() {
        let form = SnippetForm {
            public: Some("on".to_string()),
            ..SnippetForm::default()
        };
        assert!(form.into_draft().public);
        assert!(!SnippetForm::default().into_draft().public);
    }

    #[test]
    fn test_non_numeric_id_is_not_found() {
        let err = parse_snippet_id("abc").unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::NotFound);
        assert_eq!(err.entity_id(), Some("abc"));
        assert_eq!(parse_snippet_id("12").unwrap(), 12);
    }
}
