use crate::errors::FieldError;
use crate::model::SnippetDraft;

pub const NAME_MAX_CHARS: usize = 100;
pub const DESCRIPTION_MAX_CHARS: usize = 255;

/// Collect every field problem in a draft
///
/// Lengths are counted in characters, the name after trimming since that
/// is what gets stored. The language is only checked for presence here;
/// whether the slug exists is a catalog question.
pub fn draft_field_errors(draft: &SnippetDraft) -> Vec<FieldError> {
    let mut errors = Vec::new();

    if draft.name.trim().is_empty() {
        errors.push(FieldError::new("name", "This field is required."));
    } else if draft.name.trim().chars().count() > NAME_MAX_CHARS {
        errors.push(FieldError::new(
            "name",
            format!("Ensure this value has at most {} characters.", NAME_MAX_CHARS),
        ));
    }

    if draft.description.chars().count() > DESCRIPTION_MAX_CHARS {
        errors.push(FieldError::new(
            "description",
            format!(
                "Ensure this value has at most {} characters.",
                DESCRIPTION_MAX_CHARS
            ),
        ));
    }

    if draft.language_slug.trim().is_empty() {
        errors.push(FieldError::new("language", "This field is required."));
    }

    if draft.body.trim().is_empty() {
        errors.push(FieldError::new("code", "This field is required."));
    }

    errors
}
