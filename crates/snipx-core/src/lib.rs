//! SnipX Core - domain model and decision logic for snippet sharing
//!
//! This crate holds everything that does not touch I/O:
//! - Language, User, Snippet and Viewer models
//! - Access-control rules (`rules::access::authorize`)
//! - Draft validation with field-level errors
//! - Credential hashing and verification
//! - The notification contract consumed after snippet creation
//! - The canonical error and logging facilities shared by every crate

pub mod credentials;
pub mod errors;
pub mod logging_facility;
pub mod model;
pub mod notify;
pub mod rules;

// Macros expand to paths under this re-export.
pub use snipx_core_types as core_types;

pub use errors::{ExError, ExErrorKind, FieldError, Result, SnipError};
pub use model::{Language, Snippet, SnippetDraft, User, Viewer, Visibility};
pub use notify::{NotificationDispatcher, SnippetCreatedNotice};
pub use rules::access::{authorize, Action, Allowed, Denied};
