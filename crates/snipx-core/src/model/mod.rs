pub mod language;
pub mod snippet;
pub mod user;
pub mod viewer;

pub use language::Language;
pub use snippet::{Snippet, SnippetDraft, Visibility};
pub use user::User;
pub use viewer::Viewer;
