//! SnipX Web - HTTP surface
//!
//! Routes mirror the snippet actions one to one. Handlers resolve the
//! session cookie to a viewer, call the engine, and render with maud.
//! Not-found and forbidden outcomes both answer with a redirect to `/`.

pub mod error;
pub mod handlers;
pub mod highlight;
pub mod mailer;
pub mod middleware;
pub mod router;
pub mod session;
pub mod state;
pub mod views;

pub use error::WebError;
pub use router::{router, serve};
pub use state::AppState;
