//! Command orchestration layer.
//!
//! ## Logging Ownership
//!
//! Functions in this module own the operation boundary:
//! - `log_op_start!` at entry
//! - `log_op_end!` on success
//! - `log_op_error!` on failure
//!
//! Store and core only emit `tracing::debug!()`.

pub mod admin;
pub mod engine_command;
pub mod engine_query;
pub mod session;
pub mod snippet;

pub(crate) fn elapsed_ms(start: std::time::Instant) -> u64 {
    start.elapsed().as_millis() as u64
}
