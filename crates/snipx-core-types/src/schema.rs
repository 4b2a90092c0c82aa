//! Field keys and event names emitted by the `log_op_*` macros

/// Operation name, set by every `log_op_*` macro
pub const FIELD_OP: &str = "op";
/// Lifecycle position within an operation, one of the `EVENT_*` names
pub const FIELD_EVENT: &str = "event";
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_DURATION_MS: &str = "duration_ms";
pub const FIELD_ERR_CODE: &str = "err_code";

pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";
