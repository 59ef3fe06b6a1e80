//! Canonical schema constants for structured logging and events
//!
//! These constants keep field names identical across every log emitter.

// Canonical field keys for structured logging
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";

// Diff identifiers
pub const FIELD_RESOURCE_KIND: &str = "resource_kind";
pub const FIELD_PATH: &str = "path";
pub const FIELD_PATCH_OP: &str = "patch_op";

// Collection sizes
pub const FIELD_FIELD_COUNT: &str = "field_count";
pub const FIELD_OP_COUNT: &str = "op_count";

// Error fields
pub const FIELD_ERR_KIND: &str = "err.kind";
pub const FIELD_ERR_CODE: &str = "err.code";
pub const FIELD_ERR_MESSAGE: &str = "err.message";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";
