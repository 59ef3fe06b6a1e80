//! Patch planning: compare two snapshots of a resource and produce the
//! ordered RFC 6902 style operations that turn current into desired.
//!
//! - [`model`]: patch, operation and wire value types
//! - [`encoder`]: diff-result values to wire payloads
//! - [`engine`]: the recursive comparator

pub mod encoder;
pub mod engine;
pub mod model;

pub use encoder::encode;
pub use engine::{diff_fields, diff_resource, diff_resource_with, diff_values, DiffOptions};
pub use model::{
    child_path, ComparisonField, DiffMode, OpKind, Patch, PatchOperation, WireValue,
};
