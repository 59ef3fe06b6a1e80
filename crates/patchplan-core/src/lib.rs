//! patchplan core library
//!
//! Computes the minimal, ordered list of `add` / `remove` / `replace`
//! operations that move a recorded remote object ("current") to a desired
//! state. Domain types describe themselves through [`Describe`]; each
//! resource type declares which fields participate through a static
//! [`ResourceComparisonSpec`](registry::ResourceComparisonSpec).
//!
//! ```
//! use patchplan_core::registry::resources::{Reference, Role};
//! use patchplan_core::diff_resource;
//!
//! let desired = Role {
//!     name: "auditors".into(),
//!     owner: Reference::new("2c9180", "IDENTITY", "ops"),
//!     ..Role::default()
//! };
//! let current = Role::default();
//! let patch = diff_resource(&desired, &current).unwrap();
//! assert_eq!(patch.paths(), vec!["/name", "/owner/id"]);
//! ```

pub mod diff;
pub mod errors;
pub mod introspect;
pub mod logging_facility;
pub mod registry;
pub mod translate;

// Logging macros expand to paths under this module
#[doc(hidden)]
pub mod __private {
    pub use patchplan_core_types::schema;
    pub use tracing;
}

pub use diff::{
    diff_fields, diff_resource, diff_resource_with, diff_values, DiffMode, DiffOptions, OpKind,
    Patch, PatchOperation, WireValue,
};
pub use errors::{ExError, ExErrorKind, PatchPlanError, Result};
pub use introspect::{Describe, GenericValue, Nullable};
pub use registry::{Comparable, ResourceComparisonSpec, ResourceKind};
pub use translate::translate;
