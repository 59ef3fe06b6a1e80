//! Resource comparison specs.
//!
//! Each resource type declares, once, which of its fields take part in a
//! diff, their wire names, and whether they are compared structurally or by
//! reference id. Specs are plain data built on first use and shared for the
//! life of the process.

pub mod resources;

use crate::diff::engine::{diff_resource_with, DiffOptions};
use crate::diff::model::{child_path, ComparisonField, DiffMode, Patch};
use crate::errors::{PatchPlanError, Result};
use crate::introspect::Describe;
use crate::{log_op_end, log_op_error, log_op_start};
use resources::{IdentityProfile, LifecycleState, Role, Source, Workflow};
use serde::de::DeserializeOwned;
use std::fmt;
use std::str::FromStr;
use std::time::Instant;

/// Projects one declared field out of a resource
pub type Accessor<R> = fn(&R) -> &dyn Describe;

/// One declared field: its wire path, comparison mode and accessor
pub struct FieldSpec<R> {
    path: String,
    mode: DiffMode,
    accessor: Accessor<R>,
}

impl<R> FieldSpec<R> {
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn mode(&self) -> DiffMode {
        self.mode
    }
}

impl<R> fmt::Debug for FieldSpec<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldSpec")
            .field("path", &self.path)
            .field("mode", &self.mode)
            .finish()
    }
}

/// Ordered field declarations for one resource type
#[derive(Debug)]
pub struct ResourceComparisonSpec<R> {
    kind: &'static str,
    fields: Vec<FieldSpec<R>>,
}

impl<R> ResourceComparisonSpec<R> {
    /// Start declaring the spec for resource kind `kind`.
    ///
    /// ```
    /// use patchplan_core::registry::ResourceComparisonSpec;
    ///
    /// struct Tag {
    ///     label: String,
    /// }
    ///
    /// let spec = ResourceComparisonSpec::<Tag>::builder("tag")
    ///     .value("label", |t| &t.label)
    ///     .build();
    /// assert_eq!(spec.len(), 1);
    /// ```
    pub fn builder(kind: &'static str) -> ResourceComparisonSpecBuilder<R> {
        ResourceComparisonSpecBuilder {
            kind,
            fields: Vec::new(),
        }
    }

    pub fn kind(&self) -> &'static str {
        self.kind
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn field_specs(&self) -> &[FieldSpec<R>] {
        &self.fields
    }

    /// Pair up the declared fields of two snapshots, in declaration order
    pub fn fields<'a>(&self, desired: &'a R, current: &'a R) -> Vec<ComparisonField<'a>> {
        self.fields
            .iter()
            .map(|field| ComparisonField {
                path: field.path.clone(),
                desired: (field.accessor)(desired).describe(),
                current: (field.accessor)(current).describe(),
                mode: field.mode,
            })
            .collect()
    }
}

pub struct ResourceComparisonSpecBuilder<R> {
    kind: &'static str,
    fields: Vec<FieldSpec<R>>,
}

impl<R> ResourceComparisonSpecBuilder<R> {
    /// Declare a structurally compared field
    pub fn value(self, name: &str, accessor: Accessor<R>) -> Self {
        self.push(name, DiffMode::ValueDiff, accessor)
    }

    /// Declare a field compared only by the `id` of the object it points to
    pub fn reference(self, name: &str, accessor: Accessor<R>) -> Self {
        self.push(name, DiffMode::ReferenceDiff, accessor)
    }

    fn push(mut self, name: &str, mode: DiffMode, accessor: Accessor<R>) -> Self {
        self.fields.push(FieldSpec {
            path: child_path("", name),
            mode,
            accessor,
        });
        self
    }

    /// # Panics
    ///
    /// Panics if two fields share a path. Specs are static declarations, so
    /// this is a programming error surfaced on first use.
    pub fn build(self) -> ResourceComparisonSpec<R> {
        for (i, field) in self.fields.iter().enumerate() {
            assert!(
                !self.fields[..i].iter().any(|f| f.path == field.path),
                "duplicate field path '{}' in comparison spec for '{}'",
                field.path,
                self.kind
            );
        }
        ResourceComparisonSpec {
            kind: self.kind,
            fields: self.fields,
        }
    }
}

/// A resource type with a registered comparison spec
pub trait Comparable: Sized + 'static {
    fn comparison_spec() -> &'static ResourceComparisonSpec<Self>;
}

/// The bundled resource types, addressable by name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Role,
    Source,
    Workflow,
    LifecycleState,
    IdentityProfile,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 5] = [
        ResourceKind::Role,
        ResourceKind::Source,
        ResourceKind::Workflow,
        ResourceKind::LifecycleState,
        ResourceKind::IdentityProfile,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Role => "role",
            ResourceKind::Source => "source",
            ResourceKind::Workflow => "workflow",
            ResourceKind::LifecycleState => "lifecycle-state",
            ResourceKind::IdentityProfile => "identity-profile",
        }
    }

    /// Declared field paths and modes, in diff order
    pub fn field_table(&self) -> Vec<(String, DiffMode)> {
        match self {
            ResourceKind::Role => field_table::<Role>(),
            ResourceKind::Source => field_table::<Source>(),
            ResourceKind::Workflow => field_table::<Workflow>(),
            ResourceKind::LifecycleState => field_table::<LifecycleState>(),
            ResourceKind::IdentityProfile => field_table::<IdentityProfile>(),
        }
    }

    /// Decode two JSON snapshots as this resource type and diff them.
    ///
    /// # Errors
    ///
    /// - `InvalidSnapshot` if either side does not decode
    /// - any error of [`diff_resource_with`]
    pub fn diff_json(
        &self,
        desired: &serde_json::Value,
        current: &serde_json::Value,
        options: &DiffOptions,
    ) -> Result<Patch> {
        let start = Instant::now();
        log_op_start!("diff_json", resource_kind = self.as_str());

        let result = match self {
            ResourceKind::Role => diff_snapshots::<Role>(*self, desired, current, options),
            ResourceKind::Source => diff_snapshots::<Source>(*self, desired, current, options),
            ResourceKind::Workflow => diff_snapshots::<Workflow>(*self, desired, current, options),
            ResourceKind::LifecycleState => {
                diff_snapshots::<LifecycleState>(*self, desired, current, options)
            }
            ResourceKind::IdentityProfile => {
                diff_snapshots::<IdentityProfile>(*self, desired, current, options)
            }
        };

        match &result {
            Ok(patch) => {
                log_op_end!(
                    "diff_json",
                    duration_ms = start.elapsed().as_millis() as u64,
                    resource_kind = self.as_str(),
                    op_count = patch.len()
                );
            }
            Err(err) => {
                log_op_error!(
                    "diff_json",
                    err,
                    duration_ms = start.elapsed().as_millis() as u64,
                    resource_kind = self.as_str()
                );
            }
        }
        result
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResourceKind {
    type Err = PatchPlanError;

    fn from_str(s: &str) -> Result<Self> {
        ResourceKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| PatchPlanError::UnknownResourceKind {
                kind: s.to_string(),
            })
    }
}

fn field_table<R: Comparable>() -> Vec<(String, DiffMode)> {
    R::comparison_spec()
        .field_specs()
        .iter()
        .map(|f| (f.path().to_string(), f.mode()))
        .collect()
}

fn diff_snapshots<R: Comparable + DeserializeOwned>(
    kind: ResourceKind,
    desired: &serde_json::Value,
    current: &serde_json::Value,
    options: &DiffOptions,
) -> Result<Patch> {
    let desired: R = decode_snapshot(kind, "desired", desired)?;
    let current: R = decode_snapshot(kind, "current", current)?;
    diff_resource_with(&desired, &current, options)
}

fn decode_snapshot<R: DeserializeOwned>(
    kind: ResourceKind,
    side: &str,
    value: &serde_json::Value,
) -> Result<R> {
    serde_json::from_value(value.clone()).map_err(|e| PatchPlanError::InvalidSnapshot {
        kind: kind.to_string(),
        side: side.to_string(),
        reason: e.to_string(),
    })
}
