//! Patch output types.
//!
//! A [`Patch`] serializes to an RFC 6902 document:
//! `[{"op": "replace", "path": "/name", "value": "x"}, {"op": "remove", "path": "/description"}]`.
//! `E` is the element type of the `Array` payload arm; it defaults to
//! `serde_json::Value` and is swapped by the schema translator.

use crate::errors::{PatchPlanError, Result};
use crate::introspect::GenericValue;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Deref;

/// Payload of an `add` or `replace` operation.
///
/// Exactly one arm is populated; on the wire the value appears bare.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WireValue<E = serde_json::Value> {
    String(String),
    Int32(i32),
    Bool(bool),
    Map(serde_json::Map<String, serde_json::Value>),
    Array(Vec<E>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpKind {
    Add,
    Remove,
    Replace,
}

impl OpKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            OpKind::Add => "add",
            OpKind::Remove => "remove",
            OpKind::Replace => "replace",
        }
    }
}

impl fmt::Display for OpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One unit of change. `Remove` has no value by construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum PatchOperation<E = serde_json::Value> {
    Add { path: String, value: WireValue<E> },
    Remove { path: String },
    Replace { path: String, value: WireValue<E> },
}

impl<E> PatchOperation<E> {
    pub fn add(path: impl Into<String>, value: WireValue<E>) -> Self {
        PatchOperation::Add {
            path: path.into(),
            value,
        }
    }

    pub fn remove(path: impl Into<String>) -> Self {
        PatchOperation::Remove { path: path.into() }
    }

    pub fn replace(path: impl Into<String>, value: WireValue<E>) -> Self {
        PatchOperation::Replace {
            path: path.into(),
            value,
        }
    }

    pub fn kind(&self) -> OpKind {
        match self {
            PatchOperation::Add { .. } => OpKind::Add,
            PatchOperation::Remove { .. } => OpKind::Remove,
            PatchOperation::Replace { .. } => OpKind::Replace,
        }
    }

    pub fn path(&self) -> &str {
        match self {
            PatchOperation::Add { path, .. }
            | PatchOperation::Remove { path }
            | PatchOperation::Replace { path, .. } => path,
        }
    }

    pub fn value(&self) -> Option<&WireValue<E>> {
        match self {
            PatchOperation::Add { value, .. } | PatchOperation::Replace { value, .. } => Some(value),
            PatchOperation::Remove { .. } => None,
        }
    }
}

/// Ordered list of operations, in field-declaration order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Patch<E = serde_json::Value>(Vec<PatchOperation<E>>);

impl<E> Patch<E> {
    pub fn new(operations: Vec<PatchOperation<E>>) -> Self {
        Patch(operations)
    }

    pub fn operations(&self) -> &[PatchOperation<E>] {
        &self.0
    }

    pub fn into_operations(self) -> Vec<PatchOperation<E>> {
        self.0
    }

    /// Paths in emission order
    pub fn paths(&self) -> Vec<&str> {
        self.0.iter().map(PatchOperation::path).collect()
    }
}

impl<E> Default for Patch<E> {
    fn default() -> Self {
        Patch(Vec::new())
    }
}

impl<E> Deref for Patch<E> {
    type Target = [PatchOperation<E>];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<E> IntoIterator for Patch<E> {
    type Item = PatchOperation<E>;
    type IntoIter = std::vec::IntoIter<PatchOperation<E>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<E: Serialize> Patch<E> {
    /// Convert to a `json-patch` document for applying to a JSON snapshot.
    pub fn to_json_patch(&self) -> Result<json_patch::Patch> {
        let raw = serde_json::to_value(self).map_err(|e| PatchPlanError::TranslationError {
            path: String::new(),
            reason: format!("failed to serialize patch: {}", e),
        })?;
        serde_json::from_value(raw).map_err(|e| PatchPlanError::TranslationError {
            path: String::new(),
            reason: format!("not a valid RFC 6902 document: {}", e),
        })
    }
}

/// How a declared field is compared
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiffMode {
    /// Full structural diff
    ValueDiff,
    /// Identity-only: compare the `id` of a referenced object
    ReferenceDiff,
}

impl DiffMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiffMode::ValueDiff => "value",
            DiffMode::ReferenceDiff => "reference",
        }
    }
}

/// One top-level field pair to compare, produced from a resource spec
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonField<'a> {
    pub path: String,
    pub desired: GenericValue<'a>,
    pub current: GenericValue<'a>,
    pub mode: DiffMode,
}

/// Append one reference token to a JSON pointer path.
///
/// `~` and `/` inside the segment are escaped per RFC 6901.
pub fn child_path(parent: &str, segment: &str) -> String {
    let mut path = String::with_capacity(parent.len() + segment.len() + 1);
    path.push_str(parent);
    path.push('/');
    for c in segment.chars() {
        match c {
            '~' => path.push_str("~0"),
            '/' => path.push_str("~1"),
            c => path.push(c),
        }
    }
    path
}
