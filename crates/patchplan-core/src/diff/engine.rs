//! Recursive desired-vs-current comparator.
//!
//! The entry point for typed resources is [`diff_resource`]; it expands the
//! resource's comparison spec into [`ComparisonField`]s and hands them to
//! [`diff_fields`]. Operations come out in field-declaration order. Any
//! error aborts the whole call; no partial patch is returned.

use crate::diff::encoder::encode;
use crate::diff::model::{child_path, ComparisonField, DiffMode, Patch, PatchOperation};
use crate::errors::{PatchPlanError, Result};
use crate::introspect::{GenericValue, ValueKind, REFERENCE_ID_FIELD};
use crate::registry::Comparable;
use crate::{log_op_end, log_op_error, log_op_start};
use std::time::Instant;

/// Engine policy switches
///
/// No option relaxes the wire limits: a changed float or out-of-`i32`
/// integer, including a leaf inside a free-form JSON map, aborts the diff
/// with `UnsupportedValueKind`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiffOptions {
    /// Treat `""`, `0` and `0.0` as "not set": a change to zero becomes a
    /// remove and a change from zero becomes an add.
    ///
    /// On by default. This cannot express a legitimate zero (a threshold of
    /// 0 is removed rather than written); turn it off for such resources.
    pub zero_means_unset: bool,
}

impl Default for DiffOptions {
    fn default() -> Self {
        Self {
            zero_means_unset: true,
        }
    }
}

impl DiffOptions {
    /// Zero and empty scalars are ordinary values
    pub fn strict() -> Self {
        Self {
            zero_means_unset: false,
        }
    }
}

/// Diff two snapshots of the same resource type with default options.
pub fn diff_resource<R: Comparable>(desired: &R, current: &R) -> Result<Patch> {
    diff_resource_with(desired, current, &DiffOptions::default())
}

/// Diff two snapshots of the same resource type.
///
/// # Errors
///
/// - `ShapeMismatch`: a `Describe` implementation produced different kinds
///   for the two sides
/// - `UnsupportedValueKind`: a changed value has no wire representation
pub fn diff_resource_with<R: Comparable>(
    desired: &R,
    current: &R,
    options: &DiffOptions,
) -> Result<Patch> {
    let spec = R::comparison_spec();
    let start = Instant::now();
    log_op_start!(
        "diff_resource",
        resource_kind = spec.kind(),
        field_count = spec.len()
    );

    let fields = spec.fields(desired, current);
    match diff_fields(&fields, options) {
        Ok(patch) => {
            log_op_end!(
                "diff_resource",
                duration_ms = start.elapsed().as_millis() as u64,
                resource_kind = spec.kind(),
                op_count = patch.len()
            );
            Ok(patch)
        }
        Err(err) => {
            log_op_error!(
                "diff_resource",
                &err,
                duration_ms = start.elapsed().as_millis() as u64,
                resource_kind = spec.kind()
            );
            Err(err)
        }
    }
}

/// Diff an explicit, ordered list of field pairs.
pub fn diff_fields(fields: &[ComparisonField<'_>], options: &DiffOptions) -> Result<Patch> {
    let mut differ = Differ::new(options);
    for field in fields {
        match field.mode {
            DiffMode::ValueDiff => differ.diff_value(&field.path, &field.desired, &field.current)?,
            DiffMode::ReferenceDiff => {
                differ.diff_reference(&field.path, &field.desired, &field.current)?
            }
        }
    }
    Ok(Patch::new(differ.ops))
}

/// Diff two free-standing values rooted at `path`.
pub fn diff_values(
    path: &str,
    desired: &GenericValue<'_>,
    current: &GenericValue<'_>,
    options: &DiffOptions,
) -> Result<Patch> {
    let mut differ = Differ::new(options);
    differ.diff_value(path, desired, current)?;
    Ok(Patch::new(differ.ops))
}

struct Differ<'o> {
    options: &'o DiffOptions,
    ops: Vec<PatchOperation>,
}

impl<'o> Differ<'o> {
    fn new(options: &'o DiffOptions) -> Self {
        Self {
            options,
            ops: Vec::new(),
        }
    }

    fn diff_value(
        &mut self,
        path: &str,
        desired: &GenericValue<'_>,
        current: &GenericValue<'_>,
    ) -> Result<()> {
        if !desired.is_absent() && !current.is_absent() && !same_shape(desired, current) {
            return Err(shape_mismatch(path, desired, current));
        }

        if let (GenericValue::Optional(_), GenericValue::Optional(_)) = (desired, current) {
            return match (desired.present(), current.present()) {
                (Some(d), Some(c)) => self.diff_value(path, d, c),
                (Some(d), None) => self.add(path, d),
                (None, Some(_)) => {
                    self.remove(path);
                    Ok(())
                }
                (None, None) => Ok(()),
            };
        }

        match (self.is_unset(desired), self.is_unset(current)) {
            (true, true) => Ok(()),
            (true, false) => {
                self.remove(path);
                Ok(())
            }
            (false, true) => self.add(path, desired),
            (false, false) => match (desired, current) {
                (GenericValue::Scalar(d), GenericValue::Scalar(c)) => {
                    if d != c {
                        self.replace(path, desired)?;
                    }
                    Ok(())
                }
                // Sequences are replaced whole; fine while they stay small
                (GenericValue::Sequence(d), GenericValue::Sequence(c)) => {
                    if d != c {
                        self.replace(path, desired)?;
                    }
                    Ok(())
                }
                (GenericValue::Mapping(d), GenericValue::Mapping(c)) => {
                    self.diff_mapping(path, d, c)
                }
                (GenericValue::Struct(d), GenericValue::Struct(c)) => {
                    self.diff_struct(path, d, c)
                }
                _ => Err(shape_mismatch(path, desired, current)),
            },
        }
    }

    /// Removals first, then desired keys; both in key order.
    ///
    /// A key on one side only is removed or added as is. The zero rule
    /// applies to keys present on both sides.
    fn diff_mapping(
        &mut self,
        path: &str,
        desired: &[(&str, GenericValue<'_>)],
        current: &[(&str, GenericValue<'_>)],
    ) -> Result<()> {
        for (key, value) in current {
            let kept = desired.iter().any(|(k, _)| k == key);
            if !kept && !matches!(value, GenericValue::Optional(None)) {
                self.remove(&child_path(path, key));
            }
        }
        for (key, value) in desired {
            let child = child_path(path, key);
            match current.iter().find(|(k, _)| k == key) {
                Some((_, existing)) => self.diff_value(&child, value, existing)?,
                None => {
                    if let Some(value) = value.present() {
                        self.add(&child, value)?;
                    }
                }
            }
        }
        Ok(())
    }

    fn diff_struct(
        &mut self,
        path: &str,
        desired: &[(&'static str, GenericValue<'_>)],
        current: &[(&'static str, GenericValue<'_>)],
    ) -> Result<()> {
        if desired.len() != current.len() {
            return Err(PatchPlanError::ShapeMismatch {
                path: path.to_string(),
                desired: ValueKind::Struct,
                current: ValueKind::Struct,
            });
        }
        for ((d_name, d_value), (c_name, c_value)) in desired.iter().zip(current) {
            if d_name != c_name {
                return Err(PatchPlanError::ShapeMismatch {
                    path: child_path(path, d_name),
                    desired: d_value.kind(),
                    current: c_value.kind(),
                });
            }
            self.diff_value(&child_path(path, d_name), d_value, c_value)?;
        }
        Ok(())
    }

    /// Reference fields compare only the target's `id`.
    fn diff_reference(
        &mut self,
        path: &str,
        desired: &GenericValue<'_>,
        current: &GenericValue<'_>,
    ) -> Result<()> {
        match (desired.present(), current.present()) {
            (None, None) => Ok(()),
            (Some(d), None) => self.add(path, d),
            (None, Some(_)) => {
                self.remove(path);
                Ok(())
            }
            (Some(d), Some(c)) => {
                if !same_shape(d, c) {
                    return Err(shape_mismatch(path, d, c));
                }
                match (self.reference_id(d), self.reference_id(c)) {
                    (Some(d_id), Some(c_id)) if d_id == c_id => Ok(()),
                    (Some(d_id), _) => self.replace(&child_path(path, REFERENCE_ID_FIELD), d_id),
                    (None, Some(_)) => {
                        self.remove(path);
                        Ok(())
                    }
                    (None, None) => Ok(()),
                }
            }
        }
    }

    fn reference_id<'v, 'a>(&self, value: &'v GenericValue<'a>) -> Option<&'v GenericValue<'a>> {
        value.reference_id().filter(|id| !self.is_unset(id))
    }

    fn is_unset(&self, value: &GenericValue<'_>) -> bool {
        match value.present() {
            None => true,
            Some(value) => self.options.zero_means_unset && value.is_zero_scalar(),
        }
    }

    fn add(&mut self, path: &str, value: &GenericValue<'_>) -> Result<()> {
        let value = encode(path, value)?;
        tracing::debug!(path = %path, patch_op = "add", "emit patch operation");
        self.ops.push(PatchOperation::add(path, value));
        Ok(())
    }

    fn remove(&mut self, path: &str) {
        tracing::debug!(path = %path, patch_op = "remove", "emit patch operation");
        self.ops.push(PatchOperation::remove(path));
    }

    fn replace(&mut self, path: &str, value: &GenericValue<'_>) -> Result<()> {
        let value = encode(path, value)?;
        tracing::debug!(path = %path, patch_op = "replace", "emit patch operation");
        self.ops.push(PatchOperation::replace(path, value));
        Ok(())
    }
}

/// Kinds agree; integers and floats count as one numeric shape
fn same_shape(desired: &GenericValue<'_>, current: &GenericValue<'_>) -> bool {
    let numeric = |k: ValueKind| matches!(k, ValueKind::Int | ValueKind::Float);
    let (d, c) = (desired.kind(), current.kind());
    d == c || (numeric(d) && numeric(c))
}

fn shape_mismatch(
    path: &str,
    desired: &GenericValue<'_>,
    current: &GenericValue<'_>,
) -> PatchPlanError {
    PatchPlanError::ShapeMismatch {
        path: path.to_string(),
        desired: desired.kind(),
        current: current.kind(),
    }
}
