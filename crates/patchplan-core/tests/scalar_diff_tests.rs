//! Scalar and optional-wrapper rules of the diff engine.

use patchplan_core::diff::{diff_values, DiffOptions, OpKind, Patch, PatchOperation, WireValue};
use patchplan_core::errors::PatchPlanError;
use patchplan_core::introspect::{Describe, Nullable};

fn diff<T: Describe + ?Sized>(desired: &T, current: &T) -> Patch {
    diff_values(
        "/field",
        &desired.describe(),
        &current.describe(),
        &DiffOptions::default(),
    )
    .unwrap()
}

fn strict<T: Describe + ?Sized>(desired: &T, current: &T) -> Patch {
    diff_values(
        "/field",
        &desired.describe(),
        &current.describe(),
        &DiffOptions::strict(),
    )
    .unwrap()
}

fn op_kinds(patch: &Patch) -> Vec<OpKind> {
    patch.iter().map(PatchOperation::kind).collect()
}

#[test]
fn test_empty_desired_string_removes() {
    let patch = diff("", "x");
    assert_eq!(patch.operations(), &[PatchOperation::remove("/field")]);
}

#[test]
fn test_empty_current_string_adds() {
    let patch = diff("x", "");
    assert_eq!(
        patch.operations(),
        &[PatchOperation::add("/field", WireValue::String("x".to_string()))]
    );
}

#[test]
fn test_changed_string_replaces() {
    let patch = diff("x", "y");
    assert_eq!(
        patch.operations(),
        &[PatchOperation::replace("/field", WireValue::String("x".to_string()))]
    );
}

#[test]
fn test_equal_string_is_no_op() {
    assert!(diff("x", "x").is_empty());
    assert!(diff("", "").is_empty());
}

#[test]
fn test_integer_rules_follow_string_rules() {
    assert_eq!(op_kinds(&diff(&0i32, &5i32)), vec![OpKind::Remove]);
    assert_eq!(op_kinds(&diff(&5i32, &0i32)), vec![OpKind::Add]);
    assert_eq!(
        diff(&7i32, &5i32).operations(),
        &[PatchOperation::replace("/field", WireValue::Int32(7))]
    );
    assert!(diff(&5i32, &5i32).is_empty());
}

#[test]
fn test_false_is_a_value_not_unset() {
    assert_eq!(
        diff(&false, &true).operations(),
        &[PatchOperation::replace("/field", WireValue::Bool(false))]
    );
    assert_eq!(
        diff(&true, &false).operations(),
        &[PatchOperation::replace("/field", WireValue::Bool(true))]
    );
    assert!(diff(&false, &false).is_empty());
}

#[test]
fn test_strict_mode_keeps_zero_values() {
    assert_eq!(
        strict("", "x").operations(),
        &[PatchOperation::replace("/field", WireValue::String(String::new()))]
    );
    assert_eq!(
        strict(&3i32, &0i32).operations(),
        &[PatchOperation::replace("/field", WireValue::Int32(3))]
    );
    assert!(strict("", "").is_empty());
}

#[test]
fn test_option_none_is_absent() {
    let some: Option<String> = Some("x".to_string());
    let none: Option<String> = None;
    assert_eq!(op_kinds(&diff(&some, &none)), vec![OpKind::Add]);
    assert_eq!(op_kinds(&diff(&none, &some)), vec![OpKind::Remove]);
    assert!(diff(&none, &none).is_empty());
}

#[test]
fn test_absent_zero_value_is_not_added() {
    let zero: Option<i32> = Some(0);
    let none: Option<i32> = None;
    assert!(diff(&zero, &none).is_empty());
}

#[test]
fn test_nullable_both_present_recurses_at_same_path() {
    let desired: Nullable<String> = "b".to_string().into();
    let current: Nullable<String> = "a".to_string().into();
    assert_eq!(
        diff(&desired, &current).operations(),
        &[PatchOperation::replace("/field", WireValue::String("b".to_string()))]
    );
}

#[test]
fn test_nullable_transitions() {
    let value: Nullable<String> = "a".to_string().into();
    let null: Nullable<String> = Nullable::Null;
    let unset: Nullable<String> = Nullable::Unset;

    assert_eq!(op_kinds(&diff(&value, &unset)), vec![OpKind::Add]);
    assert_eq!(op_kinds(&diff(&value, &null)), vec![OpKind::Add]);
    assert_eq!(op_kinds(&diff(&null, &value)), vec![OpKind::Remove]);
    assert_eq!(op_kinds(&diff(&unset, &value)), vec![OpKind::Remove]);
    assert!(diff(&null, &unset).is_empty());
    assert!(diff(&unset, &unset).is_empty());
}

#[test]
fn test_changed_float_cannot_be_encoded() {
    let err = diff_values(
        "/ratio",
        &0.5f64.describe(),
        &0.25f64.describe(),
        &DiffOptions::default(),
    )
    .unwrap_err();
    assert_eq!(
        err,
        PatchPlanError::UnsupportedValueKind {
            kind: "float".to_string(),
            path: "/ratio".to_string(),
        }
    );
}

#[test]
fn test_equal_floats_need_no_encoding() {
    assert!(diff(&0.5f64, &0.5f64).is_empty());
}
