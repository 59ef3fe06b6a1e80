//! Property tests over generated sources.
//!
//! - diffing a snapshot against itself yields nothing
//! - applying a patch to the current snapshot yields the desired document,
//!   up to zero scalars and the non-id parts of references

use patchplan_core::diff_resource;
use patchplan_core::introspect::Nullable;
use patchplan_core::registry::resources::{Reference, Source};
use proptest::collection::{btree_map, vec};
use proptest::option;
use proptest::prelude::*;
use serde_json::Value;

fn reference_with_id(id: &'static str) -> impl Strategy<Value = Reference> {
    (id, "[A-Z]{0,4}", "[a-z ]{0,6}")
        .prop_map(|(id, ref_type, name)| Reference::new(id, ref_type, name))
}

/// Optional references always carry an id; only a required one may be blank
fn reference() -> impl Strategy<Value = Reference> {
    reference_with_id("[a-c0-9]{1,3}")
}

fn nullable_reference() -> impl Strategy<Value = Nullable<Reference>> {
    prop_oneof![
        Just(Nullable::Unset),
        Just(Nullable::Null),
        reference().prop_map(Nullable::Value),
    ]
}

fn source() -> impl Strategy<Value = Source> {
    (
        "[a-z]{0,6}",
        "[a-z ]{0,10}",
        reference_with_id("[a-c0-9]{0,3}"),
        nullable_reference(),
        "[a-z-]{0,8}",
        option::of(btree_map("[a-d]", "[a-z]{0,3}".prop_map(Value::from), 0..4)),
        -5i32..100,
        option::of(vec("[A-Z_]{1,6}", 0..4)),
        option::of(reference()),
        option::of(any::<bool>()),
    )
        .prop_map(
            |(
                name,
                description,
                owner,
                cluster,
                connector,
                connector_attributes,
                delete_threshold,
                features,
                management_workgroup,
                authoritative,
            )| Source {
                name,
                description,
                owner,
                cluster,
                connector,
                connector_attributes,
                delete_threshold,
                features,
                management_workgroup,
                authoritative,
            },
        )
}

const REFERENCE_FIELDS: [&str; 3] = ["owner", "cluster", "managementWorkgroup"];

/// Wire form of a source as far as a patch can settle it.
///
/// References collapse to their id, and object entries holding `""`, `0`
/// or `null` are dropped.
fn settled(source: &Source) -> Value {
    let mut doc = serde_json::to_value(source).unwrap();
    for field in REFERENCE_FIELDS {
        if let Some(slot) = doc.get_mut(field) {
            let id = slot.get("id").cloned().unwrap_or(Value::Null);
            *slot = id;
        }
    }
    drop_unset(doc)
}

fn drop_unset(value: Value) -> Value {
    match value {
        Value::Object(entries) => Value::Object(
            entries
                .into_iter()
                .filter(|(_, v)| !(v.is_null() || *v == "" || *v == 0))
                .map(|(k, v)| (k, drop_unset(v)))
                .collect(),
        ),
        other => other,
    }
}

proptest! {
    #[test]
    fn prop_diff_against_self_is_empty(s in source()) {
        let patch = diff_resource(&s, &s.clone()).unwrap();
        prop_assert!(patch.is_empty(), "unexpected ops: {:?}", patch);
    }

    #[test]
    fn prop_diff_is_deterministic(desired in source(), current in source()) {
        let first = diff_resource(&desired, &current).unwrap();
        let second = diff_resource(&desired, &current).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_applied_patch_converges(desired in source(), current in source()) {
        let patch = diff_resource(&desired, &current).unwrap();

        let mut doc = serde_json::to_value(&current).unwrap();
        let document = patch.to_json_patch().unwrap();
        json_patch::patch(&mut doc, &document.0).unwrap();
        let patched: Source = serde_json::from_value(doc).unwrap();

        prop_assert_eq!(
            settled(&patched),
            settled(&desired),
            "patch {:?} did not settle",
            patch
        );
    }
}
