//! Compile-time field tables for domain structs.

/// Implement [`Describe`](crate::introspect::Describe) for a struct.
///
/// Each entry maps a Rust field to its wire name; the generated table keeps
/// the listed order, which is the order nested fields are diffed in.
///
/// ```
/// use patchplan_core::describe_struct;
/// use patchplan_core::introspect::{Describe, GenericValue};
///
/// struct OwnerRef {
///     id: String,
///     display_name: String,
/// }
///
/// describe_struct!(OwnerRef {
///     id => "id",
///     display_name => "name",
/// });
///
/// let owner = OwnerRef { id: "2c9180".into(), display_name: "Ops".into() };
/// assert!(matches!(owner.describe(), GenericValue::Struct(_)));
/// assert!(owner.describe().reference_id().is_some());
/// ```
#[macro_export]
macro_rules! describe_struct {
    ($ty:ty { $($field:ident => $wire:literal),* $(,)? }) => {
        impl $crate::introspect::Describe for $ty {
            fn describe(&self) -> $crate::introspect::GenericValue<'_> {
                $crate::introspect::GenericValue::Struct(vec![
                    $(($wire, $crate::introspect::Describe::describe(&self.$field)),)*
                ])
            }
        }
    };
}
