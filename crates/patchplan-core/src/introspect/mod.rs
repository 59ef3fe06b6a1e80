//! Generic value introspection.
//!
//! Domain types never reach the diff engine directly. Each one implements
//! [`Describe`], producing a borrowed [`GenericValue`] tree over a closed set
//! of structural kinds. Struct field tables are generated at compile time by
//! [`describe_struct!`](crate::describe_struct).

pub mod macros;
pub mod nullable;

use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

pub use nullable::{describe_wrapper, Nullable, NullableWrapper};

/// Name of the identity attribute on reference sub-objects
pub const REFERENCE_ID_FIELD: &str = "id";

/// A structural view of a domain value.
///
/// Borrowed from the value it describes; created and dropped within one diff
/// call.
#[derive(Debug, Clone, PartialEq)]
pub enum GenericValue<'a> {
    /// Not set (`None`, missing map entry)
    Absent,
    /// Explicit null (JSON `null`)
    Null,
    Scalar(Scalar<'a>),
    /// Ordered collection; only ever compared as a whole
    Sequence(Vec<GenericValue<'a>>),
    /// Free-form keyed collection, entries sorted by key
    Mapping(Vec<(&'a str, GenericValue<'a>)>),
    /// Fixed field table, in declaration order, keyed by wire name
    Struct(Vec<(&'static str, GenericValue<'a>)>),
    /// Tri-state wrapper: `None` is unset, `Some(Null)` is explicitly
    /// empty, anything else is present
    Optional(Option<Box<GenericValue<'a>>>),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scalar<'a> {
    Str(&'a str),
    Int(i64),
    Float(f64),
    Bool(bool),
}

/// Discriminant of a [`GenericValue`], used in errors and logs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Absent,
    Null,
    String,
    Int,
    Float,
    Bool,
    Sequence,
    Mapping,
    Struct,
    Optional,
}

impl ValueKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueKind::Absent => "absent",
            ValueKind::Null => "null",
            ValueKind::String => "string",
            ValueKind::Int => "int",
            ValueKind::Float => "float",
            ValueKind::Bool => "bool",
            ValueKind::Sequence => "sequence",
            ValueKind::Mapping => "mapping",
            ValueKind::Struct => "struct",
            ValueKind::Optional => "optional",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<'a> GenericValue<'a> {
    pub fn kind(&self) -> ValueKind {
        match self {
            GenericValue::Absent => ValueKind::Absent,
            GenericValue::Null => ValueKind::Null,
            GenericValue::Scalar(Scalar::Str(_)) => ValueKind::String,
            GenericValue::Scalar(Scalar::Int(_)) => ValueKind::Int,
            GenericValue::Scalar(Scalar::Float(_)) => ValueKind::Float,
            GenericValue::Scalar(Scalar::Bool(_)) => ValueKind::Bool,
            GenericValue::Sequence(_) => ValueKind::Sequence,
            GenericValue::Mapping(_) => ValueKind::Mapping,
            GenericValue::Struct(_) => ValueKind::Struct,
            GenericValue::Optional(_) => ValueKind::Optional,
        }
    }

    /// True for `Absent` and `Null`
    pub fn is_absent(&self) -> bool {
        matches!(self, GenericValue::Absent | GenericValue::Null)
    }

    /// Unwrap optional wrappers down to a present value.
    ///
    /// Returns `None` for absent, null, unset and explicitly-empty values.
    pub fn present(&self) -> Option<&GenericValue<'a>> {
        match self {
            GenericValue::Absent | GenericValue::Null | GenericValue::Optional(None) => None,
            GenericValue::Optional(Some(inner)) => inner.present(),
            other => Some(other),
        }
    }

    /// Zero or empty scalar (`""`, `0`, `0.0`). Booleans are never zero.
    pub fn is_zero_scalar(&self) -> bool {
        match self {
            GenericValue::Scalar(Scalar::Str(s)) => s.is_empty(),
            GenericValue::Scalar(Scalar::Int(i)) => *i == 0,
            GenericValue::Scalar(Scalar::Float(f)) => *f == 0.0,
            _ => false,
        }
    }

    /// Look up a struct field or mapping entry by wire name
    pub fn field(&self, name: &str) -> Option<&GenericValue<'a>> {
        match self.present()? {
            GenericValue::Struct(fields) => fields.iter().find(|(n, _)| *n == name).map(|(_, v)| v),
            GenericValue::Mapping(entries) => {
                entries.iter().find(|(k, _)| *k == name).map(|(_, v)| v)
            }
            _ => None,
        }
    }

    /// The present `id` of a reference sub-object, if it has one
    pub fn reference_id(&self) -> Option<&GenericValue<'a>> {
        self.field(REFERENCE_ID_FIELD)?.present()
    }

    /// Dropped from serialized struct output
    fn is_omitted(&self) -> bool {
        matches!(self, GenericValue::Absent | GenericValue::Optional(None))
    }
}

impl Serialize for GenericValue<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            GenericValue::Absent | GenericValue::Null | GenericValue::Optional(None) => {
                serializer.serialize_none()
            }
            GenericValue::Optional(Some(inner)) => inner.serialize(serializer),
            GenericValue::Scalar(Scalar::Str(s)) => serializer.serialize_str(s),
            GenericValue::Scalar(Scalar::Int(i)) => serializer.serialize_i64(*i),
            GenericValue::Scalar(Scalar::Float(f)) => serializer.serialize_f64(*f),
            GenericValue::Scalar(Scalar::Bool(b)) => serializer.serialize_bool(*b),
            GenericValue::Sequence(items) => serializer.collect_seq(items),
            GenericValue::Mapping(entries) => {
                serializer.collect_map(entries.iter().map(|(k, v)| (*k, v)))
            }
            GenericValue::Struct(fields) => {
                let mut map = serializer.serialize_map(None)?;
                for (name, value) in fields.iter().filter(|(_, v)| !v.is_omitted()) {
                    map.serialize_entry(name, value)?;
                }
                map.end()
            }
        }
    }
}

/// Capability to expose a value's structure to the diff engine
pub trait Describe {
    fn describe(&self) -> GenericValue<'_>;
}

impl<T: Describe + ?Sized> Describe for &T {
    fn describe(&self) -> GenericValue<'_> {
        (**self).describe()
    }
}

impl<T: Describe + ?Sized> Describe for Box<T> {
    fn describe(&self) -> GenericValue<'_> {
        (**self).describe()
    }
}

impl Describe for str {
    fn describe(&self) -> GenericValue<'_> {
        GenericValue::Scalar(Scalar::Str(self))
    }
}

impl Describe for String {
    fn describe(&self) -> GenericValue<'_> {
        GenericValue::Scalar(Scalar::Str(self.as_str()))
    }
}

impl Describe for bool {
    fn describe(&self) -> GenericValue<'_> {
        GenericValue::Scalar(Scalar::Bool(*self))
    }
}

impl Describe for i32 {
    fn describe(&self) -> GenericValue<'_> {
        GenericValue::Scalar(Scalar::Int(i64::from(*self)))
    }
}

impl Describe for i64 {
    fn describe(&self) -> GenericValue<'_> {
        GenericValue::Scalar(Scalar::Int(*self))
    }
}

impl Describe for u32 {
    fn describe(&self) -> GenericValue<'_> {
        GenericValue::Scalar(Scalar::Int(i64::from(*self)))
    }
}

impl Describe for f64 {
    fn describe(&self) -> GenericValue<'_> {
        GenericValue::Scalar(Scalar::Float(*self))
    }
}

/// A plain optional reference: `None` is absent, not a tri-state wrapper
impl<T: Describe> Describe for Option<T> {
    fn describe(&self) -> GenericValue<'_> {
        match self {
            Some(v) => v.describe(),
            None => GenericValue::Absent,
        }
    }
}

impl<T: Describe> Describe for Vec<T> {
    fn describe(&self) -> GenericValue<'_> {
        GenericValue::Sequence(self.iter().map(Describe::describe).collect())
    }
}

impl<T: Describe> Describe for BTreeMap<String, T> {
    fn describe(&self) -> GenericValue<'_> {
        GenericValue::Mapping(self.iter().map(|(k, v)| (k.as_str(), v.describe())).collect())
    }
}

impl<T: Describe, S> Describe for HashMap<String, T, S> {
    fn describe(&self) -> GenericValue<'_> {
        let mut entries: Vec<_> = self.iter().map(|(k, v)| (k.as_str(), v.describe())).collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        GenericValue::Mapping(entries)
    }
}

impl Describe for serde_json::Value {
    fn describe(&self) -> GenericValue<'_> {
        use serde_json::Value;
        match self {
            Value::Null => GenericValue::Null,
            Value::Bool(b) => GenericValue::Scalar(Scalar::Bool(*b)),
            Value::Number(n) => match n.as_i64() {
                Some(i) => GenericValue::Scalar(Scalar::Int(i)),
                None => GenericValue::Scalar(Scalar::Float(n.as_f64().unwrap_or(f64::NAN))),
            },
            Value::String(s) => GenericValue::Scalar(Scalar::Str(s.as_str())),
            Value::Array(items) => GenericValue::Sequence(items.iter().map(Describe::describe).collect()),
            Value::Object(map) => {
                let mut entries: Vec<_> =
                    map.iter().map(|(k, v)| (k.as_str(), v.describe())).collect();
                // serde_json may preserve insertion order; mappings are key-sorted
                entries.sort_by(|a, b| a.0.cmp(b.0));
                GenericValue::Mapping(entries)
            }
        }
    }
}
