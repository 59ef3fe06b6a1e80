//! Tri-state optional wrapper.
//!
//! Generated API models distinguish a field that was never set from one set
//! to an explicit `null`. [`Nullable`] carries that distinction, and
//! [`NullableWrapper`] is the capability any wrapper type implements to be
//! recognized by the introspector.

use super::{Describe, GenericValue};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Capability implemented by tri-state wrapper types
pub trait NullableWrapper {
    type Inner: Describe;

    /// Set, either to a value or to an explicit null
    fn is_set(&self) -> bool;

    /// The inner value, when set and not null
    fn get(&self) -> Option<&Self::Inner>;
}

/// Describe any tri-state wrapper as [`GenericValue::Optional`]
pub fn describe_wrapper<W: NullableWrapper>(wrapper: &W) -> GenericValue<'_> {
    if !wrapper.is_set() {
        return GenericValue::Optional(None);
    }
    let inner = match wrapper.get() {
        Some(value) => value.describe(),
        None => GenericValue::Null,
    };
    GenericValue::Optional(Some(Box::new(inner)))
}

/// A value that is unset, explicitly null, or present.
///
/// Use with `#[serde(default, skip_serializing_if = "Nullable::is_unset")]`
/// so that unset fields stay off the wire while explicit nulls survive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Nullable<T> {
    Unset,
    Null,
    Value(T),
}

impl<T> Nullable<T> {
    pub fn is_unset(&self) -> bool {
        matches!(self, Nullable::Unset)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Nullable::Null)
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            Nullable::Value(v) => Some(v),
            _ => None,
        }
    }

    pub fn into_option(self) -> Option<T> {
        match self {
            Nullable::Value(v) => Some(v),
            _ => None,
        }
    }
}

impl<T> Default for Nullable<T> {
    fn default() -> Self {
        Nullable::Unset
    }
}

impl<T> From<T> for Nullable<T> {
    fn from(value: T) -> Self {
        Nullable::Value(value)
    }
}

impl<T: Describe> NullableWrapper for Nullable<T> {
    type Inner = T;

    fn is_set(&self) -> bool {
        !self.is_unset()
    }

    fn get(&self) -> Option<&T> {
        self.value()
    }
}

impl<T: Describe> Describe for Nullable<T> {
    fn describe(&self) -> GenericValue<'_> {
        describe_wrapper(self)
    }
}

impl<T: Serialize> Serialize for Nullable<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Nullable::Value(v) => serializer.serialize_some(v),
            Nullable::Unset | Nullable::Null => serializer.serialize_none(),
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Nullable<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // A missing field never reaches here; `#[serde(default)]` yields Unset
        Ok(match Option::<T>::deserialize(deserializer)? {
            Some(v) => Nullable::Value(v),
            None => Nullable::Null,
        })
    }
}
