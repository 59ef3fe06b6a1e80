//! Converts diff-result values into wire payloads.
//!
//! Structs, mappings and sequences have no direct arm; they go through the
//! same serde serialization used for transport and are re-decoded as a map
//! or an array, so nested and heterogeneous content is represented uniformly.

use crate::diff::model::WireValue;
use crate::errors::{PatchPlanError, Result};
use crate::introspect::{GenericValue, Scalar, ValueKind};
use serde::de::DeserializeOwned;

/// Encode a value as the payload of an `add` or `replace` at `path`.
///
/// # Errors
///
/// - `UnsupportedValueKind`: floats, integers outside the `i32` range, and
///   values that are absent, null or unset have no wire arm.
pub fn encode(path: &str, value: &GenericValue<'_>) -> Result<WireValue> {
    let present = value
        .present()
        .ok_or_else(|| unsupported(value.kind().as_str(), path))?;

    match present {
        GenericValue::Scalar(Scalar::Str(s)) => Ok(WireValue::String((*s).to_string())),
        GenericValue::Scalar(Scalar::Int(i)) => i32::try_from(*i)
            .map(WireValue::Int32)
            .map_err(|_| unsupported("int64", path)),
        GenericValue::Scalar(Scalar::Bool(b)) => Ok(WireValue::Bool(*b)),
        GenericValue::Scalar(Scalar::Float(_)) => Err(unsupported(ValueKind::Float.as_str(), path)),
        GenericValue::Struct(_) | GenericValue::Mapping(_) => {
            round_trip(path, present).map(WireValue::Map)
        }
        GenericValue::Sequence(_) => round_trip(path, present).map(WireValue::Array),
        other => Err(unsupported(other.kind().as_str(), path)),
    }
}

fn round_trip<T: DeserializeOwned>(path: &str, value: &GenericValue<'_>) -> Result<T> {
    let intermediate = serde_json::to_value(value).map_err(|e| PatchPlanError::UnsupportedValueKind {
        kind: format!("{} ({})", value.kind(), e),
        path: path.to_string(),
    })?;
    serde_json::from_value(intermediate).map_err(|e| PatchPlanError::UnsupportedValueKind {
        kind: format!("{} ({})", value.kind(), e),
        path: path.to_string(),
    })
}

fn unsupported(kind: &str, path: &str) -> PatchPlanError {
    PatchPlanError::UnsupportedValueKind {
        kind: kind.to_string(),
        path: path.to_string(),
    }
}
