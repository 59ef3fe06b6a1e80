//! Schema generation translator.
//!
//! Two generated API packages can describe the same resource with
//! nominally different array element types. A patch produced against one
//! generation is rewritten for the other by re-encoding each `Array`
//! payload; every other payload and every `remove` passes through as is.

pub mod schemas;

use crate::diff::model::{Patch, PatchOperation, WireValue};
use crate::errors::{PatchPlanError, Result};
use crate::{log_op_end, log_op_error, log_op_start};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Instant;

/// Rewrite a patch whose arrays hold `A` elements into one holding `B`.
///
/// # Errors
///
/// `TranslationError` when an array does not re-decode under `B`, which
/// means the two generations are not isomorphic for that value.
pub fn translate<A, B>(patch: Patch<A>) -> Result<Patch<B>>
where
    A: Serialize,
    B: DeserializeOwned,
{
    let start = Instant::now();
    log_op_start!("translate", op_count = patch.len());

    let result: Result<Vec<PatchOperation<B>>> =
        patch.into_iter().map(translate_operation).collect();

    match result {
        Ok(operations) => {
            log_op_end!(
                "translate",
                duration_ms = start.elapsed().as_millis() as u64,
                op_count = operations.len()
            );
            Ok(Patch::new(operations))
        }
        Err(err) => {
            log_op_error!(
                "translate",
                &err,
                duration_ms = start.elapsed().as_millis() as u64
            );
            Err(err)
        }
    }
}

fn translate_operation<A, B>(op: PatchOperation<A>) -> Result<PatchOperation<B>>
where
    A: Serialize,
    B: DeserializeOwned,
{
    Ok(match op {
        PatchOperation::Add { path, value } => {
            let value = translate_value(&path, value)?;
            PatchOperation::Add { path, value }
        }
        PatchOperation::Replace { path, value } => {
            let value = translate_value(&path, value)?;
            PatchOperation::Replace { path, value }
        }
        PatchOperation::Remove { path } => PatchOperation::Remove { path },
    })
}

fn translate_value<A, B>(path: &str, value: WireValue<A>) -> Result<WireValue<B>>
where
    A: Serialize,
    B: DeserializeOwned,
{
    Ok(match value {
        WireValue::String(s) => WireValue::String(s),
        WireValue::Int32(i) => WireValue::Int32(i),
        WireValue::Bool(b) => WireValue::Bool(b),
        WireValue::Map(m) => WireValue::Map(m),
        WireValue::Array(items) => {
            let raw = serde_json::to_value(&items).map_err(|e| PatchPlanError::TranslationError {
                path: path.to_string(),
                reason: format!("failed to encode array: {}", e),
            })?;
            let items = serde_json::from_value(raw).map_err(|e| PatchPlanError::TranslationError {
                path: path.to_string(),
                reason: format!("failed to decode array under target schema: {}", e),
            })?;
            WireValue::Array(items)
        }
    })
}
