//! Core types shared across patchplan facilities
//!
//! This crate holds the canonical structured-logging vocabulary used by the
//! diff engine, the error facility and the CLI:
//!
//! - **Schema constants**: canonical field keys and event names

pub mod schema;
