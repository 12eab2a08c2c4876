//! Test helpers shared across crates.
//!
//! This crate provides a ready-made type tree for exercising subtype
//! dispatch, a record builder, and `figment::Jail` plumbing for tests that
//! load records from files.

pub mod figment;
pub mod zoo;

use anyhow::{Result, anyhow};
use configable::record::{self, Record};
use serde_json::Value;

/// Convert a JSON literal into a [`Record`], failing for non-objects.
///
/// # Errors
///
/// Returns an error when `value` is not a JSON object.
pub fn record(value: Value) -> Result<Record> {
    record::from_value(value).map_err(|err| anyhow!(err.to_string()))
}
