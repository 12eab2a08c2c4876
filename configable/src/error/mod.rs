//! Error types produced while defining types and constructing instances.

mod constructors;
mod conversions;
mod types;

pub(crate) use constructors::json_kind;
pub use types::{BoxError, ConfigableError};

#[cfg(test)]
mod tests;
