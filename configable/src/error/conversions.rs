//! Trait-based conversions between external error types and `ConfigableError`.

use super::ConfigableError;

#[cfg(feature = "figment")]
impl From<figment::Error> for ConfigableError {
    fn from(e: figment::Error) -> Self {
        Self::gathering(e)
    }
}
