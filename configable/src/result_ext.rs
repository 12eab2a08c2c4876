//! Extensions for mapping errors to `ConfigableResult` concisely.
//!
//! These helpers reduce repetitive `.map_err(|e| Arc::new(...))` patterns
//! when converting external error types into the crate's
//! `ConfigableResult<T>` alias (`Result<T, Arc<ConfigableError>>`), and when
//! annotating nested failures with the setting that triggered them.
//!
//! # Examples
//!
//! ```
//! use configable::{ConfigableResult, ConfigableResultExt};
//!
//! fn gather() -> ConfigableResult<serde_json::Value> {
//!     let figment = figment::Figment::new();
//!     figment.extract::<serde_json::Value>().into_configable()
//! }
//! ```

use std::sync::Arc;

use crate::{ConfigableError, ConfigableResult};

/// Generic extension for mapping any `Result<T, E>` with
/// `E: Into<ConfigableError>` into a `ConfigableResult<T>`.
pub trait ConfigableResultExt<T, E> {
    /// Convert `Result<T, E>` into `ConfigableResult<T>` using
    /// `Into<ConfigableError>`.
    ///
    /// # Errors
    ///
    /// Propagates the original error after conversion into
    /// `Arc<ConfigableError>`.
    fn into_configable(self) -> ConfigableResult<T>;
}

impl<T, E> ConfigableResultExt<T, E> for Result<T, E>
where
    E: Into<ConfigableError>,
{
    fn into_configable(self) -> ConfigableResult<T> {
        self.map_err(|e| Arc::new(e.into()))
    }
}

/// Extension that attributes a nested construction failure to a setting.
pub trait NestedResultExt<T> {
    /// Wrap the error in [`ConfigableError::KindConstruction`] naming
    /// `setting`.
    ///
    /// # Errors
    ///
    /// Returns the wrapped error when the input is `Err`.
    fn in_setting(self, setting: &str) -> ConfigableResult<T>;
}

impl<T> NestedResultExt<T> for ConfigableResult<T> {
    fn in_setting(self, setting: &str) -> ConfigableResult<T> {
        self.map_err(|e| Arc::new(ConfigableError::kind_construction(setting, e)))
    }
}
