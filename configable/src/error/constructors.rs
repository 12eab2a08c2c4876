//! Constructors and inspection helpers for `ConfigableError`.

use std::sync::Arc;

use serde_json::Value;

use super::{BoxError, ConfigableError};

impl ConfigableError {
    /// Construct a [`Self::RequiredSettingMissing`] for `setting`.
    ///
    /// # Examples
    ///
    /// ```
    /// use configable::ConfigableError;
    /// let e = ConfigableError::required(String::from("name"));
    /// assert_eq!(e.to_string(), "Setting \"name\" is required");
    /// ```
    #[must_use]
    pub const fn required(setting: String) -> Self {
        Self::RequiredSettingMissing { setting }
    }

    /// Construct a [`Self::Parse`] wrapping a parser failure.
    #[must_use]
    pub fn parse(setting: &str, source: BoxError) -> Self {
        Self::Parse {
            setting: setting.to_owned(),
            source,
        }
    }

    /// Construct a [`Self::Cast`] wrapping a cast failure.
    #[must_use]
    pub const fn cast(source: BoxError) -> Self {
        Self::Cast { source }
    }

    /// Annotate a nested construction failure with the enclosing setting.
    #[must_use]
    pub fn kind_construction(setting: &str, source: Arc<Self>) -> Self {
        Self::KindConstruction {
            setting: setting.to_owned(),
            source,
        }
    }

    /// Construct a [`Self::Gathering`] from a [`figment::Error`].
    ///
    /// # Examples
    ///
    /// ```
    /// use configable::ConfigableError;
    /// let fe = figment::Error::from("boom");
    /// let e = ConfigableError::gathering(fe);
    /// assert!(matches!(e, ConfigableError::Gathering(_)));
    /// ```
    #[cfg(feature = "figment")]
    #[must_use]
    pub fn gathering(source: figment::Error) -> Self {
        Self::Gathering(Box::new(source))
    }

    /// Returns the setting named by this error, if any.
    ///
    /// For nested failures this is the outermost setting; use
    /// [`Self::innermost`] to reach the error raised deepest in the tree.
    #[must_use]
    pub fn setting(&self) -> Option<&str> {
        match self {
            Self::RequiredSettingMissing { setting }
            | Self::InvalidChoice { setting, .. }
            | Self::Parse { setting, .. }
            | Self::KindConstruction { setting, .. }
            | Self::InitHook { setting, .. }
            | Self::UnknownSetting { setting, .. } => Some(setting),
            _ => None,
        }
    }

    /// Follow nested [`Self::KindConstruction`] and [`Self::Element`]
    /// wrappers down to the error that started the failure.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::sync::Arc;
    /// use configable::ConfigableError;
    ///
    /// let inner = Arc::new(ConfigableError::required(String::from("lng")));
    /// let outer = ConfigableError::kind_construction("region", inner);
    /// assert_eq!(outer.innermost().setting(), Some("lng"));
    /// ```
    #[must_use]
    pub fn innermost(&self) -> &Self {
        let mut current = self;
        loop {
            match current {
                Self::KindConstruction { source, .. } | Self::Element { source, .. } => {
                    current = source.as_ref();
                }
                _ => return current,
            }
        }
    }
}

/// Name of the JSON kind of `value`, used in shape diagnostics.
#[must_use]
pub(crate) const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
