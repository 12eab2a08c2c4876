//! Resolved setting values stored on instances.

use serde_json::Value;

use crate::{Collection, Instance};

/// The value a setting resolved to on one instance.
#[derive(Clone, Debug)]
pub enum SettingValue {
    /// The record lacked the setting and no default applied.
    Missing,
    /// A plain value, after any parse or cast.
    Value(Value),
    /// A nested configurable instance built by [`crate::Kind::Type`].
    Instance(Box<Instance>),
    /// A collection built by [`crate::Kind::Collection`].
    Collection(Collection),
}

impl SettingValue {
    /// Whether the setting resolved to the missing sentinel.
    #[must_use]
    pub const fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }

    /// The plain value, if this is [`Self::Value`].
    #[must_use]
    pub const fn as_value(&self) -> Option<&Value> {
        match self {
            Self::Value(value) => Some(value),
            _ => None,
        }
    }

    /// The nested instance, if this is [`Self::Instance`].
    #[must_use]
    pub fn as_instance(&self) -> Option<&Instance> {
        match self {
            Self::Instance(instance) => Some(instance.as_ref()),
            _ => None,
        }
    }

    /// The collection, if this is [`Self::Collection`].
    #[must_use]
    pub const fn as_collection(&self) -> Option<&Collection> {
        match self {
            Self::Collection(collection) => Some(collection),
            _ => None,
        }
    }

    /// Render the value as JSON; missing values render as `null`.
    #[must_use]
    pub fn to_json(&self) -> Value {
        match self {
            Self::Missing => Value::Null,
            Self::Value(value) => value.clone(),
            Self::Instance(instance) => instance.to_value(),
            Self::Collection(collection) => collection.to_value(),
        }
    }
}
