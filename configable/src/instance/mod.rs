//! Constructed instances of configurable types.

mod construct;

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::record::Record;
use crate::registry::{Member, TypeDecl};
use crate::setting::{SettingValue, pipeline};
use crate::{Collection, ConfigableError, ConfigableResult, Registry, TypeId};

/// An instance of a configurable type.
///
/// Holds the raw record it was built from, one resolved value per declared
/// setting, and a free-form attribute map that init hooks use for derived
/// state.
#[derive(Clone)]
pub struct Instance {
    decl: Arc<TypeDecl>,
    record: Record,
    values: BTreeMap<String, SettingValue>,
    attrs: Map<String, Value>,
}

impl Instance {
    pub(crate) fn empty(decl: Arc<TypeDecl>, record: Record) -> Self {
        Self {
            decl,
            record,
            values: BTreeMap::new(),
            attrs: Map::new(),
        }
    }

    /// Handle of the concrete type.
    #[must_use]
    pub fn type_id(&self) -> TypeId {
        self.decl.id()
    }

    /// Name of the concrete type.
    #[must_use]
    pub fn type_name(&self) -> &str {
        self.decl.name()
    }

    /// Declaration of the concrete type.
    #[must_use]
    pub fn decl(&self) -> &TypeDecl {
        &self.decl
    }

    /// Whether the concrete type is `ancestor` or one of its subtypes.
    #[must_use]
    pub fn is_a(&self, registry: &Registry, ancestor: TypeId) -> bool {
        registry.is_subtype_of(self.type_id(), ancestor)
    }

    /// The record the instance was constructed from.
    ///
    /// Writes through [`Self::set_setting`] never alter it.
    #[must_use]
    pub const fn record(&self) -> &Record {
        &self.record
    }

    /// The resolved value of `setting`.
    #[must_use]
    pub fn get(&self, setting: &str) -> Option<&SettingValue> {
        self.values.get(setting)
    }

    /// The plain value of `setting`, if it resolved to one.
    #[must_use]
    pub fn value(&self, setting: &str) -> Option<&Value> {
        self.get(setting).and_then(SettingValue::as_value)
    }

    /// The nested instance of `setting`, if it resolved to one.
    #[must_use]
    pub fn nested(&self, setting: &str) -> Option<&Self> {
        self.get(setting).and_then(SettingValue::as_instance)
    }

    /// The collection of `setting`, if it resolved to one.
    #[must_use]
    pub fn collection(&self, setting: &str) -> Option<&Collection> {
        self.get(setting).and_then(SettingValue::as_collection)
    }

    /// Iterate over every resolved setting, ordered by name.
    pub fn settings(&self) -> impl Iterator<Item = (&str, &SettingValue)> {
        self.values.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// A derived attribute recorded by an init hook.
    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&Value> {
        self.attrs.get(name)
    }

    /// Record a derived attribute, returning any previous value.
    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.attrs.insert(name.into(), value.into())
    }

    /// Write a new raw value for `setting`, re-running its whole pipeline
    /// and init hook.
    ///
    /// The previous value is kept when the pipeline fails before the value
    /// is stored. A `null` raw value counts as missing. A nested value runs
    /// its hooks with this instance as parent; this instance's own hook runs
    /// without a parent, since an instance does not keep a link to the one
    /// holding it.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigableError::UnknownSetting`] when the concrete type
    /// declares no such setting, or any pipeline error.
    ///
    /// # Examples
    ///
    /// ```
    /// use configable::{Registry, Setting, TypeSpec, record};
    /// use serde_json::json;
    ///
    /// let mut registry = Registry::new();
    /// let car = registry
    ///     .define(TypeSpec::new("Car").setting(
    ///         "units",
    ///         Setting::new().with_default("metric").choices(["metric", "english"]),
    ///     ))
    ///     .expect("define");
    /// let mut instance = registry
    ///     .construct(car, &record::Record::new())
    ///     .expect("construct");
    /// instance.set_setting(&registry, "units", json!("english")).expect("write");
    /// assert_eq!(instance.value("units"), Some(&json!("english")));
    /// assert!(instance.set_setting(&registry, "units", json!("bogus")).is_err());
    /// assert_eq!(instance.value("units"), Some(&json!("english")));
    /// ```
    pub fn set_setting(
        &mut self,
        registry: &Registry,
        setting: &str,
        raw: Value,
    ) -> ConfigableResult<()> {
        let Some(declaration) = self.decl.settings().get(setting).cloned() else {
            return Err(Arc::new(ConfigableError::UnknownSetting {
                type_name: self.type_name().to_owned(),
                setting: setting.to_owned(),
            }));
        };
        let raw_value = Some(&raw).filter(|value| !value.is_null());
        let resolved = pipeline::prepare(registry, setting, &declaration, raw_value)?;
        self.values.insert(setting.to_owned(), resolved);
        registry.initialise_setting(self, setting, &declaration, None)
    }

    /// Read a field member.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigableError::UnknownMember`] when the type has no field
    /// called `name`.
    pub fn field(&self, name: &str) -> ConfigableResult<&Value> {
        match self.decl.member(name) {
            Some(Member::Field(value)) => Ok(value),
            _ => Err(self.unknown_member(name, "field")),
        }
    }

    /// Invoke a method member.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigableError::UnknownMember`] when the type has no
    /// method called `name`, and [`ConfigableError::Member`] when the method
    /// fails.
    pub fn call(&self, name: &str) -> ConfigableResult<Value> {
        let Some(Member::Method(method)) = self.decl.member(name) else {
            return Err(self.unknown_member(name, "method"));
        };
        method(self).map_err(|err| {
            Arc::new(ConfigableError::Member {
                type_name: self.type_name().to_owned(),
                member: name.to_owned(),
                source: err,
            })
        })
    }

    fn unknown_member(&self, name: &str, expected: &'static str) -> Arc<ConfigableError> {
        Arc::new(ConfigableError::UnknownMember {
            type_name: self.type_name().to_owned(),
            member: name.to_owned(),
            expected,
        })
    }

    /// Render every resolved setting as a JSON object.
    ///
    /// Nested instances and collections render recursively; missing values
    /// render as `null`. Derived attributes are not included.
    #[must_use]
    pub fn to_value(&self) -> Value {
        Value::Object(
            self.values
                .iter()
                .map(|(name, value)| (name.clone(), value.to_json()))
                .collect(),
        )
    }

    /// Deserialise the resolved settings into `T`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigableError::Extract`] when the rendering produced by
    /// [`Self::to_value`] does not fit `T`.
    pub fn extract<T: DeserializeOwned>(&self) -> ConfigableResult<T> {
        serde_json::from_value(self.to_value()).map_err(|source| {
            Arc::new(ConfigableError::Extract {
                type_name: self.type_name().to_owned(),
                source,
            })
        })
    }

    pub(crate) fn store(&mut self, setting: &str, value: SettingValue) {
        self.values.insert(setting.to_owned(), value);
    }
}

impl fmt::Debug for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Instance")
            .field("type", &self.decl.name())
            .field("values", &self.values)
            .field("attrs", &self.attrs)
            .finish_non_exhaustive()
    }
}
