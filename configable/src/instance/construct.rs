//! The construction engine: subtype resolution followed by the setting
//! pipeline for every declared setting.
//!
//! Construction has two phases. Preparation resolves and stores every
//! setting, recursing into nested kinds without running their hooks.
//! Initialisation then walks the settings in declaration order; for each one
//! it first initialises a nested instance or collection (with the owning
//! instance as parent) and then runs the setting's own hook.

use std::sync::Arc;

use serde_json::Value;

use super::Instance;
use crate::record::{Record, into_record, lookup};
use crate::setting::{Kind, Setting, SettingValue, pipeline};
use crate::{ConfigableResult, NestedResultExt, Registry, TypeId};

impl Registry {
    /// Construct an instance of the most specific subtype of `id` that
    /// matches `record`.
    ///
    /// Every setting of the resolved type is prepared and stored first; init
    /// hooks then run in declaration order, so a hook can read any sibling
    /// setting. Nested instances run their hooks just before the hook of
    /// the setting that holds them, with the enclosing instance available
    /// through [`crate::InitContext::parent`]. Any failure aborts
    /// construction.
    ///
    /// # Errors
    ///
    /// Returns the first pipeline error raised by any setting, or
    /// [`crate::ConfigableError::UnknownType`] when `id` is not registered.
    ///
    /// # Examples
    ///
    /// ```
    /// use configable::{ConfigableError, Registry, Setting, TypeSpec, record};
    /// use serde_json::json;
    ///
    /// let mut registry = Registry::new();
    /// let team = registry
    ///     .define(TypeSpec::new("Team").setting("name", Setting::new().required(true)))
    ///     .expect("define");
    ///
    /// let err = registry.construct(team, &record::Record::new()).unwrap_err();
    /// assert!(matches!(&*err, ConfigableError::RequiredSettingMissing { setting } if setting == "name"));
    ///
    /// let crew = record::from_value(json!({"name": "Rovers"})).expect("record");
    /// let instance = registry.construct(team, &crew).expect("construct");
    /// assert_eq!(instance.value("name"), Some(&json!("Rovers")));
    /// ```
    pub fn construct(&self, id: TypeId, record: &Record) -> ConfigableResult<Instance> {
        let mut instance = self.prepare(id, record)?;
        self.initialise(&mut instance, None)?;
        Ok(instance)
    }

    /// Construct from a JSON value, which must be an object.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ConfigableError::RecordShape`] for non-object values
    /// and every error [`Self::construct`] can return.
    pub fn construct_value(&self, id: TypeId, value: Value) -> ConfigableResult<Instance> {
        let record = into_record(value, self.name_of(id))?;
        self.construct(id, &record)
    }

    /// Resolve and store every setting without running any init hook.
    fn prepare(&self, id: TypeId, record: &Record) -> ConfigableResult<Instance> {
        let concrete = self.resolve(id, record)?;
        let decl = Arc::clone(self.decl(concrete)?);
        tracing::debug!(
            requested = self.name_of(id),
            concrete = decl.name(),
            "constructing instance"
        );

        let mut instance = Instance::empty(Arc::clone(&decl), record.clone());
        for (name, setting) in decl.settings().iter() {
            let value = pipeline::prepare(self, name, setting, lookup(record, name))?;
            instance.store(name, value);
        }
        Ok(instance)
    }

    pub(crate) fn prepare_value(&self, id: TypeId, value: Value) -> ConfigableResult<Instance> {
        let record = into_record(value, self.name_of(id))?;
        self.prepare(id, &record)
    }

    /// Run every init hook of a prepared instance, nested ones included.
    pub(crate) fn initialise(
        &self,
        instance: &mut Instance,
        parent: Option<&Instance>,
    ) -> ConfigableResult<()> {
        let decl = Arc::clone(&instance.decl);
        for (name, setting) in decl.settings().iter() {
            self.initialise_setting(instance, name, setting, parent)?;
        }
        Ok(())
    }

    /// Initialise the nested value of `name`, then run its own hook.
    pub(crate) fn initialise_setting(
        &self,
        instance: &mut Instance,
        name: &str,
        setting: &Setting,
        parent: Option<&Instance>,
    ) -> ConfigableResult<()> {
        let initialised = match (setting.declared_kind(), instance.get(name)) {
            (_, Some(SettingValue::Instance(nested))) => {
                let mut nested = nested.as_ref().clone();
                self.initialise(&mut nested, Some(&*instance))
                    .in_setting(name)?;
                Some(SettingValue::Instance(Box::new(nested)))
            }
            (Some(Kind::Collection(id)), Some(SettingValue::Collection(collection))) => {
                let mut collection = collection.clone();
                self.initialise_collection(*id, &mut collection, Some(&*instance))
                    .in_setting(name)?;
                Some(SettingValue::Collection(collection))
            }
            _ => None,
        };
        if let Some(value) = initialised {
            instance.store(name, value);
        }
        pipeline::run_init(instance, name, setting, parent)
    }
}
