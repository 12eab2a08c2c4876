//! The per-setting value pipeline.
//!
//! [`prepare`] covers everything up to storing the value: missing handling,
//! choices, parse and kind. Nested kinds are prepared the same way, without
//! running any of their hooks. [`run_init`] is split out so construction can
//! store every value before any hook observes the instance.

use std::sync::Arc;

use serde_json::Value;

use super::{Init, InitContext, Kind, Setting, SettingValue};
use crate::record::same_value;
use crate::registry::Member;
use crate::{ConfigableError, ConfigableResult, Instance, NestedResultExt, Registry};

/// Resolve `raw` for the setting `name` without running its init hook.
///
/// `raw` is `None` when the record lacks the key (or maps it to `null`).
pub(crate) fn prepare(
    registry: &Registry,
    name: &str,
    setting: &Setting,
    raw: Option<&Value>,
) -> ConfigableResult<SettingValue> {
    let current = match raw {
        Some(value) => Some(value.clone()),
        None if setting.is_required() => {
            return Err(Arc::new(ConfigableError::required(name.to_owned())));
        }
        None => setting.default_value().filter(|value| !value.is_null()).cloned(),
    };

    if let Some(allowed) = setting.allowed() {
        let candidate = current.as_ref().unwrap_or(&Value::Null);
        if !allowed.iter().any(|choice| same_value(choice, candidate)) {
            return Err(Arc::new(ConfigableError::InvalidChoice {
                setting: name.to_owned(),
                allowed: allowed.to_vec(),
                actual: candidate.clone(),
            }));
        }
    }

    let Some(mut value) = current else {
        tracing::trace!(setting = name, "setting resolved to missing");
        return Ok(SettingValue::Missing);
    };

    if let Some(parse) = setting.parser() {
        value = parse(value).map_err(|err| Arc::new(ConfigableError::parse(name, err)))?;
    }

    let resolved = match setting.declared_kind() {
        None => SettingValue::Value(value),
        Some(Kind::Type(id)) => {
            let nested = registry.prepare_value(*id, value).in_setting(name)?;
            SettingValue::Instance(Box::new(nested))
        }
        Some(Kind::Collection(id)) => {
            let collection = registry.prepare_collection(*id, value).in_setting(name)?;
            SettingValue::Collection(collection)
        }
        Some(Kind::Cast(cast)) => {
            let converted = cast(value)
                .map_err(|err| Arc::new(ConfigableError::cast(err)))
                .in_setting(name)?;
            SettingValue::Value(converted)
        }
    };
    tracing::trace!(setting = name, "setting resolved");
    Ok(resolved)
}

/// Run the init hook of `name`, if it declares one, against `instance`.
pub(crate) fn run_init(
    instance: &mut Instance,
    name: &str,
    setting: &Setting,
    parent: Option<&Instance>,
) -> ConfigableResult<()> {
    let Some(init) = setting.declared_init() else {
        return Ok(());
    };
    let hook = match init {
        Init::Hook(hook) => Arc::clone(hook),
        Init::Member(member) => match instance.decl().member(member) {
            Some(Member::Handler(handler)) => Arc::clone(handler),
            _ => {
                return Err(Arc::new(ConfigableError::UnknownMember {
                    type_name: instance.type_name().to_owned(),
                    member: member.clone(),
                    expected: "handler",
                }));
            }
        },
    };
    let value = instance.get(name).cloned().unwrap_or(SettingValue::Missing);
    hook(instance, &value, &InitContext::new(parent)).map_err(|err| {
        Arc::new(ConfigableError::InitHook {
            setting: name.to_owned(),
            source: err,
        })
    })
}
