//! Type specifications handed to [`Registry::extend`](crate::Registry::extend).

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::error::BoxError;
use crate::setting::{InitContext, InitFn, Setting, SettingMap, SettingValue};
use crate::Instance;

/// Method member callable on instances of a type.
pub type MethodFn = Arc<dyn Fn(&Instance) -> Result<Value, BoxError> + Send + Sync>;

/// A plain (non-setting) member of a configurable type.
///
/// Members are inherited down the type chain; a subtype declaring a member
/// of the same name replaces it.
#[derive(Clone)]
pub enum Member {
    /// A constant value shared by every instance of the type.
    Field(Value),
    /// A method evaluated against an instance.
    Method(MethodFn),
    /// A handler that settings can name as their init hook.
    Handler(InitFn),
}

impl fmt::Debug for Member {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Field(value) => f.debug_tuple("Field").field(value).finish(),
            Self::Method(_) => f.write_str("Method(<fn>)"),
            Self::Handler(_) => f.write_str("Handler(<fn>)"),
        }
    }
}

/// Declaration of a new configurable type.
///
/// Settings, members and the subtype predicate are supplied through
/// separate builder methods, so nothing needs to be told apart later.
///
/// # Examples
///
/// ```
/// use configable::{Registry, Setting, TypeSpec};
/// use serde_json::json;
///
/// let mut registry = Registry::new();
/// let animal = registry
///     .define(TypeSpec::new("Animal").setting("species", Setting::new()))
///     .expect("define Animal");
/// let cheetah = registry
///     .extend(
///         animal,
///         TypeSpec::new("Cheetah")
///             .subtype(json!({"species": "acinonyx jubatus"}))
///             .field("top_speed_kph", json!(110)),
///     )
///     .expect("extend Animal");
/// assert_eq!(registry.subtypes(animal), [cheetah]);
/// ```
#[derive(Clone, Debug)]
pub struct TypeSpec {
    pub(crate) name: String,
    pub(crate) settings: SettingMap,
    pub(crate) members: BTreeMap<String, Member>,
    pub(crate) subtype: Option<Value>,
}

impl TypeSpec {
    /// Start a specification for a type called `name`.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            settings: SettingMap::new(),
            members: BTreeMap::new(),
            subtype: None,
        }
    }

    /// Declare (or override) a setting.
    #[must_use]
    pub fn setting(mut self, name: impl Into<String>, setting: Setting) -> Self {
        self.settings.insert(name, setting);
        self
    }

    /// Declare (or override) a plain member.
    #[must_use]
    pub fn member(mut self, name: impl Into<String>, member: Member) -> Self {
        self.members.insert(name.into(), member);
        self
    }

    /// Declare a constant field member.
    #[must_use]
    pub fn field(self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.member(name, Member::Field(value.into()))
    }

    /// Declare a method member.
    #[must_use]
    pub fn method<F>(self, name: impl Into<String>, f: F) -> Self
    where
        F: Fn(&Instance) -> Result<Value, BoxError> + Send + Sync + 'static,
    {
        self.member(name, Member::Method(Arc::new(f)))
    }

    /// Declare a handler member usable through [`Setting::init_member`].
    #[must_use]
    pub fn handler<F>(self, name: impl Into<String>, f: F) -> Self
    where
        F: Fn(&mut Instance, &SettingValue, &InitContext<'_>) -> Result<(), BoxError>
            + Send
            + Sync
            + 'static,
    {
        self.member(name, Member::Handler(Arc::new(f)))
    }

    /// Structural predicate selecting this type during subtype resolution.
    ///
    /// The predicate must be a JSON object whose values are non-null
    /// scalars; anything else is rejected when the type is registered.
    #[must_use]
    pub fn subtype(mut self, predicate: Value) -> Self {
        self.subtype = Some(predicate);
        self
    }
}
