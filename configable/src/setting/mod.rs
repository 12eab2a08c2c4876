//! Setting declarations and the values they resolve to.
//!
//! A [`Setting`] describes how one key of a configuration record becomes a
//! value on an [`Instance`]. The stages run in a fixed order: the required
//! check, default substitution, choices, parse, kind, then the init hook.
//! [`SettingDefaults`] captures the ambient defaults (currently only
//! `required`) at the moment a declaration is built.

pub mod casts;
mod map;
pub(crate) mod pipeline;
mod value;

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::error::BoxError;
use crate::{CollectionId, Instance, TypeId};

pub use map::SettingMap;
pub use value::SettingValue;

/// Pure transformation applied to a raw value.
pub type ParseFn = Arc<dyn Fn(Value) -> Result<Value, BoxError> + Send + Sync>;

/// Plain constructor used by [`Kind::Cast`].
pub type CastFn = Arc<dyn Fn(Value) -> Result<Value, BoxError> + Send + Sync>;

/// Side-effecting hook run with the owning instance after a value resolves.
pub type InitFn = Arc<
    dyn Fn(&mut Instance, &SettingValue, &InitContext<'_>) -> Result<(), BoxError> + Send + Sync,
>;

/// Constructor that wraps a parsed value.
#[derive(Clone)]
pub enum Kind {
    /// Construct a registered configurable type from the value.
    Type(TypeId),
    /// Construct a registered collection wrapper from the value.
    Collection(CollectionId),
    /// Convert the value with a plain function.
    Cast(CastFn),
}

impl Kind {
    /// Wrap a conversion function as a [`Kind::Cast`].
    ///
    /// # Examples
    ///
    /// ```
    /// use configable::{Kind, Setting};
    /// use serde_json::Value;
    ///
    /// let upper = Kind::cast(|value: Value| {
    ///     Ok(Value::from(value.as_str().unwrap_or_default().to_uppercase()))
    /// });
    /// let setting = Setting::new().kind(upper);
    /// assert!(setting.declared_kind().is_some());
    /// ```
    #[must_use]
    pub fn cast<F>(f: F) -> Self
    where
        F: Fn(Value) -> Result<Value, BoxError> + Send + Sync + 'static,
    {
        Self::Cast(Arc::new(f))
    }
}

impl fmt::Debug for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Type(id) => f.debug_tuple("Type").field(id).finish(),
            Self::Collection(id) => f.debug_tuple("Collection").field(id).finish(),
            Self::Cast(_) => f.write_str("Cast(<fn>)"),
        }
    }
}

/// Hook invoked once a setting's value is stored on its instance.
#[derive(Clone)]
pub enum Init {
    /// Run this closure.
    Hook(InitFn),
    /// Run the handler member of this name on the instance's concrete type.
    Member(String),
}

/// Context passed to init hooks alongside the owning instance.
///
/// An instance built as the `kind` of another instance's setting runs its
/// hooks while the enclosing instance runs its own, once every enclosing
/// setting has been prepared. [`Self::parent`] exposes that enclosing
/// instance. Nested siblings declared later have been prepared but have not
/// run their hooks yet.
///
/// # Examples
///
/// ```
/// use configable::{Kind, Registry, Setting, TypeSpec, record};
/// use serde_json::json;
///
/// let mut registry = Registry::new();
/// let engine = registry
///     .define(TypeSpec::new("Engine").setting(
///         "cylinders",
///         Setting::new().init(|engine, _, ctx| {
///             let units = ctx.parent().and_then(|car| car.value("units")).cloned();
///             engine.set_attr("car_units", units.unwrap_or_default());
///             Ok(())
///         }),
///     ))
///     .expect("define Engine");
/// let car = registry
///     .define(
///         TypeSpec::new("Car")
///             .setting("engine", Setting::new().kind(Kind::Type(engine)))
///             .setting("units", Setting::new().with_default("metric")),
///     )
///     .expect("define Car");
///
/// let input = record::from_value(json!({"engine": {"cylinders": 8}})).expect("record");
/// let built = registry.construct(car, &input).expect("construct");
/// let units = built.nested("engine").and_then(|engine| engine.attr("car_units"));
/// assert_eq!(units, Some(&json!("metric")));
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct InitContext<'a> {
    parent: Option<&'a Instance>,
}

impl<'a> InitContext<'a> {
    pub(crate) const fn new(parent: Option<&'a Instance>) -> Self {
        Self { parent }
    }

    /// The instance whose setting holds the one being initialised; `None`
    /// for instances constructed directly.
    #[must_use]
    pub const fn parent(&self) -> Option<&'a Instance> {
        self.parent
    }
}

impl fmt::Debug for Init {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hook(_) => f.write_str("Hook(<fn>)"),
            Self::Member(name) => f.debug_tuple("Member").field(name).finish(),
        }
    }
}

/// Ambient defaults applied to settings built through [`Self::setting`].
///
/// # Examples
///
/// ```
/// use configable::SettingDefaults;
///
/// let strict = SettingDefaults::new().required(true);
/// assert!(strict.setting().is_required());
/// assert!(!strict.setting().required(false).is_required());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SettingDefaults {
    required: bool,
}

impl SettingDefaults {
    /// Defaults matching [`Setting::new`]: nothing is required.
    #[must_use]
    pub const fn new() -> Self {
        Self { required: false }
    }

    /// Set whether settings built from these defaults are required.
    #[must_use]
    pub const fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Returns the `required` default.
    #[must_use]
    pub const fn is_required(&self) -> bool {
        self.required
    }

    /// Build a setting declaration seeded with these defaults.
    #[must_use]
    pub const fn setting(&self) -> Setting {
        Setting {
            required: self.required,
            default: None,
            choices: None,
            parse: None,
            kind: None,
            init: None,
        }
    }
}

/// Declaration of a single setting on a configurable type.
#[derive(Clone, Default)]
pub struct Setting {
    required: bool,
    default: Option<Value>,
    choices: Option<Vec<Value>>,
    parse: Option<ParseFn>,
    kind: Option<Kind>,
    init: Option<Init>,
}

impl Setting {
    /// An optional setting with no default, choices, parser, kind or hook.
    #[must_use]
    pub const fn new() -> Self {
        SettingDefaults::new().setting()
    }

    /// Fail construction when the record lacks this setting.
    #[must_use]
    pub const fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Value substituted when the record lacks this setting.
    ///
    /// The default runs through the rest of the pipeline, choices included,
    /// exactly as if the record had supplied it.
    #[must_use]
    pub fn with_default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Restrict the raw value to one of `choices`.
    #[must_use]
    pub fn choices<I, V>(mut self, choices: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.choices = Some(choices.into_iter().map(Into::into).collect());
        self
    }

    /// Transform the value before any kind is applied.
    #[must_use]
    pub fn parse<F>(mut self, f: F) -> Self
    where
        F: Fn(Value) -> Result<Value, BoxError> + Send + Sync + 'static,
    {
        self.parse = Some(Arc::new(f));
        self
    }

    /// Wrap the parsed value with `kind`.
    #[must_use]
    pub fn kind(mut self, kind: Kind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Run `f` with the owning instance once the value is stored.
    #[must_use]
    pub fn init<F>(mut self, f: F) -> Self
    where
        F: Fn(&mut Instance, &SettingValue, &InitContext<'_>) -> Result<(), BoxError>
            + Send
            + Sync
            + 'static,
    {
        self.init = Some(Init::Hook(Arc::new(f)));
        self
    }

    /// Run the handler member `name` once the value is stored.
    ///
    /// The member is looked up on the instance's concrete type, so a subtype
    /// can override the handler its parent names.
    #[must_use]
    pub fn init_member(mut self, name: impl Into<String>) -> Self {
        self.init = Some(Init::Member(name.into()));
        self
    }

    /// Whether the setting is required.
    #[must_use]
    pub const fn is_required(&self) -> bool {
        self.required
    }

    /// The declared default, if any.
    #[must_use]
    pub const fn default_value(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    /// The declared choices, if any.
    #[must_use]
    pub fn allowed(&self) -> Option<&[Value]> {
        self.choices.as_deref()
    }

    /// The declared kind, if any.
    #[must_use]
    pub const fn declared_kind(&self) -> Option<&Kind> {
        self.kind.as_ref()
    }

    /// The declared init hook, if any.
    #[must_use]
    pub const fn declared_init(&self) -> Option<&Init> {
        self.init.as_ref()
    }

    pub(crate) const fn parser(&self) -> Option<&ParseFn> {
        self.parse.as_ref()
    }
}

impl fmt::Debug for Setting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Setting")
            .field("required", &self.required)
            .field("default", &self.default)
            .field("choices", &self.choices)
            .field("parse", &self.parse.as_ref().map(|_| "<fn>"))
            .field("kind", &self.kind)
            .field("init", &self.init)
            .finish()
    }
}
