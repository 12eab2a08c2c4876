//! Primary error enum for type definition and construction flows.

use std::sync::Arc;

use serde_json::Value;
use thiserror::Error;

/// Boxed error returned by user-supplied callables (parsers, casts, hooks).
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors that can occur while registering types or constructing instances.
///
/// Every variant aborts the operation that raised it; no partially built
/// instance is ever returned alongside an error.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigableError {
    /// A required setting resolved to the missing sentinel.
    #[error("Setting \"{setting}\" is required")]
    RequiredSettingMissing {
        /// Name of the missing setting.
        setting: String,
    },

    /// The raw value of a setting is not one of its declared choices.
    #[error("Setting \"{setting}\" must be one of {}; got {actual}", render_choices(.allowed))]
    InvalidChoice {
        /// Name of the offending setting.
        setting: String,
        /// Values accepted by the setting.
        allowed: Vec<Value>,
        /// Raw value found in the record (`null` when missing).
        actual: Value,
    },

    /// The setting's parser rejected the value.
    #[error("Failed to parse setting \"{setting}\": {source}")]
    Parse {
        /// Name of the setting being parsed.
        setting: String,
        /// Error reported by the parser.
        #[source]
        source: BoxError,
    },

    /// Building the nested kind of a setting failed.
    #[error("Failed to construct setting \"{setting}\": {source}")]
    KindConstruction {
        /// Name of the enclosing setting.
        setting: String,
        /// Error raised by the nested construction or cast.
        #[source]
        source: Arc<ConfigableError>,
    },

    /// A cast kind rejected the value.
    ///
    /// Always reported as the source of a [`Self::KindConstruction`] naming
    /// the setting.
    #[error("Cast rejected the value: {source}")]
    Cast {
        /// Error reported by the cast.
        #[source]
        source: BoxError,
    },

    /// The init hook of a setting failed.
    #[error("Init hook for setting \"{setting}\" failed: {source}")]
    InitHook {
        /// Name of the setting whose hook failed.
        setting: String,
        /// Error reported by the hook.
        #[source]
        source: BoxError,
    },

    /// A subtype predicate is not a flat mapping of keys to scalar values.
    #[error("Malformed subtype predicate on type '{type_name}': {reason}")]
    MalformedSubtypePredicate {
        /// Name of the type declaring the predicate.
        type_name: String,
        /// Description of the structural problem.
        reason: String,
    },

    /// A collection wrapper was registered without an element type.
    #[error("Collection '{collection}' must declare an element type")]
    MissingElementType {
        /// Name of the collection wrapper.
        collection: String,
    },

    /// A type id does not belong to the registry it was used with.
    #[error("Unknown type id {id}")]
    UnknownType {
        /// Raw index of the id.
        id: usize,
    },

    /// A collection id does not belong to the registry it was used with.
    #[error("Unknown collection id {id}")]
    UnknownCollection {
        /// Raw index of the id.
        id: usize,
    },

    /// No setting with this name is declared on the instance's type.
    #[error("Type '{type_name}' declares no setting \"{setting}\"")]
    UnknownSetting {
        /// Concrete type of the instance.
        type_name: String,
        /// Requested setting name.
        setting: String,
    },

    /// No member with this name is declared on the instance's type, or the
    /// member has the wrong shape for the requested use.
    #[error("Type '{type_name}' has no {expected} member '{member}'")]
    UnknownMember {
        /// Concrete type of the instance.
        type_name: String,
        /// Requested member name.
        member: String,
        /// Shape of member that was required (`field`, `method`, `handler`).
        expected: &'static str,
    },

    /// A method member returned an error.
    #[error("Member '{member}' of type '{type_name}' failed: {source}")]
    Member {
        /// Concrete type of the instance.
        type_name: String,
        /// Name of the failing member.
        member: String,
        /// Error reported by the member.
        #[source]
        source: BoxError,
    },

    /// A configuration record was not a JSON object.
    #[error("Type '{type_name}' expects an object record; got {found}")]
    RecordShape {
        /// Type that was being constructed.
        type_name: String,
        /// JSON kind of the value that was supplied.
        found: &'static str,
    },

    /// A collection input had the wrong JSON shape.
    #[error("Collection '{collection}' expects {expected}; got {found}")]
    CollectionShape {
        /// Name of the collection wrapper.
        collection: String,
        /// JSON kind the wrapper accepts.
        expected: &'static str,
        /// JSON kind of the value that was supplied.
        found: &'static str,
    },

    /// Constructing one element of a collection failed.
    #[error("Collection '{collection}' element '{key}': {source}")]
    Element {
        /// Name of the collection wrapper.
        collection: String,
        /// Key (maps) or index (arrays) of the element.
        key: String,
        /// Error raised by the element construction.
        #[source]
        source: Arc<ConfigableError>,
    },

    /// Extracting a record from a figment provider chain failed.
    #[cfg(feature = "figment")]
    #[error("Failed to gather configuration record: {0}")]
    Gathering(#[from] Box<figment::Error>),

    /// Deserialising a resolved instance into a user type failed.
    #[error("Failed to extract instance of '{type_name}': {source}")]
    Extract {
        /// Concrete type of the instance.
        type_name: String,
        /// Underlying deserialisation error.
        #[source]
        source: serde_json::Error,
    },
}

fn render_choices(allowed: &[Value]) -> String {
    let rendered: Vec<String> = allowed.iter().map(Value::to_string).collect();
    format!("[{}]", rendered.join(", "))
}
