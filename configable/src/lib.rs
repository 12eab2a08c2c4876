//! Declarative construction of typed instances from configuration records.
//!
//! A [`Registry`] holds configurable types. Each type declares settings
//! (see [`Setting`]) and may be extended into subtypes that carry a
//! structural predicate. Constructing a type from a record first walks the
//! registered subtypes to find the most specific one whose predicate the
//! record satisfies, then resolves every declared setting through a fixed
//! pipeline: required check, default, choices, parse, kind and init.
//!
//! ```rust
//! use configable::{Kind, Registry, Setting, TypeSpec, record};
//! use serde_json::json;
//!
//! let mut registry = Registry::new();
//! let region = registry.define(
//!     TypeSpec::new("Region")
//!         .setting("lat", Setting::new().required(true))
//!         .setting("lng", Setting::new().required(true)),
//! )?;
//! let animal = registry.define(
//!     TypeSpec::new("Animal")
//!         .setting("species", Setting::new())
//!         .setting("region", Setting::new().kind(Kind::Type(region))),
//! )?;
//! let cheetah = registry.extend(
//!     animal,
//!     TypeSpec::new("Cheetah").subtype(json!({"species": "acinonyx jubatus"})),
//! )?;
//!
//! let record = record::from_value(json!({
//!     "species": "acinonyx jubatus",
//!     "region": {"lat": 1, "lng": 2},
//! }))?;
//! let instance = registry.construct(animal, &record)?;
//! assert_eq!(instance.type_id(), cheetah);
//! assert_eq!(
//!     instance.nested("region").and_then(|r| r.value("lng")),
//!     Some(&json!(2))
//! );
//! # Ok::<_, std::sync::Arc<configable::ConfigableError>>(())
//! ```
//!
//! Definition takes `&mut Registry` and construction takes `&Registry`, so a
//! registry that is fully defined at start-up can be shared freely between
//! threads for construction.

use std::sync::Arc;

mod collection;
mod error;
mod instance;
pub mod record;
mod registry;
mod result_ext;
pub mod setting;

pub use collection::{Collection, CollectionDecl, CollectionKind, CollectionSpec};
pub use error::{BoxError, ConfigableError};
pub use instance::Instance;
pub use registry::{
    CollectionId, Member, MethodFn, Registry, SubtypePredicate, TypeDecl, TypeId, TypeSpec,
};
pub use result_ext::{ConfigableResultExt, NestedResultExt};
pub use setting::{
    CastFn, Init, InitContext, InitFn, Kind, ParseFn, Setting, SettingDefaults, SettingMap,
    SettingValue, casts,
};

/// Shared result type used throughout the crate.
pub type ConfigableResult<T> = Result<T, Arc<ConfigableError>>;
