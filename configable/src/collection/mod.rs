//! Keyed and sequential collection wrappers.
//!
//! A wrapper applies the construction engine to every element of an input
//! object (keyed) or array (sequential). Each element goes through its own
//! subtype resolution, so one collection can hold several concrete types.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde_json::Value;

use crate::error::json_kind;
use crate::{CollectionId, ConfigableError, ConfigableResult, Instance, Registry, TypeId};

/// Shape of input a collection wrapper accepts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CollectionKind {
    /// An object whose values are element records.
    Map,
    /// An array of element records.
    Array,
}

impl CollectionKind {
    const fn expected(self) -> &'static str {
        match self {
            Self::Map => "an object",
            Self::Array => "an array",
        }
    }
}

/// Declaration of a collection wrapper.
///
/// # Examples
///
/// ```
/// use configable::{CollectionSpec, ConfigableError, Registry, TypeSpec};
///
/// let mut registry = Registry::new();
/// let err = registry
///     .extend_collection(CollectionSpec::map("DogMap"))
///     .unwrap_err();
/// assert!(matches!(&*err, ConfigableError::MissingElementType { collection } if collection == "DogMap"));
///
/// let dog = registry.define(TypeSpec::new("Dog")).expect("define");
/// assert!(registry
///     .extend_collection(CollectionSpec::map("DogMap").element(dog))
///     .is_ok());
/// ```
#[derive(Clone, Debug)]
pub struct CollectionSpec {
    name: String,
    kind: CollectionKind,
    element: Option<TypeId>,
}

impl CollectionSpec {
    /// A keyed wrapper called `name`.
    #[must_use]
    pub fn map(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: CollectionKind::Map,
            element: None,
        }
    }

    /// A sequential wrapper called `name`.
    #[must_use]
    pub fn array(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: CollectionKind::Array,
            element: None,
        }
    }

    /// Element type constructed for every entry.
    #[must_use]
    pub const fn element(mut self, element: TypeId) -> Self {
        self.element = Some(element);
        self
    }
}

/// A registered collection wrapper.
#[derive(Debug)]
pub struct CollectionDecl {
    id: CollectionId,
    name: String,
    kind: CollectionKind,
    element: TypeId,
}

impl CollectionDecl {
    /// Handle of this wrapper.
    #[must_use]
    pub const fn id(&self) -> CollectionId {
        self.id
    }

    /// Name given in the wrapper's spec.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Input shape the wrapper accepts.
    #[must_use]
    pub const fn kind(&self) -> CollectionKind {
        self.kind
    }

    /// Element type of the wrapper.
    #[must_use]
    pub const fn element(&self) -> TypeId {
        self.element
    }

    fn element_error(&self, key: String, source: Arc<ConfigableError>) -> Arc<ConfigableError> {
        Arc::new(ConfigableError::Element {
            collection: self.name.clone(),
            key,
            source,
        })
    }
}

/// A constructed collection.
#[derive(Clone, Debug)]
pub enum Collection {
    /// Instances keyed by the input object's keys.
    Map(BTreeMap<String, Instance>),
    /// Instances in input order.
    Array(Vec<Instance>),
}

impl Collection {
    /// Look up an element by key (maps) or decimal index (arrays).
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Instance> {
        match self {
            Self::Map(items) => items.get(key),
            Self::Array(items) => key.parse::<usize>().ok().and_then(|i| items.get(i)),
        }
    }

    /// Element at `index` in iteration order.
    #[must_use]
    pub fn nth(&self, index: usize) -> Option<&Instance> {
        self.iter().nth(index).map(|(_, instance)| instance)
    }

    /// Iterate over `(key, instance)` pairs; array keys are indices.
    pub fn iter(&self) -> Box<dyn Iterator<Item = (String, &Instance)> + '_> {
        match self {
            Self::Map(items) => Box::new(items.iter().map(|(key, item)| (key.clone(), item))),
            Self::Array(items) => Box::new(
                items
                    .iter()
                    .enumerate()
                    .map(|(index, item)| (index.to_string(), item)),
            ),
        }
    }

    /// Number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Map(items) => items.len(),
            Self::Array(items) => items.len(),
        }
    }

    /// Whether the collection has no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Render every element as JSON, keeping the collection's shape.
    #[must_use]
    pub fn to_value(&self) -> Value {
        match self {
            Self::Map(items) => Value::Object(
                items
                    .iter()
                    .map(|(key, item)| (key.clone(), item.to_value()))
                    .collect(),
            ),
            Self::Array(items) => Value::Array(items.iter().map(Instance::to_value).collect()),
        }
    }
}

impl Registry {
    /// Register a collection wrapper.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigableError::MissingElementType`] when the spec names no
    /// element type and [`ConfigableError::UnknownType`] when the element
    /// type is not registered.
    pub fn extend_collection(&mut self, spec: CollectionSpec) -> ConfigableResult<CollectionId> {
        let CollectionSpec {
            name,
            kind,
            element,
        } = spec;
        let Some(element) = element else {
            return Err(Arc::new(ConfigableError::MissingElementType { collection: name }));
        };
        self.decl(element)?;
        let id = CollectionId(self.collections.len());
        tracing::debug!(collection = %name, %id, ?kind, "registered collection wrapper");
        self.collections.push(Arc::new(CollectionDecl {
            id,
            name,
            kind,
            element,
        }));
        Ok(id)
    }

    /// Look up a registered collection wrapper.
    #[must_use]
    pub fn collection(&self, id: CollectionId) -> Option<&CollectionDecl> {
        self.collections.get(id.0).map(Arc::as_ref)
    }

    /// Construct every element of `value` with the wrapper's element type.
    ///
    /// All elements are prepared before any element runs its init hooks.
    /// Elements of a collection constructed directly have no parent.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigableError::CollectionShape`] when `value` has the
    /// wrong JSON shape, and [`ConfigableError::Element`] wrapping the first
    /// element that fails to construct.
    pub fn construct_collection(
        &self,
        id: CollectionId,
        value: Value,
    ) -> ConfigableResult<Collection> {
        let mut collection = self.prepare_collection(id, value)?;
        self.initialise_collection(id, &mut collection, None)?;
        Ok(collection)
    }

    pub(crate) fn prepare_collection(
        &self,
        id: CollectionId,
        value: Value,
    ) -> ConfigableResult<Collection> {
        let decl = Arc::clone(self.collection_decl(id)?);
        match (decl.kind, value) {
            (CollectionKind::Map, Value::Object(entries)) => {
                let mut items = BTreeMap::new();
                for (key, entry) in entries {
                    let item = self
                        .prepare_value(decl.element, entry)
                        .map_err(|err| decl.element_error(key.clone(), err))?;
                    items.insert(key, item);
                }
                Ok(Collection::Map(items))
            }
            (CollectionKind::Array, Value::Array(entries)) => {
                let mut items = Vec::with_capacity(entries.len());
                for (index, entry) in entries.into_iter().enumerate() {
                    let item = self
                        .prepare_value(decl.element, entry)
                        .map_err(|err| decl.element_error(index.to_string(), err))?;
                    items.push(item);
                }
                Ok(Collection::Array(items))
            }
            (kind, other) => Err(Arc::new(ConfigableError::CollectionShape {
                collection: decl.name.clone(),
                expected: kind.expected(),
                found: json_kind(&other),
            })),
        }
    }

    /// Run the init hooks of every element, with `parent` as their context.
    pub(crate) fn initialise_collection(
        &self,
        id: CollectionId,
        collection: &mut Collection,
        parent: Option<&Instance>,
    ) -> ConfigableResult<()> {
        let decl = Arc::clone(self.collection_decl(id)?);
        match collection {
            Collection::Map(items) => {
                for (key, item) in items.iter_mut() {
                    self.initialise(item, parent)
                        .map_err(|err| decl.element_error(key.clone(), err))?;
                }
            }
            Collection::Array(items) => {
                for (index, item) in items.iter_mut().enumerate() {
                    self.initialise(item, parent)
                        .map_err(|err| decl.element_error(index.to_string(), err))?;
                }
            }
        }
        Ok(())
    }
}
