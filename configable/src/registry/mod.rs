//! Type registry and extension.
//!
//! A [`Registry`] owns every configurable type and collection wrapper a
//! program declares. Types are added with [`Registry::define`] (roots) and
//! [`Registry::extend`] (subtypes); each extension materialises a flat
//! settings map for the new type and appends it to its parent's list of
//! subtype candidates, whose order decides ties during resolution.
//!
//! Registration needs `&mut Registry` while construction only borrows it
//! shared, so types cannot change underneath an in-flight construction.

mod predicate;
mod resolve;
mod spec;

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::collection::CollectionDecl;
use crate::setting::{Kind, SettingMap};
use crate::{ConfigableError, ConfigableResult};

pub use predicate::SubtypePredicate;
pub use spec::{Member, MethodFn, TypeSpec};

/// Handle to a type registered in a [`Registry`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TypeId(pub(crate) usize);

/// Handle to a collection wrapper registered in a [`Registry`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CollectionId(pub(crate) usize);

impl fmt::Display for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "type#{}", self.0)
    }
}

impl fmt::Display for CollectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "collection#{}", self.0)
    }
}

/// A registered configurable type.
#[derive(Debug)]
pub struct TypeDecl {
    id: TypeId,
    name: String,
    parent: Option<TypeId>,
    own_settings: SettingMap,
    settings: SettingMap,
    members: BTreeMap<String, Member>,
    subtype: Option<SubtypePredicate>,
}

impl TypeDecl {
    /// Handle of this type.
    #[must_use]
    pub const fn id(&self) -> TypeId {
        self.id
    }

    /// Name given in the type's [`TypeSpec`].
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The type this one extends, if any.
    #[must_use]
    pub const fn parent(&self) -> Option<TypeId> {
        self.parent
    }

    /// Settings declared by this type's own spec.
    #[must_use]
    pub const fn own_settings(&self) -> &SettingMap {
        &self.own_settings
    }

    /// Every setting of the type, inherited ones included.
    #[must_use]
    pub const fn settings(&self) -> &SettingMap {
        &self.settings
    }

    /// Look up a member, inherited ones included.
    #[must_use]
    pub fn member(&self, name: &str) -> Option<&Member> {
        self.members.get(name)
    }

    /// Names of every member, inherited ones included.
    pub fn member_names(&self) -> impl Iterator<Item = &str> {
        self.members.keys().map(String::as_str)
    }

    /// Structural predicate selecting this type, if declared.
    #[must_use]
    pub const fn subtype(&self) -> Option<&SubtypePredicate> {
        self.subtype.as_ref()
    }
}

/// Registry of configurable types and collection wrappers.
#[derive(Debug, Default)]
pub struct Registry {
    types: Vec<Arc<TypeDecl>>,
    subtypes: Vec<Vec<TypeId>>,
    pub(crate) collections: Vec<Arc<CollectionDecl>>,
}

impl Registry {
    /// Create an empty registry.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            types: Vec::new(),
            subtypes: Vec::new(),
            collections: Vec::new(),
        }
    }

    /// Register a root type with no parent.
    ///
    /// A root is never a subtype candidate, so a predicate on it is
    /// validated but has no effect on resolution.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigableError::MalformedSubtypePredicate`] for an invalid
    /// predicate and [`ConfigableError::UnknownType`] or
    /// [`ConfigableError::UnknownCollection`] when a setting's kind names an
    /// id this registry does not hold.
    pub fn define(&mut self, spec: TypeSpec) -> ConfigableResult<TypeId> {
        self.register(None, spec)
    }

    /// Register `spec` as a subtype of `base`.
    ///
    /// The new type inherits `base`'s settings and members, with the spec's
    /// declarations replacing same-named ones wholesale, and is appended to
    /// `base`'s subtype candidates.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigableError::UnknownType`] when `base` is not
    /// registered, plus every error [`Self::define`] can return. The
    /// registry is unchanged when an error is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use configable::{Registry, Setting, TypeSpec};
    ///
    /// let mut registry = Registry::new();
    /// let base = registry
    ///     .define(TypeSpec::new("Base").setting("a", Setting::new()))
    ///     .expect("define");
    /// let derived = registry
    ///     .extend(base, TypeSpec::new("Derived").setting("b", Setting::new()))
    ///     .expect("extend");
    /// let names: Vec<&str> = registry
    ///     .get(derived)
    ///     .map(|decl| decl.settings().names().collect())
    ///     .unwrap_or_default();
    /// assert_eq!(names, ["a", "b"]);
    /// ```
    pub fn extend(&mut self, base: TypeId, spec: TypeSpec) -> ConfigableResult<TypeId> {
        self.decl(base)?;
        self.register(Some(base), spec)
    }

    fn register(&mut self, parent: Option<TypeId>, spec: TypeSpec) -> ConfigableResult<TypeId> {
        let TypeSpec {
            name,
            settings: own_settings,
            members: own_members,
            subtype,
        } = spec;

        let subtype = subtype
            .map(|predicate| SubtypePredicate::parse(&name, predicate))
            .transpose()
            .map_err(Arc::new)?;
        self.check_kinds(&own_settings)?;

        let (mut settings, mut members) = match parent {
            Some(id) => {
                let base = self.decl(id)?;
                (base.settings.clone(), base.members.clone())
            }
            None => (SettingMap::new(), BTreeMap::new()),
        };
        settings.overlay(&own_settings);
        members.extend(own_members);

        let id = TypeId(self.types.len());
        tracing::debug!(
            type_name = %name,
            %id,
            parent = ?parent,
            settings = settings.len(),
            "registered configurable type"
        );
        self.types.push(Arc::new(TypeDecl {
            id,
            name,
            parent,
            own_settings,
            settings,
            members,
            subtype,
        }));
        self.subtypes.push(Vec::new());
        if let Some(candidates) = parent.and_then(|p| self.subtypes.get_mut(p.0)) {
            candidates.push(id);
        }
        Ok(id)
    }

    fn check_kinds(&self, settings: &SettingMap) -> ConfigableResult<()> {
        for (_, setting) in settings.iter() {
            match setting.declared_kind() {
                Some(Kind::Type(id)) => {
                    self.decl(*id)?;
                }
                Some(Kind::Collection(id)) => {
                    self.collection_decl(*id)?;
                }
                Some(Kind::Cast(_)) | None => {}
            }
        }
        Ok(())
    }

    /// Look up a registered type.
    #[must_use]
    pub fn get(&self, id: TypeId) -> Option<&TypeDecl> {
        self.types.get(id.0).map(Arc::as_ref)
    }

    /// Find the first registered type called `name`.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<TypeId> {
        self.types
            .iter()
            .find(|decl| decl.name == name)
            .map(|decl| decl.id)
    }

    /// Direct subtype candidates of `id`, in registration order.
    #[must_use]
    pub fn subtypes(&self, id: TypeId) -> &[TypeId] {
        self.subtypes
            .get(id.0)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Whether `id` is `ancestor` or descends from it.
    #[must_use]
    pub fn is_subtype_of(&self, id: TypeId, ancestor: TypeId) -> bool {
        let mut current = Some(id);
        while let Some(candidate) = current {
            if candidate == ancestor {
                return true;
            }
            current = self.get(candidate).and_then(TypeDecl::parent);
        }
        false
    }

    /// Number of registered types.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.types.len()
    }

    /// Whether no types are registered.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub(crate) fn name_of(&self, id: TypeId) -> &str {
        self.get(id).map_or("<unregistered>", TypeDecl::name)
    }

    pub(crate) fn decl(&self, id: TypeId) -> ConfigableResult<&Arc<TypeDecl>> {
        self.types
            .get(id.0)
            .ok_or_else(|| Arc::new(ConfigableError::UnknownType { id: id.0 }))
    }

    pub(crate) fn collection_decl(&self, id: CollectionId) -> ConfigableResult<&Arc<CollectionDecl>> {
        self.collections
            .get(id.0)
            .ok_or_else(|| Arc::new(ConfigableError::UnknownCollection { id: id.0 }))
    }
}

#[cfg(test)]
mod tests;
