//! Structural subtype resolution.

use crate::record::Record;
use crate::{ConfigableResult, Registry, TypeId};

impl Registry {
    /// Pick the most specific registered subtype of `id` matching `record`.
    ///
    /// Candidates are tested in registration order and the first whose
    /// predicate matches wins; resolution then continues among that
    /// candidate's own subtypes. When nothing matches, the current type is
    /// the result. Each step descends one level, so resolution terminates
    /// within the depth of the type tree.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ConfigableError::UnknownType`] when `id` is not
    /// registered.
    ///
    /// # Examples
    ///
    /// ```
    /// use configable::{Registry, Setting, TypeSpec, record};
    /// use serde_json::json;
    ///
    /// let mut registry = Registry::new();
    /// let animal = registry
    ///     .define(TypeSpec::new("Animal").setting("species", Setting::new()))
    ///     .expect("define");
    /// let cheetah = registry
    ///     .extend(animal, TypeSpec::new("Cheetah").subtype(json!({"species": "acinonyx jubatus"})))
    ///     .expect("extend");
    ///
    /// let spotted = record::from_value(json!({"species": "acinonyx jubatus"})).expect("record");
    /// assert_eq!(registry.resolve(animal, &spotted).expect("resolve"), cheetah);
    /// let other = record::from_value(json!({"species": "felis catus"})).expect("record");
    /// assert_eq!(registry.resolve(animal, &other).expect("resolve"), animal);
    /// ```
    pub fn resolve(&self, id: TypeId, record: &Record) -> ConfigableResult<TypeId> {
        let path = self.resolution_path(id, record)?;
        Ok(path.last().copied().unwrap_or(id))
    }

    /// Every type visited while resolving `record` from `id`, starting with
    /// `id` itself and ending with the concrete type.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ConfigableError::UnknownType`] when `id` is not
    /// registered.
    pub fn resolution_path(&self, id: TypeId, record: &Record) -> ConfigableResult<Vec<TypeId>> {
        self.decl(id)?;
        let mut path = vec![id];
        let mut current = id;
        while let Some(next) = self.matching_candidate(current, record) {
            tracing::debug!(
                from = self.name_of(current),
                to = self.name_of(next),
                "record matched subtype"
            );
            path.push(next);
            current = next;
        }
        Ok(path)
    }

    fn matching_candidate(&self, id: TypeId, record: &Record) -> Option<TypeId> {
        self.subtypes(id).iter().copied().find(|candidate| {
            self.get(*candidate)
                .and_then(|decl| decl.subtype())
                .is_some_and(|predicate| predicate.matches(record))
        })
    }
}
