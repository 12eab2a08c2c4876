//! Ordered collection of named setting declarations.

use super::Setting;

/// Settings keyed by name, in declaration order.
///
/// Inserting a name that already exists replaces the whole declaration in
/// place, so an overriding subtype keeps its parent's ordering.
///
/// # Examples
///
/// ```
/// use configable::{Setting, SettingMap};
///
/// let mut settings = SettingMap::new();
/// settings.insert("name", Setting::new());
/// settings.insert("size", Setting::new());
/// settings.insert("name", Setting::new().required(true));
///
/// let names: Vec<&str> = settings.names().collect();
/// assert_eq!(names, ["name", "size"]);
/// assert!(settings.get("name").is_some_and(Setting::is_required));
/// ```
#[derive(Clone, Debug, Default)]
pub struct SettingMap {
    entries: Vec<(String, Setting)>,
}

impl SettingMap {
    /// Create an empty map.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Insert or replace the declaration for `name`.
    pub fn insert(&mut self, name: impl Into<String>, setting: Setting) {
        let key = name.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == key) {
            Some(entry) => entry.1 = setting,
            None => self.entries.push((key, setting)),
        }
    }

    /// Overlay every declaration of `other` onto this map.
    pub fn overlay(&mut self, other: &Self) {
        for (name, setting) in other.iter() {
            self.insert(name, setting.clone());
        }
    }

    /// Look up the declaration for `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Setting> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, setting)| setting)
    }

    /// Whether `name` is declared.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Iterate over declarations in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Setting)> {
        self.entries
            .iter()
            .map(|(name, setting)| (name.as_str(), setting))
    }

    /// Iterate over declared names in order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    /// Number of declarations.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no settings are declared.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
