//! A small animal taxonomy used across behavioural and integration tests.
//!
//! ```text
//! Animal {species, region: Region, units}
//! ├── Acinonyx {genus: "acinonyx"}
//! │   └── Cheetah {species: "jubatus"}
//! └── SpottedCheetah {species: "acinonyx jubatus"}
//! Region {lat, lng} (both required)
//! Team {name} (required)
//! ```

use anyhow::{Result, anyhow};
use configable::{
    CollectionId, CollectionSpec, ConfigableResult, Kind, Registry, Setting, TypeId, TypeSpec,
};
use serde_json::json;

/// Registry populated with the taxonomy and the handles of every type.
#[derive(Debug)]
pub struct Zoo {
    /// Registry holding every type below.
    pub registry: Registry,
    /// Root animal type.
    pub animal: TypeId,
    /// Genus-level subtype of [`Self::animal`].
    pub acinonyx: TypeId,
    /// Species-level subtype of [`Self::acinonyx`].
    pub cheetah: TypeId,
    /// Direct species subtype of [`Self::animal`].
    pub spotted_cheetah: TypeId,
    /// Nested coordinate type.
    pub region: TypeId,
    /// Team type with a required name.
    pub team: TypeId,
    /// Keyed collection of animals.
    pub enclosures: CollectionId,
}

impl Zoo {
    /// Build the taxonomy.
    ///
    /// # Errors
    ///
    /// Returns an error if any registration fails.
    pub fn build() -> Result<Self> {
        build_zoo().map_err(|err| anyhow!(err.to_string()))
    }

    /// Name of the registered type `id`.
    #[must_use]
    pub fn name_of(&self, id: TypeId) -> &str {
        self.registry.get(id).map_or("<unregistered>", |decl| decl.name())
    }
}

fn build_zoo() -> ConfigableResult<Zoo> {
    let mut registry = Registry::new();
    let region = registry.define(
        TypeSpec::new("Region")
            .setting("lat", Setting::new().required(true))
            .setting("lng", Setting::new().required(true)),
    )?;
    let animal = registry.define(
        TypeSpec::new("Animal")
            .setting("species", Setting::new())
            .setting("region", Setting::new().kind(Kind::Type(region)))
            .setting(
                "units",
                Setting::new()
                    .with_default("metric")
                    .choices(["metric", "english"]),
            ),
    )?;
    let acinonyx =
        registry.extend(animal, TypeSpec::new("Acinonyx").subtype(json!({"genus": "acinonyx"})))?;
    let cheetah =
        registry.extend(acinonyx, TypeSpec::new("Cheetah").subtype(json!({"species": "jubatus"})))?;
    let spotted_cheetah = registry.extend(
        animal,
        TypeSpec::new("SpottedCheetah").subtype(json!({"species": "acinonyx jubatus"})),
    )?;
    let team = registry.define(TypeSpec::new("Team").setting("name", Setting::new().required(true)))?;
    let enclosures = registry.extend_collection(CollectionSpec::map("Enclosures").element(animal))?;
    Ok(Zoo {
        registry,
        animal,
        acinonyx,
        cheetah,
        spotted_cheetah,
        region,
        team,
        enclosures,
    })
}
