//! Unit tests for type registration and subtype resolution.

use rstest::{fixture, rstest};
use serde_json::{Value, json};

use super::{Registry, TypeId, TypeSpec};
use crate::record::{self, Record};
use crate::{CollectionId, ConfigableError, Kind, Setting};

fn record(value: Value) -> Record {
    record::from_value(value).expect("object record")
}

struct Zoo {
    registry: Registry,
    animal: TypeId,
    cat: TypeId,
    dog: TypeId,
    husky: TypeId,
}

#[fixture]
fn zoo() -> Zoo {
    let mut registry = Registry::new();
    let animal = registry
        .define(
            TypeSpec::new("Animal")
                .setting("species", Setting::new())
                .field("sound", "..."),
        )
        .expect("define Animal");
    let cat = registry
        .extend(
            animal,
            TypeSpec::new("Cat")
                .subtype(json!({"species": "cat"}))
                .field("sound", "mew"),
        )
        .expect("extend Cat");
    let dog = registry
        .extend(
            animal,
            TypeSpec::new("Dog")
                .subtype(json!({"species": "dog"}))
                .setting("breed", Setting::new())
                .field("sound", "wuf"),
        )
        .expect("extend Dog");
    let husky = registry
        .extend(
            dog,
            TypeSpec::new("Husky")
                .subtype(json!({"breed": "husky"}))
                .field("sound", "owww"),
        )
        .expect("extend Husky");
    Zoo {
        registry,
        animal,
        cat,
        dog,
        husky,
    }
}

#[rstest]
fn subtypes_keep_registration_order(zoo: Zoo) {
    assert_eq!(zoo.registry.subtypes(zoo.animal), [zoo.cat, zoo.dog]);
    assert_eq!(zoo.registry.subtypes(zoo.dog), [zoo.husky]);
    assert!(zoo.registry.subtypes(zoo.husky).is_empty());
}

#[rstest]
#[case(json!({"species": "cat"}), "Cat")]
#[case(json!({"species": "dog"}), "Dog")]
#[case(json!({"species": "dog", "breed": "husky"}), "Husky")]
#[case(json!({"breed": "husky"}), "Animal")]
#[case(json!({}), "Animal")]
fn resolves_most_specific_match_from_root(
    zoo: Zoo,
    #[case] input: Value,
    #[case] expected: &str,
) {
    let resolved = zoo
        .registry
        .resolve(zoo.animal, &record(input))
        .expect("resolve");
    assert_eq!(zoo.registry.get(resolved).map(|d| d.name()), Some(expected));
}

#[rstest]
fn resolution_starts_at_the_requested_type(zoo: Zoo) {
    let sparky = record(json!({"breed": "husky"}));
    assert_eq!(zoo.registry.resolve(zoo.dog, &sparky).expect("resolve"), zoo.husky);
    let path = zoo
        .registry
        .resolution_path(zoo.animal, &record(json!({"species": "dog", "breed": "husky"})))
        .expect("path");
    assert_eq!(path, [zoo.animal, zoo.dog, zoo.husky]);
}

#[rstest]
fn first_registered_overlapping_candidate_wins() {
    let mut registry = Registry::new();
    let base = registry.define(TypeSpec::new("Base")).expect("define");
    let first = registry
        .extend(base, TypeSpec::new("First").subtype(json!({"k": 1})))
        .expect("extend");
    let _second = registry
        .extend(base, TypeSpec::new("Second").subtype(json!({"k": 1, "j": 2})))
        .expect("extend");
    let input = record(json!({"k": 1, "j": 2}));
    for _ in 0..3 {
        assert_eq!(registry.resolve(base, &input).expect("resolve"), first);
    }
}

#[rstest]
fn empty_predicate_is_a_catch_all_when_registered_last() {
    let mut registry = Registry::new();
    let base = registry.define(TypeSpec::new("Base")).expect("define");
    let specific = registry
        .extend(base, TypeSpec::new("Specific").subtype(json!({"k": "v"})))
        .expect("extend");
    let fallback = registry
        .extend(base, TypeSpec::new("Fallback").subtype(json!({})))
        .expect("extend");
    assert_eq!(registry.resolve(base, &record(json!({"k": "v"}))).expect("resolve"), specific);
    assert_eq!(registry.resolve(base, &record(json!({"k": "w"}))).expect("resolve"), fallback);
}

#[rstest]
fn types_without_predicate_are_never_selected() {
    let mut registry = Registry::new();
    let base = registry.define(TypeSpec::new("Base")).expect("define");
    let plain = registry.extend(base, TypeSpec::new("Plain")).expect("extend");
    assert_eq!(registry.resolve(base, &record(json!({}))).expect("resolve"), base);
    assert!(registry.is_subtype_of(plain, base));
}

#[rstest]
fn malformed_predicate_fails_at_registration_and_leaves_registry_untouched(zoo: Zoo) {
    let mut registry = zoo.registry;
    let before = registry.len();
    let err = registry
        .extend(zoo.dog, TypeSpec::new("Bad").subtype(json!("husky")))
        .expect_err("malformed predicate");
    assert!(matches!(
        &*err,
        ConfigableError::MalformedSubtypePredicate { type_name, .. } if type_name == "Bad"
    ));
    assert_eq!(registry.len(), before);
    assert_eq!(registry.subtypes(zoo.dog), [zoo.husky]);
}

#[rstest]
fn settings_merge_with_full_replacement(zoo: Zoo) {
    let mut registry = zoo.registry;
    let loud = registry
        .extend(
            zoo.husky,
            TypeSpec::new("LoudHusky")
                .setting("species", Setting::new().required(true).with_default("dog")),
        )
        .expect("extend");
    let decl = registry.get(loud).expect("registered");
    let names: Vec<&str> = decl.settings().names().collect();
    assert_eq!(names, ["species", "breed"]);
    assert_eq!(decl.own_settings().len(), 1);
    let species = decl.settings().get("species").expect("species");
    assert!(species.is_required());
    assert_eq!(species.default_value(), Some(&json!("dog")));

    let parent = registry.get(zoo.husky).expect("registered");
    assert!(parent.settings().get("species").is_some_and(|s| !s.is_required()));
}

#[rstest]
fn members_are_inherited_last_writer_wins(zoo: Zoo) {
    let mut registry = zoo.registry;
    let pup = registry
        .extend(zoo.husky, TypeSpec::new("Pup").field("size", "small"))
        .expect("extend");
    let decl = registry.get(pup).expect("registered");
    assert!(matches!(decl.member("sound"), Some(super::Member::Field(v)) if *v == json!("owww")));
    let names: Vec<&str> = decl.member_names().collect();
    assert_eq!(names, ["size", "sound"]);
}

#[rstest]
fn extending_an_unknown_type_fails() {
    let mut registry = Registry::new();
    let err = registry
        .extend(TypeId(3), TypeSpec::new("Orphan"))
        .expect_err("unknown base");
    assert!(matches!(&*err, ConfigableError::UnknownType { id: 3 }));
    assert!(registry.is_empty());
}

#[rstest]
fn kinds_must_reference_registered_ids() {
    let mut registry = Registry::new();
    let by_type = registry
        .define(TypeSpec::new("Holder").setting("x", Setting::new().kind(Kind::Type(TypeId(9)))))
        .expect_err("unknown kind type");
    assert!(matches!(&*by_type, ConfigableError::UnknownType { id: 9 }));
    let by_collection = registry
        .define(
            TypeSpec::new("Holder")
                .setting("x", Setting::new().kind(Kind::Collection(CollectionId(0)))),
        )
        .expect_err("unknown kind collection");
    assert!(matches!(
        &*by_collection,
        ConfigableError::UnknownCollection { id: 0 }
    ));
    assert!(registry.is_empty());
}

#[rstest]
fn find_and_ancestry_queries(zoo: Zoo) {
    assert_eq!(zoo.registry.find("Husky"), Some(zoo.husky));
    assert_eq!(zoo.registry.find("Okapi"), None);
    assert!(zoo.registry.is_subtype_of(zoo.husky, zoo.animal));
    assert!(zoo.registry.is_subtype_of(zoo.cat, zoo.cat));
    assert!(!zoo.registry.is_subtype_of(zoo.cat, zoo.dog));
    assert_eq!(zoo.registry.get(zoo.husky).and_then(|d| d.parent()), Some(zoo.dog));
}
