//! Unit tests for error rendering and nested error inspection.

use std::sync::Arc;

use rstest::rstest;
use serde_json::json;

use super::ConfigableError;

#[test]
fn invalid_choice_lists_allowed_values() {
    let err = ConfigableError::InvalidChoice {
        setting: "units".into(),
        allowed: vec![json!("metric"), json!("english")],
        actual: json!("bogus"),
    };
    assert_eq!(
        err.to_string(),
        "Setting \"units\" must be one of [\"metric\", \"english\"]; got \"bogus\""
    );
}

#[rstest]
#[case(ConfigableError::required("name".into()), Some("name"))]
#[case(ConfigableError::parse("port", "not a number".into()), Some("port"))]
#[case(ConfigableError::MissingElementType { collection: "Dogs".into() }, None)]
fn setting_names_the_failing_setting(
    #[case] err: ConfigableError,
    #[case] expected: Option<&str>,
) {
    assert_eq!(err.setting(), expected);
}

#[test]
fn innermost_unwraps_nested_construction_chain() {
    let leaf = Arc::new(ConfigableError::required("lng".into()));
    let element = Arc::new(ConfigableError::Element {
        collection: "Regions".into(),
        key: "0".into(),
        source: leaf,
    });
    let outer = ConfigableError::kind_construction("regions", element);
    assert_eq!(outer.setting(), Some("regions"));
    assert!(matches!(
        outer.innermost(),
        ConfigableError::RequiredSettingMissing { setting } if setting == "lng"
    ));
}

#[test]
fn nested_errors_expose_their_source() {
    use std::error::Error as _;

    let leaf = Arc::new(ConfigableError::required("lat".into()));
    let outer = ConfigableError::kind_construction("region", leaf);
    let source = outer.source().map(ToString::to_string);
    assert_eq!(source.as_deref(), Some("Setting \"lat\" is required"));
}

#[test]
fn cast_failures_carry_no_setting_of_their_own() {
    let outer = ConfigableError::kind_construction(
        "port",
        Arc::new(ConfigableError::cast("invalid integer".into())),
    );
    assert_eq!(outer.setting(), Some("port"));
    assert_eq!(outer.innermost().setting(), None);
    assert_eq!(
        outer.to_string(),
        "Failed to construct setting \"port\": Cast rejected the value: invalid integer"
    );
}

#[cfg(feature = "figment")]
#[test]
fn figment_errors_become_gathering_errors() {
    let err = ConfigableError::from(figment::Error::from("boom"));
    assert!(matches!(err, ConfigableError::Gathering(_)));
}
