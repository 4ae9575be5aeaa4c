//! Unit tests for spec tree construction and queries.

use rstest::rstest;

use super::{ADVANCED_TOGGLE_KEY, Leaf, Scope, Section, SpecTree, Validator, ValueType};
use crate::test_fixtures::game_spec;
use crate::{Element, ReconcileError};

#[test]
fn resolves_inherited_options() {
    let spec = game_spec();
    let vsync = spec.node("graphics.vsync").expect("vsync declared");
    assert_eq!(vsync.scope(), Scope::Client);
    assert!(vsync.reloadable());
    let servers = spec.node("network.servers").expect("servers declared");
    assert_eq!(servers.scope(), Scope::Common);
    assert!(servers.is_sync_eligible());
    assert!(!servers.reloadable());
    let motd = spec.node("network.motd").expect("motd declared");
    assert!(!motd.is_sync_eligible());
}

#[test]
fn root_carries_advanced_toggle_first() {
    let spec = game_spec();
    let first = spec.root().children().first().expect("toggle present");
    assert_eq!(first.name(), ADVANCED_TOGGLE_KEY);
    assert!(!first.is_sync_eligible());
    assert!(first.reloadable());
}

#[test]
fn empty_declaration_is_empty() {
    let spec = SpecTree::builder(Scope::Client).build().expect("build");
    assert!(spec.is_empty());
    assert!(!game_spec().is_empty());
}

#[test]
fn default_element_follows_declared_order() {
    let defaults = game_spec().default_element();
    let keys: Vec<_> = defaults.as_mapping().expect("mapping").keys().collect();
    assert_eq!(
        keys,
        [ADVANCED_TOGGLE_KEY, "volume", "fov", "difficulty", "graphics", "network"]
    );
    assert_eq!(defaults.lookup("graphics.max_fps"), Some(&Element::from(144)));
}

fn expect_invalid(outcome: crate::ReconcileResult<SpecTree>, expected_path: &str) {
    let err = outcome.expect_err("declaration must be rejected");
    match err.as_ref() {
        ReconcileError::InvalidSpec { path, .. } => assert_eq!(path, expected_path),
        other => panic!("expected InvalidSpec, got {other:?}"),
    }
}

#[rstest]
#[case::duplicate(
    SpecTree::builder(Scope::Common)
        .leaf(Leaf::boolean("a", true))
        .leaf(Leaf::integer("a", 1)),
    "a"
)]
#[case::empty_name(
    SpecTree::builder(Scope::Common).section(Section::new("s").leaf(Leaf::boolean("", true))),
    "s."
)]
#[case::dotted_name(SpecTree::builder(Scope::Common).leaf(Leaf::boolean("a.b", true)), "a.b")]
#[case::reserved(
    SpecTree::builder(Scope::Common).leaf(Leaf::boolean(ADVANCED_TOGGLE_KEY, true)),
    ADVANCED_TOGGLE_KEY
)]
#[case::default_out_of_range(
    SpecTree::builder(Scope::Common)
        .section(Section::new("audio").leaf(Leaf::float("volume", 2.0).range(0.0, 1.0))),
    "audio.volume"
)]
#[case::default_wrong_type(
    SpecTree::builder(Scope::Common).leaf(Leaf::new("fov", ValueType::Integer, "wide")),
    "fov"
)]
#[case::inverted_range(
    SpecTree::builder(Scope::Common).leaf(Leaf::float("x", 0.0).range(1.0, -1.0)),
    "x"
)]
fn rejects_inconsistent_declarations(
    #[case] builder: super::SpecTreeBuilder,
    #[case] expected_path: &str,
) {
    expect_invalid(builder.build(), expected_path);
}

#[rstest]
#[case(ValueType::Float, Element::from(110), true)]
#[case(ValueType::Integer, Element::from(1.5), false)]
#[case(ValueType::Bool, Element::from("true"), false)]
#[case(ValueType::enumeration(["easy", "hard"]), Element::from("hard"), true)]
#[case(ValueType::enumeration(["easy", "hard"]), Element::from("insane"), false)]
#[case(
    ValueType::List(Box::new(ValueType::String)),
    Element::from(vec![Element::from("eu"), Element::from(3)]),
    false
)]
#[case(
    ValueType::Map(Box::new(ValueType::Integer)),
    Element::mapping([("a", Element::from(1)), ("b", Element::from(2))]),
    true
)]
fn value_types_check_shape(
    #[case] value_type: ValueType,
    #[case] element: Element,
    #[case] expected: bool,
) {
    assert_eq!(value_type.accepts(&element), expected);
}

#[rstest]
#[case(Validator::range(0.0, 1.0), Element::from(0.5), true)]
#[case(Validator::range(0.0, 1.0), Element::from(2), false)]
#[case(
    Validator::range(0.0, 10.0),
    Element::from(vec![Element::from(1), Element::from(11)]),
    false
)]
#[case(Validator::one_of(["eu", "us"]), Element::from("us"), true)]
#[case(Validator::one_of(["eu", "us"]), Element::from("ap"), false)]
fn validators_check_values(
    #[case] validator: Validator,
    #[case] element: Element,
    #[case] expected: bool,
) {
    assert_eq!(validator.check(&element).is_ok(), expected);
}

#[test]
fn visible_element_hides_advanced_nodes_until_enabled() {
    let spec = game_spec();
    let defaults = spec.default_element();
    let visible = spec.visible_element(&defaults);
    assert!(visible.lookup("graphics.max_fps").is_none());
    assert!(visible.lookup("graphics.vsync").is_some());

    let mut enabled = defaults.as_mapping().expect("mapping").clone();
    enabled.insert(ADVANCED_TOGGLE_KEY, Element::from(true));
    let enabled = Element::Mapping(enabled);
    assert_eq!(spec.visible_element(&enabled), enabled);
}

#[test]
fn describe_documents_leaves() {
    let lines = game_spec().describe(false);
    assert_eq!(lines.first().map(String::as_str), Some("Game settings"));
    assert!(lines.contains(&String::from(
        "volume (float, default: 0.5, range: 0 to 1)"
    )));
    assert!(lines.contains(&String::from("    Master volume")));
    assert!(lines.contains(&String::from(
        "fov (float, default: 90.0, range: 30 to 120, requires restart)"
    )));
    assert!(!lines.iter().any(|line| line.starts_with("graphics.max_fps")));
    assert!(
        game_spec()
            .describe(true)
            .iter()
            .any(|line| line.starts_with("graphics.max_fps"))
    );
}
