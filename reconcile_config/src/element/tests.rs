//! Unit tests for element construction, lookup and serde round trips.

use rstest::rstest;
use serde_json::json;

use super::{Element, Mapping, Scalar};

fn sample() -> Element {
    Element::mapping([
        ("volume", Element::from(0.5)),
        (
            "video",
            Element::mapping([("fov", Element::from(110)), ("vsync", Element::from(true))]),
        ),
        (
            "servers",
            Element::from(vec![Element::from("eu"), Element::from("us")]),
        ),
    ])
}

#[test]
fn mapping_insert_replaces_in_place() {
    let mut mapping = Mapping::new();
    mapping.insert("a", Element::from(1));
    mapping.insert("b", Element::from(2));
    mapping.insert("a", Element::from(3));
    let keys: Vec<_> = mapping.keys().collect();
    assert_eq!(keys, ["a", "b"]);
    assert_eq!(mapping.get("a"), Some(&Element::from(3)));
}

#[rstest]
#[case("volume", Some(Element::from(0.5)))]
#[case("video.fov", Some(Element::from(110)))]
#[case("video.missing", None)]
#[case("volume.deeper", None)]
fn lookup_follows_dotted_paths(#[case] path: &str, #[case] expected: Option<Element>) {
    assert_eq!(sample().lookup(path).cloned(), expected);
}

#[test]
fn json_conversion_preserves_order_and_drops_nulls() {
    let value = json!({"zeta": 1, "alpha": null, "mid": [1, null, 2], "beta": {"x": "y"}});
    let tree = Element::from_json(value).expect("object converts");
    let mapping = tree.as_mapping().expect("mapping");
    let keys: Vec<_> = mapping.keys().collect();
    assert_eq!(keys, ["zeta", "mid", "beta"]);
    assert_eq!(
        mapping.get("mid"),
        Some(&Element::from(vec![Element::from(1), Element::from(2)]))
    );
}

#[test]
fn to_json_keeps_order_and_types() {
    let value = json!({"zeta": 1, "mid": [true, "x"], "beta": {"ratio": 2.5}});
    let tree = Element::from_json(value.clone()).expect("object converts");
    let converted = tree.to_json();
    assert_eq!(converted, value);
    let keys: Vec<_> = converted
        .as_object()
        .map(|object| object.keys().cloned().collect())
        .unwrap_or_default();
    assert_eq!(keys, ["zeta", "mid", "beta"]);
}

#[test]
fn deserialising_json_text_keeps_document_order() {
    let tree: Element =
        serde_json::from_str(r#"{"b": 1, "a": {"d": true, "c": 2.5}, "n": null}"#).expect("parse");
    let expected = Element::mapping([
        ("b", Element::from(1)),
        (
            "a",
            Element::mapping([("d", Element::from(true)), ("c", Element::from(2.5))]),
        ),
    ]);
    assert_eq!(tree, expected);
}

#[test]
fn serialising_writes_entries_in_order() {
    let text = serde_json::to_string(&sample()).expect("serialise");
    assert_eq!(
        text,
        r#"{"volume":0.5,"video":{"fov":110,"vsync":true},"servers":["eu","us"]}"#
    );
}

#[test]
fn from_serialize_snapshots_structs() {
    #[derive(serde::Serialize)]
    struct Live {
        volume: f64,
        name: Option<String>,
    }
    let tree = Element::from_serialize(&Live {
        volume: 0.25,
        name: None,
    })
    .expect("snapshot");
    assert_eq!(tree, Element::mapping([("volume", Element::from(0.25))]));
}

#[rstest]
#[case(Element::from(true), "true")]
#[case(Element::from(3), "3")]
#[case(Element::from(0.5), "0.5")]
#[case(Element::from("hi"), "\"hi\"")]
#[case(Element::from(vec![Element::from(1), Element::from(2)]), "[1, 2]")]
fn display_renders_compactly(#[case] element: Element, #[case] expected: &str) {
    assert_eq!(element.to_string(), expected);
}

#[test]
fn integers_widen_to_f64() {
    assert_eq!(Scalar::Integer(4).as_f64(), Some(4.0));
    assert_eq!(Scalar::String("4".into()).as_f64(), None);
}
