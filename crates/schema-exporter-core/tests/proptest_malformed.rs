//! Negative tests for malformed field lists.
//!
//! The engine is permissive: structurally odd input must produce `Ok` with
//! the odd parts skipped or passed through, never a panic. Only a top-level
//! document that is not an array is an error.

use proptest::prelude::*;
use schema_exporter_core::{convert, ConvertOptions};
use serde_json::{json, Value};

fn default_opts() -> ConvertOptions {
    ConvertOptions::default()
}

// ===========================================================================
// 1. Deterministic cases
// ===========================================================================

/// `schema` of an array must be a list; anything else yields no elements.
#[test]
fn malformed_array_schema_as_object() {
    let input = json!([{ "name": "items", "type": "array", "schema": { "not": "a list" } }]);
    let result = convert(&input, &default_opts()).unwrap();
    assert_eq!(result.schema.add["items"]["fields"], json!({ "add": {} }));
}

/// `options.widgets` as a list leaves the area untouched.
#[test]
fn malformed_widgets_as_array() {
    let field = json!({ "name": "body", "type": "area", "options": { "widgets": ["a", "b"] } });
    let result = convert(&json!([field]), &default_opts()).unwrap();
    assert_eq!(
        result.schema.add["body"],
        json!({ "type": "area", "options": { "widgets": ["a", "b"] } })
    );
}

/// `relationship` as a string is treated as an empty sub-schema.
#[test]
fn malformed_relationship_as_string() {
    let input = json!([{ "name": "_x", "type": "joinByArray", "relationship": "nope" }]);
    let result = convert(&input, &default_opts()).unwrap();
    assert_eq!(
        result.schema.add["_x"]["fields"],
        json!({ "add": {}, "group": {} })
    );
}

/// `filters` that are not an object are dropped rather than renamed.
#[test]
fn malformed_filters_as_string() {
    let input = json!([{ "name": "_x", "type": "joinByArray", "filters": "nope" }]);
    let result = convert(&input, &default_opts()).unwrap();
    assert!(result.schema.add["_x"].get("builders").is_none());
    assert!(result.schema.add["_x"].get("filters").is_none());
}

/// A `group` that is not `{name, label}` falls back to the default group.
#[test]
fn malformed_group_as_string() {
    let input = json!([{ "name": "title", "type": "string", "group": "basics" }]);
    let result = convert(&input, &default_opts()).unwrap();
    assert_eq!(result.schema.group.get("default").unwrap().fields, vec!["title"]);
}

/// A non-string `type` is a plain field.
#[test]
fn malformed_type_as_number() {
    let input = json!([{ "name": "odd", "type": 7 }]);
    let result = convert(&input, &default_opts()).unwrap();
    assert_eq!(result.schema.add["odd"], json!({ "type": 7 }));
}

#[test]
fn non_array_documents_are_errors() {
    for doc in [json!(null), json!("fields"), json!({ "add": {} }), json!(3)] {
        assert!(convert(&doc, &default_opts()).is_err());
    }
}

// ===========================================================================
// 2. Property-based: arbitrary JSON never panics
// ===========================================================================

fn arb_json() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(|n| json!(n)),
        prop_oneof![
            Just("tags"),
            Just("array"),
            Just("area"),
            Just("singleton"),
            Just("joinByOne"),
            Just("joinByArrayReverse"),
            Just("string"),
            Just("apostrophe-images"),
        ]
        .prop_map(|s| json!(s)),
    ];
    leaf.prop_recursive(4, 48, 6, |inner| {
        prop_oneof![
            proptest::collection::vec(inner.clone(), 0..6).prop_map(Value::Array),
            proptest::collection::vec(
                (
                    prop_oneof![
                        Just("name".to_string()),
                        Just("type".to_string()),
                        Just("schema".to_string()),
                        Just("options".to_string()),
                        Just("widgets".to_string()),
                        Just("relationship".to_string()),
                        Just("filters".to_string()),
                        Just("group".to_string()),
                        Just("widgetType".to_string()),
                        "[a-z]{1,6}",
                    ],
                    inner
                ),
                0..6
            )
            .prop_map(|entries| Value::Object(entries.into_iter().collect())),
        ]
    })
}

proptest! {
    #[test]
    fn arbitrary_field_lists_never_panic(entries in proptest::collection::vec(arb_json(), 0..8)) {
        let result = convert(&Value::Array(entries), &default_opts());
        prop_assert!(result.is_ok());
    }
}
