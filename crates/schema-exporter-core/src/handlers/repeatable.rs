//! Repeatable structures: `tags` and `array`.
//!
//! The successor dialect has no tag-list primitive, so a tag list becomes an
//! array whose only element field is a string named `tag`. Both kinds end up
//! as `{type: "array", label, fields: {add: {...}}}`.

use serde_json::{json, Map, Value};

use crate::dispatch::{convert_field, Context};
use crate::error::ConvertError;
use crate::field::split_element;
use crate::schema_utils::build_path;
use crate::warning::WarningKind;

/// Name of the synthetic element field generated for tag lists.
const TAG_FIELD: &str = "tag";
const TAG_LABEL: &str = "Tag";

/// Convert a `tags` field into an array of single-string entries.
///
/// The synthetic `tag` element inherits every other attribute of the tag
/// list, with `type` and `label` overridden.
pub(crate) fn convert_tags(
    field: Map<String, Value>,
    path: &str,
    depth: usize,
    ctx: &mut Context<'_>,
) -> Result<Value, ConvertError> {
    let label = field.get("label").cloned();

    let mut element = field;
    element.insert("name".to_string(), json!(TAG_FIELD));
    element.insert("type".to_string(), json!("string"));
    element.insert("label".to_string(), json!(TAG_LABEL));

    convert_elements(label, &[Value::Object(element)], path, depth, ctx)
}

/// Convert an `array` field using its own `schema`. A missing or non-list
/// `schema` yields an empty `add`.
pub(crate) fn convert_array(
    field: Map<String, Value>,
    path: &str,
    depth: usize,
    ctx: &mut Context<'_>,
) -> Result<Value, ConvertError> {
    let label = field.get("label").cloned();
    let schema = field
        .get("schema")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();

    convert_elements(label, schema, path, depth, ctx)
}

/// Dispatch every element of a sub-schema and build the array field.
///
/// Elements are not grouped: only `add` is produced.
fn convert_elements(
    label: Option<Value>,
    schema: &[Value],
    path: &str,
    depth: usize,
    ctx: &mut Context<'_>,
) -> Result<Value, ConvertError> {
    let mut add = Map::new();

    for (index, entry) in schema.iter().enumerate() {
        let Some(obj) = entry.as_object() else {
            ctx.warn(
                build_path(path, &["schema", &index.to_string()]),
                WarningKind::NotAnObject,
                format!("array element {index} is not an object; skipped"),
            );
            continue;
        };
        let Some((name, attrs)) = split_element(obj) else {
            ctx.warn(
                build_path(path, &["schema", &index.to_string()]),
                WarningKind::MissingName,
                format!("array element {index} has no name; skipped"),
            );
            continue;
        };

        let element_path = build_path(path, &[&name]);
        if let Some(converted) = convert_field(attrs, &element_path, depth + 1, ctx)? {
            if add.insert(name.clone(), converted).is_some() {
                ctx.warn(
                    element_path,
                    WarningKind::DuplicateName { name: name.clone() },
                    format!("array element '{name}' is declared twice; last one kept"),
                );
            }
        }
    }

    let mut result = Map::new();
    result.insert("type".to_string(), json!("array"));
    if let Some(label) = label {
        result.insert("label".to_string(), label);
    }
    result.insert("fields".to_string(), json!({ "add": add }));
    Ok(Value::Object(result))
}
