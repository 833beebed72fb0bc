//! Joins → relationships.
//!
//! | Legacy                          | Successor                          |
//! |---------------------------------|------------------------------------|
//! | `type: joinBy*`                 | `relationship` / `relationshipReverse` |
//! | single-reference join           | `max: 1`                           |
//! | `idsField` / `idField`          | `idsStorage`                       |
//! | `withType: apostrophe-x`        | `withType: @apostrophecms/x`       |
//! | `withJoins`                     | `withRelationships`                |
//! | `relationship: [...]`           | `fields: {add, group}`             |
//! | `filters` (`projection`)        | `builders` (`project`)             |
//!
//! `relationshipsField` has no successor and is dropped, as are any input
//! values under the successor-only keys (`max`, `idsStorage`,
//! `withRelationships`, `fields`, `builders`). All other attributes
//! are kept in their original order, ahead of the rewritten ones.

use serde_json::{json, Map, Value};

use crate::assemble::assemble_at;
use crate::dispatch::Context;
use crate::error::ConvertError;
use crate::field::JoinKind;
use crate::schema_utils::build_path;
use crate::tables::rewrite_namespace;

/// Attributes of a join consumed by the conversion.
#[derive(Default)]
struct JoinParts {
    filters: Option<Value>,
    with_type: Option<Value>,
    with_joins: Option<Value>,
    relationship: Option<Value>,
    ids_field: Option<Value>,
    id_field: Option<Value>,
}

impl JoinParts {
    /// Split a join field into the parts this handler rewrites and the rest.
    fn split(field: Map<String, Value>) -> (Self, Map<String, Value>) {
        let mut parts = Self::default();
        let mut rest = Map::new();
        for (key, value) in field {
            match key.as_str() {
                "filters" => parts.filters = Some(value),
                "withType" => parts.with_type = Some(value),
                "withJoins" => parts.with_joins = Some(value),
                "relationship" => parts.relationship = Some(value),
                "idsField" => parts.ids_field = Some(value),
                "idField" => parts.id_field = Some(value),
                // Successor-only keys are always recomputed.
                "type" | "relationshipsField" | "max" | "idsStorage" | "withRelationships"
                | "fields" | "builders" => {}
                _ => {
                    rest.insert(key, value);
                }
            }
        }
        (parts, rest)
    }
}

pub(crate) fn convert_relationship(
    field: Map<String, Value>,
    join: JoinKind,
    path: &str,
    depth: usize,
    ctx: &mut Context<'_>,
) -> Result<Value, ConvertError> {
    let (parts, mut result) = JoinParts::split(field);

    if let Some(with_type) = parts.with_type {
        let with_type = match with_type {
            Value::String(name) => Value::String(rewrite_namespace(&name).into_owned()),
            other => other,
        };
        result.insert("withType".to_string(), with_type);
    }

    let sub_schema = parts
        .relationship
        .as_ref()
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();
    let fields = assemble_at(sub_schema, &build_path(path, &["relationship"]), depth + 1, ctx)?;
    result.insert("fields".to_string(), fields.to_value());

    if let Some(storage) = [parts.ids_field, parts.id_field]
        .into_iter()
        .flatten()
        .find(is_truthy)
    {
        result.insert("idsStorage".to_string(), storage);
    }

    result.insert("type".to_string(), json!(join.successor));
    if join.is_single() {
        result.insert("max".to_string(), json!(1));
    }

    if let Some(with_joins) = parts.with_joins {
        result.insert("withRelationships".to_string(), with_joins);
    }

    if let Some(Value::Object(filters)) = parts.filters {
        result.insert("builders".to_string(), Value::Object(filters_to_builders(filters)));
    }

    Ok(Value::Object(result))
}

/// Copy query filters into builders, renaming `projection` to `project`.
fn filters_to_builders(filters: Map<String, Value>) -> Map<String, Value> {
    let mut projection = None;
    let mut builders = Map::new();
    for (key, value) in filters {
        if key == "projection" {
            projection = Some(value);
        } else {
            builders.insert(key, value);
        }
    }
    if let Some(projection) = projection {
        builders.insert("project".to_string(), projection);
    }
    builders
}

/// An empty or null storage name counts as absent.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(s) => !s.is_empty(),
        _ => true,
    }
}
