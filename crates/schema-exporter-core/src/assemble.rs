//! Schema assembler: the fold over a legacy field list.
//!
//! Entry point for top-level lists and for the sub-schemas attached to joins.
//! Array element sub-schemas go through the dispatcher directly because they
//! carry no groups.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::dispatch::{convert_field, Context};
use crate::error::ConvertError;
use crate::field::FieldDefinition;
use crate::groups::GroupMap;
use crate::schema_utils::build_path;
use crate::warning::WarningKind;

/// A converted field list: `{add, group}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssembledSchema {
    /// Field name → converted field, in source order.
    pub add: IndexMap<String, Value>,
    /// Editing groups.
    pub group: GroupMap,
}

impl AssembledSchema {
    pub fn to_value(&self) -> Value {
        let add: Map<String, Value> = self
            .add
            .iter()
            .map(|(name, field)| (name.clone(), field.clone()))
            .collect();
        let mut result = Map::new();
        result.insert("add".to_string(), Value::Object(add));
        result.insert("group".to_string(), self.group.to_value());
        Value::Object(result)
    }
}

/// Fold `fields` left to right into an [`AssembledSchema`].
///
/// Entries that are not objects or have no name are skipped with a warning.
/// A repeated name replaces the earlier definition in `add` and keeps the
/// group slot of its first occurrence, so every name is listed once.
pub(crate) fn assemble_at(
    fields: &[Value],
    path: &str,
    depth: usize,
    ctx: &mut Context<'_>,
) -> Result<AssembledSchema, ConvertError> {
    let mut schema = AssembledSchema::default();

    for (index, entry) in fields.iter().enumerate() {
        let Some(obj) = entry.as_object() else {
            ctx.warn(
                build_path(path, &[&index.to_string()]),
                WarningKind::NotAnObject,
                format!("field {index} is not an object; skipped"),
            );
            continue;
        };
        let Some(FieldDefinition { name, group, attrs }) = FieldDefinition::from_entry(obj) else {
            ctx.warn(
                build_path(path, &[&index.to_string()]),
                WarningKind::MissingName,
                format!("field {index} has no name; skipped"),
            );
            continue;
        };

        let field_path = build_path(path, &[&name]);
        let Some(converted) = convert_field(attrs, &field_path, depth, ctx)? else {
            continue;
        };

        if schema.add.insert(name.clone(), converted).is_some() {
            ctx.warn(
                field_path,
                WarningKind::DuplicateName { name: name.clone() },
                format!("field '{name}' is declared twice; last one kept"),
            );
        } else {
            schema.group.add_field(&group, name);
        }
    }

    Ok(schema)
}
