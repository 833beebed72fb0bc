//! Legacy field definitions and their classification.
//!
//! A legacy entry is an open JSON object. Only `name`, `group` and `type` are
//! interpreted here; every other attribute is carried through untouched for
//! the handler that owns the field's kind.

use serde_json::{Map, Value};

use crate::groups::Group;
use crate::schema_utils::without_keys;
use crate::tables::RELATIONSHIP_TYPES;

/// Attributes stripped from a top-level entry before dispatch.
pub const ADMIN_ATTRIBUTES: &[&str] = &["sortify", "group", "moduleName", "name", "checkTaken"];

/// Attributes stripped from an array element before dispatch. Elements keep
/// their other administrative attributes.
pub const ELEMENT_ATTRIBUTES: &[&str] = &["name", "moduleName"];

/// The kind of a legacy field, decided by its `type` attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// `tags`: a list of free strings.
    Tags,
    /// `array`: a repeating group with its own `schema`.
    Array,
    /// `area`: a widget area with an `options.widgets` map.
    Area,
    /// `singleton`: an area holding exactly one widget of `widgetType`.
    Singleton,
    /// One of the four `joinBy*` reference kinds.
    Join(JoinKind),
    /// Anything else, including absent or unknown types. Passed through as-is.
    Plain,
}

impl FieldKind {
    pub fn classify(type_name: Option<&str>) -> Self {
        match type_name {
            Some("tags") => Self::Tags,
            Some("array") => Self::Array,
            Some("area") => Self::Area,
            Some("singleton") => Self::Singleton,
            Some(other) => JoinKind::from_legacy(other).map_or(Self::Plain, Self::Join),
            None => Self::Plain,
        }
    }

    /// Classify an attribute map by its `type` key.
    pub fn of(attrs: &Map<String, Value>) -> Self {
        Self::classify(attrs.get("type").and_then(Value::as_str))
    }
}

/// A legacy join type together with its successor relationship type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JoinKind {
    pub legacy: &'static str,
    pub successor: &'static str,
}

impl JoinKind {
    pub fn from_legacy(type_name: &str) -> Option<Self> {
        RELATIONSHIP_TYPES
            .iter()
            .find(|(legacy, _)| *legacy == type_name)
            .map(|&(legacy, successor)| Self { legacy, successor })
    }

    /// `joinByOne` and `joinByOneReverse` hold a single reference.
    pub fn is_single(self) -> bool {
        self.legacy.contains("joinByOne")
    }
}

/// A top-level legacy entry split into its identity and the attributes that
/// get dispatched.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDefinition {
    pub name: String,
    /// Editing group; `{name: "default", label: "Info"}` when the entry has
    /// none or its `group` is not a `{name, label}` object.
    pub group: Group,
    /// Everything except [`ADMIN_ATTRIBUTES`].
    pub attrs: Map<String, Value>,
}

impl FieldDefinition {
    /// Returns `None` when the entry has no string `name`.
    pub fn from_entry(entry: &Map<String, Value>) -> Option<Self> {
        let name = entry.get("name")?.as_str()?.to_string();
        let group = entry.get("group").and_then(parse_group).unwrap_or_default();
        Some(Self {
            name,
            group,
            attrs: without_keys(entry, ADMIN_ATTRIBUTES),
        })
    }
}

/// Read a `{name, label?}` group. A non-string `label` counts as absent;
/// without a string `name` there is no group.
fn parse_group(value: &Value) -> Option<Group> {
    let name = value.get("name")?.as_str()?;
    Some(Group {
        name: name.to_string(),
        label: value.get("label").and_then(Value::as_str).map(str::to_string),
    })
}

/// Split an array element into its name and dispatchable attributes.
pub(crate) fn split_element(entry: &Map<String, Value>) -> Option<(String, Map<String, Value>)> {
    let name = entry.get("name")?.as_str()?.to_string();
    Some((name, without_keys(entry, ELEMENT_ATTRIBUTES)))
}
