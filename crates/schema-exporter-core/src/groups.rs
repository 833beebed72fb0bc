//! Editing-group aggregation.
//!
//! Groups only organise the editing UI: each maps a group name to the ordered
//! names of the fields shown under it. Group order and field order both follow
//! first insertion.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

pub const DEFAULT_GROUP_NAME: &str = "default";
pub const DEFAULT_GROUP_LABEL: &str = "Info";

/// The `group` attribute of a legacy field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl Default for Group {
    fn default() -> Self {
        Self {
            name: DEFAULT_GROUP_NAME.to_string(),
            label: Some(DEFAULT_GROUP_LABEL.to_string()),
        }
    }
}

/// One group of the successor schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub fields: Vec<String>,
}

/// Group name → [`GroupEntry`], in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupMap(IndexMap<String, GroupEntry>);

impl GroupMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `field_name` to `group`, creating the group on first use. The
    /// label of an existing group is never overwritten.
    pub fn add_field(&mut self, group: &Group, field_name: impl Into<String>) {
        self.0
            .entry(group.name.clone())
            .or_insert_with(|| GroupEntry {
                label: group.label.clone(),
                fields: Vec::new(),
            })
            .fields
            .push(field_name.into());
    }

    pub fn get(&self, name: &str) -> Option<&GroupEntry> {
        self.0.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &GroupEntry)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn to_value(&self) -> Value {
        let groups: Map<String, Value> = self
            .0
            .iter()
            .map(|(name, entry)| {
                let mut obj = Map::new();
                if let Some(label) = &entry.label {
                    obj.insert("label".to_string(), json!(label));
                }
                obj.insert("fields".to_string(), json!(entry.fields));
                (name.clone(), Value::Object(obj))
            })
            .collect();
        Value::Object(groups)
    }
}

/// Functional form of [`GroupMap::add_field`].
pub fn aggregate(mut groups: GroupMap, group: &Group, field_name: &str) -> GroupMap {
    groups.add_field(group, field_name);
    groups
}
