//! Configuration for schema conversion.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Default nesting limit. Each nested field level costs at least two JSON
/// levels, so documents within serde_json's parse limit of 128 never reach it.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Options for schema conversion.
///
/// ## Serialization Format
///
/// Fields are serialized in `kebab-case` (e.g., `keep-tags`, `widget-aliases`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct ConvertOptions {
    /// Keep `tags` fields as arrays of single-string entries. When `false`,
    /// tag lists are dropped from the output entirely. Default: `true`.
    pub keep_tags: bool,
    /// Maximum nesting depth of sub-schemas (stack overflow guard).
    pub max_depth: usize,
    /// Project-specific widget renames, consulted before the built-in
    /// widget table.
    pub widget_aliases: BTreeMap<String, String>,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            keep_tags: true,
            max_depth: DEFAULT_MAX_DEPTH,
            widget_aliases: BTreeMap::new(),
        }
    }
}
