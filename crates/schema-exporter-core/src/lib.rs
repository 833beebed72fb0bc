//! # schema-exporter-core
//!
//! Convert Apostrophe 2 ("A2") field schemas into Apostrophe 3 ("A3") field
//! schemas.
//!
//! The two dialects differ in how they declare repeatable structures (tag
//! lists, arrays), widget areas, cross-document joins and editing groups. The
//! conversion is a pure, synchronous walk over the legacy field list:
//!
//! 1. [`assemble`] folds the list, stripping administrative attributes and
//!    defaulting each field's group.
//! 2. Each field is classified by [`FieldKind`] and routed to the handler for
//!    tag lists/arrays, areas/singletons or joins. Unknown kinds pass through.
//! 3. Groups are accumulated alongside into a [`GroupMap`].
//!
//! ```
//! use schema_exporter_core::{convert, ConvertOptions};
//! use serde_json::json;
//!
//! let legacy = json!([
//!     { "name": "tags", "type": "tags", "label": "Tags" }
//! ]);
//! let result = convert(&legacy, &ConvertOptions::default()).unwrap();
//! assert_eq!(
//!     result.schema.add["tags"],
//!     json!({
//!         "type": "array",
//!         "label": "Tags",
//!         "fields": { "add": { "tag": { "type": "string", "label": "Tag" } } }
//!     })
//! );
//! ```

pub mod assemble;
pub mod config;
pub(crate) mod dispatch;
pub mod error;
pub mod field;
pub mod groups;
pub(crate) mod handlers;
pub mod module_file;
pub mod project;
pub mod schema_utils;
pub mod tables;
pub mod warning;

pub use assemble::AssembledSchema;
pub use config::ConvertOptions;
pub use error::ConvertError;
pub use field::{FieldDefinition, FieldKind, JoinKind};
pub use groups::{aggregate, Group, GroupEntry, GroupMap};
pub use module_file::render_module_file;
pub use project::{LegacyModule, LegacyProject, ModuleExport};
pub use schema_utils::build_path;
pub use tables::resolve_successor_kind;
pub use warning::{Warning, WarningKind};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use dispatch::Context;

/// Result of converting one field list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConvertResult {
    /// The converted `{add, group}` structure.
    pub schema: AssembledSchema,
    /// Non-fatal problems found along the way.
    pub warnings: Vec<Warning>,
}

/// Convert a legacy field list given as a JSON document.
///
/// The document must be an array; anything else is a [`ConvertError::SchemaError`].
pub fn convert(fields: &Value, options: &ConvertOptions) -> Result<ConvertResult, ConvertError> {
    let fields = fields.as_array().ok_or_else(|| ConvertError::SchemaError {
        path: "#".to_string(),
        message: "a field schema must be an array of field definitions".to_string(),
    })?;
    assemble(fields, options)
}

/// Convert a legacy field list.
pub fn assemble(fields: &[Value], options: &ConvertOptions) -> Result<ConvertResult, ConvertError> {
    let mut ctx = Context::new(options);
    let schema = assemble::assemble_at(fields, "#", 0, &mut ctx)?;
    tracing::debug!(
        fields = schema.add.len(),
        groups = schema.group.len(),
        warnings = ctx.warnings.len(),
        "assembled field schema"
    );
    Ok(ConvertResult {
        schema,
        warnings: ctx.warnings,
    })
}
