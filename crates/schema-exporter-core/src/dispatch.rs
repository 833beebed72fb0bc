//! Field type dispatcher.
//!
//! Routes one field's attributes (administrative keys already stripped) to
//! the handler for its [`FieldKind`]. Unknown kinds fall through to the
//! identity arm so custom legacy field types survive unchanged.

use serde_json::{Map, Value};

use crate::config::ConvertOptions;
use crate::error::ConvertError;
use crate::field::FieldKind;
use crate::handlers::{area, relationship, repeatable};
use crate::warning::{Warning, WarningKind};

/// State shared by one conversion: the options and the warnings collected
/// so far.
pub(crate) struct Context<'a> {
    pub options: &'a ConvertOptions,
    pub warnings: Vec<Warning>,
}

impl<'a> Context<'a> {
    pub fn new(options: &'a ConvertOptions) -> Self {
        Self {
            options,
            warnings: Vec::new(),
        }
    }

    pub fn warn(&mut self, path: String, kind: WarningKind, message: String) {
        tracing::warn!(path = %path, "{message}");
        self.warnings.push(Warning {
            path,
            kind,
            message,
        });
    }
}

/// Convert one field. Returns `Ok(None)` when the field is dropped (tag
/// lists with `keep_tags` off).
pub(crate) fn convert_field(
    attrs: Map<String, Value>,
    path: &str,
    depth: usize,
    ctx: &mut Context<'_>,
) -> Result<Option<Value>, ConvertError> {
    if depth > ctx.options.max_depth {
        return Err(ConvertError::RecursionDepthExceeded {
            path: path.to_string(),
            max_depth: ctx.options.max_depth,
        });
    }

    let kind = FieldKind::of(&attrs);
    tracing::debug!(path = %path, ?kind, "converting field");

    let converted = match kind {
        FieldKind::Tags if !ctx.options.keep_tags => {
            tracing::debug!(path = %path, "dropping tag list");
            return Ok(None);
        }
        FieldKind::Tags => repeatable::convert_tags(attrs, path, depth, ctx)?,
        FieldKind::Array => repeatable::convert_array(attrs, path, depth, ctx)?,
        FieldKind::Area => area::convert_area(attrs, path, ctx),
        FieldKind::Singleton => area::convert_singleton(attrs, ctx),
        FieldKind::Join(join) => relationship::convert_relationship(attrs, join, path, depth, ctx)?,
        FieldKind::Plain => Value::Object(attrs),
    };

    Ok(Some(converted))
}
