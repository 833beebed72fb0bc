//! Renders an assembled schema as an A3 module file.
//!
//! The output is JavaScript, not JSON: two-space indentation, single-quoted
//! strings, and bare object keys wherever the key is a valid identifier.

use std::fmt::Write as _;
use std::sync::OnceLock;

use regex::Regex;
use serde_json::{json, Map, Value};

use crate::assemble::AssembledSchema;

const INDENT: &str = "  ";

fn identifier_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*$").expect("identifier pattern is valid")
    })
}

/// Render the `schema.js` contents for one module.
///
/// ```text
/// module.exports = (self, options) => {
///   return {
///     extend: '@apostrophecms/piece-type',
///     options: {
///       label: 'Article'
///     },
///     fields: { add: ..., group: ... }
///   };
/// };
/// ```
///
/// `extend` is omitted when no successor kind is known.
pub fn render_module_file(extend: Option<&str>, label: &str, schema: &AssembledSchema) -> String {
    let mut module = Map::new();
    if let Some(extend) = extend {
        module.insert("extend".to_string(), json!(extend));
    }
    module.insert("options".to_string(), json!({ "label": label }));
    module.insert("fields".to_string(), schema.to_value());

    let mut out = String::from("module.exports = (self, options) => {\n");
    out.push_str(INDENT);
    out.push_str("return ");
    write_value(&mut out, &Value::Object(module), 1);
    out.push_str(";\n};\n");
    out
}

fn write_value(out: &mut String, value: &Value, level: usize) {
    match value {
        Value::Null => out.push_str("null"),
        Value::Bool(b) => {
            let _ = write!(out, "{b}");
        }
        Value::Number(n) => {
            let _ = write!(out, "{n}");
        }
        Value::String(s) => write_string(out, s),
        Value::Array(items) if items.is_empty() => out.push_str("[]"),
        Value::Array(items) => {
            out.push_str("[\n");
            for (i, item) in items.iter().enumerate() {
                push_indent(out, level + 1);
                write_value(out, item, level + 1);
                if i + 1 < items.len() {
                    out.push(',');
                }
                out.push('\n');
            }
            push_indent(out, level);
            out.push(']');
        }
        Value::Object(map) if map.is_empty() => out.push_str("{}"),
        Value::Object(map) => {
            out.push_str("{\n");
            for (i, (key, item)) in map.iter().enumerate() {
                push_indent(out, level + 1);
                write_key(out, key);
                out.push_str(": ");
                write_value(out, item, level + 1);
                if i + 1 < map.len() {
                    out.push(',');
                }
                out.push('\n');
            }
            push_indent(out, level);
            out.push('}');
        }
    }
}

fn write_key(out: &mut String, key: &str) {
    if identifier_pattern().is_match(key) {
        out.push_str(key);
    } else {
        write_string(out, key);
    }
}

fn write_string(out: &mut String, s: &str) {
    out.push('\'');
    for c in s.chars() {
        match c {
            '\'' => out.push_str("\\'"),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{2028}' | '\u{2029}' => {
                let _ = write!(out, "\\u{:04x}", c as u32);
            }
            c if c.is_control() => {
                let _ = write!(out, "\\u{:04x}", c as u32);
            }
            c => out.push(c),
        }
    }
    out.push('\'');
}

fn push_indent(out: &mut String, level: usize) {
    for _ in 0..level {
        out.push_str(INDENT);
    }
}
