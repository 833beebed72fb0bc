//! Diagnostics recorded while converting a field list.
//!
//! None of these stop a conversion; the offending entry is skipped or the
//! documented fallback is taken, and a [`Warning`] says so.

use serde::{Deserialize, Serialize};

/// A non-fatal problem found in the legacy schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Warning {
    /// Location in the legacy schema (e.g. `#/body/widgets/apostrophe-images`).
    pub path: String,
    /// Classification of the warning.
    pub kind: WarningKind,
    /// Human-readable description.
    pub message: String,
}

/// Classification of conversion warnings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WarningKind {
    /// Two legacy widget keys of one area translate to the same successor
    /// key. The later options replace the earlier ones.
    WidgetCollision {
        /// Successor widget key both names translate to.
        widget: String,
        /// Legacy key whose options were replaced.
        replaced: String,
        /// Legacy key whose options were kept.
        replacement: String,
    },
    /// An entry has no string `name`; it was skipped.
    MissingName,
    /// A field list entry is not a JSON object; it was skipped.
    NotAnObject,
    /// A name already used earlier in the same list. The later definition
    /// replaces the earlier one; the field keeps its first group slot.
    DuplicateName { name: String },
}
