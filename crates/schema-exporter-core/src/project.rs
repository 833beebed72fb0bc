//! Legacy project description: the modules to export and their schemas.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::ConvertOptions;
use crate::error::ConvertError;
use crate::module_file::render_module_file;
use crate::tables::resolve_successor_kind;
use crate::ConvertResult;

/// Every module of a legacy project that declares a field schema.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LegacyProject {
    pub modules: Vec<LegacyModule>,
}

/// One legacy module.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LegacyModule {
    /// Module name; also the destination folder name.
    pub name: String,
    /// Editor label. Defaults to the module name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Inheritance chain, nearest ancestor first.
    #[serde(default)]
    pub extends: Vec<String>,
    /// The legacy field list.
    #[serde(default)]
    pub schema: Vec<Value>,
}

impl LegacyModule {
    pub fn label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.name)
    }

    /// Successor base module, from the first ancestor the module table knows.
    pub fn successor_kind(&self) -> Option<&'static str> {
        resolve_successor_kind(&self.extends)
    }

    pub fn export(&self, options: &ConvertOptions) -> Result<ModuleExport, ConvertError> {
        let result = crate::assemble(&self.schema, options)?;
        let successor_kind = self.successor_kind();
        tracing::debug!(
            module = %self.name,
            successor = successor_kind.unwrap_or("<none>"),
            fields = result.schema.add.len(),
            "converted module"
        );
        Ok(ModuleExport {
            name: self.name.clone(),
            label: self.label().to_string(),
            successor_kind,
            result,
        })
    }
}

/// A converted module, ready to be rendered.
#[derive(Debug, Clone)]
pub struct ModuleExport {
    pub name: String,
    pub label: String,
    pub successor_kind: Option<&'static str>,
    pub result: ConvertResult,
}

impl ModuleExport {
    /// Contents of the module's `schema.js`.
    pub fn render(&self) -> String {
        render_module_file(self.successor_kind, &self.label, &self.result.schema)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_module_export() {
        let module: LegacyModule = serde_json::from_value(json!({
            "name": "article",
            "extends": ["apostrophe-pieces"],
            "schema": [
                { "name": "_author", "type": "joinByOne", "withType": "apostrophe-user", "idField": "authorId" }
            ]
        }))
        .unwrap();

        let export = module.export(&ConvertOptions::default()).unwrap();
        assert_eq!(export.label, "article");
        assert_eq!(export.successor_kind, Some("@apostrophecms/piece-type"));

        let rendered = export.render();
        assert!(rendered.contains("extend: '@apostrophecms/piece-type'"));
        assert!(rendered.contains("withType: '@apostrophecms/user'"));
        assert!(rendered.contains("idsStorage: 'authorId'"));
    }

    #[test]
    fn test_explicit_label() {
        let module: LegacyModule = serde_json::from_value(json!({
            "name": "article",
            "label": "Article"
        }))
        .unwrap();
        assert_eq!(module.label(), "Article");
        assert!(module.schema.is_empty());
        assert_eq!(module.successor_kind(), None);
    }
}
