//! Embeddable areas: `area` and `singleton`.
//!
//! Widget keys are translated through the project aliases and the built-in
//! widget table; names neither knows are kept as they are. Option payloads
//! are never touched.

use std::collections::HashMap;

use serde_json::{json, Map, Value};

use crate::dispatch::Context;
use crate::schema_utils::build_path;
use crate::tables::widget_type;
use crate::warning::WarningKind;

/// Convert a `singleton` into a one-slot area:
/// `{label, type: "area", options: {widgets: {<widget>: <options>}, max: 1}}`.
///
/// A singleton without a string `widgetType` gets an empty widgets map.
pub(crate) fn convert_singleton(field: Map<String, Value>, ctx: &Context<'_>) -> Value {
    let mut widgets = Map::new();
    if let Some(widget) = field.get("widgetType").and_then(Value::as_str) {
        let options = field.get("options").cloned().unwrap_or_else(|| json!({}));
        widgets.insert(
            widget_type(widget, &ctx.options.widget_aliases).to_string(),
            options,
        );
    }

    let mut result = Map::new();
    if let Some(label) = field.get("label") {
        result.insert("label".to_string(), label.clone());
    }
    result.insert("type".to_string(), json!("area"));
    result.insert(
        "options".to_string(),
        json!({ "widgets": widgets, "max": 1 }),
    );
    Value::Object(result)
}

/// Convert an `area`, translating the keys of `options.widgets` in
/// declaration order. Every other attribute and option is kept.
///
/// Areas without an `options.widgets` object are returned unchanged.
pub(crate) fn convert_area(mut field: Map<String, Value>, path: &str, ctx: &mut Context<'_>) -> Value {
    let Some(widgets) = field
        .get("options")
        .and_then(|options| options.get("widgets"))
        .and_then(Value::as_object)
    else {
        return Value::Object(field);
    };

    let translated = translate_widgets(widgets, path, ctx);
    if let Some(Value::Object(options)) = field.get_mut("options") {
        options.insert("widgets".to_string(), Value::Object(translated));
    }
    Value::Object(field)
}

/// Translate widget keys. When two legacy keys land on the same successor
/// key the later payload replaces the earlier one and a warning is recorded.
fn translate_widgets(
    widgets: &Map<String, Value>,
    path: &str,
    ctx: &mut Context<'_>,
) -> Map<String, Value> {
    let mut translated = Map::new();
    let mut sources: HashMap<String, &str> = HashMap::new();
    let mut collisions = Vec::new();

    for (legacy, options) in widgets {
        let successor = widget_type(legacy, &ctx.options.widget_aliases).to_string();
        if let Some(previous) = sources.insert(successor.clone(), legacy) {
            collisions.push((successor.clone(), previous.to_string(), legacy.clone()));
        }
        translated.insert(successor, options.clone());
    }

    for (widget, replaced, replacement) in collisions {
        let message = format!(
            "widgets '{replaced}' and '{replacement}' both translate to '{widget}'; options of '{replaced}' were dropped"
        );
        ctx.warn(
            build_path(path, &["options", "widgets", &replacement]),
            WarningKind::WidgetCollision {
                widget,
                replaced,
                replacement,
            },
            message,
        );
    }

    translated
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConvertOptions;
    use pretty_assertions::assert_eq;
    use std::collections::BTreeMap;

    fn area(field: Value, options: &ConvertOptions) -> (Value, Vec<WarningKind>) {
        let mut ctx = Context::new(options);
        let result = convert_area(field.as_object().unwrap().clone(), "#/body", &mut ctx);
        (result, ctx.warnings.into_iter().map(|w| w.kind).collect())
    }

    #[test]
    fn test_area_translates_core_widgets_in_order() {
        let (result, warnings) = area(
            json!({
                "label": "Widgets",
                "type": "area",
                "options": {
                    "widgets": {
                        "apostrophe-rich-text": { "toolbar": ["Undo", "Redo"] },
                        "apostrophe-images": { "size": "full" },
                        "apostrophe-video": {}
                    }
                }
            }),
            &ConvertOptions::default(),
        );

        let widgets = result["options"]["widgets"].as_object().unwrap();
        let keys: Vec<&String> = widgets.keys().collect();
        assert_eq!(
            keys,
            vec!["@apostrophecms/rich-text", "@apostrophecms/image", "@apostrophecms/video"]
        );
        assert_eq!(
            result["options"]["widgets"],
            json!({
                "@apostrophecms/rich-text": { "toolbar": ["Undo", "Redo"] },
                "@apostrophecms/image": { "size": "full" },
                "@apostrophecms/video": {}
            })
        );
        assert_eq!(result["label"], json!("Widgets"));
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_area_keeps_custom_widgets_and_other_options() {
        let (result, _) = area(
            json!({
                "type": "area",
                "contextual": true,
                "options": { "limit": 2, "widgets": { "hero": { "style": "dark" } } }
            }),
            &ConvertOptions::default(),
        );
        assert_eq!(
            result,
            json!({
                "type": "area",
                "contextual": true,
                "options": { "limit": 2, "widgets": { "hero": { "style": "dark" } } }
            })
        );
    }

    #[test]
    fn test_area_without_widgets_unchanged() {
        let field = json!({ "type": "area", "label": "Empty" });
        let (result, _) = area(field.clone(), &ConvertOptions::default());
        assert_eq!(result, field);
    }

    #[test]
    fn test_widget_collision_last_write_wins_with_warning() {
        let options = ConvertOptions {
            widget_aliases: BTreeMap::from([(
                "gallery".to_string(),
                "@apostrophecms/image".to_string(),
            )]),
            ..ConvertOptions::default()
        };
        let (result, warnings) = area(
            json!({
                "type": "area",
                "options": {
                    "widgets": {
                        "apostrophe-images": { "size": "full" },
                        "apostrophe-video": {},
                        "gallery": { "size": "one-third" }
                    }
                }
            }),
            &options,
        );

        let widgets = result["options"]["widgets"].as_object().unwrap();
        assert_eq!(widgets.len(), 2);
        assert_eq!(widgets.keys().next().unwrap(), "@apostrophecms/image");
        assert_eq!(widgets["@apostrophecms/image"], json!({ "size": "one-third" }));
        assert_eq!(
            warnings,
            vec![WarningKind::WidgetCollision {
                widget: "@apostrophecms/image".to_string(),
                replaced: "apostrophe-images".to_string(),
                replacement: "gallery".to_string(),
            }]
        );
    }

    #[test]
    fn test_singleton_becomes_single_slot_area() {
        let options = ConvertOptions::default();
        let ctx = Context::new(&options);
        let result = convert_singleton(
            json!({
                "label": "Photo",
                "type": "singleton",
                "widgetType": "apostrophe-images",
                "options": { "limit": 1 }
            })
            .as_object()
            .unwrap()
            .clone(),
            &ctx,
        );
        assert_eq!(
            result,
            json!({
                "label": "Photo",
                "type": "area",
                "options": {
                    "widgets": { "@apostrophecms/image": { "limit": 1 } },
                    "max": 1
                }
            })
        );
    }

    #[test]
    fn test_singleton_without_options() {
        let options = ConvertOptions::default();
        let ctx = Context::new(&options);
        let result = convert_singleton(
            json!({ "type": "singleton", "widgetType": "quote" })
                .as_object()
                .unwrap()
                .clone(),
            &ctx,
        );
        assert_eq!(
            result,
            json!({ "type": "area", "options": { "widgets": { "quote": {} }, "max": 1 } })
        );
    }
}
