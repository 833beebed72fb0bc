//! Static lookup tables mapping legacy (A2) names onto their A3 successors.
//!
//! All tables are read-only for the life of the process. Lookups return
//! `None` for unknown names; callers decide whether that means identity
//! pass-through (widgets, `withType`) or "no successor" (module kinds).

use std::borrow::Cow;
use std::collections::BTreeMap;

/// Prefix carried by every legacy core module and document type.
pub const LEGACY_NAMESPACE: &str = "apostrophe-";
/// Namespace of the successor core modules.
pub const SUCCESSOR_NAMESPACE: &str = "@apostrophecms/";

/// Legacy base module → successor base module.
pub const MODULE_TYPES: &[(&str, &str)] = &[
    ("apostrophe-widgets", "@apostrophecms/widget-type"),
    ("apostrophe-custom-pages", "@apostrophecms/page-type"),
    ("apostrophe-pieces", "@apostrophecms/piece-type"),
    ("apostrophe-pieces-pages", "@apostrophecms/piece-page-type"),
    ("apostrophe-any-page-manager", "@apostrophecms/any-page-type"),
    ("apostrophe-global", "@apostrophecms/global"),
    ("apostrophe-polymorphic-manager", "@apostrophecms/polymorphic-type"),
    ("apostrophe-pages", "@apostrophecms/page"),
];

/// Legacy join field type → successor relationship field type.
pub const RELATIONSHIP_TYPES: &[(&str, &str)] = &[
    ("joinByArray", "relationship"),
    ("joinByOne", "relationship"),
    ("joinByArrayReverse", "relationshipReverse"),
    ("joinByOneReverse", "relationshipReverse"),
];

/// Legacy core widget → successor core widget.
pub const WIDGET_TYPES: &[(&str, &str)] = &[
    ("apostrophe-rich-text", "@apostrophecms/rich-text"),
    ("apostrophe-video", "@apostrophecms/video"),
    ("apostrophe-images", "@apostrophecms/image"),
];

fn lookup(table: &'static [(&'static str, &'static str)], key: &str) -> Option<&'static str> {
    table
        .iter()
        .find_map(|(legacy, successor)| (*legacy == key).then_some(*successor))
}

/// Successor base module for a legacy base module name.
pub fn module_type(legacy: &str) -> Option<&'static str> {
    lookup(MODULE_TYPES, legacy)
}

/// Successor relationship type for a legacy join type.
pub fn relationship_type(legacy: &str) -> Option<&'static str> {
    lookup(RELATIONSHIP_TYPES, legacy)
}

/// Translate a widget name, preferring project aliases over the built-in
/// table and falling back to the name itself.
pub fn widget_type<'a>(legacy: &'a str, aliases: &'a BTreeMap<String, String>) -> &'a str {
    aliases
        .get(legacy)
        .map(String::as_str)
        .or_else(|| lookup(WIDGET_TYPES, legacy))
        .unwrap_or(legacy)
}

/// Walk an inheritance chain (nearest ancestor first) and return the
/// successor kind of the first ancestor the module table knows.
pub fn resolve_successor_kind<S: AsRef<str>>(chain: &[S]) -> Option<&'static str> {
    chain.iter().find_map(|ancestor| module_type(ancestor.as_ref()))
}

/// Rewrite `apostrophe-foo` into `@apostrophecms/foo`; anything else is
/// returned unchanged.
pub fn rewrite_namespace(name: &str) -> Cow<'_, str> {
    match name.strip_prefix(LEGACY_NAMESPACE) {
        Some(rest) => Cow::Owned(format!("{SUCCESSOR_NAMESPACE}{rest}")),
        None => Cow::Borrowed(name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relationship_types_cover_all_join_kinds() {
        assert_eq!(relationship_type("joinByOne"), Some("relationship"));
        assert_eq!(relationship_type("joinByArray"), Some("relationship"));
        assert_eq!(relationship_type("joinByOneReverse"), Some("relationshipReverse"));
        assert_eq!(relationship_type("joinByArrayReverse"), Some("relationshipReverse"));
        assert_eq!(relationship_type("joinByMany"), None);
    }

    #[test]
    fn test_widget_type_identity_fallback() {
        let aliases = BTreeMap::new();
        assert_eq!(widget_type("apostrophe-images", &aliases), "@apostrophecms/image");
        assert_eq!(widget_type("hero", &aliases), "hero");
    }

    #[test]
    fn test_widget_aliases_take_precedence() {
        let aliases = BTreeMap::from([(
            "apostrophe-images".to_string(),
            "gallery".to_string(),
        )]);
        assert_eq!(widget_type("apostrophe-images", &aliases), "gallery");
    }

    #[test]
    fn test_resolve_successor_kind_nearest_known_ancestor() {
        let chain = ["product-base", "apostrophe-pieces", "apostrophe-doc-type-manager"];
        assert_eq!(resolve_successor_kind(&chain), Some("@apostrophecms/piece-type"));

        let unknown = ["my-module", "my-base"];
        assert_eq!(resolve_successor_kind(&unknown), None);

        let empty: [&str; 0] = [];
        assert_eq!(resolve_successor_kind(&empty), None);
    }

    #[test]
    fn test_rewrite_namespace() {
        assert_eq!(rewrite_namespace("apostrophe-page"), "@apostrophecms/page");
        assert_eq!(rewrite_namespace("article"), "article");
        assert_eq!(rewrite_namespace("my-apostrophe-thing"), "my-apostrophe-thing");
    }
}
