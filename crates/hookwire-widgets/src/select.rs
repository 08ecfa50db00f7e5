//! Options for enhanced `<select>` elements, derived from markup classes.
//!
//! A select opts in with the `enhanced` class. Further classes tune it:
//!
//! | Class | Effect |
//! |-------|--------|
//! | `search` | search box always available |
//! | `clearable` | selection can be cleared |
//! | `creatable` / `tags` | free-text entries allowed |
//!
//! The `placeholder` attribute becomes the placeholder text.

use serde::Serialize;
use serde_json::{Map, Value};

use hookwire_core::ElementNode;

/// Class marking a select as managed.
pub const ENHANCED_CLASS: &str = "enhanced";

/// `minimumResultsForSearch` value that hides the search box for good.
const SEARCH_NEVER: i64 = -1;

/// Library options for one enhanced select.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectOptions {
    pub allow_clear: bool,
    /// `0` shows search immediately; negative never shows it.
    pub minimum_results_for_search: i64,
    pub tags: bool,
    pub placeholder: String,
}

impl Default for SelectOptions {
    fn default() -> Self {
        Self {
            allow_clear: false,
            minimum_results_for_search: SEARCH_NEVER,
            tags: false,
            placeholder: String::new(),
        }
    }
}

impl SelectOptions {
    /// Derive options from the element's classes and placeholder.
    #[must_use]
    pub fn from_element(element: &ElementNode, placeholder_attr: &str) -> Self {
        let has = |class| element.has_class(class);
        Self {
            allow_clear: has("clearable"),
            minimum_results_for_search: if has("search") { 0 } else { SEARCH_NEVER },
            tags: has("creatable") || has("tags"),
            placeholder: element.attr(placeholder_attr).unwrap_or_default().to_owned(),
        }
    }

    /// Options as a JSON object in the library's naming.
    #[must_use]
    pub fn to_json(&self) -> Map<String, Value> {
        match serde_json::to_value(self) {
            Ok(Value::Object(map)) => map,
            _ => Map::new(),
        }
    }
}

/// Entries of `next` that are missing from or differ in `prev`.
#[must_use]
pub fn changed_fields(prev: &Map<String, Value>, next: &Map<String, Value>) -> Map<String, Value> {
    next.iter()
        .filter(|(key, value)| prev.get(key.as_str()) != Some(*value))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn select(classes: &str) -> ElementNode {
        ElementNode::new("select").with_attr("class", classes)
    }

    #[test]
    fn plain_enhanced_select() {
        let opts = SelectOptions::from_element(&select("enhanced"), "placeholder");
        assert_eq!(opts, SelectOptions::default());
    }

    #[test]
    fn classes_toggle_options() {
        let el = select("enhanced search clearable tags").with_attr("placeholder", "Pick one");
        let opts = SelectOptions::from_element(&el, "placeholder");
        assert!(opts.allow_clear);
        assert!(opts.tags);
        assert_eq!(opts.minimum_results_for_search, 0);
        assert_eq!(opts.placeholder, "Pick one");
    }

    #[test]
    fn creatable_is_an_alias_for_tags() {
        let opts = SelectOptions::from_element(&select("enhanced creatable"), "placeholder");
        assert!(opts.tags);
    }

    #[test]
    fn json_uses_library_names() {
        let opts = SelectOptions {
            allow_clear: true,
            ..SelectOptions::default()
        };
        assert_eq!(
            Value::Object(opts.to_json()),
            json!({
                "allowClear": true,
                "minimumResultsForSearch": -1,
                "tags": false,
                "placeholder": ""
            })
        );
    }

    #[test]
    fn changed_fields_only_reports_differences() {
        let prev = SelectOptions::default().to_json();
        let next = SelectOptions {
            placeholder: "Status".into(),
            ..SelectOptions::default()
        }
        .to_json();
        assert_eq!(
            Value::Object(changed_fields(&prev, &next)),
            json!({"placeholder": "Status"})
        );
        assert!(changed_fields(&next, &next).is_empty());
    }
}
