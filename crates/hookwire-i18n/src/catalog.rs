//! Per-locale label tables with fallback and interpolation.
//!
//! # Invariants
//!
//! 1. **Lookup order**: the requested tag, then its primary subtag, then
//!    the fallback chain. The first table holding the key wins.
//! 2. **Single-pass interpolation**: `{name}` tokens are replaced once;
//!    substituted text is never rescanned.
//!
//! # Failure Modes
//!
//! | Failure | Behavior |
//! |---------|----------|
//! | Key missing everywhere | `None` |
//! | Locale not loaded | skipped in the chain |
//! | `{name}` without an argument | token left as-is |

use std::collections::HashMap;

use crate::plural::{PluralForms, PluralRule};

/// Keys of the built-in labels.
pub mod keys {
    /// Summary button with nothing selected.
    pub const BULK_BUTTON: &str = "bulk.button";
    /// Summary button with `{count}` rows selected.
    pub const BULK_BUTTON_COUNT: &str = "bulk.button_count";
    /// Count line of the bulk form mirror.
    pub const BULK_SELECTED: &str = "bulk.selected";
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LabelEntry {
    Text(String),
    Plural(PluralForms),
}

/// Labels for one locale.
#[derive(Debug, Clone)]
pub struct Labels {
    entries: HashMap<String, LabelEntry>,
    rule: PluralRule,
}

impl Labels {
    /// Empty table using the plural rule for `tag`.
    #[must_use]
    pub fn for_locale(tag: &str) -> Self {
        Self {
            entries: HashMap::new(),
            rule: PluralRule::for_locale(tag),
        }
    }

    #[must_use]
    pub fn with_rule(mut self, rule: PluralRule) -> Self {
        self.rule = rule;
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, text: impl Into<String>) {
        self.entries.insert(key.into(), LabelEntry::Text(text.into()));
    }

    pub fn insert_plural(&mut self, key: impl Into<String>, forms: PluralForms) {
        self.entries.insert(key.into(), LabelEntry::Plural(forms));
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&LabelEntry> {
        self.entries.get(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn english() -> Self {
        let mut labels = Self::for_locale("en");
        labels.insert(keys::BULK_BUTTON, "Bulk Actions");
        labels.insert_plural(
            keys::BULK_BUTTON_COUNT,
            PluralForms::one_other("Bulk Actions ({count})", "Bulk Actions ({count})"),
        );
        labels.insert_plural(
            keys::BULK_SELECTED,
            PluralForms::one_other("{count} Record Selected", "{count} Records Selected"),
        );
        labels
    }
}

/// Label catalog shared by every widget on a page.
///
/// ```
/// use hookwire_i18n::{LabelCatalog, keys};
///
/// let catalog = LabelCatalog::builtin();
/// assert_eq!(catalog.text("en-US", keys::BULK_BUTTON), Some("Bulk Actions"));
/// assert_eq!(
///     catalog.plural("en", keys::BULK_SELECTED, 3).as_deref(),
///     Some("3 Records Selected")
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct LabelCatalog {
    locales: HashMap<String, Labels>,
    fallback: Vec<String>,
}

impl LabelCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog with the English labels loaded and `en` as the fallback.
    #[must_use]
    pub fn builtin() -> Self {
        let mut catalog = Self::new();
        catalog.add_locale("en", Labels::english());
        catalog.set_fallback_chain(vec!["en".into()]);
        catalog
    }

    /// Add or replace the table for `tag`.
    pub fn add_locale(&mut self, tag: impl Into<String>, labels: Labels) {
        self.locales.insert(tag.into(), labels);
    }

    pub fn set_fallback_chain(&mut self, chain: Vec<String>) {
        self.fallback = chain;
    }

    fn resolve(&self, tag: &str, key: &str) -> Option<(&Labels, &LabelEntry)> {
        let primary = tag.split(['-', '_']).next().unwrap_or(tag);
        [tag, primary]
            .into_iter()
            .chain(self.fallback.iter().map(String::as_str))
            .filter_map(|candidate| self.locales.get(candidate))
            .find_map(|labels| labels.get(key).map(|entry| (labels, entry)))
    }

    /// Plain label; for plural entries the `other` form is returned.
    #[must_use]
    pub fn text(&self, tag: &str, key: &str) -> Option<&str> {
        match self.resolve(tag, key)?.1 {
            LabelEntry::Text(text) => Some(text.as_str()),
            LabelEntry::Plural(forms) => Some(forms.other.as_str()),
        }
    }

    /// Count-dependent label with `{count}` substituted.
    #[must_use]
    pub fn plural(&self, tag: &str, key: &str, count: u64) -> Option<String> {
        let (labels, entry) = self.resolve(tag, key)?;
        let template = match entry {
            LabelEntry::Text(text) => text.as_str(),
            LabelEntry::Plural(forms) => forms.select(labels.rule.categorize(count)),
        };
        Some(interpolate(template, &[("count", &count.to_string())]))
    }

    /// Label with `{name}` tokens replaced from `args`.
    #[must_use]
    pub fn format(&self, tag: &str, key: &str, args: &[(&str, &str)]) -> Option<String> {
        self.text(tag, key).map(|template| interpolate(template, args))
    }
}

/// Replace `{name}` tokens in one pass; unknown tokens are kept verbatim.
#[must_use]
pub fn interpolate(template: &str, args: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let Some(close) = after.find('}') else {
            out.push_str(&rest[open..]);
            return out;
        };
        let name = &after[..close];
        match args.iter().find(|(arg, _)| *arg == name) {
            Some((_, value)) => out.push_str(value),
            None => {
                out.push('{');
                out.push_str(name);
                out.push('}');
            }
        }
        rest = &after[close + 1..];
    }
    out.push_str(rest);
    out
}
