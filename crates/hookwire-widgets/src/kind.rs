//! Widget kinds managed by the hook layer.

use core::fmt;

/// Kind of a managed element; selects its lifecycle hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WidgetKind {
    /// Chart driven by an external charting library.
    Chart,
    /// `<select>` upgraded by an external dropdown library.
    EnhancedSelect,
    /// Data table with bulk row selection.
    Table,
    /// Page sections with a scroll-linked navigation list.
    SectionNav,
}

impl WidgetKind {
    pub const ALL: [WidgetKind; 4] = [
        Self::Chart,
        Self::EnhancedSelect,
        Self::Table,
        Self::SectionNav,
    ];

    /// Canonical hook name used in markup.
    #[must_use]
    pub const fn hook_name(self) -> &'static str {
        match self {
            Self::Chart => "Chart",
            Self::EnhancedSelect => "EnhancedSelect",
            Self::Table => "BulkActions",
            Self::SectionNav => "SectionNav",
        }
    }

    /// Resolve a hook name, accepting the library-specific aliases.
    #[must_use]
    pub fn from_hook_name(name: &str) -> Option<Self> {
        match name {
            "Chart" | "ApexChart" | "AmChart" => Some(Self::Chart),
            "EnhancedSelect" | "Select2" => Some(Self::EnhancedSelect),
            "BulkActions" | "Table" => Some(Self::Table),
            "SectionNav" | "WikiSidenav" => Some(Self::SectionNav),
            _ => None,
        }
    }
}

impl fmt::Display for WidgetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.hook_name())
    }
}
