//! Scroll-linked section highlighting.
//!
//! The index is built once from heading snapshots: each heading's offset
//! and label, plus a navigation entry that scrolls to it. On every scroll
//! the host passes the [`Viewport`] and gets back a [`HighlightChange`]
//! only when the current section moved.
//!
//! # Invariants
//!
//! 1. A non-empty index always has exactly one current entry.
//! 2. At the document bottom the last entry is current, whatever the
//!    offsets.
//! 3. `update` is O(headings) and never recomputes offsets.

use hookwire_core::{ElementNode, SectionConfig, Viewport};

/// One heading found in the document.
#[derive(Debug, Clone, PartialEq)]
pub struct Heading {
    pub level: u8,
    pub label: String,
    pub offset: f64,
}

impl Heading {
    #[must_use]
    pub fn new(level: u8, label: impl Into<String>, offset: f64) -> Self {
        Self {
            level,
            label: label.into(),
            offset,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SectionEntry {
    pub offset: f64,
    pub label: String,
}

/// Smooth-scroll request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollTarget {
    pub top: f64,
    pub duration_ms: u32,
}

/// One entry of the companion navigation list.
#[derive(Debug, Clone, PartialEq)]
pub struct NavEntry {
    /// `tag-H<level>`, used for indentation.
    pub class: String,
    pub label: String,
    pub target: ScrollTarget,
}

/// A move of the highlight marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HighlightChange {
    /// Entry losing the marker; `None` on the first highlight.
    pub previous: Option<usize>,
    pub current: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScrollSectionHighlighter {
    entries: Vec<SectionEntry>,
    nav: Vec<NavEntry>,
    lookahead: f64,
    current: Option<usize>,
}

impl ScrollSectionHighlighter {
    /// Index `headings`, which must be in document order.
    pub fn build(headings: impl IntoIterator<Item = Heading>, config: &SectionConfig) -> Self {
        let (entries, nav): (Vec<_>, Vec<_>) = headings
            .into_iter()
            .map(|h| {
                let nav = NavEntry {
                    class: format!("tag-H{}", h.level),
                    label: h.label.clone(),
                    target: ScrollTarget {
                        top: h.offset - config.scroll_correction,
                        duration_ms: config.scroll_duration_ms,
                    },
                };
                (
                    SectionEntry {
                        offset: h.offset,
                        label: h.label,
                    },
                    nav,
                )
            })
            .unzip();
        Self {
            entries,
            nav,
            lookahead: config.lookahead,
            current: None,
        }
    }

    /// Index the heading descendants of `element`.
    ///
    /// Headings the host did not lay out (no offset) are skipped.
    #[must_use]
    pub fn from_element(element: &ElementNode, config: &SectionConfig) -> Self {
        let headings = element
            .descendants()
            .filter(|node| config.heading_tags.iter().any(|tag| tag == node.tag()))
            .filter_map(|node| {
                let Some(offset) = node.offset_top() else {
                    tracing::warn!(heading = %node, "heading has no layout offset; skipped");
                    return None;
                };
                Some(Heading::new(
                    heading_level(node.tag()),
                    node.text_content().trim(),
                    offset,
                ))
            })
            .collect::<Vec<_>>();
        Self::build(headings, config)
    }

    #[must_use]
    pub fn entries(&self) -> &[SectionEntry] {
        &self.entries
    }

    /// Navigation list; empty when there are no headings.
    #[must_use]
    pub fn nav(&self) -> &[NavEntry] {
        &self.nav
    }

    #[must_use]
    pub fn current(&self) -> Option<usize> {
        self.current
    }

    /// Entry that should be current for `viewport`.
    #[must_use]
    pub fn index_for(&self, viewport: &Viewport) -> Option<usize> {
        if self.entries.is_empty() {
            return None;
        }
        if viewport.is_at_bottom() {
            return Some(self.entries.len() - 1);
        }
        let position = viewport.scroll_y + self.lookahead;
        Some(
            self.entries
                .iter()
                .rposition(|entry| entry.offset <= position)
                .unwrap_or(0),
        )
    }

    /// Swap in a rebuilt index, keeping the current highlight.
    ///
    /// The returned change is relative to the highlight before the swap;
    /// an empty rebuilt index clears it silently.
    pub fn reindex(&mut self, fresh: Self, viewport: &Viewport) -> Option<HighlightChange> {
        let current = self.current;
        *self = Self { current, ..fresh };
        if self.entries.is_empty() {
            self.current = None;
            return None;
        }
        self.update(viewport)
    }

    /// Move the highlight for `viewport`; `None` when it stays put.
    pub fn update(&mut self, viewport: &Viewport) -> Option<HighlightChange> {
        let next = self.index_for(viewport)?;
        if self.current == Some(next) {
            return None;
        }
        let change = HighlightChange {
            previous: self.current.replace(next),
            current: next,
        };
        tracing::trace!(previous = ?change.previous, current = next, "section highlight moved");
        Some(change)
    }
}

/// `h3` → 3; anything unexpected is treated as a top-level heading.
fn heading_level(tag: &str) -> u8 {
    tag.strip_prefix('h')
        .and_then(|n| n.parse().ok())
        .unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hookwire_core::testing::wiki_page;

    fn three() -> ScrollSectionHighlighter {
        ScrollSectionHighlighter::build(
            [
                Heading::new(1, "Intro", 0.0),
                Heading::new(2, "Usage", 200.0),
                Heading::new(2, "Limits", 500.0),
            ],
            &SectionConfig::default(),
        )
    }

    fn at(scroll_y: f64) -> Viewport {
        Viewport::new(scroll_y, 300.0, 5000.0)
    }

    #[test]
    fn last_heading_at_or_above_position() {
        let nav = three();
        assert_eq!(nav.index_for(&at(0.0)), Some(0));
        assert_eq!(nav.index_for(&at(210.0)), Some(1));
        assert_eq!(nav.index_for(&at(184.0)), Some(1));
        assert_eq!(nav.index_for(&at(183.0)), Some(0));
        assert_eq!(nav.index_for(&at(900.0)), Some(2));
    }

    #[test]
    fn bottom_forces_last_entry() {
        let nav = ScrollSectionHighlighter::build(
            [Heading::new(2, "A", 0.0), Heading::new(2, "B", 10_000.0)],
            &SectionConfig::default(),
        );
        assert_eq!(nav.index_for(&Viewport::new(700.0, 300.0, 1000.0)), Some(1));
    }

    #[test]
    fn first_entry_is_default_above_all_offsets() {
        let nav = ScrollSectionHighlighter::build(
            [Heading::new(2, "A", 400.0), Heading::new(2, "B", 800.0)],
            &SectionConfig::default(),
        );
        assert_eq!(nav.index_for(&at(0.0)), Some(0));
    }

    #[test]
    fn update_reports_only_transitions() {
        let mut nav = three();
        assert_eq!(
            nav.update(&at(0.0)),
            Some(HighlightChange {
                previous: None,
                current: 0
            })
        );
        assert_eq!(nav.update(&at(50.0)), None);
        assert_eq!(
            nav.update(&at(210.0)),
            Some(HighlightChange {
                previous: Some(0),
                current: 1
            })
        );
        assert_eq!(nav.current(), Some(1));
    }

    #[test]
    fn empty_index_has_no_current() {
        let mut nav = ScrollSectionHighlighter::build([], &SectionConfig::default());
        assert_eq!(nav.update(&at(0.0)), None);
        assert_eq!(nav.current(), None);
        assert!(nav.nav().is_empty());
    }

    #[test]
    fn nav_entries_scroll_above_heading() {
        let nav = three();
        assert_eq!(
            nav.nav()[1],
            NavEntry {
                class: "tag-H2".into(),
                label: "Usage".into(),
                target: ScrollTarget {
                    top: 186.0,
                    duration_ms: 200
                },
            }
        );
    }

    #[test]
    fn reindex_keeps_highlight_and_reports_moves() {
        let mut nav = three();
        nav.update(&at(210.0));

        let shifted = ScrollSectionHighlighter::build(
            [
                Heading::new(1, "Intro", 0.0),
                Heading::new(2, "Usage", 200.0),
                Heading::new(2, "Limits", 500.0),
            ],
            &SectionConfig::default(),
        );
        assert_eq!(nav.reindex(shifted, &at(210.0)), None);
        assert_eq!(nav.current(), Some(1));

        let inserted = ScrollSectionHighlighter::build(
            [
                Heading::new(1, "Intro", 0.0),
                Heading::new(2, "New", 100.0),
                Heading::new(2, "Usage", 200.0),
            ],
            &SectionConfig::default(),
        );
        assert_eq!(
            nav.reindex(inserted, &at(210.0)),
            Some(HighlightChange {
                previous: Some(1),
                current: 2
            })
        );
    }

    #[test]
    fn reindex_to_empty_clears_highlight() {
        let mut nav = three();
        nav.update(&at(0.0));
        let empty = ScrollSectionHighlighter::build([], &SectionConfig::default());
        assert_eq!(nav.reindex(empty, &at(0.0)), None);
        assert_eq!(nav.current(), None);
    }

    #[test]
    fn unmeasured_viewport_highlights_first_entry() {
        let mut nav = three();
        assert_eq!(nav.index_for(&Viewport::default()), Some(0));
        nav.update(&Viewport::default());
        assert_eq!(nav.current(), Some(0));
    }

    #[tracing_test::traced_test]
    #[test]
    fn from_element_reads_headings_in_document_order() {
        let page = wiki_page("wiki", &[(1, " Intro ", 0.0), (3, "Deep", 120.0)])
            .with_child(ElementNode::new("h2").with_text("Unplaced"))
            .with_child(ElementNode::new("h6").with_offset_top(50.0));
        let nav = ScrollSectionHighlighter::from_element(&page, &SectionConfig::default());
        let labels: Vec<_> = nav.entries().iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, vec!["Intro", "Deep"]);
        assert_eq!(nav.nav()[1].class, "tag-H3");
        assert!(logs_contain("heading has no layout offset"));
    }
}
