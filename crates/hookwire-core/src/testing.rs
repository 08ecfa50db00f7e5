//! Fixtures for tests that drive hooks without a browser.

use crate::dom::ElementNode;
use crate::location::{Location, Navigator};

/// Navigator that records every assignment instead of reloading.
#[derive(Debug, Clone, Default)]
pub struct RecordingNavigator {
    current: Location,
    visits: Vec<String>,
}

impl RecordingNavigator {
    #[must_use]
    pub fn at(href: &str) -> Self {
        Self {
            current: Location::from_href(href),
            visits: Vec::new(),
        }
    }

    /// Every href assigned so far, oldest first.
    #[must_use]
    pub fn visits(&self) -> &[String] {
        &self.visits
    }

    #[must_use]
    pub fn last_visit(&self) -> Option<&str> {
        self.visits.last().map(String::as_str)
    }
}

impl Navigator for RecordingNavigator {
    fn location(&self) -> Location {
        self.current.clone()
    }

    fn assign(&mut self, href: &str) {
        self.current = Location::from_href(href);
        self.visits.push(href.to_owned());
    }
}

/// `<section>` holding a `table.data-table` with one checkbox per row,
/// the select-all checkbox, and the bulk actions button.
///
/// `rows` are `(id, checked)` pairs in render order.
#[must_use]
pub fn data_table(id: &str, rows: &[(&str, bool)]) -> ElementNode {
    let header = ElementNode::new("tr").with_child(
        ElementNode::new("th").with_child(
            ElementNode::new("input")
                .with_attr("type", "checkbox")
                .with_class("select-all-rows"),
        ),
    );
    let body = rows.iter().map(|(row_id, checked)| {
        let mut input = ElementNode::new("input")
            .with_attr("type", "checkbox")
            .with_class("select-row")
            .with_attr("value", *row_id);
        if *checked {
            input = input.with_attr("checked", "");
        }
        ElementNode::new("tr").with_child(ElementNode::new("td").with_child(input))
    });
    let table = ElementNode::new("table")
        .with_attr("id", id)
        .with_class("data-table")
        .with_child(header)
        .with_children(body);
    ElementNode::new("section")
        .with_child(
            ElementNode::new("button")
                .with_class("bulk-actions-button")
                .with_text("Bulk Actions"),
        )
        .with_child(table)
}

/// Page container with headings at the given layout offsets.
///
/// `headings` are `(level, label, offset_top)` triples in document order.
#[must_use]
pub fn wiki_page(id: &str, headings: &[(u8, &str, f64)]) -> ElementNode {
    let body = headings.iter().map(|(level, label, offset)| {
        ElementNode::new(format!("h{level}"))
            .with_text(*label)
            .with_offset_top(*offset)
    });
    ElementNode::new("div")
        .with_attr("id", id)
        .with_child(ElementNode::new("article").with_children(body))
}
