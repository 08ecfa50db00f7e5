//! Immutable snapshots of host-rendered markup.
//!
//! The host adapter converts the live element a lifecycle hook fired for
//! into an [`ElementNode`] tree. Everything in hookwire reads from these
//! snapshots; nothing writes back into them. Outbound effects are returned
//! as plain values for the host to apply.
//!
//! # Invariants
//!
//! 1. Tag names are stored lowercase.
//! 2. Attribute order is insertion order; setting an existing attribute
//!    replaces its value in place.
//! 3. [`ElementNode::descendants`] walks in document order (pre-order,
//!    depth-first) and never yields the node itself.

use std::fmt;

/// One element of a markup snapshot.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ElementNode {
    tag: String,
    attrs: Vec<(String, String)>,
    text: String,
    children: Vec<ElementNode>,
    offset_top: Option<f64>,
}

impl ElementNode {
    /// Create an element with the given tag name.
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into().to_ascii_lowercase(),
            ..Self::default()
        }
    }

    /// Set an attribute, replacing any existing value.
    #[must_use]
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        let value = value.into();
        match self.attrs.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.attrs.push((name, value)),
        }
        self
    }

    /// Append a class to the `class` attribute.
    #[must_use]
    pub fn with_class(self, class: &str) -> Self {
        let joined = match self.attr("class") {
            Some(existing) if !existing.is_empty() => format!("{existing} {class}"),
            _ => class.to_owned(),
        };
        self.with_attr("class", joined)
    }

    /// Set the element's own text (not including children).
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    #[must_use]
    pub fn with_child(mut self, child: ElementNode) -> Self {
        self.children.push(child);
        self
    }

    #[must_use]
    pub fn with_children(mut self, children: impl IntoIterator<Item = ElementNode>) -> Self {
        self.children.extend(children);
        self
    }

    /// Record the element's layout offset from the top of the document.
    #[must_use]
    pub fn with_offset_top(mut self, offset: f64) -> Self {
        self.offset_top = Some(offset);
        self
    }

    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Look up an attribute value.
    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    #[must_use]
    pub fn has_attr(&self, name: &str) -> bool {
        self.attrs.iter().any(|(n, _)| n == name)
    }

    /// First non-empty value among `names`, in order.
    #[must_use]
    pub fn first_attr(&self, names: &[&str]) -> Option<&str> {
        names
            .iter()
            .filter_map(|name| self.attr(name))
            .find(|value| !value.is_empty())
    }

    /// Whitespace-separated entries of the `class` attribute.
    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.attr("class").unwrap_or_default().split_whitespace()
    }

    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.classes().any(|c| c == class)
    }

    /// Checkbox state as rendered (`checked` attribute present).
    #[must_use]
    pub fn is_checked(&self) -> bool {
        self.has_attr("checked")
    }

    #[must_use]
    pub fn offset_top(&self) -> Option<f64> {
        self.offset_top
    }

    #[must_use]
    pub fn children(&self) -> &[ElementNode] {
        &self.children
    }

    /// Own text followed by the text of every descendant, in document order.
    #[must_use]
    pub fn text_content(&self) -> String {
        let mut out = self.text.clone();
        for node in self.descendants() {
            out.push_str(&node.text);
        }
        out
    }

    /// Pre-order walk of every descendant (excluding `self`).
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants {
            stack: self.children.iter().rev().collect(),
        }
    }

    /// All descendants matching `pred`, in document order.
    pub fn find_all(&self, pred: impl Fn(&ElementNode) -> bool) -> Vec<&ElementNode> {
        self.descendants().filter(|node| pred(node)).collect()
    }

    /// First descendant matching `pred`.
    pub fn find_first(&self, pred: impl Fn(&ElementNode) -> bool) -> Option<&ElementNode> {
        self.descendants().find(|node| pred(node))
    }
}

impl fmt::Display for ElementNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}", self.tag)?;
        if let Some(id) = self.attr("id") {
            write!(f, " id=\"{id}\"")?;
        }
        write!(f, ">")
    }
}

/// Pre-order iterator returned by [`ElementNode::descendants`].
#[derive(Debug)]
pub struct Descendants<'a> {
    stack: Vec<&'a ElementNode>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a ElementNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

/// Window measurements supplied by the host on mount and on every scroll.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Viewport {
    /// Vertical scroll position (`window.pageYOffset`).
    pub scroll_y: f64,
    /// Height of the visible area (`window.innerHeight`).
    pub inner_height: f64,
    /// Full document height (`document.body.scrollHeight`).
    pub scroll_height: f64,
}

impl Viewport {
    #[must_use]
    pub const fn new(scroll_y: f64, inner_height: f64, scroll_height: f64) -> Self {
        Self {
            scroll_y,
            inner_height,
            scroll_height,
        }
    }

    /// Whether the host has reported a real document height yet.
    #[must_use]
    pub fn is_measured(&self) -> bool {
        self.scroll_height > 0.0
    }

    /// Whether the bottom edge of the viewport has reached the document end.
    ///
    /// An unmeasured viewport (the default) is never at the bottom.
    #[must_use]
    pub fn is_at_bottom(&self) -> bool {
        self.is_measured() && self.inner_height + self.scroll_y >= self.scroll_height
    }
}
