//! Bulk row selection for one data table.
//!
//! The controller owns the table's [`SelectionSet`](BulkSelectionController::selected_ids)
//! and turns every edit into a [`BulkView`]: the derived summary, the
//! summary button, and the hidden form mirror the host writes back into
//! the page.
//!
//! # Invariants
//!
//! 1. The selection is always a subset of the rendered row ids.
//! 2. Select-all is an absolute set: checked selects every row, unchecked
//!    clears every row, whatever the prior per-row state.
//! 3. The form mirror carries exactly the current selection, in row order.
//! 4. At most one extra-field group is visible; none without an action.
//!
//! # Failure Modes
//!
//! | Condition | Behavior |
//! |-----------|----------|
//! | edit for an id that is not rendered | ignored, logged at `debug` |
//! | duplicate row id in markup | first occurrence kept |
//! | row without a `value` | not selectable |
//! | change from a select not named `action_field` | ignored, logged at `debug` |

use std::rc::Rc;

use ahash::AHashSet;

use hookwire_core::{BulkConfig, ElementNode};
use hookwire_i18n::{LabelCatalog, keys};

/// Class of each row checkbox.
pub const ROW_CHECKBOX_CLASS: &str = "select-row";
/// Class of the header select-all checkbox.
pub const SELECT_ALL_CLASS: &str = "select-all-rows";

/// Three-valued summary of `checked` against `total`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SelectionSummary {
    None,
    Partial,
    All,
}

impl SelectionSummary {
    #[must_use]
    pub fn of(checked: usize, total: usize) -> Self {
        match checked {
            0 => Self::None,
            n if n >= total => Self::All,
            _ => Self::Partial,
        }
    }
}

/// State of the "Bulk Actions" button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryButton {
    pub active: bool,
    pub label: String,
}

/// Button state for `count` selected rows.
///
/// A pure function of the count: zero is inactive with the bare label,
/// anything else is active with the count in parentheses.
#[must_use]
pub fn summary_button(count: usize, labels: &LabelCatalog, locale: &str) -> SummaryButton {
    if count == 0 {
        return SummaryButton {
            active: false,
            label: labels
                .text(locale, keys::BULK_BUTTON)
                .unwrap_or("Bulk Actions")
                .to_owned(),
        };
    }
    let label = labels
        .plural(locale, keys::BULK_BUTTON_COUNT, count as u64)
        .unwrap_or_else(|| format!("Bulk Actions ({count})"));
    SummaryButton {
        active: true,
        label,
    }
}

/// Where a row click landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    /// Bare cell background.
    Background,
    /// The row's own checkbox; its change event already toggled the row.
    Checkbox,
    /// A link, button or other control inside the row.
    Interactive,
}

impl ClickTarget {
    /// Classify the tag name of the click target.
    #[must_use]
    pub fn from_tag(tag: &str) -> Self {
        if tag.eq_ignore_ascii_case("td") {
            Self::Background
        } else if tag.eq_ignore_ascii_case("input") {
            Self::Checkbox
        } else {
            Self::Interactive
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HiddenField {
    pub name: String,
    pub value: String,
}

/// Contents of the bulk form's mirror container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormMirror {
    /// Human-readable count, e.g. `"3 Records Selected"`.
    pub count_text: String,
    pub fields: Vec<HiddenField>,
}

/// Everything the host needs to repaint after a selection edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulkView {
    pub summary: SelectionSummary,
    /// Checked state of every rendered row, in row order.
    pub rows: Vec<(String, bool)>,
    pub button: SummaryButton,
    pub mirror: FormMirror,
}

impl BulkView {
    /// Select-all checkbox state.
    #[must_use]
    pub fn select_all_checked(&self) -> bool {
        self.summary == SelectionSummary::All
    }
}

/// Selection state machine for one table scope.
#[derive(Debug, Clone)]
pub struct BulkSelectionController {
    rows: Vec<String>,
    selected: AHashSet<String>,
    action: Option<String>,
    config: BulkConfig,
    labels: Rc<LabelCatalog>,
    locale: String,
}

impl BulkSelectionController {
    /// Controller over `rows` with nothing selected.
    pub fn new(
        rows: impl IntoIterator<Item = String>,
        config: BulkConfig,
        labels: Rc<LabelCatalog>,
        locale: impl Into<String>,
    ) -> Self {
        let mut seen = AHashSet::new();
        let rows = rows
            .into_iter()
            .filter(|id| seen.insert(id.clone()))
            .collect();
        Self {
            rows,
            selected: AHashSet::new(),
            action: None,
            config,
            labels,
            locale: locale.into(),
        }
    }

    /// Controller seeded from table markup: rows and their checked state.
    #[must_use]
    pub fn from_element(
        element: &ElementNode,
        config: BulkConfig,
        labels: Rc<LabelCatalog>,
        locale: impl Into<String>,
    ) -> Self {
        let (rows, checked) = scan_rows(element);
        let mut controller = Self::new(rows, config, labels, locale);
        let selected = checked
            .into_iter()
            .filter(|id| controller.is_rendered(id))
            .collect();
        controller.selected = selected;
        controller.action = action_select(element, &controller.config.action_field)
            .and_then(chosen_action);
        controller
    }

    fn is_rendered(&self, id: &str) -> bool {
        self.rows.iter().any(|row| row == id)
    }

    #[must_use]
    pub fn total_count(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn checked_count(&self) -> usize {
        self.selected.len()
    }

    #[must_use]
    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.contains(id)
    }

    /// Selected ids in row order.
    #[must_use]
    pub fn selected_ids(&self) -> Vec<&str> {
        self.rows
            .iter()
            .filter(|id| self.selected.contains(id.as_str()))
            .map(String::as_str)
            .collect()
    }

    #[must_use]
    pub fn summary(&self) -> SelectionSummary {
        SelectionSummary::of(self.checked_count(), self.total_count())
    }

    /// Select-all checkbox changed.
    pub fn set_all(&mut self, checked: bool) -> BulkView {
        if checked {
            self.selected = self.rows.iter().cloned().collect();
        } else {
            self.selected.clear();
        }
        self.view()
    }

    /// A row checkbox changed.
    pub fn set_row(&mut self, id: &str, checked: bool) -> BulkView {
        if !self.is_rendered(id) {
            tracing::debug!(row = id, "ignoring edit for row that is not rendered");
        } else if checked {
            self.selected.insert(id.to_owned());
        } else {
            self.selected.remove(id);
        }
        self.view()
    }

    /// A click somewhere in a row.
    ///
    /// Only background clicks toggle; a checkbox click already changed the
    /// row and interactive children handle their own clicks.
    pub fn row_clicked(&mut self, id: &str, target: ClickTarget) -> BulkView {
        if target == ClickTarget::Background {
            let checked = !self.is_selected(id);
            return self.set_row(id, checked);
        }
        self.view()
    }

    /// Re-read rows after the host patched the table.
    ///
    /// Rows that disappeared leave the selection; rows the markup marks
    /// checked join it.
    pub fn reconcile(&mut self, element: &ElementNode) -> BulkView {
        let (rows, checked) = scan_rows(element);
        let mut seen = AHashSet::new();
        self.rows = rows.into_iter().filter(|id| seen.insert(id.clone())).collect();
        let before = self.selected.len();
        self.selected.retain(|id| seen.contains(id));
        if self.selected.len() < before {
            tracing::debug!(dropped = before - self.selected.len(), "pruned stale selection");
        }
        self.selected
            .extend(checked.into_iter().filter(|id| seen.contains(id)));
        if let Some(select) = action_select(element, &self.config.action_field) {
            self.action = chosen_action(select);
        }
        self.view()
    }

    /// Bulk action select changed; `None` or `""` clears it.
    ///
    /// Returns the class of the one extra-field group to show.
    pub fn select_action(&mut self, action: Option<&str>) -> Option<String> {
        self.action = action.filter(|a| !a.is_empty()).map(str::to_owned);
        self.visible_extra_group()
    }

    /// A select in the table changed.
    ///
    /// Only the select named by [`BulkConfig::action_field`] drives the
    /// action; any other select leaves it untouched.
    pub fn action_changed(&mut self, select: &ElementNode) -> Option<String> {
        if select.attr("name") == Some(self.config.action_field.as_str()) {
            self.action = chosen_action(select);
        } else {
            tracing::debug!(element = %select, "select is not the bulk action; ignored");
        }
        self.visible_extra_group()
    }

    #[must_use]
    pub fn action(&self) -> Option<&str> {
        self.action.as_deref()
    }

    #[must_use]
    pub fn visible_extra_group(&self) -> Option<String> {
        self.action
            .as_ref()
            .map(|action| format!("{}{action}", self.config.extra_field_prefix))
    }

    /// Visibility of each extra-field group class, in the given order.
    pub fn extra_group_visibility<'a>(
        &self,
        groups: impl IntoIterator<Item = &'a str>,
    ) -> Vec<(&'a str, bool)> {
        let visible = self.visible_extra_group();
        groups
            .into_iter()
            .map(|group| (group, visible.as_deref() == Some(group)))
            .collect()
    }

    #[must_use]
    pub fn form_mirror(&self) -> FormMirror {
        let count = self.checked_count();
        let count_text = self
            .labels
            .plural(&self.locale, keys::BULK_SELECTED, count as u64)
            .unwrap_or_else(|| format!("{count} Records Selected"));
        let fields = self
            .selected_ids()
            .into_iter()
            .map(|id| HiddenField {
                name: self.config.mirror_field.clone(),
                value: id.to_owned(),
            })
            .collect();
        FormMirror { count_text, fields }
    }

    #[must_use]
    pub fn view(&self) -> BulkView {
        BulkView {
            summary: self.summary(),
            rows: self
                .rows
                .iter()
                .map(|id| (id.clone(), self.selected.contains(id)))
                .collect(),
            button: summary_button(self.checked_count(), &self.labels, &self.locale),
            mirror: self.form_mirror(),
        }
    }
}

/// The bulk action `<select>` named `field`, if rendered.
fn action_select<'a>(element: &'a ElementNode, field: &str) -> Option<&'a ElementNode> {
    element.find_first(|n| n.tag() == "select" && n.attr("name") == Some(field))
}

/// Value of the selected option; a blank value means no action.
fn chosen_action(select: &ElementNode) -> Option<String> {
    select
        .find_first(|n| n.tag() == "option" && n.has_attr("selected"))
        .and_then(|option| option.attr("value"))
        .filter(|value| !value.is_empty())
        .map(str::to_owned)
}

/// Row ids in document order, plus the ids marked checked.
fn scan_rows(element: &ElementNode) -> (Vec<String>, Vec<String>) {
    let mut rows = Vec::new();
    let mut checked = Vec::new();
    for input in element.find_all(|n| n.has_class(ROW_CHECKBOX_CLASS)) {
        let Some(id) = input.attr("value").filter(|v| !v.is_empty()) else {
            continue;
        };
        rows.push(id.to_owned());
        if input.is_checked() {
            checked.push(id.to_owned());
        }
    }
    (rows, checked)
}
