//! Filter and column edits coming from enhanced multi-selects.
//!
//! Both edits read the selection straight from the select snapshot, fold
//! it into the current location's query state, and reload.

use hookwire_core::{ElementNode, MergePolicy, Navigator};

use crate::codec::parse;
use crate::navigate::update_query;
use crate::state::{QueryState, QueryValue};

/// Query field written by the column chooser.
pub const COLUMNS_FIELD: &str = "columns";
/// Query map holding one list per filter field.
pub const FILTERS_FIELD: &str = "filters";

/// Filter field name of a multi-select: `status[]` → `status`.
#[must_use]
pub fn field_name(select_name: &str) -> String {
    select_name.replacen("[]", "", 1)
}

/// Values of the selected `<option>`s, in document order.
///
/// An option without a `value` attribute contributes its trimmed text.
#[must_use]
pub fn selected_values(select: &ElementNode) -> Vec<String> {
    select
        .find_all(|node| node.tag() == "option" && node.has_attr("selected"))
        .into_iter()
        .map(|option| match option.attr("value") {
            Some(value) => value.to_owned(),
            None => option.text_content().trim().to_owned(),
        })
        .collect()
}

/// `columns` update for the chosen column ids.
#[must_use]
pub fn column_update(columns: Vec<String>) -> QueryState {
    QueryState::new().with(COLUMNS_FIELD, QueryValue::List(columns))
}

/// Current state with `filters[field]` replaced by `values`.
///
/// Other filters are carried over so a shallow merge keeps them.
#[must_use]
pub fn filter_update(current: &QueryState, field: &str, values: Vec<String>) -> QueryState {
    let mut next = current.clone();
    next.set_path(&[FILTERS_FIELD, field], QueryValue::List(values));
    next
}

/// Column chooser changed: reload with the selected columns.
pub fn apply_column_change(
    navigator: &mut dyn Navigator,
    select: &ElementNode,
    policy: impl Into<MergePolicy>,
) -> String {
    let updates = column_update(selected_values(select));
    update_query(navigator, &updates, policy)
}

/// Filter multi-select changed: reload with its values under `filters`.
///
/// Returns `None` without navigating when the select has no usable name.
pub fn apply_filter_change(
    navigator: &mut dyn Navigator,
    select: &ElementNode,
    policy: impl Into<MergePolicy>,
) -> Option<String> {
    let field = field_name(select.attr("name").unwrap_or_default());
    if field.is_empty() {
        tracing::warn!(element = %select, "filter select has no name; ignoring change");
        return None;
    }
    let current = parse(&navigator.location().search);
    let updates = filter_update(&current, &field, selected_values(select));
    Some(update_query(navigator, &updates, policy))
}
