//! Leaving the page with a new query string.

use hookwire_core::{MergePolicy, Navigator, QueryConfig};

use crate::codec::{parse, serialize};
use crate::merge::merge;
use crate::state::QueryState;

/// Replace the location's query string and reload.
///
/// Returns the href handed to the navigator.
pub fn navigate(navigator: &mut dyn Navigator, next_query: &str) -> String {
    let href = navigator.location().href_with_query(next_query);
    tracing::debug!(href = %href, "navigating with new query state");
    navigator.assign(&href);
    href
}

/// Merge `updates` into the current location's query state and reload.
///
/// `policy` is a [`MergePolicy`] or a [`QueryConfig`] carrying one.
pub fn update_query(
    navigator: &mut dyn Navigator,
    updates: &QueryState,
    policy: impl Into<MergePolicy>,
) -> String {
    let current = parse(&navigator.location().search);
    let next = merge(&current, updates, policy.into());
    navigate(navigator, &serialize(&next))
}
