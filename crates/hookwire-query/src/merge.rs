//! Combining the current query state with edits.

use hookwire_core::MergePolicy;

use crate::state::QueryState;

/// Shallow merge of top-level fields.
///
/// Fields only present in `updates` are appended after the fields of
/// `current`. On a collision, [`MergePolicy::UpdatesWin`] takes the
/// incoming value (keeping the field's position) and
/// [`MergePolicy::CurrentWins`] keeps the existing one. Nested maps are
/// replaced whole, never merged key by key.
#[must_use]
pub fn merge(current: &QueryState, updates: &QueryState, policy: MergePolicy) -> QueryState {
    let mut next = current.clone();
    for (name, value) in updates {
        match policy {
            MergePolicy::UpdatesWin => {
                next.insert(name.clone(), value.clone());
            }
            MergePolicy::CurrentWins if next.contains(name) => {}
            MergePolicy::CurrentWins => {
                next.insert(name.clone(), value.clone());
            }
        }
    }
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::serialize;
    use crate::state::QueryValue;
    use pretty_assertions::assert_eq;

    fn current() -> QueryState {
        QueryState::new()
            .with("page", "3")
            .with("columns", QueryValue::list(["name"]))
    }

    fn updates() -> QueryState {
        QueryState::new()
            .with("columns", QueryValue::list(["name", "email"]))
            .with("sort", "email")
    }

    #[test]
    fn updates_win_replaces_in_place() {
        let next = merge(&current(), &updates(), MergePolicy::UpdatesWin);
        assert_eq!(
            serialize(&next),
            "page=3&columns[]=name&columns[]=email&sort=email"
        );
    }

    #[test]
    fn current_wins_only_adds_new_fields() {
        let next = merge(&current(), &updates(), MergePolicy::CurrentWins);
        assert_eq!(serialize(&next), "page=3&columns[]=name&sort=email");
    }

    #[test]
    fn default_policy_is_updates_win() {
        let next = merge(&current(), &updates(), MergePolicy::default());
        assert_eq!(
            next.get("columns"),
            Some(&QueryValue::list(["name", "email"]))
        );
    }

    #[test]
    fn nested_maps_are_replaced_whole() {
        let current = QueryState::new().with(
            "filters",
            QueryState::new().with("status", "open").with("kind", "bug"),
        );
        let updates =
            QueryState::new().with("filters", QueryState::new().with("status", "closed"));
        let next = merge(&current, &updates, MergePolicy::UpdatesWin);
        assert_eq!(serialize(&next), "filters[status]=closed");
    }

    #[test]
    fn merging_empty_is_identity() {
        let next = merge(&current(), &QueryState::new(), MergePolicy::UpdatesWin);
        assert_eq!(next, current());
    }
}
