//! End-to-end flows through the facade: host lifecycle calls in, widget
//! calls and navigations out.

#![cfg(all(feature = "query", feature = "widgets"))]

use hookwire::core::channel::{decode_value, encode};
use hookwire::core::testing::{RecordingNavigator, data_table, wiki_page};
use hookwire::prelude::*;
use hookwire::query::{apply_filter_change, try_parse};
use hookwire::widgets::testing::{Call, RecordingFactory, RecordingWidget};
use hookwire::widgets::{SelectionSummary, SkipReason};
use pretty_assertions::assert_eq;
use serde_json::json;

fn chart(id: &str) -> ElementNode {
    ElementNode::new("div").with_attr("chart-id", id)
}

#[test]
fn replaced_instance_receives_no_updates() {
    let hooks = HookTable::with_defaults();
    let mut page = PageContext::default();
    let (first, first_log) = RecordingWidget::new();
    let (second, second_log) = RecordingWidget::new();
    page.register_handle(WidgetKind::Chart, "c1", Box::new(first));
    let displaced = page.register_handle(WidgetKind::Chart, "c1", Box::new(second));
    assert!(displaced.is_some());
    drop(displaced);

    let el = chart("c1").with_attr("chart-updates", encode(&json!({"stroke": "smooth"})));
    assert_eq!(
        hooks.dispatch(WidgetKind::Chart, Lifecycle::Updated, &mut page, &el),
        HookOutcome::Updated { id: "c1".into() }
    );
    assert!(first_log.borrow().is_empty());
    assert_eq!(second_log.borrow().len(), 1);
}

#[test]
fn updated_without_mount_leaves_registry_unchanged() {
    let hooks = HookTable::with_defaults();
    let factory = RecordingFactory::new();
    let mut page = PageContext::default().with_factory(Box::new(factory.clone()));
    let elements = [
        (WidgetKind::Chart, chart("c9").with_attr("chart-data", "[]")),
        (
            WidgetKind::EnhancedSelect,
            ElementNode::new("select")
                .with_attr("id", "s9")
                .with_attr("class", "enhanced"),
        ),
        (WidgetKind::Table, data_table("t9", &[("1", true)])),
        (WidgetKind::SectionNav, wiki_page("w9", &[(2, "A", 0.0)])),
    ];
    for (kind, el) in &elements {
        assert_eq!(
            hooks.dispatch(*kind, Lifecycle::Updated, &mut page, el),
            HookOutcome::Skipped(SkipReason::NotMounted)
        );
    }
    assert!(page.registry().is_empty());
    assert!(factory.built().is_empty());
}

#[test]
fn chart_lifecycle_by_markup_hook_name() {
    let hooks = HookTable::with_defaults();
    let factory = RecordingFactory::new();
    let mut page = PageContext::default().with_factory(Box::new(factory.clone()));
    let el = ElementNode::new("div").with_attr("phx-socket-id", "phx-F1");

    hooks.dispatch_name("ApexChart", Lifecycle::Mounted, &mut page, &el);
    let patched = el.clone().with_attr("chart-updates", r#"{"series": [1, 2]}"#);
    hooks.dispatch_name("ApexChart", Lifecycle::Updated, &mut page, &patched);
    hooks.dispatch_name("ApexChart", Lifecycle::Removed, &mut page, &patched);

    let log = factory.log_for("phx-F1").expect("chart built on mount");
    assert_eq!(log.borrow().first(), Some(&Call::Render));
    assert_eq!(log.borrow().len(), 2);
    assert!(!page.registry().contains("phx-F1"));

    // Evicted: later patches are no-ops.
    assert_eq!(
        hooks.dispatch_name("ApexChart", Lifecycle::Updated, &mut page, &patched),
        HookOutcome::Skipped(SkipReason::NotMounted)
    );
    assert_eq!(log.borrow().len(), 2);
}

#[test]
fn bulk_button_and_select_all_over_ten_rows() {
    let hooks = HookTable::with_defaults();
    let mut page = PageContext::default();
    let ids: Vec<String> = (1..=10).map(|n| n.to_string()).collect();
    let rows: Vec<(&str, bool)> = ids.iter().map(|id| (id.as_str(), false)).collect();
    hooks.dispatch(
        WidgetKind::Table,
        Lifecycle::Mounted,
        &mut page,
        &data_table("users", &rows),
    );
    let table = page.table_mut("users").expect("mounted");

    let view = table.view();
    assert!(!view.button.active);
    assert_eq!(view.button.label, "Bulk Actions");

    table.set_row("2", true);
    table.set_row("4", true);
    let view = table.row_clicked("9", ClickTarget::Background);
    assert!(view.button.active);
    assert_eq!(view.button.label, "Bulk Actions (3)");
    assert_eq!(view.summary, SelectionSummary::Partial);
    assert_eq!(view.mirror.count_text, "3 Records Selected");

    let view = table.set_all(true);
    assert_eq!(view.rows.iter().filter(|(_, on)| *on).count(), 10);
    assert_eq!(view.mirror.fields.len(), 10);

    let view = table.set_all(false);
    assert_eq!(view.rows.iter().filter(|(_, on)| *on).count(), 0);
    assert!(view.mirror.fields.is_empty());
}

#[test]
fn highlighter_follows_scroll() {
    let hooks = HookTable::with_defaults();
    let mut page = PageContext::default();
    page.set_viewport(Viewport::new(0.0, 400.0, 2000.0));
    let wiki = wiki_page("wiki", &[(1, "Intro", 0.0), (2, "Setup", 200.0), (2, "FAQ", 500.0)]);
    hooks.dispatch(WidgetKind::SectionNav, Lifecycle::Mounted, &mut page, &wiki);

    page.on_scroll(Viewport::new(210.0, 400.0, 2000.0));
    assert_eq!(page.section_nav("wiki").and_then(|n| n.current()), Some(1));

    page.on_scroll(Viewport::new(1600.0, 400.0, 2000.0));
    assert_eq!(page.section_nav("wiki").and_then(|n| n.current()), Some(2));
}

#[test]
fn filter_select_change_reloads_with_bracket_query() {
    let mut nav = RecordingNavigator::at("/tickets?page=2");
    let select = ElementNode::new("select")
        .with_attr("name", "status[]")
        .with_child(
            ElementNode::new("option")
                .with_attr("value", "open")
                .with_attr("selected", ""),
        )
        .with_child(
            ElementNode::new("option")
                .with_attr("value", "closed")
                .with_attr("selected", ""),
        )
        .with_child(ElementNode::new("option").with_attr("value", "spam"));

    let href = apply_filter_change(&mut nav, &select, MergePolicy::UpdatesWin);
    assert_eq!(
        href.as_deref(),
        Some("/tickets?page=2&filters[status][]=open&filters[status][]=closed")
    );
    let state = try_parse(&nav.location().search).expect("well-formed query");
    assert_eq!(
        state.get_path(&["filters", "status"]),
        Some(&QueryValue::list(["open", "closed"]))
    );
}

#[test]
fn current_wins_keeps_existing_fields() {
    let mut nav = RecordingNavigator::at("/users?sort=name");
    let updates = QueryState::new().with("sort", "email").with("page", "1");
    let href = update_query(&mut nav, &updates, MergePolicy::CurrentWins);
    assert_eq!(href, "/users?sort=name&page=1");
}

#[test]
fn page_config_selects_merge_policy() {
    let config = HookConfig::from_json_str(r#"{"query": {"merge_policy": "current-wins"}}"#)
        .expect("valid config");
    let page = PageContext::new(config);
    let mut nav = RecordingNavigator::at("/users?sort=name");
    let updates = QueryState::new().with("sort", "email");
    assert_eq!(
        update_query(&mut nav, &updates, &page.config().query),
        "/users?sort=name"
    );
}

#[test]
fn float_chart_rows_reach_the_widget_unchanged() {
    let hooks = HookTable::with_defaults();
    let mut page = PageContext::default();
    let (widget, log) = RecordingWidget::new();
    page.register_handle(WidgetKind::Chart, "c1", Box::new(widget));
    let y: f64 = 1.0715660391465826e-75;
    let el = chart("c1").with_attr("chart-data", encode(&json!([{"x": 0.1, "y": y}])));
    hooks.dispatch(WidgetKind::Chart, Lifecycle::Updated, &mut page, &el);
    let Some(Call::SetData(rows)) = log.borrow().first().cloned() else {
        panic!("expected set_data first");
    };
    assert_eq!(rows[0]["y"].as_f64().map(f64::to_bits), Some(y.to_bits()));
}

#[test]
fn data_channel_round_trip() {
    let payload = json!({"a": 1, "b": ["c", "d"]});
    assert_eq!(decode_value(Some(encode(&payload).as_str())).ok(), Some(payload));
}
