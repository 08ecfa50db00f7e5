//! Charts drawn by an external charting library.
//!
//! Two payload attributes are read on `updated`:
//!
//! | Attribute | Payload | Applied as |
//! |-----------|---------|------------|
//! | `chart-updates` | [`OptionsDiff`] | `update_options(diff)` |
//! | `chart-data` | [`SeriesData`] | `set_data(rows)` then `redraw()` |
//!
//! Only attributes present on the element are applied, so a chart that
//! uses one flavour never sees the other wiped.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use hookwire_core::{AttributeNames, ElementNode, channel};

use crate::bridge::{HookOutcome, LifecycleHook, PageContext, SkipReason, live_instance};
use crate::handle::WidgetHandle;
use crate::kind::WidgetKind;
use crate::registry::{InstanceHandle, WidgetInstance};

/// Partial chart options to merge into the live chart.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OptionsDiff(pub Map<String, Value>);

/// Replacement data rows for the chart.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SeriesData(pub Vec<Map<String, Value>>);

#[derive(Debug, Clone, Copy, Default)]
pub struct ChartHook;

impl LifecycleHook for ChartHook {
    fn kind(&self) -> WidgetKind {
        WidgetKind::Chart
    }

    fn instance_id(&self, page: &PageContext, element: &ElementNode) -> Option<String> {
        let attrs = &page.config().attributes;
        element
            .first_attr(&[attrs.chart_id.as_str(), attrs.socket_id.as_str()])
            .map(str::to_owned)
    }

    fn mounted(&self, page: &mut PageContext, element: &ElementNode) -> HookOutcome {
        let Some(id) = self.instance_id(page, element) else {
            return HookOutcome::Skipped(SkipReason::MissingId);
        };
        // Charts declared by inline page scripts are registered before mount.
        if let Some(existing) = page.registry_mut().get_mut(&id) {
            if existing.kind != WidgetKind::Chart {
                return HookOutcome::Skipped(SkipReason::KindMismatch);
            }
            if let Some(handle) = existing.library_mut() {
                handle.render();
            }
            return HookOutcome::Mounted { id };
        }
        let Some(mut handle) = page.factory_mut().create_chart(&id, element) else {
            return HookOutcome::Skipped(SkipReason::NoFactory);
        };
        handle.render();
        page.registry_mut().register(WidgetInstance::new(
            WidgetKind::Chart,
            id.clone(),
            InstanceHandle::Library(handle),
        ));
        HookOutcome::Mounted { id }
    }

    fn updated(&self, page: &mut PageContext, element: &ElementNode) -> HookOutcome {
        let Some(id) = self.instance_id(page, element) else {
            return HookOutcome::Skipped(SkipReason::MissingId);
        };
        let attrs = page.config().attributes.clone();
        let result = live_instance(page, &id, WidgetKind::Chart)
            .and_then(|inst| apply_payloads(inst, element, &attrs));
        match result {
            Ok(()) => HookOutcome::Updated { id },
            Err(reason) => HookOutcome::Skipped(reason),
        }
    }
}

/// Apply every payload attribute present on `element`.
///
/// Fails only when at least one payload was present and none decoded.
fn apply_payloads(
    inst: &mut WidgetInstance,
    element: &ElementNode,
    attrs: &AttributeNames,
) -> Result<(), SkipReason> {
    let WidgetInstance {
        handle, last_data, ..
    } = inst;
    let InstanceHandle::Library(handle) = handle else {
        return Err(SkipReason::KindMismatch);
    };
    let mut applied = false;
    let mut rejected = false;

    if element.has_attr(&attrs.chart_updates) {
        let mut diff = OptionsDiff::default();
        if channel::decode_or_keep(element, &attrs.chart_updates, &mut diff) {
            handle.update_options(&diff.0);
            remember(last_data, &attrs.chart_updates, Value::Object(diff.0));
            applied = true;
        } else {
            rejected = true;
        }
    }

    if element.has_attr(&attrs.chart_data) {
        let mut series = SeriesData::default();
        if channel::decode_or_keep(element, &attrs.chart_data, &mut series) {
            replace_series(&mut **handle, &series);
            let rows = series.0.into_iter().map(Value::Object).collect();
            remember(last_data, &attrs.chart_data, Value::Array(rows));
            applied = true;
        } else {
            rejected = true;
        }
    }

    if rejected && !applied {
        return Err(SkipReason::PayloadRejected);
    }
    Ok(())
}

fn replace_series(handle: &mut dyn WidgetHandle, series: &SeriesData) {
    handle.set_data(&series.0);
    handle.redraw();
}

/// Record `payload` under `attr` in the instance's last good data.
fn remember(last_data: &mut Option<Value>, attr: &str, payload: Value) {
    let slot = last_data.get_or_insert_with(|| Value::Object(Map::new()));
    if let Value::Object(map) = slot {
        map.insert(attr.to_owned(), payload);
    }
}
