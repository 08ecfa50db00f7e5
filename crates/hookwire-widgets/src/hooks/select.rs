//! Enhanced `<select>` elements.

use serde_json::{Map, Value};

use hookwire_core::ElementNode;

use crate::bridge::{HookOutcome, LifecycleHook, PageContext, SkipReason, live_instance};
use crate::kind::WidgetKind;
use crate::registry::{InstanceHandle, WidgetInstance};
use crate::select::{ENHANCED_CLASS, SelectOptions, changed_fields};

#[derive(Debug, Clone, Copy, Default)]
pub struct SelectHook;

impl LifecycleHook for SelectHook {
    fn kind(&self) -> WidgetKind {
        WidgetKind::EnhancedSelect
    }

    fn instance_id(&self, _page: &PageContext, element: &ElementNode) -> Option<String> {
        element.first_attr(&["id", "name"]).map(str::to_owned)
    }

    fn mounted(&self, page: &mut PageContext, element: &ElementNode) -> HookOutcome {
        if !element.has_class(ENHANCED_CLASS) {
            return HookOutcome::Skipped(SkipReason::NotManaged);
        }
        let Some(id) = self.instance_id(page, element) else {
            return HookOutcome::Skipped(SkipReason::MissingId);
        };
        let options = SelectOptions::from_element(element, &page.config().attributes.placeholder);
        let Some(mut handle) = page.factory_mut().create_select(&id, &options) else {
            return HookOutcome::Skipped(SkipReason::NoFactory);
        };
        handle.render();
        let instance = WidgetInstance::new(
            WidgetKind::EnhancedSelect,
            id.clone(),
            InstanceHandle::Library(handle),
        )
        .with_last_data(Value::Object(options.to_json()));
        page.registry_mut().register(instance);
        HookOutcome::Mounted { id }
    }

    /// Push only the options whose derived value changed.
    fn updated(&self, page: &mut PageContext, element: &ElementNode) -> HookOutcome {
        let Some(id) = self.instance_id(page, element) else {
            return HookOutcome::Skipped(SkipReason::MissingId);
        };
        let next = SelectOptions::from_element(element, &page.config().attributes.placeholder)
            .to_json();
        let inst = match live_instance(page, &id, WidgetKind::EnhancedSelect) {
            Ok(inst) => inst,
            Err(reason) => return HookOutcome::Skipped(reason),
        };
        let prev = match &inst.last_data {
            Some(Value::Object(map)) => map.clone(),
            _ => Map::new(),
        };
        let diff = changed_fields(&prev, &next);
        if !diff.is_empty() {
            if let Some(handle) = inst.library_mut() {
                handle.update_options(&diff);
            }
        }
        inst.last_data = Some(Value::Object(next));
        HookOutcome::Updated { id }
    }
}
