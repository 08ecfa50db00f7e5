//! Data tables with bulk row selection.

use hookwire_core::ElementNode;

use crate::bridge::{HookOutcome, LifecycleHook, PageContext, SkipReason, live_instance};
use crate::bulk::BulkSelectionController;
use crate::kind::WidgetKind;
use crate::registry::{InstanceHandle, WidgetInstance};

#[derive(Debug, Clone, Copy, Default)]
pub struct TableHook;

impl LifecycleHook for TableHook {
    fn kind(&self) -> WidgetKind {
        WidgetKind::Table
    }

    /// The hooked container's id, else the id of the table inside it.
    fn instance_id(&self, _page: &PageContext, element: &ElementNode) -> Option<String> {
        element
            .attr("id")
            .filter(|id| !id.is_empty())
            .or_else(|| {
                element
                    .find_first(|n| n.tag() == "table")?
                    .attr("id")
                    .filter(|id| !id.is_empty())
            })
            .map(str::to_owned)
    }

    fn mounted(&self, page: &mut PageContext, element: &ElementNode) -> HookOutcome {
        let Some(id) = self.instance_id(page, element) else {
            return HookOutcome::Skipped(SkipReason::MissingId);
        };
        let controller = BulkSelectionController::from_element(
            element,
            page.config().bulk.clone(),
            page.labels(),
            page.config().locale.clone(),
        );
        page.registry_mut().register(WidgetInstance::new(
            WidgetKind::Table,
            id.clone(),
            InstanceHandle::Table(controller),
        ));
        HookOutcome::Mounted { id }
    }

    /// Reconcile the selection against the patched rows.
    fn updated(&self, page: &mut PageContext, element: &ElementNode) -> HookOutcome {
        let Some(id) = self.instance_id(page, element) else {
            return HookOutcome::Skipped(SkipReason::MissingId);
        };
        match live_instance(page, &id, WidgetKind::Table).map(WidgetInstance::table_mut) {
            Ok(Some(controller)) => {
                controller.reconcile(element);
                HookOutcome::Updated { id }
            }
            Ok(None) => HookOutcome::Skipped(SkipReason::KindMismatch),
            Err(reason) => HookOutcome::Skipped(reason),
        }
    }
}
