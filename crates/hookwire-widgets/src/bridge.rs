//! Lifecycle bridge between the host framework and the registry.
//!
//! The host calls [`HookTable::dispatch`] with the element it just
//! inserted, patched or removed. The table resolves the widget kind to its
//! [`LifecycleHook`] once, and the hook reads the element's payloads and
//! mutates the matching registry entry inside the [`PageContext`].
//!
//! # Failure Modes
//!
//! None of these are errors; each yields [`HookOutcome::Skipped`]:
//!
//! | Condition | Reason |
//! |-----------|--------|
//! | element has no id attribute | [`SkipReason::MissingId`] |
//! | `updated` / `removed` before `mounted` | [`SkipReason::NotMounted`] |
//! | id registered under another kind | [`SkipReason::KindMismatch`] |
//! | host cannot construct the widget | [`SkipReason::NoFactory`] |
//! | element lacks the opt-in marker | [`SkipReason::NotManaged`] |
//! | every payload failed to decode | [`SkipReason::PayloadRejected`] |
//! | unknown hook name | [`SkipReason::UnknownKind`] |

use std::fmt;
use std::rc::Rc;

use ahash::AHashMap;

use hookwire_core::{ElementNode, HookConfig, Viewport};
use hookwire_i18n::LabelCatalog;

use crate::bulk::BulkSelectionController;
use crate::handle::{NoFactory, WidgetFactory, WidgetHandle};
use crate::hooks::{ChartHook, SectionNavHook, SelectHook, TableHook};
use crate::kind::WidgetKind;
use crate::registry::{InstanceHandle, InstanceRegistry, WidgetInstance};
use crate::sections::{HighlightChange, ScrollSectionHighlighter};

/// Host lifecycle signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lifecycle {
    Mounted,
    Updated,
    Removed,
}

impl fmt::Display for Lifecycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Mounted => "mounted",
            Self::Updated => "updated",
            Self::Removed => "removed",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SkipReason {
    MissingId,
    NotMounted,
    KindMismatch,
    NoFactory,
    NotManaged,
    PayloadRejected,
    UnknownKind,
}

/// Result of one lifecycle callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HookOutcome {
    Mounted { id: String },
    Updated { id: String },
    Removed { id: String },
    Skipped(SkipReason),
}

impl HookOutcome {
    #[must_use]
    pub fn is_skipped(&self) -> bool {
        matches!(self, Self::Skipped(_))
    }
}

/// Page-lifetime state threaded through every lifecycle callback.
pub struct PageContext {
    registry: InstanceRegistry,
    config: HookConfig,
    labels: Rc<LabelCatalog>,
    viewport: Viewport,
    factory: Box<dyn WidgetFactory>,
    highlights: Vec<(String, HighlightChange)>,
}

impl fmt::Debug for PageContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PageContext")
            .field("registry", &self.registry)
            .field("config", &self.config)
            .field("viewport", &self.viewport)
            .field("highlights", &self.highlights)
            .finish_non_exhaustive()
    }
}

impl Default for PageContext {
    fn default() -> Self {
        Self::new(HookConfig::default())
    }
}

impl PageContext {
    /// Context with built-in labels and no widget factory.
    #[must_use]
    pub fn new(config: HookConfig) -> Self {
        Self {
            registry: InstanceRegistry::new(),
            config,
            labels: Rc::new(LabelCatalog::builtin()),
            viewport: Viewport::default(),
            factory: Box::new(NoFactory),
            highlights: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_factory(mut self, factory: Box<dyn WidgetFactory>) -> Self {
        self.factory = factory;
        self
    }

    #[must_use]
    pub fn with_labels(mut self, labels: LabelCatalog) -> Self {
        self.labels = Rc::new(labels);
        self
    }

    #[must_use]
    pub fn config(&self) -> &HookConfig {
        &self.config
    }

    #[must_use]
    pub fn labels(&self) -> Rc<LabelCatalog> {
        Rc::clone(&self.labels)
    }

    #[must_use]
    pub fn registry(&self) -> &InstanceRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut InstanceRegistry {
        &mut self.registry
    }

    pub fn factory_mut(&mut self) -> &mut dyn WidgetFactory {
        self.factory.as_mut()
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Register a library object created ahead of `mounted`, e.g. by an
    /// inline script in the server-rendered page.
    pub fn register_handle(
        &mut self,
        kind: WidgetKind,
        id: impl Into<String>,
        handle: Box<dyn WidgetHandle>,
    ) -> Option<WidgetInstance> {
        self.registry
            .register(WidgetInstance::new(kind, id, InstanceHandle::Library(handle)))
    }

    /// Scroll event: record the viewport and move every section highlight.
    ///
    /// Returns the transitions, keyed by instance id.
    pub fn on_scroll(&mut self, viewport: Viewport) -> Vec<(String, HighlightChange)> {
        self.viewport = viewport;
        self.registry
            .iter_mut()
            .filter_map(|inst| {
                let change = inst.section_nav_mut()?.update(&viewport)?;
                Some((inst.id.clone(), change))
            })
            .collect()
    }

    /// Highlight transitions made by `mounted` / `updated` since the last
    /// call, oldest first. Scroll transitions are returned by
    /// [`on_scroll`](Self::on_scroll) instead.
    pub fn take_highlight_changes(&mut self) -> Vec<(String, HighlightChange)> {
        std::mem::take(&mut self.highlights)
    }

    pub(crate) fn push_highlight(&mut self, id: &str, change: HighlightChange) {
        self.highlights.push((id.to_owned(), change));
    }

    #[must_use]
    pub fn table(&self, id: &str) -> Option<&BulkSelectionController> {
        self.registry.get(id)?.table()
    }

    pub fn table_mut(&mut self, id: &str) -> Option<&mut BulkSelectionController> {
        self.registry.get_mut(id)?.table_mut()
    }

    #[must_use]
    pub fn section_nav(&self, id: &str) -> Option<&ScrollSectionHighlighter> {
        self.registry.get(id)?.section_nav()
    }
}

/// Per-kind `mounted` / `updated` / `removed` contract.
///
/// `updated` must never construct an instance: with no registry entry it
/// returns [`SkipReason::NotMounted`].
pub trait LifecycleHook {
    fn kind(&self) -> WidgetKind;

    /// Registry id of `element`, if it carries one.
    fn instance_id(&self, page: &PageContext, element: &ElementNode) -> Option<String>;

    fn mounted(&self, page: &mut PageContext, element: &ElementNode) -> HookOutcome;

    fn updated(&self, page: &mut PageContext, element: &ElementNode) -> HookOutcome;

    /// Evict the element's entry. The evicted instance is dropped.
    fn removed(&self, page: &mut PageContext, element: &ElementNode) -> HookOutcome {
        let Some(id) = self.instance_id(page, element) else {
            return HookOutcome::Skipped(SkipReason::MissingId);
        };
        match page.registry().get(&id).map(|inst| inst.kind) {
            None => HookOutcome::Skipped(SkipReason::NotMounted),
            Some(kind) if kind != self.kind() => HookOutcome::Skipped(SkipReason::KindMismatch),
            Some(_) => {
                page.registry_mut().evict(&id);
                HookOutcome::Removed { id }
            }
        }
    }
}

/// Look up `id` for an `updated` call, checking its kind.
pub(crate) fn live_instance<'a>(
    page: &'a mut PageContext,
    id: &str,
    kind: WidgetKind,
) -> Result<&'a mut WidgetInstance, SkipReason> {
    match page.registry_mut().get_mut(id) {
        None => Err(SkipReason::NotMounted),
        Some(inst) if inst.kind != kind => Err(SkipReason::KindMismatch),
        Some(inst) => Ok(inst),
    }
}

/// `kind → hook` dispatch table.
pub struct HookTable {
    hooks: AHashMap<WidgetKind, Box<dyn LifecycleHook>>,
}

impl fmt::Debug for HookTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut kinds: Vec<_> = self.hooks.keys().map(|k| k.hook_name()).collect();
        kinds.sort_unstable();
        f.debug_struct("HookTable").field("kinds", &kinds).finish()
    }
}

impl Default for HookTable {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl HookTable {
    /// Empty table; every dispatch is skipped.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            hooks: AHashMap::new(),
        }
    }

    /// Table with the built-in hook for every kind.
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut table = Self::empty();
        table.register(Box::new(ChartHook));
        table.register(Box::new(SelectHook));
        table.register(Box::new(TableHook));
        table.register(Box::new(SectionNavHook));
        table
    }

    /// Install `hook` for its kind, returning the hook it replaced.
    pub fn register(&mut self, hook: Box<dyn LifecycleHook>) -> Option<Box<dyn LifecycleHook>> {
        self.hooks.insert(hook.kind(), hook)
    }

    #[must_use]
    pub fn resolve(&self, kind: WidgetKind) -> Option<&dyn LifecycleHook> {
        self.hooks.get(&kind).map(|hook| &**hook)
    }

    /// Resolve a markup hook name such as `"ApexChart"`.
    #[must_use]
    pub fn resolve_name(&self, name: &str) -> Option<&dyn LifecycleHook> {
        self.resolve(WidgetKind::from_hook_name(name)?)
    }

    pub fn dispatch(
        &self,
        kind: WidgetKind,
        lifecycle: Lifecycle,
        page: &mut PageContext,
        element: &ElementNode,
    ) -> HookOutcome {
        let Some(hook) = self.resolve(kind) else {
            return HookOutcome::Skipped(SkipReason::UnknownKind);
        };
        let outcome = match lifecycle {
            Lifecycle::Mounted => hook.mounted(page, element),
            Lifecycle::Updated => hook.updated(page, element),
            Lifecycle::Removed => hook.removed(page, element),
        };
        tracing::debug!(%kind, %lifecycle, element = %element, ?outcome, "lifecycle dispatched");
        outcome
    }

    /// [`dispatch`](Self::dispatch) by markup hook name.
    pub fn dispatch_name(
        &self,
        name: &str,
        lifecycle: Lifecycle,
        page: &mut PageContext,
        element: &ElementNode,
    ) -> HookOutcome {
        match WidgetKind::from_hook_name(name) {
            Some(kind) => self.dispatch(kind, lifecycle, page, element),
            None => {
                tracing::debug!(hook = name, "no hook registered under this name");
                HookOutcome::Skipped(SkipReason::UnknownKind)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hookwire_core::testing::{data_table, wiki_page};

    #[test]
    fn defaults_cover_every_kind() {
        let table = HookTable::with_defaults();
        for kind in WidgetKind::ALL {
            assert_eq!(table.resolve(kind).map(|h| h.kind()), Some(kind));
        }
        assert!(table.resolve_name("Select2").is_some());
        assert!(table.resolve_name("Nope").is_none());
    }

    #[test]
    fn empty_table_skips() {
        let mut page = PageContext::default();
        let outcome = HookTable::empty().dispatch(
            WidgetKind::Table,
            Lifecycle::Mounted,
            &mut page,
            &data_table("t", &[]),
        );
        assert_eq!(outcome, HookOutcome::Skipped(SkipReason::UnknownKind));
        assert!(page.registry().is_empty());
    }

    #[test]
    fn unknown_name_skips() {
        let mut page = PageContext::default();
        let el = ElementNode::new("div").with_attr("id", "x");
        assert_eq!(
            HookTable::default().dispatch_name("FormHistory", Lifecycle::Mounted, &mut page, &el),
            HookOutcome::Skipped(SkipReason::UnknownKind)
        );
    }

    #[test]
    fn removed_checks_kind() {
        let hooks = HookTable::default();
        let mut page = PageContext::default();
        let table = data_table("shared", &[("1", false)]);
        hooks.dispatch(WidgetKind::Table, Lifecycle::Mounted, &mut page, &table);
        let nav = wiki_page("shared", &[]);
        assert_eq!(
            hooks.dispatch(WidgetKind::SectionNav, Lifecycle::Removed, &mut page, &nav),
            HookOutcome::Skipped(SkipReason::KindMismatch)
        );
        assert_eq!(
            hooks.dispatch(WidgetKind::Table, Lifecycle::Removed, &mut page, &table),
            HookOutcome::Removed { id: "shared".into() }
        );
        assert!(page.registry().is_empty());
    }

    #[test]
    fn on_scroll_moves_every_nav() {
        let hooks = HookTable::default();
        let mut page = PageContext::default();
        page.set_viewport(Viewport::new(0.0, 300.0, 5000.0));
        let wiki = wiki_page("wiki", &[(2, "A", 0.0), (2, "B", 400.0)]);
        hooks.dispatch(WidgetKind::SectionNav, Lifecycle::Mounted, &mut page, &wiki);
        assert_eq!(page.section_nav("wiki").and_then(|n| n.current()), Some(0));

        let changes = page.on_scroll(Viewport::new(390.0, 300.0, 5000.0));
        assert_eq!(
            changes,
            vec![(
                "wiki".to_owned(),
                HighlightChange {
                    previous: Some(0),
                    current: 1
                }
            )]
        );
        assert!(page.on_scroll(Viewport::new(395.0, 300.0, 5000.0)).is_empty());
    }
}
