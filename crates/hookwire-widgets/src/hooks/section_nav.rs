//! Scroll-linked section navigation.

use hookwire_core::ElementNode;

use crate::bridge::{HookOutcome, LifecycleHook, PageContext, SkipReason, live_instance};
use crate::kind::WidgetKind;
use crate::registry::{InstanceHandle, WidgetInstance};
use crate::sections::ScrollSectionHighlighter;

#[derive(Debug, Clone, Copy, Default)]
pub struct SectionNavHook;

impl SectionNavHook {
    fn index(page: &PageContext, element: &ElementNode) -> ScrollSectionHighlighter {
        ScrollSectionHighlighter::from_element(element, &page.config().sections)
    }
}

impl LifecycleHook for SectionNavHook {
    fn kind(&self) -> WidgetKind {
        WidgetKind::SectionNav
    }

    fn instance_id(&self, _page: &PageContext, element: &ElementNode) -> Option<String> {
        element
            .attr("id")
            .filter(|id| !id.is_empty())
            .map(str::to_owned)
    }

    /// Index the headings and highlight for the current viewport.
    fn mounted(&self, page: &mut PageContext, element: &ElementNode) -> HookOutcome {
        let Some(id) = self.instance_id(page, element) else {
            return HookOutcome::Skipped(SkipReason::MissingId);
        };
        let mut nav = Self::index(page, element);
        if let Some(change) = nav.update(&page.viewport()) {
            page.push_highlight(&id, change);
        }
        page.registry_mut().register(WidgetInstance::new(
            WidgetKind::SectionNav,
            id.clone(),
            InstanceHandle::SectionNav(nav),
        ));
        HookOutcome::Mounted { id }
    }

    /// Patched content moves headings, so the index is rebuilt in place.
    /// The highlight carries over; a move is queued on the page.
    fn updated(&self, page: &mut PageContext, element: &ElementNode) -> HookOutcome {
        let Some(id) = self.instance_id(page, element) else {
            return HookOutcome::Skipped(SkipReason::MissingId);
        };
        let fresh = Self::index(page, element);
        let viewport = page.viewport();
        let change = match live_instance(page, &id, WidgetKind::SectionNav)
            .map(WidgetInstance::section_nav_mut)
        {
            Ok(Some(nav)) => nav.reindex(fresh, &viewport),
            Ok(None) => return HookOutcome::Skipped(SkipReason::KindMismatch),
            Err(reason) => return HookOutcome::Skipped(reason),
        };
        if let Some(change) = change {
            page.push_highlight(&id, change);
        }
        HookOutcome::Updated { id }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sections::HighlightChange;
    use hookwire_core::Viewport;
    use hookwire_core::testing::wiki_page;

    #[test]
    fn mount_highlights_for_current_viewport() {
        let mut page = PageContext::default();
        page.set_viewport(Viewport::new(210.0, 300.0, 5000.0));
        let wiki = wiki_page("wiki", &[(1, "A", 0.0), (2, "B", 200.0), (2, "C", 500.0)]);
        SectionNavHook.mounted(&mut page, &wiki);
        assert_eq!(page.section_nav("wiki").and_then(|n| n.current()), Some(1));
    }

    #[test]
    fn mount_before_first_scroll_highlights_first_section() {
        let mut page = PageContext::default();
        let wiki = wiki_page("wiki", &[(1, "A", 0.0), (2, "B", 200.0), (2, "C", 500.0)]);
        SectionNavHook.mounted(&mut page, &wiki);
        assert_eq!(page.section_nav("wiki").and_then(|n| n.current()), Some(0));
        assert_eq!(
            page.take_highlight_changes(),
            vec![(
                "wiki".to_owned(),
                HighlightChange {
                    previous: None,
                    current: 0
                }
            )]
        );
        assert!(page.take_highlight_changes().is_empty());
    }

    #[test]
    fn update_carries_highlight_and_queues_move() {
        let mut page = PageContext::default();
        page.set_viewport(Viewport::new(210.0, 300.0, 5000.0));
        SectionNavHook.mounted(
            &mut page,
            &wiki_page("wiki", &[(1, "A", 0.0), (2, "B", 200.0), (2, "C", 500.0)]),
        );
        page.take_highlight_changes();

        SectionNavHook.updated(
            &mut page,
            &wiki_page("wiki", &[(1, "A", 0.0), (2, "B", 200.0), (2, "C", 500.0)]),
        );
        assert!(page.take_highlight_changes().is_empty());

        SectionNavHook.updated(
            &mut page,
            &wiki_page("wiki", &[(1, "A", 0.0), (2, "N", 100.0), (2, "B", 200.0)]),
        );
        assert_eq!(
            page.take_highlight_changes(),
            vec![(
                "wiki".to_owned(),
                HighlightChange {
                    previous: Some(1),
                    current: 2
                }
            )]
        );
        assert_eq!(page.section_nav("wiki").and_then(|n| n.current()), Some(2));
    }

    #[test]
    fn page_without_headings_has_no_current() {
        let mut page = PageContext::default();
        SectionNavHook.mounted(&mut page, &wiki_page("wiki", &[]));
        let nav = page.section_nav("wiki").expect("mounted");
        assert!(nav.nav().is_empty());
        assert_eq!(nav.current(), None);
    }

    #[test]
    fn update_rebuilds_index() {
        let mut page = PageContext::default();
        SectionNavHook.mounted(&mut page, &wiki_page("wiki", &[(2, "A", 0.0)]));
        SectionNavHook.updated(&mut page, &wiki_page("wiki", &[(2, "A", 0.0), (2, "B", 300.0)]));
        assert_eq!(page.section_nav("wiki").map(|n| n.entries().len()), Some(2));
    }

    #[test]
    fn update_before_mount_is_skipped() {
        let mut page = PageContext::default();
        assert_eq!(
            SectionNavHook.updated(&mut page, &wiki_page("wiki", &[])),
            HookOutcome::Skipped(SkipReason::NotMounted)
        );
    }
}
