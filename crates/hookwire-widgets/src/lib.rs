#![forbid(unsafe_code)]

//! Lifecycle hooks and widget state for hookwire.
//!
//! The host framework inserts and patches server-rendered markup, then
//! calls `mounted` / `updated` / `removed` for each managed element. This
//! crate turns those calls into registry and widget mutations:
//!
//! - [`HookTable`] resolves a [`WidgetKind`] to its [`LifecycleHook`]
//! - [`PageContext`] owns the [`InstanceRegistry`] for the page's lifetime
//! - [`BulkSelectionController`] tracks checked rows of a data table
//! - [`ScrollSectionHighlighter`] keeps one section current while scrolling
//! - [`WidgetHandle`] / [`WidgetFactory`] wrap external widget libraries
//!
//! # Example
//!
//! ```
//! use hookwire_core::testing::data_table;
//! use hookwire_widgets::{HookTable, Lifecycle, PageContext, WidgetKind};
//!
//! let hooks = HookTable::with_defaults();
//! let mut page = PageContext::default();
//! let table = data_table("users", &[("1", false), ("2", false), ("3", false)]);
//! hooks.dispatch(WidgetKind::Table, Lifecycle::Mounted, &mut page, &table);
//!
//! let view = page.table_mut("users").unwrap().set_row("2", true);
//! assert_eq!(view.button.label, "Bulk Actions (1)");
//! ```

pub mod bridge;
pub mod bulk;
pub mod handle;
pub mod hooks;
pub mod kind;
pub mod registry;
pub mod sections;
pub mod select;
#[cfg(any(test, feature = "test-helpers"))]
pub mod testing;

pub use bridge::{HookOutcome, HookTable, Lifecycle, LifecycleHook, PageContext, SkipReason};
pub use bulk::{
    BulkSelectionController, BulkView, ClickTarget, FormMirror, HiddenField, SelectionSummary,
    SummaryButton, summary_button,
};
pub use handle::{NoFactory, WidgetFactory, WidgetHandle};
pub use hooks::{ChartHook, OptionsDiff, SectionNavHook, SelectHook, SeriesData, TableHook};
pub use kind::WidgetKind;
pub use registry::{InstanceHandle, InstanceRegistry, WidgetInstance};
pub use sections::{
    Heading, HighlightChange, NavEntry, ScrollSectionHighlighter, ScrollTarget, SectionEntry,
};
pub use select::SelectOptions;
