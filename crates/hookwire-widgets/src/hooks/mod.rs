//! Built-in lifecycle hooks, one per [`WidgetKind`](crate::WidgetKind).

mod chart;
mod section_nav;
mod select;
mod table;

pub use chart::{ChartHook, OptionsDiff, SeriesData};
pub use section_nav::SectionNavHook;
pub use select::SelectHook;
pub use table::TableHook;
