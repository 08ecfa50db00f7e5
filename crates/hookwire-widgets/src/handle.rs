//! Capability surface of externally rendered widgets.
//!
//! Charts and enhanced selects are drawn by third-party libraries. The
//! hook layer only needs to tell them to render, to merge an options
//! diff, and to redraw after their data changed; the host adapter wraps
//! each library object in a [`WidgetHandle`].

use serde_json::{Map, Value};

use crate::select::SelectOptions;
use hookwire_core::ElementNode;

/// A live library object owned by the registry.
pub trait WidgetHandle {
    /// Draw for the first time.
    fn render(&mut self);

    /// Merge `diff` into the widget's options.
    fn update_options(&mut self, diff: &Map<String, Value>);

    /// Re-validate data and redraw.
    fn redraw(&mut self);

    /// Replace the widget's data rows.
    ///
    /// The default routes through [`update_options`](Self::update_options)
    /// under a `data` key.
    fn set_data(&mut self, rows: &[Map<String, Value>]) {
        let mut diff = Map::new();
        diff.insert(
            "data".into(),
            Value::Array(rows.iter().cloned().map(Value::Object).collect()),
        );
        self.update_options(&diff);
    }
}

/// Host hook for constructing library objects on `mounted`.
///
/// Returning `None` means the host cannot build the widget; the mount is
/// skipped and the element stays unmanaged until something registers it.
pub trait WidgetFactory {
    fn create_chart(&mut self, id: &str, element: &ElementNode) -> Option<Box<dyn WidgetHandle>> {
        let _ = (id, element);
        None
    }

    fn create_select(
        &mut self,
        id: &str,
        options: &SelectOptions,
    ) -> Option<Box<dyn WidgetHandle>> {
        let _ = (id, options);
        None
    }
}

/// Factory for hosts that register every library object up front.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoFactory;

impl WidgetFactory for NoFactory {}
