//! Recording doubles for the widget library surface.

use std::cell::RefCell;
use std::rc::Rc;

use serde_json::{Map, Value};

use hookwire_core::ElementNode;

use crate::handle::{WidgetFactory, WidgetHandle};
use crate::kind::WidgetKind;
use crate::select::SelectOptions;

/// One call received by a [`RecordingWidget`].
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Render,
    UpdateOptions(Map<String, Value>),
    Redraw,
    SetData(Vec<Map<String, Value>>),
}

/// Shared view of a widget's calls; survives the widget being boxed.
pub type CallLog = Rc<RefCell<Vec<Call>>>;

#[derive(Debug, Default)]
pub struct RecordingWidget {
    log: CallLog,
}

impl RecordingWidget {
    /// A widget and the log it writes to.
    #[must_use]
    pub fn new() -> (Self, CallLog) {
        let log = CallLog::default();
        (
            Self {
                log: Rc::clone(&log),
            },
            log,
        )
    }
}

impl WidgetHandle for RecordingWidget {
    fn render(&mut self) {
        self.log.borrow_mut().push(Call::Render);
    }

    fn update_options(&mut self, diff: &Map<String, Value>) {
        self.log.borrow_mut().push(Call::UpdateOptions(diff.clone()));
    }

    fn redraw(&mut self) {
        self.log.borrow_mut().push(Call::Redraw);
    }

    fn set_data(&mut self, rows: &[Map<String, Value>]) {
        self.log.borrow_mut().push(Call::SetData(rows.to_vec()));
    }
}

/// Widget built by a [`RecordingFactory`].
#[derive(Debug, Clone)]
pub struct Built {
    pub kind: WidgetKind,
    pub id: String,
    pub options: Option<SelectOptions>,
    pub log: CallLog,
}

/// Factory that builds [`RecordingWidget`]s and remembers each one.
///
/// Clones share the same record, so a test can keep one clone after
/// boxing the other into a page context.
#[derive(Debug, Clone, Default)]
pub struct RecordingFactory {
    built: Rc<RefCell<Vec<Built>>>,
}

impl RecordingFactory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything built so far, oldest first.
    #[must_use]
    pub fn built(&self) -> Vec<Built> {
        self.built.borrow().clone()
    }

    /// Log of the most recent widget built for `id`.
    #[must_use]
    pub fn log_for(&self, id: &str) -> Option<CallLog> {
        self.built
            .borrow()
            .iter()
            .rev()
            .find(|b| b.id == id)
            .map(|b| Rc::clone(&b.log))
    }

    fn record(&self, kind: WidgetKind, id: &str, options: Option<SelectOptions>) -> Box<dyn WidgetHandle> {
        let (widget, log) = RecordingWidget::new();
        self.built.borrow_mut().push(Built {
            kind,
            id: id.to_owned(),
            options,
            log,
        });
        Box::new(widget)
    }
}

impl WidgetFactory for RecordingFactory {
    fn create_chart(&mut self, id: &str, _element: &ElementNode) -> Option<Box<dyn WidgetHandle>> {
        Some(self.record(WidgetKind::Chart, id, None))
    }

    fn create_select(
        &mut self,
        id: &str,
        options: &SelectOptions,
    ) -> Option<Box<dyn WidgetHandle>> {
        Some(self.record(WidgetKind::EnhancedSelect, id, Some(options.clone())))
    }
}
