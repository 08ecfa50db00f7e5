//! Page-scoped `id → instance` map.
//!
//! # Invariants
//!
//! 1. At most one live instance per id.
//! 2. Registering an existing id replaces the entry in one step; the old
//!    instance is handed back to the caller and the registry never
//!    touches it again.
//! 3. A miss is `None`, never an error.

use std::fmt;

use ahash::AHashMap;
use serde_json::Value;

use crate::bulk::BulkSelectionController;
use crate::handle::WidgetHandle;
use crate::kind::WidgetKind;
use crate::sections::ScrollSectionHighlighter;

/// What a registered instance drives.
pub enum InstanceHandle {
    /// Object owned by an external widget library.
    Library(Box<dyn WidgetHandle>),
    Table(BulkSelectionController),
    SectionNav(ScrollSectionHighlighter),
}

impl fmt::Debug for InstanceHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Library(_) => f.write_str("Library(..)"),
            Self::Table(bulk) => f.debug_tuple("Table").field(bulk).finish(),
            Self::SectionNav(nav) => f.debug_tuple("SectionNav").field(nav).finish(),
        }
    }
}

/// One managed element's live state.
#[derive(Debug)]
pub struct WidgetInstance {
    pub kind: WidgetKind,
    pub id: String,
    pub handle: InstanceHandle,
    /// Last payload applied without error.
    pub last_data: Option<Value>,
    generation: u64,
}

impl WidgetInstance {
    #[must_use]
    pub fn new(kind: WidgetKind, id: impl Into<String>, handle: InstanceHandle) -> Self {
        Self {
            kind,
            id: id.into(),
            handle,
            last_data: None,
            generation: 0,
        }
    }

    #[must_use]
    pub fn with_last_data(mut self, data: Value) -> Self {
        self.last_data = Some(data);
        self
    }

    /// Registration sequence number; later registrations are larger.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn library_mut(&mut self) -> Option<&mut Box<dyn WidgetHandle>> {
        match &mut self.handle {
            InstanceHandle::Library(handle) => Some(handle),
            _ => None,
        }
    }

    #[must_use]
    pub fn table(&self) -> Option<&BulkSelectionController> {
        match &self.handle {
            InstanceHandle::Table(bulk) => Some(bulk),
            _ => None,
        }
    }

    pub fn table_mut(&mut self) -> Option<&mut BulkSelectionController> {
        match &mut self.handle {
            InstanceHandle::Table(bulk) => Some(bulk),
            _ => None,
        }
    }

    #[must_use]
    pub fn section_nav(&self) -> Option<&ScrollSectionHighlighter> {
        match &self.handle {
            InstanceHandle::SectionNav(nav) => Some(nav),
            _ => None,
        }
    }

    pub fn section_nav_mut(&mut self) -> Option<&mut ScrollSectionHighlighter> {
        match &mut self.handle {
            InstanceHandle::SectionNav(nav) => Some(nav),
            _ => None,
        }
    }
}

#[derive(Debug, Default)]
pub struct InstanceRegistry {
    entries: AHashMap<String, WidgetInstance>,
    next_generation: u64,
}

impl InstanceRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `instance`, returning the instance it displaced.
    pub fn register(&mut self, mut instance: WidgetInstance) -> Option<WidgetInstance> {
        self.next_generation += 1;
        instance.generation = self.next_generation;
        let replaced = self.entries.insert(instance.id.clone(), instance);
        if let Some(old) = &replaced {
            tracing::debug!(id = %old.id, kind = %old.kind, "replaced registry entry");
        }
        replaced
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&WidgetInstance> {
        self.entries.get(id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut WidgetInstance> {
        self.entries.get_mut(id)
    }

    /// Remove the entry for `id`.
    pub fn evict(&mut self, id: &str) -> Option<WidgetInstance> {
        let evicted = self.entries.remove(id);
        if let Some(old) = &evicted {
            tracing::debug!(id, kind = %old.kind, "evicted registry entry");
        }
        evicted
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut WidgetInstance> {
        self.entries.values_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hookwire_core::SectionConfig;

    fn nav(id: &str) -> WidgetInstance {
        WidgetInstance::new(
            WidgetKind::SectionNav,
            id,
            InstanceHandle::SectionNav(ScrollSectionHighlighter::build([], &SectionConfig::default())),
        )
    }

    #[test]
    fn register_replaces_and_returns_old() {
        let mut reg = InstanceRegistry::new();
        assert!(reg.register(nav("a")).is_none());
        let first = reg.get("a").map(WidgetInstance::generation);
        let old = reg.register(nav("a").with_last_data(Value::from(2)));
        assert_eq!(old.map(|o| o.generation()), first);
        assert_eq!(reg.len(), 1);
        assert_eq!(reg.get("a").and_then(|i| i.last_data.clone()), Some(Value::from(2)));
    }

    #[test]
    fn miss_is_none() {
        let mut reg = InstanceRegistry::new();
        assert!(reg.get("nope").is_none());
        assert!(reg.get_mut("nope").is_none());
        assert!(reg.evict("nope").is_none());
        assert!(reg.is_empty());
    }

    #[test]
    fn evict_removes_entry() {
        let mut reg = InstanceRegistry::new();
        reg.register(nav("a"));
        assert!(reg.evict("a").is_some());
        assert!(!reg.contains("a"));
    }

    #[test]
    fn typed_accessors_match_handle() {
        let mut inst = nav("a");
        assert!(inst.section_nav().is_some());
        assert!(inst.table().is_none());
        assert!(inst.library_mut().is_none());
    }
}
