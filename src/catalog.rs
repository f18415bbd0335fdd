use crate::api::types::PropertyRecord;
use std::sync::{Arc, RwLock};

/// The last full catalog fetched from the backend.
///
/// Snapshots are replaced whole and handed out as shared slices, so a
/// reader never observes a half-written list.
#[derive(Debug, Default)]
pub struct CatalogCache {
    snapshot: RwLock<Option<Arc<[PropertyRecord]>>>,
}

impl CatalogCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the cached list. Last write wins; nothing is merged.
    pub fn set(&self, records: Vec<PropertyRecord>) {
        let snapshot: Arc<[PropertyRecord]> = records.into();
        let mut guard = self.snapshot.write().unwrap_or_else(|p| p.into_inner());
        *guard = Some(snapshot);
    }

    /// Current snapshot, or `None` when nothing has been fetched yet
    pub fn get(&self) -> Option<Arc<[PropertyRecord]>> {
        self.snapshot
            .read()
            .unwrap_or_else(|p| p.into_inner())
            .clone()
    }

    pub fn is_populated(&self) -> bool {
        self.get().is_some()
    }

    pub fn clear(&self) {
        *self.snapshot.write().unwrap_or_else(|p| p.into_inner()) = None;
    }
}
