//! Single-slot snapshot cache.

use crate::model::ResponseEnvelope;
use std::sync::RwLock;

/// Holds the most recent authoritative snapshot.
///
/// A dumb single-slot store: `set` replaces the envelope wholesale and
/// all merging happens in the controller. Reads hand out clones so no
/// caller ever holds the lock across an await point.
#[derive(Debug, Default)]
pub struct SnapshotCache {
    slot: RwLock<Option<ResponseEnvelope>>,
}

impl SnapshotCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// The cached snapshot, or `None` before the first successful fetch.
    pub fn current(&self) -> Option<ResponseEnvelope> {
        self.slot
            .read()
            .expect("snapshot cache lock poisoned")
            .clone()
    }

    /// Replace the cached snapshot.
    pub fn set(&self, envelope: ResponseEnvelope) {
        *self.slot.write().expect("snapshot cache lock poisoned") = Some(envelope);
    }
}
