//! Merge rules folding single-entity responses into the cached snapshot.
//!
//! Every mutating operation derives its next snapshot from the existing
//! cache plus the response delta instead of re-fetching the full list.
//! These functions are pure; inputs are borrowed and never mutated.

use crate::model::{ResponseEnvelope, Server, Snapshot};

/// Fold a ping response into the cached snapshot.
///
/// The refreshed server replaces the cached entry with the same id, in
/// place, preserving list order. The cached envelope's metadata is kept,
/// since a ping describes one server rather than a new snapshot. Returns
/// `None` when the response carries no server, the cache holds no server
/// list, or no cached entry matches the id.
pub fn merge_ping(
    cached: Option<&ResponseEnvelope>,
    response: &ResponseEnvelope,
) -> Option<ResponseEnvelope> {
    let refreshed = response.data.server.as_ref()?;
    let mut merged = cached?.clone();
    let servers = merged.data.servers.as_mut()?;
    let slot = servers.iter_mut().find(|server| server.id == refreshed.id)?;
    *slot = refreshed.clone();
    Some(merged)
}

/// Fold a save response into the cached snapshot.
///
/// The created server is prepended to the cached list (most recent
/// first), or starts a new list when nothing is cached, and the
/// response's envelope metadata is adopted. Returns `None` when the
/// response carries no server.
pub fn merge_save(
    cached: Option<&ResponseEnvelope>,
    response: &ResponseEnvelope,
) -> Option<ResponseEnvelope> {
    let created = response.data.server.as_ref()?.clone();
    let mut servers = cached
        .and_then(|envelope| envelope.data.servers.clone())
        .unwrap_or_default();
    servers.insert(0, created);

    let mut merged = response.clone();
    merged.data = Snapshot {
        servers: Some(servers),
        server: None,
    };
    Some(merged)
}

/// Fold a delete response into the cached snapshot.
///
/// Entries with the deleted id are filtered out and the response's
/// envelope metadata is adopted. An id with no cached entry leaves the
/// list as it was, and a cache without a server list stays without one.
pub fn merge_delete(
    cached: Option<&ResponseEnvelope>,
    response: &ResponseEnvelope,
    id: u64,
) -> ResponseEnvelope {
    let remaining: Option<Vec<Server>> = cached
        .and_then(|envelope| envelope.data.servers.as_ref())
        .map(|servers| {
            servers
                .iter()
                .filter(|server| server.id != id)
                .cloned()
                .collect()
        });

    let mut merged = response.clone();
    merged.data = Snapshot {
        servers: remaining,
        server: None,
    };
    merged
}
