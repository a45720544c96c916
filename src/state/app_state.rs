//! Observable application state.

use crate::model::ResponseEnvelope;

/// The unit of state the presentation layer consumes.
///
/// Every operation re-emits the previous best-known `Loaded` snapshot (or
/// `Loading` when none exists) before its own outcome resolves, so a
/// subscriber never sees a blank view while a request is in flight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppState {
    /// An operation is in flight and no snapshot is available to show.
    Loading,
    /// The most recent complete snapshot.
    Loaded(ResponseEnvelope),
    /// One operation failed, with an operator-facing message.
    Error(String),
}

impl AppState {
    /// Short label for log fields.
    pub fn label(&self) -> &'static str {
        match self {
            AppState::Loading => "loading",
            AppState::Loaded(_) => "loaded",
            AppState::Error(_) => "error",
        }
    }

    /// The carried snapshot, when one is loaded.
    pub fn envelope(&self) -> Option<&ResponseEnvelope> {
        match self {
            AppState::Loaded(envelope) => Some(envelope),
            _ => None,
        }
    }
}
