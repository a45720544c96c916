//! Transition core behind the observable state stream.

use super::app_state::AppState;
use crate::model::ResponseEnvelope;

/// Events that drive state transitions.
#[derive(Debug, Clone)]
pub enum StateEvent {
    /// A new operation started. Carries the stale snapshot to re-emit
    /// while the request is in flight, when one exists.
    Started { stale: Option<ResponseEnvelope> },
    /// The operation of the given generation resolved with a snapshot.
    Resolved {
        generation: u64,
        envelope: ResponseEnvelope,
    },
    /// The operation of the given generation failed.
    Failed { generation: u64, message: String },
}

/// A state change produced by applying an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    /// The state to publish.
    pub state: AppState,
    /// Generation of the operation the state belongs to.
    pub generation: u64,
}

/// Explicit three-state machine with a generation guard.
///
/// Each started operation bumps the generation. A resolution or failure
/// carrying an older generation belongs to a superseded operation and
/// produces no transition, so a slow response can never overwrite the
/// state of an operation started after it.
#[derive(Debug)]
pub struct StateMachine {
    current: AppState,
    generation: u64,
}

impl StateMachine {
    pub fn new() -> Self {
        Self {
            current: AppState::Loading,
            generation: 0,
        }
    }

    /// State as of the last applied event.
    pub fn current(&self) -> &AppState {
        &self.current
    }

    /// Generation of the most recently started operation.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Apply an event. Returns the transition to publish, or `None` when
    /// the event belongs to a superseded operation.
    pub fn apply(&mut self, event: StateEvent) -> Option<Transition> {
        match event {
            StateEvent::Started { stale } => {
                self.generation += 1;
                self.current = match stale {
                    Some(envelope) => AppState::Loaded(envelope),
                    None => AppState::Loading,
                };
            }
            StateEvent::Resolved {
                generation,
                envelope,
            } => {
                if generation != self.generation {
                    return None;
                }
                self.current = AppState::Loaded(envelope);
            }
            StateEvent::Failed {
                generation,
                message,
            } => {
                if generation != self.generation {
                    return None;
                }
                self.current = AppState::Error(message);
            }
        }

        Some(Transition {
            state: self.current.clone(),
            generation: self.generation,
        })
    }
}

impl Default for StateMachine {
    fn default() -> Self {
        Self::new()
    }
}
