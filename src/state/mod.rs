//! Reactive state engine for the dashboard.
//!
//! The [`StateController`] is the single writer of application state. It
//! orchestrates gateway calls, folds each outcome into the snapshot cache
//! through the merge rules, and broadcasts every observable [`AppState`]
//! to subscribers. Starting a new operation supersedes any still-running
//! one: the older call keeps running, but its outcome is discarded by the
//! state machine's generation guard instead of overwriting newer state.

mod app_state;
mod cache;
mod command;
mod machine;
mod merge;


pub use app_state::*;
pub use cache::*;
pub use command::*;
pub use machine::*;
pub use merge::*;

use crate::filter::{self, StatusFilter};
use crate::gateway::RemoteOperations;
use crate::logging::generate_operation_id;
use crate::model::{ResponseEnvelope, ServerDraft, ServerStatus};
use async_stream::stream;
use futures::Stream;
use std::sync::{Arc, Mutex};
use tokio::sync::{broadcast, watch};

/// Capacity of the state broadcast channel. A subscriber that falls
/// further behind misses intermediate states, never the newest one.
const STATE_CHANNEL_CAPACITY: usize = 64;

/// Capacity of the UI command broadcast channel.
const COMMAND_CHANNEL_CAPACITY: usize = 16;

/// Fixed diagnostic for a ping response that cannot be folded into the
/// cache (no cached list, no server payload, or no matching id).
const PING_MERGE_ERROR: &str = "pinging server Error";

/// Fixed diagnostic for a save response that carries no created server.
const SAVE_MERGE_ERROR: &str = "saving server Error";

/// Orchestrates remote operations and owns all mutable dashboard state.
///
/// The controller holds the snapshot cache and the state machine; nothing
/// else writes either. Cache writes happen under the machine lock on the
/// same guarded path that publishes the transition, so a superseded
/// operation can neither emit nor leave a stale snapshot behind.
pub struct StateController {
    gateway: Arc<dyn RemoteOperations>,
    machine: Mutex<StateMachine>,
    cache: SnapshotCache,
    states: broadcast::Sender<AppState>,
    commands: broadcast::Sender<UiCommand>,
    pinging: watch::Sender<Option<String>>,
    saving: watch::Sender<bool>,
}

impl StateController {
    /// Create a controller over the given gateway with an empty cache.
    pub fn new(gateway: Arc<dyn RemoteOperations>) -> Self {
        let (states, _) = broadcast::channel(STATE_CHANNEL_CAPACITY);
        let (commands, _) = broadcast::channel(COMMAND_CHANNEL_CAPACITY);
        let (pinging, _) = watch::channel(None);
        let (saving, _) = watch::channel(false);

        Self {
            gateway,
            machine: Mutex::new(StateMachine::new()),
            cache: SnapshotCache::new(),
            states,
            commands,
            pinging,
            saving,
        }
    }

    /// Fetch the full server list, replacing the cached snapshot.
    ///
    /// Emits `Loading` while the request is in flight, then `Loaded` with
    /// the fresh snapshot, or `Error` with the gateway's message. Returns
    /// the resolved state, or `None` when a newer operation superseded
    /// this one.
    pub async fn refresh_list(&self) -> Option<AppState> {
        let operation_id = generate_operation_id();
        let generation = self.begin(None);
        tracing::debug!(%operation_id, generation, "refreshing server list");

        match self.gateway.list_servers().await {
            Ok(envelope) => self.resolve(generation, envelope, true),
            Err(error) => {
                tracing::warn!(%operation_id, error = %error, "list refresh failed");
                self.fail(generation, error.operator_message())
            }
        }
    }

    /// Health-check one server and patch its cached entry in place.
    ///
    /// Re-emits the current snapshot while the request is in flight so the
    /// rendered list never blanks. On success the returned server replaces
    /// the cached entry with the same id; if the response cannot be
    /// reconciled with the cache the operation fails with a fixed
    /// diagnostic and the cache is left untouched.
    pub async fn ping_server(&self, address: &str) -> Option<AppState> {
        let operation_id = generate_operation_id();
        // Mark the row before anything else so the UI can highlight it
        // for the whole round trip.
        let _ = self.pinging.send(Some(address.to_string()));

        let stale = self.cache.current();
        let generation = self.begin(stale);
        tracing::debug!(%operation_id, generation, address, "pinging server");

        match self.gateway.ping_server(address).await {
            Ok(envelope) => {
                self.clear_ping_marker(address);
                let cached = self.cache.current();
                match merge_ping(cached.as_ref(), &envelope) {
                    Some(merged) => self.resolve(generation, merged, true),
                    None => {
                        tracing::warn!(
                            %operation_id,
                            address,
                            "ping response does not match any cached server"
                        );
                        self.fail(generation, PING_MERGE_ERROR.to_string())
                    }
                }
            }
            Err(error) => {
                tracing::warn!(%operation_id, address, error = %error, "ping failed");
                self.fail(generation, error.operator_message())
            }
        }
    }

    /// Derive a filtered view of the cached snapshot.
    ///
    /// Local-only: no gateway call, and the filtered envelope is emitted
    /// without being written back to the cache, so a later `ALL` filter
    /// or merge still sees the complete collection.
    pub fn filter_servers(&self, status: StatusFilter) -> Option<AppState> {
        let operation_id = generate_operation_id();
        let stale = self.cache.current();
        // The evaluator still runs before the first fetch; it just sees
        // an empty snapshot.
        let base = stale.clone().unwrap_or_else(ResponseEnvelope::empty);
        let generation = self.begin(stale);
        tracing::debug!(%operation_id, generation, status = %status, "filtering cached servers");

        let filtered = filter::evaluate(status, &base);
        self.resolve(generation, filtered, false)
    }

    /// Create a server and prepend it to the cached list.
    ///
    /// On success the presentation layer is told to close the add-server
    /// dialog and reset the form to a `SERVER_DOWN` draft. The save
    /// progress flag is raised for the duration of the call.
    pub async fn save_server(&self, draft: &ServerDraft) -> Option<AppState> {
        let operation_id = generate_operation_id();
        let _ = self.saving.send(true);

        let stale = self.cache.current();
        let generation = self.begin(stale);
        tracing::debug!(%operation_id, generation, name = %draft.name, "saving server");

        let outcome = match self.gateway.save_server(draft).await {
            Ok(envelope) => {
                let cached = self.cache.current();
                match merge_save(cached.as_ref(), &envelope) {
                    Some(merged) => {
                        let state = self.resolve(generation, merged, true);
                        if state.is_some() {
                            let _ = self.commands.send(UiCommand::CloseAddServerDialog);
                            let _ = self.commands.send(UiCommand::ResetServerForm {
                                status: ServerStatus::Down,
                            });
                        }
                        state
                    }
                    None => {
                        tracing::warn!(%operation_id, "save response carried no server");
                        self.fail(generation, SAVE_MERGE_ERROR.to_string())
                    }
                }
            }
            Err(error) => {
                tracing::warn!(%operation_id, error = %error, "save failed");
                self.fail(generation, error.operator_message())
            }
        };

        let _ = self.saving.send(false);
        outcome
    }

    /// Remove a server by id and drop it from the cached list.
    pub async fn delete_server(&self, id: u64) -> Option<AppState> {
        let operation_id = generate_operation_id();
        let stale = self.cache.current();
        let generation = self.begin(stale);
        tracing::debug!(%operation_id, generation, server_id = id, "deleting server");

        match self.gateway.delete_server(id).await {
            Ok(envelope) => {
                let cached = self.cache.current();
                let merged = merge_delete(cached.as_ref(), &envelope, id);
                self.resolve(generation, merged, true)
            }
            Err(error) => {
                tracing::warn!(%operation_id, server_id = id, error = %error, "delete failed");
                self.fail(generation, error.operator_message())
            }
        }
    }

    /// Subscribe to state emissions from this point on.
    pub fn subscribe(&self) -> broadcast::Receiver<AppState> {
        self.states.subscribe()
    }

    /// The state stream as the presentation layer consumes it: the
    /// current state first, then every later emission. A subscriber that
    /// lags resumes with the newest available state.
    pub fn state_stream(&self) -> impl Stream<Item = AppState> {
        let mut rx = self.states.subscribe();
        let current = self.current_state();

        stream! {
            yield current;
            loop {
                match rx.recv().await {
                    Ok(state) => yield state,
                    Err(broadcast::error::RecvError::Lagged(missed)) => {
                        tracing::warn!(missed, "state subscriber lagged, resuming with newest");
                        continue;
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        }
    }

    /// State as of the last transition.
    pub fn current_state(&self) -> AppState {
        self.machine
            .lock()
            .expect("state machine lock poisoned")
            .current()
            .clone()
    }

    /// Subscribe to one-shot UI commands.
    pub fn subscribe_commands(&self) -> broadcast::Receiver<UiCommand> {
        self.commands.subscribe()
    }

    /// The cached snapshot, or `None` before the first successful fetch.
    pub fn snapshot(&self) -> Option<ResponseEnvelope> {
        self.cache.current()
    }

    /// Address of the server currently being pinged, for row highlighting.
    pub fn pinging_address(&self) -> Option<String> {
        self.pinging.borrow().clone()
    }

    /// Watch the pinged-address marker.
    pub fn watch_pinging(&self) -> watch::Receiver<Option<String>> {
        self.pinging.subscribe()
    }

    /// Whether a save is currently in flight.
    pub fn save_in_flight(&self) -> bool {
        *self.saving.borrow()
    }

    /// Watch the save progress flag.
    pub fn watch_saving(&self) -> watch::Receiver<bool> {
        self.saving.subscribe()
    }

    /// Publish the start of a new operation and return the generation
    /// that guards its outcome.
    fn begin(&self, stale: Option<ResponseEnvelope>) -> u64 {
        let (generation, transition) = {
            let mut machine = self.machine.lock().expect("state machine lock poisoned");
            let transition = machine.apply(StateEvent::Started { stale });
            (machine.generation(), transition)
        };

        if let Some(transition) = transition {
            tracing::debug!(generation, state = transition.state.label(), "state transition");
            let _ = self.states.send(transition.state);
        }
        generation
    }

    fn resolve(&self, generation: u64, envelope: ResponseEnvelope, store: bool) -> Option<AppState> {
        let update = store.then(|| envelope.clone());
        self.publish(
            StateEvent::Resolved {
                generation,
                envelope,
            },
            update,
        )
    }

    fn fail(&self, generation: u64, message: String) -> Option<AppState> {
        self.publish(StateEvent::Failed { generation, message }, None)
    }

    /// Run an outcome through the machine. When the owning operation is
    /// still live, commit the cache update (if any) and broadcast the new
    /// state; a superseded outcome produces no write and no emission.
    fn publish(
        &self,
        event: StateEvent,
        cache_update: Option<ResponseEnvelope>,
    ) -> Option<AppState> {
        let transition = {
            let mut machine = self.machine.lock().expect("state machine lock poisoned");
            let transition = machine.apply(event)?;
            // The write happens under the machine lock so the cache can
            // never receive a superseded snapshot after a newer one.
            if let Some(envelope) = cache_update {
                self.cache.set(envelope);
            }
            transition
        };

        tracing::debug!(
            generation = transition.generation,
            state = transition.state.label(),
            "state transition"
        );
        let _ = self.states.send(transition.state.clone());
        Some(transition.state)
    }

    /// Clear the ping marker, unless a newer ping has already replaced it.
    fn clear_ping_marker(&self, address: &str) {
        self.pinging.send_if_modified(|current| {
            if current.as_deref() == Some(address) {
                *current = None;
                true
            } else {
                false
            }
        });
    }
}
