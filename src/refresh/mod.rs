//! Periodic background refresh of the server list.

use crate::state::StateController;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Background service that re-fetches the server list on a fixed interval.
///
/// Each cycle is an ordinary refresh operation, so a manual operation
/// started mid-cycle supersedes it like any other and the cycle's result
/// is discarded by the generation guard.
pub struct AutoRefresh {
    controller: Arc<StateController>,
    interval_seconds: u64,
}

impl AutoRefresh {
    /// Create an auto-refresh service driving the given controller.
    pub fn new(controller: Arc<StateController>, interval_seconds: u64) -> Self {
        Self {
            controller,
            interval_seconds,
        }
    }

    /// Start the refresh background task.
    /// Returns a JoinHandle that resolves when the task stops.
    pub fn start(self, cancel_token: CancellationToken) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(self.interval_seconds));
            interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

            tracing::info!(
                interval_seconds = self.interval_seconds,
                "Auto refresh started"
            );

            loop {
                tokio::select! {
                    _ = cancel_token.cancelled() => {
                        tracing::info!("Auto refresh shutting down");
                        break;
                    }
                    _ = interval.tick() => {
                        match self.controller.refresh_list().await {
                            Some(state) => {
                                tracing::debug!(state = state.label(), "Refresh cycle completed");
                            }
                            None => {
                                tracing::debug!("Refresh cycle superseded by a newer operation");
                            }
                        }
                    }
                }
            }
        })
    }
}
