//! serverdeck - Reactive dashboard client for the server registry API
//!
//! This library provides the state engine behind the dashboard: a single-slot
//! snapshot cache, a generation-guarded state machine and remote operations
//! that patch the cached server list in place instead of re-fetching it.

pub mod cli;
pub mod config;
pub mod filter;
pub mod gateway;
pub mod logging;
pub mod model;
pub mod refresh;
pub mod state;
