//! Wire model shared with the server registry backend.
//!
//! Field names mirror the backend JSON contract exactly (`statusCode`,
//! `imageUrl`, `data.servers`, `data.server`); nothing in this module may
//! rename or reshape them without a coordinated backend change.

mod envelope;
mod server;


pub use envelope::*;
pub use server::*;
