//! Application lifecycle
//!
//! - `startup`: storage, telemetry and service wiring
//! - `server`: HTTP server

pub mod server;
pub mod startup;

pub use server::run_server;
pub use startup::{AppServices, prepare_server_startup};
