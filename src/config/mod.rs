//! Local kiosk configuration.
//!
//! This is the operator-side config file (endpoint URLs, timers), not the
//! spreadsheet-backed display content — that lives in [`crate::content`]
//! and is fetched over HTTP at startup.

mod loader;
mod types;

pub use loader::ConfigError;
pub use types::{Config, KioskTiming, RemoteEndpoints};
