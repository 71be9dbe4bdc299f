pub mod analytics;
pub mod config;
pub mod content;
pub mod logging;
pub mod qr;
pub mod session;
pub mod ui;
