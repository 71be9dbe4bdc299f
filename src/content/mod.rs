//! Spreadsheet-backed display content.
//!
//! Fetched exactly once when the session starts and immutable afterwards.
//! The remote document carries every numeric setting as a string; parsing
//! falls back to documented defaults rather than failing the whole fetch.

mod fetch;
mod types;

pub use fetch::{fetch_content, ContentError};
pub use types::{
    ButtonConfig, ButtonTarget, ContentDocument, ContentSettings, EventConfig, RawButton,
    RemoteContent, EVENTS_LINK,
};
