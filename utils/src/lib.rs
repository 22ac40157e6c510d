//! Shared utilities for paystream.

pub mod logging;
pub mod time;

pub use logging::{init_logging, LogFormat};
pub use time::{format_duration_compact, format_duration_long};
