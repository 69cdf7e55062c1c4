//! pagewatch: web page change monitor
//!
//! A library for watching a single web page, detecting content changes
//! by hashing the response body, and notifying a Telegram chat.

pub mod config;
pub mod digest;
pub mod fetch;
pub mod monitor;
pub mod net;
pub mod notify;
