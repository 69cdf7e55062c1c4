//! Change-detection monitor for a single watched resource.
//!
//! This module provides:
//! - Validated per-run parameters ([`MonitorConfig`], [`InvalidConfig`])
//! - Status reporting ([`StatusEvent`], [`Severity`], [`StatusSink`])
//! - The poll/hash/compare/notify loop ([`ChangeMonitor`], [`MonitorHandle`])
//!
//! One [`ChangeMonitor`] owns at most one running loop at a time. The loop
//! fetches the resource, digests the raw body, compares against the previous
//! digest, notifies on a transition, and waits out the interval in
//! one-second ticks so cancellation is observed promptly.

mod config;
mod status;
mod watch_loop;


pub use config::{InvalidConfig, MonitorConfig};
pub use status::{Severity, StatusEvent, StatusSink};
pub use watch_loop::{ChangeMonitor, MonitorHandle, StartError};
