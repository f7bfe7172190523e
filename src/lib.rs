//! Driftr - process control for a multi-process sync client
//!
//! The driftr application runs a long-lived background service plus
//! auxiliary helpers (file-sync watcher, background updater, tray UI).
//! This crate implements the shutdown orchestration layer: deciding which
//! processes to stop, in what order, tolerating the ones that are already
//! gone, and folding partial failures into a single reportable outcome.

pub mod ctl;
pub mod error;
pub mod ipc;
pub mod registry;

pub use error::{ServiceStopError, TerminateError};
