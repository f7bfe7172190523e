//! Process Registry - discovery and termination of helper processes
//!
//! The driftr application runs auxiliary helpers alongside the background
//! service: the file-sync watcher, the background updater, and the tray UI.
//! The registry tracks which of them are believed to be running and exposes
//! a best-effort, idempotent terminate operation per process.

pub mod pidfile;
mod signal;

pub use pidfile::{PidfileRegistry, default_runtime_dir};

use std::path::PathBuf;

use async_trait::async_trait;

use crate::error::TerminateError;

/// Helper process categories tracked alongside the service.
pub const HELPER_NAMES: &[&str] = &["watcher", "updater", "tray"];

/// An auxiliary process known to the registry.
///
/// Lives for a single orchestration run; the next run re-discovers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessTarget {
    /// Helper category name (see [`HELPER_NAMES`]).
    pub name: String,
    /// Last known pid.
    pub pid: u32,
    /// Pidfile the target was discovered from, if any.
    pub pidfile: Option<PathBuf>,
}

impl ProcessTarget {
    /// Create a target without a backing pidfile.
    pub fn new(name: impl Into<String>, pid: u32) -> Self {
        Self {
            name: name.into(),
            pid,
            pidfile: None,
        }
    }
}

/// Capability to enumerate and stop helper processes.
#[async_trait]
pub trait ProcessRegistry: Send + Sync {
    /// Enumerate the helper processes currently believed to be running.
    /// Never fails fatally: an unreadable category is logged and treated as
    /// none found.
    async fn discover(&self) -> Vec<ProcessTarget>;

    /// Stop one helper. Idempotent: terminating a target that is already
    /// gone succeeds trivially.
    async fn terminate(&self, target: &ProcessTarget) -> Result<(), TerminateError>;
}
