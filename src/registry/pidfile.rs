//! Pidfile-backed process registry.
//!
//! Each helper records its pid in `<runtime_dir>/<name>.pid` when it
//! starts. Discovery reads one pidfile per helper category; termination
//! probes liveness first so stopping an already-stopped helper is a no-op.

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use log::{debug, warn};

use super::signal;
use super::{HELPER_NAMES, ProcessRegistry, ProcessTarget};
use crate::error::TerminateError;

/// Default grace period between SIGTERM and SIGKILL.
pub const DEFAULT_GRACE_MS: u64 = 2000;

/// Platform runtime directory holding pidfiles and the daemon socket.
pub fn default_runtime_dir() -> PathBuf {
    dirs::runtime_dir()
        .or_else(dirs::data_local_dir)
        .unwrap_or_else(|| PathBuf::from("."))
        .join("driftr")
}

/// Registry over the pidfiles in a runtime directory.
pub struct PidfileRegistry {
    runtime_dir: PathBuf,
    grace: Duration,
}

impl PidfileRegistry {
    /// Create a registry rooted at `runtime_dir` with the given SIGTERM
    /// grace period.
    pub fn new(runtime_dir: impl Into<PathBuf>, grace_ms: u64) -> Self {
        Self {
            runtime_dir: runtime_dir.into(),
            grace: Duration::from_millis(grace_ms),
        }
    }

    /// Registry rooted at the platform default runtime directory.
    pub fn with_default_dir() -> Self {
        Self::new(default_runtime_dir(), DEFAULT_GRACE_MS)
    }

    /// Directory the registry reads pidfiles from.
    pub fn runtime_dir(&self) -> &PathBuf {
        &self.runtime_dir
    }

    fn read_pidfile(&self, name: &str) -> Option<ProcessTarget> {
        let path = self.runtime_dir.join(format!("{name}.pid"));
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return None,
            Err(err) => {
                warn!("Failed to read {}: {}", path.display(), err);
                return None;
            }
        };
        // Signal delivery works on i32 pids, so anything outside that range
        // is as malformed as non-numeric content.
        match content.trim().parse::<i32>() {
            Ok(pid) if pid > 0 => Some(ProcessTarget {
                name: name.to_string(),
                pid: pid as u32,
                pidfile: Some(path),
            }),
            _ => {
                warn!("Ignoring malformed pidfile {}", path.display());
                None
            }
        }
    }

    fn remove_pidfile(&self, target: &ProcessTarget) {
        if let Some(path) = &target.pidfile {
            if let Err(err) = fs::remove_file(path) {
                if err.kind() != std::io::ErrorKind::NotFound {
                    debug!("Could not remove pidfile {}: {}", path.display(), err);
                }
            }
        }
    }
}

#[async_trait]
impl ProcessRegistry for PidfileRegistry {
    async fn discover(&self) -> Vec<ProcessTarget> {
        let mut targets = Vec::new();
        for name in HELPER_NAMES {
            if let Some(target) = self.read_pidfile(name) {
                debug!("Discovered helper {} (pid {})", target.name, target.pid);
                targets.push(target);
            }
        }
        targets
    }

    async fn terminate(&self, target: &ProcessTarget) -> Result<(), TerminateError> {
        if !signal::is_running(target.pid) {
            debug!(
                "Helper {} (pid {}) already stopped",
                target.name, target.pid
            );
            self.remove_pidfile(target);
            return Ok(());
        }
        signal::terminate_tree(target.pid, self.grace).await?;
        self.remove_pidfile(target);
        Ok(())
    }
}
