//! Error types for driftr
//!
//! Centralized error handling using thiserror. The two enums mirror the two
//! process-control collaborators: helper termination and the service stop
//! call. Helper failures are accumulated, never fatal; service failures are
//! fatal to the command unless the service was simply unreachable.

use thiserror::Error;

/// Failure to stop one auxiliary helper process.
///
/// Non-fatal to a stop run: failures are collected per target and reported
/// in the final outcome.
#[derive(Debug, Error)]
pub enum TerminateError {
    /// The caller lacks permission to signal the process.
    #[error("not permitted to signal pid {pid}")]
    NotPermitted { pid: u32 },

    /// Sending a signal failed for a reason other than permissions or the
    /// process being gone.
    #[error("failed to signal pid {pid}: {source}")]
    Signal {
        pid: u32,
        #[source]
        source: std::io::Error,
    },

    /// The process outlived both SIGTERM and SIGKILL.
    #[error("pid {pid} still running after SIGKILL")]
    Unkillable { pid: u32 },
}

impl TerminateError {
    /// The pid the failed attempt targeted.
    pub fn pid(&self) -> u32 {
        match self {
            Self::NotPermitted { pid } | Self::Signal { pid, .. } | Self::Unkillable { pid } => {
                *pid
            }
        }
    }
}

/// Failure to stop the background service.
///
/// `Unreachable` is the benign case: the service is already down (or never
/// started), so its goal state is achieved. Every other subtype fails the
/// stop command.
#[derive(Debug, Error)]
pub enum ServiceStopError {
    /// Could not connect to the service socket.
    #[error("service unreachable: {0}")]
    Unreachable(String),

    /// The service did not acknowledge the stop request in time.
    #[error("stop request timed out after {0}ms")]
    Timeout(u64),

    /// The connection broke while sending or receiving.
    #[error("transport error: {0}")]
    Transport(String),

    /// The service replied with something that is not a valid response.
    #[error("malformed response: {0}")]
    Malformed(String),

    /// The service answered the request with an error.
    #[error("service rejected stop: {0}")]
    Rejected(String),
}

impl ServiceStopError {
    /// Whether this error means the service is already in its goal state.
    pub fn is_benign(&self) -> bool {
        matches!(self, Self::Unreachable(_))
    }
}
