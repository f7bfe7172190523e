//! Stop request, exit codes, and the aggregate stop outcome.

use crate::error::{ServiceStopError, TerminateError};

/// A decoded stop request. Immutable, one per invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StopRequest {
    /// Only shut down the background service, leaving helpers running.
    pub only_service: bool,
}

impl StopRequest {
    /// Full stop: helpers first, then the service.
    pub fn full() -> Self {
        Self {
            only_service: false,
        }
    }

    /// Service-only stop (`--shutdown`).
    pub fn service_only() -> Self {
        Self { only_service: true }
    }
}

/// Outcome code forwarded to the service and reported by the command.
///
/// The code sent in the stop request is the code the command itself exits
/// with, unless stopping the service fails. `Restart` tells the supervising
/// helper to bring the service back up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    Ok,
    Error,
    Restart,
}

impl ExitCode {
    /// Numeric process exit status.
    pub fn code(self) -> i32 {
        match self {
            Self::Ok => 0,
            Self::Error => 2,
            Self::Restart => 4,
        }
    }
}

/// One helper that could not be stopped.
#[derive(Debug)]
pub struct AuxFailure {
    /// Helper category name.
    pub target: String,
    /// Why the termination attempt failed.
    pub error: TerminateError,
}

/// Aggregate result of one orchestration run.
///
/// Produced once per run; the caller reads it to decide the process's own
/// exit status and to print the summary.
#[derive(Debug, Default)]
pub struct StopOutcome {
    /// Helper terminations that failed, in discovery order.
    pub aux_failures: Vec<AuxFailure>,
    /// Non-benign failure to stop the service, if any.
    pub service_stop_error: Option<ServiceStopError>,
}

impl StopOutcome {
    /// Whether the run completed without recording any failure.
    pub fn is_clean(&self) -> bool {
        self.aux_failures.is_empty() && self.service_stop_error.is_none()
    }

    /// Final exit code under the chosen failure policy.
    ///
    /// The lenient default fails the command only when the service itself
    /// failed to stop; `strict` also fails on any helper failure.
    pub fn exit_code(&self, requested: ExitCode, strict: bool) -> ExitCode {
        if self.service_stop_error.is_some() {
            return ExitCode::Error;
        }
        if strict && !self.aux_failures.is_empty() {
            return ExitCode::Error;
        }
        requested
    }
}
