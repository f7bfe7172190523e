//! Shutdown orchestrator - the stop state machine.
//!
//! Runs `Start → (AuxStop)? → ServiceStop → Done`. The helper sweep is
//! skipped for service-only requests; both branches converge on the service
//! stop call. Expected failures (already-stopped targets, unreachable
//! service) are tolerated; everything else is folded into the outcome
//! rather than aborting the run.

use futures::future;
use log::{info, warn};

use crate::ctl::outcome::{AuxFailure, ExitCode, StopOutcome, StopRequest};
use crate::ipc::ServiceStopClient;
use crate::registry::ProcessRegistry;

/// Drives one stop request to completion against the two collaborators.
///
/// Stateless and idempotent: running it twice when everything is already
/// stopped yields an empty outcome both times.
pub struct Orchestrator<R, C> {
    registry: R,
    client: C,
}

impl<R: ProcessRegistry, C: ServiceStopClient> Orchestrator<R, C> {
    /// Create an orchestrator over a process registry and a stop client.
    pub fn new(registry: R, client: C) -> Self {
        Self { registry, client }
    }

    /// Run one stop sweep to completion.
    ///
    /// Infallible by construction: per-target and service errors are folded
    /// into the returned [`StopOutcome`]. `exit_code` is forwarded to the
    /// service so it reports the same code the command itself will return.
    pub async fn run(&self, request: &StopRequest, exit_code: ExitCode) -> StopOutcome {
        let mut aux_failures = Vec::new();

        if !request.only_service {
            let targets = self.registry.discover().await;
            info!("Stopping {} helper process(es)", targets.len());

            // join_all keeps results in discovery order, so the outcome is
            // deterministic even though terminations run concurrently.
            let results =
                future::join_all(targets.iter().map(|t| self.registry.terminate(t))).await;
            for (target, result) in targets.iter().zip(results) {
                if let Err(error) = result {
                    warn!("Failed to stop helper {}: {}", target.name, error);
                    aux_failures.push(AuxFailure {
                        target: target.name.clone(),
                        error,
                    });
                }
            }
        }

        let service_stop_error = match self.client.stop_service(exit_code).await {
            Ok(()) => {
                info!("Service acknowledged stop");
                None
            }
            Err(err) if err.is_benign() => {
                // Goal state already achieved: the service is not running.
                info!("Service already stopped: {}", err);
                None
            }
            Err(err) => {
                warn!("Failed to stop service: {}", err);
                Some(err)
            }
        };

        StopOutcome {
            aux_failures,
            service_stop_error,
        }
    }
}
