//! Shutdown orchestration - stop requests, outcomes, and the state machine
//!
//! `driftr stop` brings down the helper processes and then the background
//! service; `driftr stop --shutdown` stops only the service. This module
//! owns the decision logic; process discovery and the control channel are
//! injected as capabilities.

pub mod orchestrator;
pub mod outcome;

pub use orchestrator::Orchestrator;
pub use outcome::{AuxFailure, ExitCode, StopOutcome, StopRequest};
