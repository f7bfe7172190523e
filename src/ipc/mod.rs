//! Control channel - Unix socket client for CLI ↔ service communication
//!
//! This module provides:
//! - Message types for control requests and responses
//! - The stop-client capability trait and its socket implementation

pub mod client;
pub mod messages;

pub use client::{CtlClientConfig, ServiceStopClient, SocketCtlClient};
pub use messages::{CtlError, CtlRequest, CtlResponse, Methods};

use std::path::PathBuf;

/// Default service socket path inside the runtime directory.
pub fn default_socket_path() -> PathBuf {
    crate::registry::default_runtime_dir().join("daemon.sock")
}
