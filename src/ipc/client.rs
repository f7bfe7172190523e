//! Control client for asking the background service to exit.
//!
//! Connects to the service Unix socket, sends a single `ctl.stop` request,
//! and waits for acknowledgement with a bounded timeout. No retries at this
//! layer: a stop is attempted exactly once per invocation.

use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::UnixStream;

use crate::ctl::ExitCode;
use crate::error::ServiceStopError;
use crate::ipc::default_socket_path;
use crate::ipc::messages::{CtlRequest, CtlResponse};

/// Capability to ask the background service to exit with a status code.
///
/// `Unreachable` is the expected result when the service is already down
/// and must stay distinguishable from the other failure subtypes.
#[async_trait]
pub trait ServiceStopClient: Send + Sync {
    /// Single stop attempt; blocks until the service acknowledges or the
    /// transport reports failure or timeout.
    async fn stop_service(&self, exit_code: ExitCode) -> Result<(), ServiceStopError>;
}

/// Configuration for the socket control client.
#[derive(Debug, Clone)]
pub struct CtlClientConfig {
    /// Path to the service Unix socket.
    pub socket_path: PathBuf,
    /// Request timeout in milliseconds.
    pub request_timeout_ms: u64,
}

impl Default for CtlClientConfig {
    fn default() -> Self {
        Self {
            socket_path: default_socket_path(),
            request_timeout_ms: 5000,
        }
    }
}

impl CtlClientConfig {
    /// Create config with custom socket path.
    pub fn with_socket(path: impl Into<PathBuf>) -> Self {
        Self {
            socket_path: path.into(),
            ..Default::default()
        }
    }
}

/// Stop client over the service Unix socket.
pub struct SocketCtlClient {
    config: CtlClientConfig,
}

impl SocketCtlClient {
    /// Create a new client with config.
    pub fn new(config: CtlClientConfig) -> Self {
        Self { config }
    }

    /// Create client with default config.
    pub fn with_default_config() -> Self {
        Self::new(CtlClientConfig::default())
    }

    /// Create client with socket path.
    pub fn with_socket(path: impl Into<PathBuf>) -> Self {
        Self::new(CtlClientConfig::with_socket(path))
    }

    /// Get socket path.
    pub fn socket_path(&self) -> &Path {
        &self.config.socket_path
    }

    async fn stop_once(&self, exit_code: ExitCode) -> Result<(), ServiceStopError> {
        let stream = UnixStream::connect(&self.config.socket_path)
            .await
            .map_err(|e| ServiceStopError::Unreachable(e.to_string()))?;
        let (reader, mut writer) = stream.into_split();

        let request = CtlRequest::stop(1, exit_code.code());
        let mut json = serde_json::to_string(&request)
            .map_err(|e| ServiceStopError::Transport(format!("failed to serialize: {e}")))?;
        json.push('\n');
        writer
            .write_all(json.as_bytes())
            .await
            .map_err(|e| ServiceStopError::Transport(format!("failed to write: {e}")))?;
        writer
            .flush()
            .await
            .map_err(|e| ServiceStopError::Transport(format!("failed to flush: {e}")))?;

        let mut reader = BufReader::new(reader);
        let mut line = String::new();
        let n = reader
            .read_line(&mut line)
            .await
            .map_err(|e| ServiceStopError::Transport(format!("failed to read: {e}")))?;
        if n == 0 {
            return Err(ServiceStopError::Transport(
                "connection closed before response".into(),
            ));
        }

        let response: CtlResponse = serde_json::from_str(line.trim())
            .map_err(|e| ServiceStopError::Malformed(e.to_string()))?;
        if let Some(err) = response.error {
            return Err(ServiceStopError::Rejected(err.message));
        }

        debug!("Service acknowledged stop (exit code {})", exit_code.code());
        Ok(())
    }
}

#[async_trait]
impl ServiceStopClient for SocketCtlClient {
    async fn stop_service(&self, exit_code: ExitCode) -> Result<(), ServiceStopError> {
        let timeout = Duration::from_millis(self.config.request_timeout_ms);
        match tokio::time::timeout(timeout, self.stop_once(exit_code)).await {
            Ok(result) => result,
            Err(_) => Err(ServiceStopError::Timeout(self.config.request_timeout_ms)),
        }
    }
}
