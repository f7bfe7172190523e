//! Control-channel message types for CLI ↔ service communication.
//!
//! Uses JSON Lines (newline-delimited JSON) over a Unix stream socket.
//! Message schema uses familiar field names (id, method, params, result,
//! error) but does NOT implement JSON-RPC 2.0 specification.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Request sent from the CLI to the service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CtlRequest {
    /// Unique request ID for correlating responses.
    pub id: u64,
    /// Method name (e.g., "ctl.stop").
    pub method: String,
    /// Method parameters as JSON value.
    #[serde(default)]
    pub params: Value,
}

impl CtlRequest {
    /// Create a new request with the given method and params.
    pub fn new(id: u64, method: impl Into<String>, params: Value) -> Self {
        Self {
            id,
            method: method.into(),
            params,
        }
    }

    /// Create a stop request carrying the exit code the service should
    /// report when it goes down.
    pub fn stop(id: u64, exit_code: i32) -> Self {
        Self::new(id, Methods::CTL_STOP, serde_json::json!({ "exit_code": exit_code }))
    }
}

/// Response sent from the service to the CLI.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CtlResponse {
    /// Request ID this response corresponds to.
    pub id: u64,
    /// Result value on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    /// Error details on failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<CtlError>,
}

impl CtlResponse {
    /// Create a success response.
    pub fn success(id: u64, result: Value) -> Self {
        Self {
            id,
            result: Some(result),
            error: None,
        }
    }

    /// Create an error response.
    pub fn error(id: u64, error: CtlError) -> Self {
        Self {
            id,
            result: None,
            error: Some(error),
        }
    }

    /// Check if this response indicates success.
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// Error details in a service response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CtlError {
    /// Error code.
    pub code: i32,
    /// Human-readable error message.
    pub message: String,
}

impl CtlError {
    /// Create a new error.
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

/// Known method names as constants.
pub struct Methods;

impl Methods {
    /// Ask the service to exit with a given status code.
    pub const CTL_STOP: &'static str = "ctl.stop";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ctl_request_new() {
        let req = CtlRequest::new(1, "test.method", serde_json::json!({"key": "value"}));
        assert_eq!(req.id, 1);
        assert_eq!(req.method, "test.method");
        assert_eq!(req.params["key"], "value");
    }

    #[test]
    fn test_ctl_request_stop() {
        let req = CtlRequest::stop(7, 0);
        assert_eq!(req.id, 7);
        assert_eq!(req.method, "ctl.stop");
        assert_eq!(req.params["exit_code"], 0);
    }

    #[test]
    fn test_ctl_request_stop_forwards_code() {
        let req = CtlRequest::stop(1, 4);
        assert_eq!(req.params["exit_code"], 4);
    }

    #[test]
    fn test_ctl_request_serialize() {
        let req = CtlRequest::stop(1, 0);
        let json = serde_json::to_string(&req).unwrap();
        assert!(json.contains("\"id\":1"));
        assert!(json.contains("\"method\":\"ctl.stop\""));
        assert!(json.contains("\"exit_code\":0"));
    }

    #[test]
    fn test_ctl_response_success() {
        let resp = CtlResponse::success(1, serde_json::json!({"status": "ok"}));
        assert!(resp.is_success());
        assert!(resp.result.is_some());
        assert!(resp.error.is_none());
    }

    #[test]
    fn test_ctl_response_error() {
        let resp = CtlResponse::error(1, CtlError::new(1002, "busy"));
        assert!(!resp.is_success());
        assert!(resp.result.is_none());
        assert_eq!(resp.error.unwrap().message, "busy");
    }

    #[test]
    fn test_request_roundtrip() {
        let req = CtlRequest::stop(123, 2);
        let json = serde_json::to_string(&req).unwrap();
        let parsed: CtlRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.id, 123);
        assert_eq!(parsed.method, "ctl.stop");
        assert_eq!(parsed.params["exit_code"], 2);
    }

    #[test]
    fn test_response_roundtrip() {
        let resp = CtlResponse::success(1, serde_json::json!({"stopping": true}));
        let json = serde_json::to_string(&resp).unwrap();
        let parsed: CtlResponse = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.id, 1);
        assert!(parsed.is_success());
    }

    #[test]
    fn test_methods_constants() {
        assert_eq!(Methods::CTL_STOP, "ctl.stop");
    }
}
