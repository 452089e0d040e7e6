//! Client-side error types.

use crate::types::JsonRpcError;

/// Everything a caller of [`crate::RpcClient`] can get back as an error.
#[derive(Debug, thiserror::Error)]
pub enum RpcError {
    /// Caller misuse, reported before any request is issued.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The call was issued and rejected.
    #[error(transparent)]
    Call(#[from] JsonRpcError),
}

impl RpcError {
    /// The JSON-RPC error behind a rejected call, if that is what this is.
    pub fn as_call_error(&self) -> Option<&JsonRpcError> {
        match self {
            RpcError::Call(err) => Some(err),
            RpcError::InvalidArgument(_) => None,
        }
    }
}

/// Failure below the protocol layer: connection refused, DNS, timeout, a
/// request that could not be built.
#[derive(Debug, Clone, thiserror::Error)]
#[error("Transport error: {message}")]
pub struct TransportError {
    /// HTTP status reported alongside the failure, if any.
    pub status: Option<u16>,
    pub message: String,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            status: None,
            message: message.into(),
        }
    }

    pub fn with_status(status: u16, message: impl Into<String>) -> Self {
        Self {
            status: Some(status),
            message: message.into(),
        }
    }
}

impl From<TransportError> for JsonRpcError {
    fn from(err: TransportError) -> Self {
        JsonRpcError::transport_failure(err.status)
    }
}
