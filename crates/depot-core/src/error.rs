//! Core error type for depot API calls.

use depot_rpc::{JsonRpcError, RpcError};

use crate::disposition::ErrorDisposition;

#[derive(Debug, thiserror::Error)]
pub enum DepotError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error(transparent)]
    Rpc(JsonRpcError),

    #[error("Failed to encode request: {0}")]
    Encode(String),

    #[error("Failed to decode result: {0}")]
    Decode(String),
}

impl DepotError {
    /// The remote error, when the call got as far as the server (or the
    /// transport).
    pub fn rpc_error(&self) -> Option<&JsonRpcError> {
        match self {
            DepotError::Rpc(err) => Some(err),
            _ => None,
        }
    }

    pub fn disposition(&self) -> ErrorDisposition {
        match self {
            DepotError::Rpc(err) => ErrorDisposition::for_error(err),
            DepotError::InvalidArgument(_) | DepotError::Encode(_) | DepotError::Decode(_) => {
                ErrorDisposition::Failed
            }
        }
    }
}

impl From<RpcError> for DepotError {
    fn from(err: RpcError) -> Self {
        match err {
            RpcError::InvalidArgument(msg) => DepotError::InvalidArgument(msg),
            RpcError::Call(err) => DepotError::Rpc(err),
        }
    }
}

impl From<JsonRpcError> for DepotError {
    fn from(err: JsonRpcError) -> Self {
        DepotError::Rpc(err)
    }
}
