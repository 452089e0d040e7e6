//! What to do about a failed call.
//!
//! Front ends branch on the error code to decide between asking the user to
//! log in, showing a "not found" page, or a generic failure. That mapping
//! lives here so every front end agrees on it.

use depot_rpc::{ErrorCode, JsonRpcError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorDisposition {
    /// The caller lacks permission; re-authenticate.
    Unauthorized,
    /// The requested object does not exist.
    NotFound,
    /// The server could not be reached or answered with a non-200 status.
    Unavailable,
    /// The request was understood but rejected as invalid input.
    Invalid,
    /// Anything else.
    Failed,
}

impl ErrorDisposition {
    pub fn for_error(err: &JsonRpcError) -> Self {
        match err.kind() {
            Some(ErrorCode::AuthorizationFailure) => ErrorDisposition::Unauthorized,
            Some(ErrorCode::ObjectNotFound) => ErrorDisposition::NotFound,
            Some(ErrorCode::TransportFailure) => ErrorDisposition::Unavailable,
            Some(ErrorCode::Validation)
            | Some(ErrorCode::BadPackageIcon)
            | Some(ErrorCode::CaptchaBadResponse) => ErrorDisposition::Invalid,
            _ => ErrorDisposition::Failed,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorDisposition::Unauthorized => "unauthorized",
            ErrorDisposition::NotFound => "not-found",
            ErrorDisposition::Unavailable => "unavailable",
            ErrorDisposition::Invalid => "invalid",
            ErrorDisposition::Failed => "failed",
        }
    }
}

impl std::fmt::Display for ErrorDisposition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
