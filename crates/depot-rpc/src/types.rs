//! JSON-RPC 2.0 protocol types.
//!
//! These types are defined standalone (not tied to reqwest or any HTTP
//! framework) so they can be serialized/deserialized in any transport context.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Protocol version carried by every envelope.
pub const JSONRPC_VERSION: &str = "2.0";

/// Request identifier, a number or a string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RequestId {
    Number(serde_json::Number),
    String(String),
}

impl From<u64> for RequestId {
    fn from(id: u64) -> Self {
        RequestId::Number(id.into())
    }
}

impl From<i64> for RequestId {
    fn from(id: i64) -> Self {
        RequestId::Number(id.into())
    }
}

impl From<&str> for RequestId {
    fn from(id: &str) -> Self {
        RequestId::String(id.to_string())
    }
}

impl From<String> for RequestId {
    fn from(id: String) -> Self {
        RequestId::String(id)
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RequestId::Number(n) => write!(f, "{}", n),
            RequestId::String(s) => write!(f, "{}", s),
        }
    }
}

/// JSON-RPC 2.0 request object.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    /// Must be "2.0".
    pub jsonrpc: String,
    /// Method name, e.g. `"getPkg"`.
    pub method: String,
    /// Positional parameters. Serialized as `[]` when the caller gave none.
    pub params: Vec<serde_json::Value>,
    pub id: RequestId,
}

impl JsonRpcRequest {
    pub fn new(method: impl Into<String>, params: Vec<serde_json::Value>, id: RequestId) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.into(),
            method: method.into(),
            params,
            id,
        }
    }
}

/// JSON-RPC 2.0 error object.
///
/// This is also the rejection value of every call. A server error is kept
/// exactly as it arrived, so serializing it gives back the same JSON,
/// including members this type knows nothing about. Locally detected
/// failures use the same `{code, message, data}` shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, thiserror::Error)]
#[serde(transparent)]
#[error("{}", describe(.raw))]
pub struct JsonRpcError {
    raw: Value,
}

fn describe(raw: &Value) -> String {
    let code = raw.get("code").and_then(Value::as_i64);
    let message = raw.get("message").and_then(Value::as_str);
    match (code, message) {
        (Some(code), Some(message)) => format!("RPC error {}: {}", code, message),
        (Some(code), None) => format!("RPC error {}", code),
        _ => format!("RPC error: {}", raw),
    }
}

impl JsonRpcError {
    pub fn new(code: i64, message: impl Into<String>) -> Self {
        Self {
            raw: json!({"code": code, "message": message.into()}),
        }
    }

    pub fn with_data(code: i64, message: impl Into<String>, data: Value) -> Self {
        Self {
            raw: json!({"code": code, "message": message.into(), "data": data}),
        }
    }

    /// Wrap an `error` member received from a server, whatever its shape.
    pub fn from_value(raw: Value) -> Self {
        Self { raw }
    }

    /// `transport-failure`, carrying the HTTP status when there was one.
    pub fn transport_failure(status: Option<u16>) -> Self {
        match status {
            Some(status) => {
                Self::with_data(TRANSPORT_FAILURE, "transport-failure", Value::from(status))
            }
            None => Self::with_data(TRANSPORT_FAILURE, "transport-failure", Value::Null),
        }
    }

    /// `invalid-response`, carrying the HTTP status.
    pub fn invalid_response(status: u16) -> Self {
        Self::with_data(INVALID_RESPONSE, "invalid-response", Value::from(status))
    }

    /// Numeric `code`, if the object has an integer one.
    pub fn code(&self) -> Option<i64> {
        self.raw.get("code").and_then(Value::as_i64)
    }

    pub fn message(&self) -> Option<&str> {
        self.raw.get("message").and_then(Value::as_str)
    }

    /// The `data` member. `Some(&Value::Null)` for `"data": null`, `None`
    /// when the member is absent.
    pub fn data(&self) -> Option<&Value> {
        self.raw.get("data")
    }

    /// The error object as received or built.
    pub fn as_value(&self) -> &Value {
        &self.raw
    }

    pub fn into_value(self) -> Value {
        self.raw
    }

    /// The well-known code this error carries, if it is one.
    pub fn kind(&self) -> Option<ErrorCode> {
        self.code().and_then(ErrorCode::from_code)
    }
}

/// JSON-RPC 2.0 response envelope as it appears on the wire.
///
/// Both members are kept as raw values; [`crate::response::ResponseBody`]
/// decides what they mean.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    #[serde(default)]
    pub jsonrpc: Option<String>,
    #[serde(default)]
    pub id: Option<RequestId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<serde_json::Value>,
}

// ---------------------------------------------------------------------------
// Standard JSON-RPC 2.0 error codes
// ---------------------------------------------------------------------------

pub const PARSE_ERROR: i64 = -32700;
pub const INVALID_REQUEST: i64 = -32600;
pub const METHOD_NOT_FOUND: i64 = -32601;
pub const INVALID_PARAMS: i64 = -32602;
pub const INTERNAL_ERROR: i64 = -32603;

// Generated by the client itself
pub const TRANSPORT_FAILURE: i64 = -32100;
pub const INVALID_RESPONSE: i64 = -32101;

// Application-defined error codes sent by the depot server
pub const VALIDATION: i64 = -32800;
pub const OBJECT_NOT_FOUND: i64 = -32801;
pub const CAPTCHA_BAD_RESPONSE: i64 = -32802;
pub const AUTHORIZATION_FAILURE: i64 = -32803;
pub const BAD_PKG_ICON: i64 = -32804;
pub const AUTHORIZATION_RULE_CONFLICT: i64 = -32806;

/// Named view over the error codes above, for `match`ing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    ParseError,
    InvalidRequest,
    MethodNotFound,
    InvalidParameters,
    InternalError,
    TransportFailure,
    InvalidResponse,
    Validation,
    ObjectNotFound,
    CaptchaBadResponse,
    AuthorizationFailure,
    BadPackageIcon,
    AuthorizationRuleConflict,
}

impl ErrorCode {
    pub const ALL: [ErrorCode; 13] = [
        ErrorCode::ParseError,
        ErrorCode::InvalidRequest,
        ErrorCode::MethodNotFound,
        ErrorCode::InvalidParameters,
        ErrorCode::InternalError,
        ErrorCode::TransportFailure,
        ErrorCode::InvalidResponse,
        ErrorCode::Validation,
        ErrorCode::ObjectNotFound,
        ErrorCode::CaptchaBadResponse,
        ErrorCode::AuthorizationFailure,
        ErrorCode::BadPackageIcon,
        ErrorCode::AuthorizationRuleConflict,
    ];

    pub fn code(self) -> i64 {
        match self {
            ErrorCode::ParseError => PARSE_ERROR,
            ErrorCode::InvalidRequest => INVALID_REQUEST,
            ErrorCode::MethodNotFound => METHOD_NOT_FOUND,
            ErrorCode::InvalidParameters => INVALID_PARAMS,
            ErrorCode::InternalError => INTERNAL_ERROR,
            ErrorCode::TransportFailure => TRANSPORT_FAILURE,
            ErrorCode::InvalidResponse => INVALID_RESPONSE,
            ErrorCode::Validation => VALIDATION,
            ErrorCode::ObjectNotFound => OBJECT_NOT_FOUND,
            ErrorCode::CaptchaBadResponse => CAPTCHA_BAD_RESPONSE,
            ErrorCode::AuthorizationFailure => AUTHORIZATION_FAILURE,
            ErrorCode::BadPackageIcon => BAD_PKG_ICON,
            ErrorCode::AuthorizationRuleConflict => AUTHORIZATION_RULE_CONFLICT,
        }
    }

    pub fn from_code(code: i64) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.code() == code)
    }

    /// Whether the client produces this code itself rather than the server.
    pub fn is_local(self) -> bool {
        matches!(self, ErrorCode::TransportFailure | ErrorCode::InvalidResponse)
    }
}
