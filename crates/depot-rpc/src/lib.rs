//! Depot RPC: JSON-RPC 2.0 over HTTP for the Haiku Depot server API.
//!
//! Every API of the depot server (`/api/v1/pkg`, `/api/v1/user`, ...) is a
//! JSON-RPC endpoint. This crate is the one place that knows how to frame a
//! request, correlate it by id, inject the shared headers and make sense of
//! whatever comes back.
//!
//! # Architecture
//!
//! ```text
//! depot-cli     (command line front end)
//!      ↓
//! depot-core    (config, typed package API, error disposition)
//!      ↓
//! depot-rpc     (this crate: RpcClient → HttpTransport → reqwest)
//! ```
//!
//! # Outcomes of a call
//!
//! | HTTP status | Body                              | Outcome                              |
//! |-------------|-----------------------------------|--------------------------------------|
//! | 200         | `result` accepted by the policy   | `Ok(result)`                         |
//! | 200         | `error` object                    | `Err(error)` as sent by the server   |
//! | 200         | anything else                     | `Err(-32101 "invalid-response")`     |
//! | other       | anything                          | `Err(-32100 "transport-failure")`    |
//! | none        | transport failed                  | `Err(-32100 "transport-failure")`    |

pub mod client;
pub mod error;
pub mod response;
pub mod transport;
pub mod types;

pub use client::{ClientConfig, PendingCall, RpcClient, DEFAULT_FIRST_ID};
pub use error::{RpcError, TransportError};
pub use response::{ResponseBody, ResultPolicy};
pub use transport::{HttpRequest, HttpResponse, HttpTransport, ReqwestTransport};
pub use types::{
    ErrorCode, JsonRpcError, JsonRpcRequest, JsonRpcResponse, RequestId, AUTHORIZATION_FAILURE,
    AUTHORIZATION_RULE_CONFLICT, BAD_PKG_ICON, CAPTCHA_BAD_RESPONSE, INTERNAL_ERROR,
    INVALID_PARAMS, INVALID_REQUEST, INVALID_RESPONSE, JSONRPC_VERSION, METHOD_NOT_FOUND,
    OBJECT_NOT_FOUND, PARSE_ERROR, TRANSPORT_FAILURE, VALIDATION,
};
