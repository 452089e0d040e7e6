//! JSON-RPC 2.0 client.
//!
//! `RpcClient` performs one request/response cycle per [`RpcClient::call`]
//! and folds every way that can go wrong into a [`JsonRpcError`]. It owns
//! the two pieces of state that outlive a call: the request-id counter and
//! the default headers sent with every request.
//!
//! # Example
//!
//! ```ignore
//! use depot_rpc::{ClientConfig, RpcClient};
//! use serde_json::json;
//!
//! let client = RpcClient::new(ClientConfig::default());
//! client.set_header("Authorization", Some("Bearer abc123"))?;
//!
//! let pkg = client
//!     .call(
//!         "http://localhost:8080/api/v1/pkg",
//!         "getPkg",
//!         Some(vec![json!({ "name": "vim", "versionType": "LATEST" })]),
//!         None,
//!     )?
//!     .await?;
//! ```

use std::collections::BTreeMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};
use std::time::Duration;

use serde_json::Value;

use crate::error::RpcError;
use crate::response::{ResponseBody, ResultPolicy};
use crate::transport::{HttpRequest, HttpTransport, ReqwestTransport};
use crate::types::{JsonRpcError, JsonRpcRequest, RequestId};

/// First auto-generated request id.
pub const DEFAULT_FIRST_ID: u64 = 1000;

/// An issued call. Resolves exactly once.
pub type PendingCall = Pin<Box<dyn Future<Output = Result<Value, JsonRpcError>> + Send + 'static>>;

/// Client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Seed of the request-id counter.
    pub first_id: u64,
    /// Which `result` members count as success.
    pub result_policy: ResultPolicy,
    /// Whole-exchange timeout handed to the HTTP client. `None` waits forever.
    pub timeout: Option<Duration>,
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            first_id: DEFAULT_FIRST_ID,
            result_policy: ResultPolicy::default(),
            timeout: Some(Duration::from_secs(30)),
            user_agent: format!("depot-rpc/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// JSON-RPC 2.0 over HTTP POST.
///
/// Cheap to share: wrap it in an `Arc` or hand out references. Every call
/// made through one instance draws from the same id counter and sees the
/// same default headers.
pub struct RpcClient<T = ReqwestTransport> {
    transport: Arc<T>,
    next_id: AtomicU64,
    headers: RwLock<BTreeMap<String, String>>,
    result_policy: ResultPolicy,
}

impl RpcClient<ReqwestTransport> {
    /// Create a client that talks HTTP through `reqwest`.
    pub fn new(config: ClientConfig) -> Self {
        let transport = ReqwestTransport::new(config.timeout, &config.user_agent);
        Self::with_transport(transport, config)
    }
}

impl<T: HttpTransport> RpcClient<T> {
    /// Create a client over a custom transport.
    pub fn with_transport(transport: T, config: ClientConfig) -> Self {
        Self {
            transport: Arc::new(transport),
            next_id: AtomicU64::new(config.first_id),
            headers: RwLock::new(BTreeMap::new()),
            result_policy: config.result_policy,
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn result_policy(&self) -> ResultPolicy {
        self.result_policy
    }

    /// Set or clear a header sent with every subsequent request.
    ///
    /// A `None` or empty value removes the header; removing one that was
    /// never set is fine. Names match case-insensitively, and the last
    /// spelling used is the one sent. Calls already issued keep the headers
    /// they had.
    pub fn set_header(&self, name: &str, value: Option<&str>) -> Result<(), RpcError> {
        if name.is_empty() {
            return Err(RpcError::InvalidArgument(
                "the name of the http header is required".into(),
            ));
        }

        let mut headers = self.headers.write().unwrap_or_else(|e| e.into_inner());
        headers.retain(|existing, _| !existing.eq_ignore_ascii_case(name));
        if let Some(value) = value.filter(|v| !v.is_empty()) {
            headers.insert(name.to_string(), value.to_string());
        }
        Ok(())
    }

    /// Snapshot of the current default headers.
    pub fn headers(&self) -> BTreeMap<String, String> {
        self.headers.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Issue a JSON-RPC call.
    ///
    /// Argument checks, id allocation and header capture all happen here,
    /// before this returns; the HTTP exchange runs when the returned future
    /// is polled. Dropping the future before it is polled abandons the call:
    /// nothing is sent, and the id it was given is not reused. Empty `endpoint` or `method` fails with
    /// [`RpcError::InvalidArgument`] without consuming an id.
    pub fn call(
        &self,
        endpoint: &str,
        method: &str,
        params: Option<Vec<Value>>,
        id: Option<RequestId>,
    ) -> Result<PendingCall, RpcError> {
        if endpoint.is_empty() {
            return Err(RpcError::InvalidArgument(
                "the endpoint is required to invoke a json-rpc method".into(),
            ));
        }
        if method.is_empty() {
            return Err(RpcError::InvalidArgument(
                "the method is required to invoke a json-rpc method".into(),
            ));
        }

        let id = id.unwrap_or_else(|| RequestId::from(self.next_id.fetch_add(1, Ordering::Relaxed)));
        let envelope = JsonRpcRequest::new(method, params.unwrap_or_default(), id.clone());
        let body = serde_json::to_value(&envelope)
            .map_err(|e| RpcError::InvalidArgument(format!("Unserializable params: {}", e)))?;

        let request = HttpRequest {
            url: endpoint.to_string(),
            headers: self.request_headers(),
            body,
        };

        tracing::debug!("JSON-RPC -> {} {} (id={})", endpoint, method, id);

        let transport = Arc::clone(&self.transport);
        let policy = self.result_policy;
        let method = method.to_string();

        let pending: PendingCall = Box::pin(async move {
            let response = match transport.post(request).await {
                Ok(response) => response,
                Err(e) => {
                    tracing::warn!("JSON-RPC {} (id={}) transport failure: {}", method, id, e);
                    return Err(e.into());
                }
            };

            if response.status != 200 {
                tracing::warn!(
                    "JSON-RPC {} (id={}) returned HTTP {}",
                    method,
                    id,
                    response.status
                );
                return Err(JsonRpcError::transport_failure(Some(response.status)));
            }

            let body = ResponseBody::classify(response.body.as_ref(), policy);
            match &body {
                ResponseBody::Success(_) => {
                    tracing::debug!("JSON-RPC <- {} (id={}) ok", method, id)
                }
                ResponseBody::Failure(err) => {
                    tracing::debug!("JSON-RPC <- {} (id={}) {}", method, id, err)
                }
                ResponseBody::Malformed => {
                    tracing::warn!("JSON-RPC <- {} (id={}) invalid response", method, id)
                }
            }
            body.into_outcome(response.status)
        });
        Ok(pending)
    }

    /// [`call`](Self::call) and wait for it, with both failure classes in
    /// one error type.
    pub async fn invoke(
        &self,
        endpoint: &str,
        method: &str,
        params: Option<Vec<Value>>,
        id: Option<RequestId>,
    ) -> Result<Value, RpcError> {
        let pending = self.call(endpoint, method, params, id)?;
        Ok(pending.await?)
    }

    /// `Content-Type: application/json` overlaid by the default headers.
    fn request_headers(&self) -> BTreeMap<String, String> {
        let defaults = self.headers.read().unwrap_or_else(|e| e.into_inner());
        let mut headers = BTreeMap::new();
        if !defaults.keys().any(|k| k.eq_ignore_ascii_case("content-type")) {
            headers.insert("Content-Type".to_string(), "application/json".to_string());
        }
        for (name, value) in defaults.iter() {
            headers.insert(name.clone(), value.clone());
        }
        headers
    }
}

impl<T> std::fmt::Debug for RpcClient<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RpcClient")
            .field("next_id", &self.next_id.load(Ordering::Relaxed))
            .field("result_policy", &self.result_policy)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TransportError;
    use crate::transport::HttpResponse;
    use serde_json::json;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Transport that records requests and replays canned responses.
    #[derive(Default)]
    struct ScriptedTransport {
        pub requests: Mutex<Vec<HttpRequest>>,
        pub replies: Mutex<VecDeque<Result<HttpResponse, TransportError>>>,
    }

    impl ScriptedTransport {
        pub fn replying(replies: Vec<Result<HttpResponse, TransportError>>) -> Self {
            Self {
                requests: Mutex::new(Vec::new()),
                replies: Mutex::new(replies.into()),
            }
        }

        pub fn sent(&self) -> Vec<HttpRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    impl HttpTransport for ScriptedTransport {
        async fn post(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
            self.requests.lock().unwrap().push(request);
            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Ok(ok(json!({"jsonrpc": "2.0", "result": true}))))
        }
    }

    fn ok(body: Value) -> HttpResponse {
        HttpResponse {
            status: 200,
            body: Some(body),
        }
    }

    fn client(replies: Vec<Result<HttpResponse, TransportError>>) -> RpcClient<ScriptedTransport> {
        RpcClient::with_transport(ScriptedTransport::replying(replies), ClientConfig::default())
    }

    const EP: &str = "http://depot.test/api/v1/pkg";

    #[tokio::test]
    async fn test_auto_ids_are_distinct_and_increasing() {
        let client = client(vec![]);
        for _ in 0..5 {
            client.call(EP, "m", None, None).unwrap().await.unwrap();
        }

        let ids: Vec<u64> = client
            .transport()
            .sent()
            .iter()
            .map(|r| r.body["id"].as_u64().unwrap())
            .collect();
        assert_eq!(ids, vec![1000, 1001, 1002, 1003, 1004]);
    }

    #[tokio::test]
    async fn test_caller_id_used_as_is_and_counter_untouched() {
        let client = client(vec![]);
        client
            .call(EP, "m", None, Some(RequestId::from("req-7")))
            .unwrap()
            .await
            .unwrap();
        client.call(EP, "m", None, None).unwrap().await.unwrap();

        let sent = client.transport().sent();
        assert_eq!(sent[0].body["id"], "req-7");
        assert_eq!(sent[1].body["id"], 1000);
    }

    #[tokio::test]
    async fn test_envelope_defaults_params_to_empty_array() {
        let client = client(vec![]);
        client.call(EP, "getPkg", None, None).unwrap().await.unwrap();

        let sent = client.transport().sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].url, EP);
        assert_eq!(
            sent[0].body,
            json!({"jsonrpc": "2.0", "method": "getPkg", "params": [], "id": 1000})
        );
        assert_eq!(sent[0].header("Content-Type"), Some("application/json"));
    }

    #[tokio::test]
    async fn test_missing_endpoint_or_method_fails_before_sending() {
        let client = client(vec![]);

        let err = client.call("", "m", Some(vec![]), None).err().unwrap();
        assert!(matches!(err, RpcError::InvalidArgument(_)));
        let err = client.call("ep", "", Some(vec![]), None).err().unwrap();
        assert!(matches!(err, RpcError::InvalidArgument(_)));

        assert!(client.transport().sent().is_empty());

        // No id was consumed by the failed calls.
        client.call(EP, "m", None, None).unwrap().await.unwrap();
        assert_eq!(client.transport().sent()[0].body["id"], 1000);
    }

    #[tokio::test]
    async fn test_result_fulfills() {
        let client = client(vec![Ok(ok(json!({"jsonrpc": "2.0", "id": 1000, "result": {"x": 1}})))]);
        let result = client.call(EP, "m", None, None).unwrap().await.unwrap();
        assert_eq!(result, json!({"x": 1}));
    }

    #[tokio::test]
    async fn test_server_error_passes_through() {
        let client = client(vec![Ok(ok(json!({
            "jsonrpc": "2.0",
            "id": 1000,
            "error": {"code": -32601, "message": "not found", "data": null}
        })))]);
        let err = client.call(EP, "m", None, None).unwrap().await.unwrap_err();
        assert_eq!(
            serde_json::to_value(&err).unwrap(),
            json!({"code": -32601, "message": "not found", "data": null})
        );
    }

    #[tokio::test]
    async fn test_server_error_without_message_passes_through() {
        let client = client(vec![Ok(ok(json!({
            "jsonrpc": "2.0",
            "id": 1000,
            "error": {"code": -32801, "data": {"entityName": "Pkg"}, "retry": false}
        })))]);
        let err = client.call(EP, "m", None, None).unwrap().await.unwrap_err();
        assert_eq!(err.code(), Some(-32801));
        assert_eq!(err.message(), None);
        assert_eq!(
            err.as_value(),
            &json!({"code": -32801, "data": {"entityName": "Pkg"}, "retry": false})
        );
    }

    #[tokio::test]
    async fn test_server_error_data_kept() {
        let client = client(vec![Ok(ok(json!({
            "error": {"code": -32800, "message": "validationerror", "data": [{"property": "name"}]}
        })))]);
        let err = client.call(EP, "m", None, None).unwrap().await.unwrap_err();
        assert_eq!(err.code(), Some(-32800));
        assert_eq!(err.data(), Some(&json!([{"property": "name"}])));
    }

    #[tokio::test]
    async fn test_non_200_is_transport_failure() {
        let client = client(vec![Ok(HttpResponse {
            status: 500,
            body: Some(json!({"result": {"ignored": true}})),
        })]);
        let err = client.call(EP, "m", None, None).unwrap().await.unwrap_err();
        assert_eq!(
            err,
            JsonRpcError::with_data(-32100, "transport-failure", json!(500))
        );
    }

    #[tokio::test]
    async fn test_transport_rejection_is_transport_failure() {
        let client = client(vec![
            Err(TransportError::new("connection refused")),
            Err(TransportError::with_status(504, "gateway timeout")),
        ]);

        let err = client.call(EP, "m", None, None).unwrap().await.unwrap_err();
        assert_eq!(err.code(), Some(-32100));
        assert_eq!(err.message(), Some("transport-failure"));
        assert_eq!(err.data(), Some(&Value::Null));

        let err = client.call(EP, "m", None, None).unwrap().await.unwrap_err();
        assert_eq!(err.data(), Some(&json!(504)));
    }

    #[tokio::test]
    async fn test_empty_body_is_invalid_response() {
        let client = client(vec![
            Ok(ok(json!({}))),
            Ok(HttpResponse {
                status: 200,
                body: None,
            }),
        ]);
        let expected = JsonRpcError::with_data(-32101, "invalid-response", json!(200));

        let err = client.call(EP, "m", None, None).unwrap().await.unwrap_err();
        assert_eq!(err, expected);
        let err = client.call(EP, "m", None, None).unwrap().await.unwrap_err();
        assert_eq!(err, expected);
    }

    #[tokio::test]
    async fn test_falsy_result_under_each_policy() {
        let replies = || vec![Ok(ok(json!({"jsonrpc": "2.0", "id": 1000, "result": 0})))];

        let legacy = client(replies());
        let err = legacy.call(EP, "m", None, None).unwrap().await.unwrap_err();
        assert_eq!(err.code(), Some(-32101));

        let config = ClientConfig {
            result_policy: ResultPolicy::Present,
            ..ClientConfig::default()
        };
        let strict = RpcClient::with_transport(ScriptedTransport::replying(replies()), config);
        let result = strict.call(EP, "m", None, None).unwrap().await.unwrap();
        assert_eq!(result, json!(0));
    }

    #[tokio::test]
    async fn test_header_set_then_cleared() {
        let client = client(vec![]);
        client.set_header("X", Some("v")).unwrap();

        let first = client.call(EP, "m", None, None).unwrap();
        client.set_header("X", Some("")).unwrap();
        let second = client.call(EP, "m", None, None).unwrap();
        first.await.unwrap();
        second.await.unwrap();

        let sent = client.transport().sent();
        assert_eq!(sent[0].header("X"), Some("v"));
        assert_eq!(sent[1].header("X"), None);
        assert!(client.headers().is_empty());
    }

    #[tokio::test]
    async fn test_header_overwrite_and_remove_absent() {
        let client = client(vec![]);
        client.set_header("Authorization", Some("Bearer a")).unwrap();
        client.set_header("Authorization", Some("Bearer b")).unwrap();
        client.set_header("X-Never-Set", None).unwrap();

        assert_eq!(client.headers().get("Authorization").map(String::as_str), Some("Bearer b"));
        assert_eq!(client.headers().len(), 1);

        let err = client.set_header("", Some("v")).unwrap_err();
        assert!(matches!(err, RpcError::InvalidArgument(_)));
    }

    #[tokio::test]
    async fn test_header_names_are_case_insensitive() {
        let client = client(vec![]);
        client.set_header("authorization", Some("Bearer old")).unwrap();
        client.set_header("Authorization", Some("Bearer new")).unwrap();
        client.call(EP, "m", None, None).unwrap().await.unwrap();

        let sent = client.transport().sent();
        assert_eq!(sent[0].headers.get("Authorization").map(String::as_str), Some("Bearer new"));
        assert!(!sent[0].headers.contains_key("authorization"));
        assert_eq!(client.headers().len(), 1);

        client.set_header("AUTHORIZATION", None).unwrap();
        assert!(client.headers().is_empty());
        client.call(EP, "m", None, None).unwrap().await.unwrap();
        assert_eq!(client.transport().sent()[1].header("authorization"), None);
    }

    #[tokio::test]
    async fn test_dropped_call_sends_nothing() {
        let client = client(vec![]);
        let pending = client.call(EP, "m", None, None).unwrap();
        drop(pending);
        assert!(client.transport().sent().is_empty());

        client.call(EP, "m", None, None).unwrap().await.unwrap();
        assert_eq!(client.transport().sent()[0].body["id"], 1001);
    }

    #[tokio::test]
    async fn test_default_header_overrides_content_type() {
        let client = client(vec![]);
        client
            .set_header("content-type", Some("application/json-rpc"))
            .unwrap();
        client.call(EP, "m", None, None).unwrap().await.unwrap();

        let sent = client.transport().sent();
        assert_eq!(sent[0].header("Content-Type"), Some("application/json-rpc"));
        assert_eq!(sent[0].headers.len(), 1);
    }

    #[tokio::test]
    async fn test_concurrent_calls_get_distinct_ids() {
        let client = client(vec![]);
        let a = client.call(EP, "a", None, None).unwrap();
        let b = client.call(EP, "b", None, None).unwrap();
        let (ra, rb) = tokio::join!(a, b);
        assert!(ra.is_ok() && rb.is_ok());

        let sent = client.transport().sent();
        assert_eq!(sent.len(), 2);
        assert_ne!(sent[0].body["id"], sent[1].body["id"]);
    }

    #[tokio::test]
    async fn test_failure_does_not_poison_client() {
        let client = client(vec![
            Err(TransportError::new("reset")),
            Ok(ok(json!({"result": "fine"}))),
        ]);
        assert!(client.call(EP, "m", None, None).unwrap().await.is_err());
        let result = client.call(EP, "m", None, None).unwrap().await.unwrap();
        assert_eq!(result, json!("fine"));
    }

    #[tokio::test]
    async fn test_invoke_folds_errors() {
        let client = client(vec![Ok(HttpResponse {
            status: 403,
            body: None,
        })]);

        let err = client.invoke("", "m", None, None).await.unwrap_err();
        assert!(err.as_call_error().is_none());

        let err = client.invoke(EP, "m", None, None).await.unwrap_err();
        assert_eq!(err.as_call_error().and_then(|e| e.code()), Some(-32100));
    }
}
