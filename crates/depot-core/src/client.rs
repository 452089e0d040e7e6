//! Shared client for one depot server.

use depot_rpc::{HttpTransport, ReqwestTransport, RpcClient};

use crate::api::pkg::PkgApi;
use crate::api::Endpoint;
use crate::config::DepotConfig;
use crate::error::DepotError;

const AUTHORIZATION: &str = "Authorization";

/// One [`RpcClient`] bound to a server, shared by every API facade.
///
/// Construct once and pass by reference (or `Arc`); all calls then share
/// the request-id sequence and the authentication header.
pub struct DepotClient<T = ReqwestTransport> {
    config: DepotConfig,
    rpc: RpcClient<T>,
}

impl DepotClient<ReqwestTransport> {
    pub fn new(config: DepotConfig) -> Result<Self, DepotError> {
        let rpc = RpcClient::new(config.client.clone());
        Self::from_rpc(config, rpc)
    }
}

impl<T: HttpTransport> DepotClient<T> {
    pub fn with_transport(config: DepotConfig, transport: T) -> Result<Self, DepotError> {
        let rpc = RpcClient::with_transport(transport, config.client.clone());
        Self::from_rpc(config, rpc)
    }

    fn from_rpc(config: DepotConfig, rpc: RpcClient<T>) -> Result<Self, DepotError> {
        let client = Self { config, rpc };
        if let Some(token) = client.config.auth_token.clone() {
            client.set_auth_token(Some(&token))?;
        }
        Ok(client)
    }

    pub fn config(&self) -> &DepotConfig {
        &self.config
    }

    pub fn rpc(&self) -> &RpcClient<T> {
        &self.rpc
    }

    /// Install or clear the bearer token sent with every request.
    pub fn set_auth_token(&self, token: Option<&str>) -> Result<(), DepotError> {
        let value = token.filter(|t| !t.is_empty()).map(|t| format!("Bearer {}", t));
        self.rpc.set_header(AUTHORIZATION, value.as_deref())?;
        tracing::debug!(
            "Authorization header {}",
            if value.is_some() { "set" } else { "cleared" }
        );
        Ok(())
    }

    pub fn pkg(&self) -> PkgApi<'_, T> {
        PkgApi::new(&self.rpc, self.config.endpoint(Endpoint::Pkg))
    }

    /// Raw call against an endpoint path or absolute URL.
    pub async fn call(
        &self,
        endpoint: &str,
        method: &str,
        params: Option<Vec<serde_json::Value>>,
        id: Option<depot_rpc::RequestId>,
    ) -> Result<serde_json::Value, DepotError> {
        if endpoint.is_empty() {
            return Err(DepotError::InvalidArgument(
                "the endpoint is required to invoke a json-rpc method".into(),
            ));
        }
        let url = self.config.resolve(endpoint);
        Ok(self.rpc.invoke(&url, method, params, id).await?)
    }
}
