//! Typed access to the depot server's JSON-RPC endpoints.
//!
//! Every depot API method takes exactly one request object, sent as a
//! one-element positional `params` array.

pub mod pkg;

use depot_rpc::{HttpTransport, RpcClient};
use serde::{de::DeserializeOwned, Serialize};

use crate::error::DepotError;

/// The server's JSON-RPC endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Pkg,
    User,
    UserRating,
    Repository,
    Miscellaneous,
    Captcha,
    Authorization,
}

impl Endpoint {
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::Pkg => "/api/v1/pkg",
            Endpoint::User => "/api/v1/user",
            Endpoint::UserRating => "/api/v1/userrating",
            Endpoint::Repository => "/api/v1/repository",
            Endpoint::Miscellaneous => "/api/v1/miscellaneous",
            Endpoint::Captcha => "/api/v1/captcha",
            Endpoint::Authorization => "/api/v1/authorization",
        }
    }
}

/// Call `method` with a single request object and decode the result.
pub(crate) async fn invoke<T, P, R>(
    client: &RpcClient<T>,
    endpoint: &str,
    method: &str,
    request: &P,
) -> Result<R, DepotError>
where
    T: HttpTransport,
    P: Serialize,
    R: DeserializeOwned,
{
    let params = serde_json::to_value(request)
        .map_err(|e| DepotError::Encode(format!("{}: {}", method, e)))?;

    let value = client.invoke(endpoint, method, Some(vec![params]), None).await?;

    serde_json::from_value(value).map_err(|e| DepotError::Decode(format!("{}: {}", method, e)))
}
