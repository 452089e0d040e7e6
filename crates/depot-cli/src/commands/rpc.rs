//! `depot rpc`: raw JSON-RPC invocation.

use depot_core::{DepotClient, DepotError};
use depot_rpc::RequestId;

pub async fn call(
    client: &DepotClient,
    endpoint: &str,
    method: &str,
    params_str: Option<&str>,
    id: Option<&str>,
) -> Result<serde_json::Value, DepotError> {
    let params = params_str.map(parse_params).transpose()?;
    let id = id.map(parse_id);

    client.call(endpoint, method, params, id).await
}

fn parse_params(raw: &str) -> Result<Vec<serde_json::Value>, DepotError> {
    let value: serde_json::Value = serde_json::from_str(raw)
        .map_err(|e| DepotError::InvalidArgument(format!("Invalid JSON params: {}", e)))?;
    Ok(match value {
        serde_json::Value::Array(items) => items,
        other => vec![other],
    })
}

/// Numeric text becomes a numeric id, anything else a string id.
fn parse_id(raw: &str) -> RequestId {
    match serde_json::from_str::<serde_json::Value>(raw) {
        Ok(serde_json::Value::Number(n)) => RequestId::Number(n),
        _ => RequestId::String(raw.to_string()),
    }
}
