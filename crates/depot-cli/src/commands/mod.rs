//! CLI command implementations.
//!
//! Each submodule corresponds to a top-level CLI command and goes through
//! one shared `DepotClient`.

pub mod pkg;
pub mod rpc;

use std::time::Duration;

use depot_core::{DepotClient, DepotConfig, DepotError};
use depot_rpc::{ClientConfig, ResultPolicy};

/// Connection settings gathered from the command line.
#[derive(Debug, Clone)]
pub struct ClientOptions {
    pub base_url: String,
    pub token: Option<String>,
    pub headers: Vec<String>,
    pub result_policy: ResultPolicy,
    pub timeout_secs: u64,
}

impl From<&crate::Cli> for ClientOptions {
    fn from(cli: &crate::Cli) -> Self {
        Self {
            base_url: cli.base_url.clone(),
            token: cli.token.clone(),
            headers: cli.headers.clone(),
            result_policy: cli.result_policy,
            timeout_secs: cli.timeout_secs,
        }
    }
}

/// Build the shared client and install the `--header` values on it.
pub fn build_client(options: &ClientOptions) -> Result<DepotClient, DepotError> {
    let config = DepotConfig {
        base_url: options.base_url.clone(),
        auth_token: options.token.clone(),
        client: ClientConfig {
            result_policy: options.result_policy,
            timeout: (options.timeout_secs > 0).then(|| Duration::from_secs(options.timeout_secs)),
            ..ClientConfig::default()
        },
    };

    let client = DepotClient::new(config)?;
    for raw in &options.headers {
        let (name, value) = parse_header(raw)?;
        client.rpc().set_header(name, Some(value))?;
    }
    Ok(client)
}

/// Split `NAME=VALUE`. An empty value is allowed and means "don't send".
pub fn parse_header(raw: &str) -> Result<(&str, &str), DepotError> {
    let (name, value) = raw.split_once('=').ok_or_else(|| {
        DepotError::InvalidArgument(format!("Header must be NAME=VALUE, got '{}'", raw))
    })?;
    let name = name.trim();
    if name.is_empty() {
        return Err(DepotError::InvalidArgument(format!(
            "Header name is empty in '{}'",
            raw
        )));
    }
    Ok((name, value.trim()))
}

/// Structured form of a failed command, printed to stderr.
pub fn error_json(err: &DepotError) -> serde_json::Value {
    match err.rpc_error() {
        Some(rpc) => serde_json::json!({
            "error": rpc,
            "disposition": err.disposition().as_str(),
        }),
        None => serde_json::json!({
            "error": { "message": err.to_string() },
            "disposition": err.disposition().as_str(),
        }),
    }
}

/// Pretty-print a JSON value to stdout.
pub fn print_json(value: &serde_json::Value) {
    println!(
        "{}",
        serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
    );
}
