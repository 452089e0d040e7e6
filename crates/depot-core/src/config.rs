//! Client configuration.

use depot_rpc::ClientConfig;

use crate::api::Endpoint;

/// Configuration for talking to a depot server.
#[derive(Debug, Clone)]
pub struct DepotConfig {
    /// Server root, e.g. `https://depot.haiku-os.org`.
    pub base_url: String,
    /// Bearer token sent as `Authorization` on every request.
    pub auth_token: Option<String>,
    pub client: ClientConfig,
}

impl Default for DepotConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            auth_token: None,
            client: ClientConfig::default(),
        }
    }
}

impl DepotConfig {
    /// Full URL of one of the server's API endpoints.
    pub fn endpoint(&self, endpoint: Endpoint) -> String {
        self.resolve(endpoint.path())
    }

    /// Resolve a path against `base_url`. Absolute `http(s)://` URLs are
    /// returned unchanged.
    pub fn resolve(&self, path_or_url: &str) -> String {
        if path_or_url.starts_with("http://") || path_or_url.starts_with("https://") {
            return path_or_url.to_string();
        }
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path_or_url.trim_start_matches('/')
        )
    }
}
