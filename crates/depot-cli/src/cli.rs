//! Command-line definition.

use clap::{Parser, Subcommand};
use depot_core::models::PkgVersionType;
use depot_rpc::ResultPolicy;

/// Depot CLI: browse and manage a Haiku Depot package repository
#[derive(Parser, Debug)]
#[command(name = "depot", version, about = "Depot CLI: browse and manage a Haiku Depot package repository")]
pub struct Cli {
    /// Root URL of the depot server
    #[arg(long, env = "DEPOT_BASE_URL", default_value = "http://localhost:8080")]
    pub base_url: String,

    /// Bearer token for authenticated methods
    #[arg(long, env = "DEPOT_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Extra header sent with every request (repeatable)
    #[arg(long = "header", value_name = "NAME=VALUE")]
    pub headers: Vec<String>,

    /// Which results count as success: "truthy" (null/false/0/"" are
    /// invalid responses) or "present"
    #[arg(long, default_value = "truthy")]
    pub result_policy: ResultPolicy,

    /// Request timeout in seconds (0 disables it)
    #[arg(long, default_value_t = 30)]
    pub timeout_secs: u64,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Send a raw JSON-RPC request
    Rpc {
        /// Endpoint path (e.g. "/api/v1/pkg") or absolute URL
        #[arg(long)]
        endpoint: String,
        /// JSON-RPC method name (e.g. "getPkg")
        #[arg(long)]
        method: String,
        /// Params as a JSON array; any other JSON value is sent as the
        /// single positional parameter
        #[arg(long)]
        params: Option<String>,
        /// Request id (number or string); generated when omitted
        #[arg(long)]
        id: Option<String>,
    },

    /// Packages
    Pkg {
        #[command(subcommand)]
        action: PkgAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum PkgAction {
    /// Show a package
    Get {
        /// Package name
        #[arg(long)]
        name: String,
        /// Architecture code, e.g. "x86_64"
        #[arg(long)]
        architecture: Option<String>,
        /// LATEST, NONE or SPECIFIC
        #[arg(long, default_value = "LATEST")]
        version_type: PkgVersionType,
    },
    /// List a package's icons
    Icons {
        /// Package name
        #[arg(long)]
        name: String,
    },
    /// Remove all icons from a package
    RemoveIcon {
        /// Package name
        #[arg(long)]
        name: String,
    },
}
