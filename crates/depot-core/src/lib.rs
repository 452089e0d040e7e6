//! Depot Core: the depot server's API as seen from a client.
//!
//! Builds on `depot-rpc` to provide:
//!
//! - [`DepotConfig`]: where the server lives and how to talk to it
//! - [`DepotClient`]: one shared RPC client plus authentication
//! - [`api::pkg::PkgApi`]: typed methods of the `/api/v1/pkg` endpoint
//! - [`ErrorDisposition`]: what a caller should do about a failed call

pub mod api;
pub mod client;
pub mod config;
pub mod disposition;
pub mod error;
pub mod models;

// Convenience re-exports
pub use api::Endpoint;
pub use client::DepotClient;
pub use config::DepotConfig;
pub use disposition::ErrorDisposition;
pub use error::DepotError;
