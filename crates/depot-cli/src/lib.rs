//! Depot CLI: command-line access to a Haiku Depot server.
//!
//! The binary is a thin shell over `depot-core`; everything it does is
//! reachable from here so integration tests can drive it directly.

pub mod cli;
pub mod commands;

pub use cli::{Cli, Commands, PkgAction};
