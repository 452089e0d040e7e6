//! Depot CLI: command-line access to a Haiku Depot package repository.

use clap::Parser;
use depot_cli::commands::{self, ClientOptions};
use depot_cli::{Cli, Commands, PkgAction};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "depot_rpc=warn,depot_core=warn,depot_cli=info".into()),
        )
        .init();

    let client = match commands::build_client(&ClientOptions::from(&cli)) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Commands::Rpc {
            endpoint,
            method,
            params,
            id,
        } => {
            commands::rpc::call(&client, &endpoint, &method, params.as_deref(), id.as_deref())
                .await
        }

        Commands::Pkg { action } => match action {
            PkgAction::Get {
                name,
                architecture,
                version_type,
            } => commands::pkg::get(&client, &name, architecture.as_deref(), version_type).await,
            PkgAction::Icons { name } => commands::pkg::icons(&client, &name).await,
            PkgAction::RemoveIcon { name } => commands::pkg::remove_icon(&client, &name).await,
        },
    };

    match result {
        Ok(value) => commands::print_json(&value),
        Err(e) => {
            tracing::debug!("command failed: {}", e);
            eprintln!(
                "{}",
                serde_json::to_string_pretty(&commands::error_json(&e))
                    .unwrap_or_else(|_| format!("Error: {}", e))
            );
            std::process::exit(1);
        }
    }
}
