//! Lorena Felicio Confeitaria - interactive catalog and quote builder.
//!
//! Browse the sweets, pick quantities and a delivery date, then print the
//! quote request or a WhatsApp link carrying it. The order is saved on this
//! device between runs.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::process::ExitCode;

use confeitaria_storefront::config::AppConfig;
use confeitaria_storefront::shell;
use confeitaria_storefront::state::AppState;
use tokio::io::BufReader;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> ExitCode {
    // Logs go to stderr so they never mix with the shell output.
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "confeitaria_storefront=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "failed to load configuration");
            return ExitCode::FAILURE;
        }
    };
    tracing::debug!(?config, "configuration loaded");

    let state = match AppState::new(config) {
        Ok(state) => state,
        Err(e) => {
            tracing::error!(error = %e, "failed to initialize application state");
            return ExitCode::FAILURE;
        }
    };

    let input = BufReader::new(tokio::io::stdin());
    if let Err(e) = shell::run(state, input, tokio::io::stdout()).await {
        tracing::error!(error = %e, "shell stopped");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
