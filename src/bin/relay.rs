//! Completion relay server binary.
//!
//! Loads the assistant config, resolves the provider credential from the
//! environment, and serves the relay until interrupted. Runs fine without a
//! credential: every turn is then answered with the configuration-error
//! reply so the misconfiguration is visible to clients instead of crashing
//! the process.

use parlance::config::AssistantConfig;
use parlance::provider::openai::OpenAiProvider;
use parlance::relay::server::{RelayOptions, RelayServer};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config_path = AssistantConfig::default_config_path();
    let config = if config_path.exists() {
        tracing::info!("loading config from {}", config_path.display());
        AssistantConfig::from_file(&config_path)?
    } else {
        AssistantConfig::default()
    };

    let api_key = config.llm.resolve_api_key();
    if api_key.is_none() {
        tracing::warn!(
            "provider credential not set ({}); turns will be rejected",
            config.llm.api_key_env
        );
    }

    let provider = Arc::new(OpenAiProvider::new(
        config.llm.api_url.clone(),
        api_key.clone().unwrap_or_default(),
    ));

    let options = RelayOptions::from_config(&config, api_key.is_some());
    let server = RelayServer::start(provider, options).await?;
    tracing::info!("parlance-relay serving on port {}", server.port());

    tokio::signal::ctrl_c().await?;
    tracing::info!("shutting down");
    server.shutdown();
    Ok(())
}
