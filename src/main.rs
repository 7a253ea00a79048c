mod config;
mod routes;
mod services;
mod state;

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use crate::config::GatewayConfig;
use crate::services::credentials::StaticCredentialStore;
use crate::services::probe::HttpProber;
use crate::services::registry::ModuleRegistry;

#[tokio::main]
async fn main() {
    // Optional `.env` for local runs; real deployments set the environment.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = match GatewayConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "invalid configuration");
            std::process::exit(1);
        }
    };
    if config.uses_default_secret() {
        tracing::warn!("SECRET_KEY not set, using the insecure development default");
    }

    let credentials = StaticCredentialStore::from_file(&config.users_file).unwrap_or_else(|e| {
        tracing::error!(error = %e, "credential store failed to load");
        std::process::exit(1);
    });
    let registry = ModuleRegistry::from_file(&config.modules_file).unwrap_or_else(|e| {
        tracing::error!(error = %e, "module registry failed to load");
        std::process::exit(1);
    });
    let prober = HttpProber::new(config.probe_timeout).expect("http client init failed");

    if credentials.is_empty() {
        tracing::warn!(path = %config.users_file.display(), "credential store is empty; every login will fail");
    }
    if registry.is_empty() {
        tracing::warn!(path = %config.modules_file.display(), "module registry is empty");
    }
    tracing::info!(users = credentials.len(), modules = registry.len(), "registries loaded");

    let state = state::AppState::new(&config, Arc::new(credentials), registry, Arc::new(prober));
    tracing::info!(token_ttl = ?state.tokens.ttl(), probe_timeout = ?config.probe_timeout, "auth and probing configured");
    let app = routes::app(state, &config.cors_origins);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind");

    tracing::info!(%addr, service = %config.service_name, "module gateway listening");
    axum::serve(listener, app).await.expect("server failed");
}
