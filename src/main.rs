//src/main.rs

use anyhow::Context;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

mod common;
mod config;
mod db;
mod handlers;
mod middleware;
mod models;
mod services;

use crate::{
    config::{AppState, Config},
    db::Stores,
    services::{auth::TokenVerifier, dispatcher::Dispatcher, inventory_service::InventoryService},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .compact()
        .init();

    let config = Config::from_env()?;
    let pool = config.connect().await?;

    sqlx::migrate!()
        .run(&pool)
        .await
        .context("running database migrations")?;
    tracing::info!("✅ Database migrations applied");

    let verifier = TokenVerifier::from_file(&config.jwt_public_key_file)?;
    tracing::info!("✅ Token public key loaded from {}", config.jwt_public_key_file.display());

    // --- Dependency graph ---
    let service = InventoryService::new(Stores::postgres(pool));
    let dispatcher = Dispatcher::new(verifier, service);
    let app = handlers::router(AppState::new(Arc::new(dispatcher)));

    let listener = TcpListener::bind(&config.listen_addr)
        .await
        .with_context(|| format!("binding {}", config.listen_addr))?;
    tracing::info!("🚀 Inventory service listening on {}", config.listen_addr);

    axum::serve(listener, app).await.context("serving requests")?;
    Ok(())
}
