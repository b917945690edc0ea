//! Fish trade ledger node — entry point.
//!
//! Loads the world state from SQLite, then exposes the chaincode over a small
//! Axum REST API: `POST /invoke` for state-changing operations, `POST /query`
//! for reads, and the committed transaction log for auditing.

mod api;
mod config;
mod db;
mod errors;
mod ledger;
mod records;
mod world_state;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

use config::Config;
use ledger::Ledger;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialise structured logging (RUST_LOG controls verbosity).
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // Load optional .env file (ignored if missing).
    let _ = dotenvy::dotenv();

    let config = Config::from_env().map_err(|e| anyhow::anyhow!("{e}"))?;

    // Set up the SQLite connection pool and run migrations.
    let pool = db::init_pool(&config.database_url).await?;
    let ledger = Arc::new(Ledger::open(pool).await?);

    let api_state = Arc::new(api::ApiState { ledger });

    let app = Router::new()
        .route("/health", get(api::health))
        .route("/invoke", post(api::invoke))
        .route("/query", post(api::query))
        .route("/transactions", get(api::get_transactions))
        .route("/transactions/:tx_id", get(api::get_transaction))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(api_state);

    let addr = format!("0.0.0.0:{}", config.api_port);
    info!("API listening on http://{addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
