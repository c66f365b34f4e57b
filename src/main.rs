mod chart;
mod config;
mod db;
mod error;
mod routes;
mod state;

use axum::response::Html;
use axum::Router;
use std::net::SocketAddr;
use tower_http::cors::CorsLayer;
use tracing_subscriber::EnvFilter;

use config::{DbConfig, ServerConfig};
use state::AppState;

#[tokio::main]
async fn main() {
    // Initialise tracing.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    config::load_env_file();

    let db_cfg = match DbConfig::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::error!("{e}");
            std::process::exit(1);
        }
    };
    let server = ServerConfig::from_env();

    let pool = match db::lazy_pool(&db_cfg.database_url(), 4) {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!("{e}");
            std::process::exit(1);
        }
    };

    let state = AppState::new(pool);

    let app = Router::new()
        .merge(routes::api_router())
        .route("/", axum::routing::get(index))
        .route("/health", axum::routing::get(health))
        .layer(CorsLayer::permissive())
        .with_state(state);

    let addr: SocketAddr = format!("{}:{}", server.bind, server.port)
        .parse()
        .expect("invalid bind address");

    tracing::info!("Bond desk listening on http://{addr}");

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .unwrap();
}

/// The dashboard page; chart rendering happens client-side from the
/// `/api/curves/compare` chart spec.
async fn index() -> Html<&'static str> {
    Html(include_str!("../assets/index.html"))
}

async fn health() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({ "status": "ok" }))
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("failed to install Ctrl+C handler");
    tracing::info!("Shutdown signal received, gracefully stopping…");
}
