mod error;
mod routes;

use anyhow::Result;
use axum::{routing::get, Router};
use nodescope_core::MonitorConfig;
use nodescope_fetch::{http_fetcher, Poller};
use routes::{api_router, AppState};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = MonitorConfig::from_env()?;
    let static_dir = std::env::var("STATIC_DIR").unwrap_or_else(|_| "./dist".to_string());
    let port = std::env::var("PORT").unwrap_or_else(|_| "3001".to_string());

    let fetcher = http_fetcher(&config)?;
    let candidates = Arc::new(fetcher.candidates().to_vec());
    for candidate in candidates.iter() {
        tracing::info!("Node endpoint ({}): {}", candidate.tier, candidate.url);
    }

    let poller = Poller::new(fetcher, config.poll_interval()).start();

    let state = AppState {
        updates: poller.subscribe(),
        candidates,
    };

    let app = Router::new()
        .nest("/api", api_router(state))
        .route("/health", get(|| async { "OK" }))
        .fallback_service(ServeDir::new(&static_dir))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr = format!("0.0.0.0:{}", port);
    tracing::info!("Server listening on {}", addr);
    tracing::info!("Serving static files from {}", static_dir);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c().await.ok();
        })
        .await?;

    poller.shutdown().await;
    Ok(())
}
