use std::sync::Arc;

use anyhow::Context;
use tower_http::cors::CorsLayer;
use tracing::info;

use moodbuddy::{config::RelayConfig, routes, state::AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    moodbuddy::init_tracing();

    let config = RelayConfig::from_env();
    let state = Arc::new(AppState::new(&config));

    let cors = CorsLayer::very_permissive();

    let app = routes::create_router().with_state(state).layer(cors);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;

    info!(model = %config.model, "MoodBuddy relay running at http://localhost:{}", config.port);
    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
