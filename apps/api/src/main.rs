mod config;
mod embed;
mod errors;
mod resume;
mod routes;
mod state;
mod storage;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::routes::build_router;
use crate::state::AppState;
use crate::storage::{KeyValueStore, MemoryStore, RedisStore};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting cvembed API v{}", env!("CARGO_PKG_VERSION"));

    let store: Arc<dyn KeyValueStore> = match &config.redis_url {
        Some(redis_url) => Arc::new(RedisStore::connect(redis_url).await?),
        None => {
            warn!("REDIS_URL not set, stored resumes and drafts live in memory only");
            Arc::new(MemoryStore::new())
        }
    };

    info!("Embed links use base URL {}", config.public_base_url);

    let state = AppState {
        store,
        config: config.clone(),
    };

    // Embeds are loaded from arbitrary host pages, so CORS stays permissive.
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
