//! WeChat push API server

use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

mod error;
mod routes;
mod state;

use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("wechat=debug".parse()?)
                .add_directive("api=debug".parse()?),
        )
        .init();

    info!("Starting WeChat push API");

    let config = common::Config::from_env();
    for problem in config.validate() {
        warn!("{}", problem);
    }

    let state = Arc::new(AppState::new(config.clone()));

    let app = routes::router(state).layer(TraceLayer::new_for_http());

    let addr = format!("{}:{}", config.host, config.port);
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
