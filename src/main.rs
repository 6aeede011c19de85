use std::sync::Arc;
use std::time::Duration;

use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use augur::config::Config;
use augur::engine::Engine;
use augur::services::{Directory, HistoryService};
use augur::sources::{AlphaVantageClient, BarProvider, MockProvider};
use augur::{api, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "augur=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Arc::new(Config::from_env());
    info!("Starting Augur server on {}:{}", config.host, config.port);

    // Pick the bar provider: real client when a key is configured,
    // deterministic mock data otherwise.
    let provider: Arc<dyn BarProvider> = match config.alpha_vantage_api_key.clone() {
        Some(api_key) => {
            info!("Alpha Vantage API key found, using live daily data");
            Arc::new(AlphaVantageClient::new(api_key))
        }
        None => {
            info!("No API key configured, serving deterministic mock data");
            Arc::new(MockProvider::new())
        }
    };

    let history = HistoryService::new(
        provider,
        Duration::from_secs(config.history_cache_ttl_secs),
        config.fetch_concurrency,
        config.history_days,
    );

    // Create application state
    let state = AppState {
        config: config.clone(),
        engine: Arc::new(Engine::new()),
        history,
        directory: Arc::new(Directory::new()),
    };

    // Build CORS layer
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build the router
    let app = api::router()
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start the server
    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Augur server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
