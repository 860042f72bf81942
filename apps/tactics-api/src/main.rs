//! Storyteller Tactics API Server
//!
//! Serves the storytelling tactic card catalogue over HTTP:
//!
//! - Card listing, optionally filtered by category
//! - Random samples across the seven categories
//! - AI-suggested Structure cards for a submitted talk plan
//!
//! The catalogue is loaded once from a JSON file at startup and shared
//! read-only between requests. Structure suggestions are delegated to an
//! Anthropic-compatible Messages API.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    routing::{get, post},
    Router,
};
use clap::Parser;
use tactics_core::generator::{DEFAULT_BASE_URL, DEFAULT_MAX_TOKENS, DEFAULT_MODEL};
use tactics_core::{AnthropicClient, CardStore, SuggestConfig, SuggestionEngine};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn, Level};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod api;
mod error;

use api::{
    handle_health, handle_home, handle_legacy_sample, handle_list_categories,
    handle_list_tactics, handle_sample, handle_suggest_structures,
};

/// Extra time the HTTP client allows past the suggestion budget
const CLIENT_TIMEOUT_GRACE: Duration = Duration::from_secs(5);

/// Command-line arguments for the tactics server
#[derive(Parser, Debug)]
#[command(name = "tactics-api")]
#[command(about = "Storyteller tactics card API")]
struct Args {
    /// Port to listen on
    #[arg(short, long, env = "PORT", default_value = "5000")]
    port: u16,

    /// Host address to bind to
    #[arg(long, env = "TACTICS_HOST", default_value = "0.0.0.0")]
    host: String,

    /// Card catalogue (JSON array of cards)
    #[arg(long, env = "TACTICS_DATA", default_value = "data.json")]
    data: PathBuf,

    /// API key for the text generation service
    #[arg(long, env = "ANTHROPIC_API_KEY", default_value = "", hide_env_values = true)]
    api_key: String,

    /// Base URL of the text generation service
    #[arg(long, env = "ANTHROPIC_BASE_URL", default_value = DEFAULT_BASE_URL)]
    api_base_url: String,

    /// Model used for summaries and suggestions
    #[arg(long, env = "TACTICS_MODEL", default_value = DEFAULT_MODEL)]
    model: String,

    /// Output token limit per generation call
    #[arg(long, env = "TACTICS_MAX_TOKENS", default_value_t = DEFAULT_MAX_TOKENS)]
    max_tokens: u32,

    /// Time budget in seconds for one suggestion request
    #[arg(long, env = "TACTICS_TIMEOUT_SECS", default_value = "60")]
    timeout_secs: u64,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<CardStore>,
    pub engine: SuggestionEngine,
}

/// Build the router with all endpoints
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(handle_home))
        .route("/health", get(handle_health))
        // Catalogue endpoints
        .route("/api/categories", get(handle_list_categories))
        .route("/api/tactics", get(handle_list_tactics))
        .route("/api/tactics/sample", get(handle_sample))
        .route("/api/sample", get(handle_legacy_sample))
        // Suggestion endpoint
        .route(
            "/api/tactics/structure/suggest",
            post(handle_suggest_structures),
        )
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();

    // Initialize logging
    let log_level = if args.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(log_level.into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let store = Arc::new(CardStore::load(&args.data)?);

    if args.api_key.is_empty() {
        warn!("ANTHROPIC_API_KEY is not set, structure suggestions will fail");
    }

    let timeout = Duration::from_secs(args.timeout_secs);
    // The per-request budget must fire before the HTTP client's own timeout
    let generator = Arc::new(AnthropicClient::new(
        args.api_key,
        args.api_base_url,
        timeout + CLIENT_TIMEOUT_GRACE,
    ));
    let engine = SuggestionEngine::new(
        store.clone(),
        generator,
        SuggestConfig {
            model: args.model,
            max_tokens: args.max_tokens,
            timeout,
        },
    );

    let app = router(AppState { store, engine });

    // Start server
    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!("Server listening on http://{}", addr);
    info!("Suggestion timeout: {}s", args.timeout_secs);

    axum::serve(listener, app).await?;

    Ok(())
}
