//! dbpulse: a PostgreSQL connectivity status page.
//!
//! This is the application entry point. It loads `.env` and layered
//! configuration, initializes tracing, builds the lazy connection pool,
//! sets up the Axum router, and starts the HTTP server.

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use dbpulse::config::{AppConfig, DEFAULT_CONFIG_PATH, DEFAULT_LOG_FILTER};
use dbpulse::db;
use dbpulse::http::server::start_server;
use dbpulse::routes::create_router;
use dbpulse::state::AppState;

/// dbpulse: a web status page for PostgreSQL connectivity
#[derive(Parser, Debug)]
#[command(name = "dbpulse", version, about)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    config: String,

    /// Log level filter (e.g., "dbpulse=debug,tower_http=info")
    #[arg(short, long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // .env files are a development convenience; absence is fine
    dotenvy::dotenv().ok();

    // Parse command line arguments
    let args = Args::parse();

    // Load configuration (defaults <- optional TOML file <- environment)
    let config = AppConfig::load(&args.config)?;

    // Initialize tracing with priority: CLI > env > default
    let log_filter = args
        .log_level
        .or_else(|| std::env::var("RUST_LOG").ok())
        .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());
    init_tracing(&log_filter, &config.logging.format);

    tracing::info!("Loaded configuration");
    tracing::info!(
        host = %config.database.host,
        port = config.database.port,
        database = %config.database.name,
        user = %config.database.user,
        max_connections = config.database.max_connections,
        acquire_timeout_seconds = config.database.acquire_timeout_seconds,
        "PostgreSQL pool configured"
    );

    // The pool is lazy: the first health check dials the database
    let pool = db::create_pool(&config.database);

    // Create application state and router
    let state = AppState::new(config.clone(), pool);
    let app = create_router(state);

    // Start server (blocks until shutdown)
    start_server(app, &config).await?;

    Ok(())
}

fn init_tracing(filter: &str, format: &str) {
    let registry =
        tracing_subscriber::registry().with(tracing_subscriber::EnvFilter::new(filter));

    if format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}
