//! SafeQR Cloud Backend Server
//!
//! Classifies submitted QR payloads into a safety category and maintains
//! the community blacklist of reported codes.
//!
//! # Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────┐
//! │                   SAFEQR CLOUD                         │
//! ├────────────────────────────────────────────────────────┤
//! │  ┌──────────┐  ┌────────────┐  ┌───────────────────┐  │
//! │  │  API     │  │  Access    │  │  Rule Classifier  │  │
//! │  │  (Axum)  │  │  Gate      │  │  (first match)    │  │
//! │  └────┬─────┘  └─────┬──────┘  └─────────┬─────────┘  │
//! │       └──────────────┼───────────────────┘            │
//! │                      ▼                                │
//! │               ┌─────────────┐                         │
//! │               │ PostgreSQL  │                         │
//! │               └─────────────┘                         │
//! └────────────────────────────────────────────────────────┘
//! ```

mod classifier;
mod config;
mod db;
mod error;
mod handlers;
mod middleware;
mod models;
mod services;
mod store;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
    middleware as axum_middleware,
};
use tower_http::{
    cors::{CorsLayer, Any},
    trace::TraceLayer,
    compression::CompressionLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use classifier::RuleSet;
use middleware::auth::{StaticTokenVerifier, TokenVerifier};
use services::{ReportService, ScanService};
use store::PgReportStore;

pub use error::{AppError, AppResult};

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "safeqr_cloud=debug,tower_http=debug".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::from_env();

    tracing::info!("SafeQR Cloud Server starting...");
    tracing::info!("Environment: {}", config.environment);
    tracing::info!("Database: {}", config.database_url.split('@').last().unwrap_or("***"));

    // The store connection is built once here and injected into the
    // services. A connection failure at startup is fatal.
    let pool = match db::create_pool(&config.database_url).await {
        Ok(pool) => pool,
        Err(err) => {
            tracing::error!("Error connecting to database: {}", err);
            std::process::exit(1);
        }
    };

    if let Err(err) = db::run_migrations(&pool).await {
        tracing::error!("Failed to apply database schema: {}", err);
        std::process::exit(1);
    }

    let rules = match load_rules(&config) {
        Ok(rules) => Arc::new(rules),
        Err(err) => {
            tracing::error!("Failed to load classification rules: {:#}", err);
            std::process::exit(1);
        }
    };

    let store = Arc::new(PgReportStore::new(pool));
    let verifier: Arc<dyn TokenVerifier> = Arc::new(StaticTokenVerifier::new(&config.api_token));

    // Build application state
    let state = AppState {
        scan: ScanService::new(store.clone(), rules),
        reports: ReportService::new(store),
        verifier,
    };

    // Build router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("🚀 Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub scan: ScanService,
    pub reports: ReportService,
    pub verifier: Arc<dyn TokenVerifier>,
}

/// Classification rules come from RULES_PATH when set, otherwise the
/// built-in table. A broken rules file is an operator error, not
/// something to silently paper over.
fn load_rules(config: &config::Config) -> anyhow::Result<RuleSet> {
    match &config.rules_path {
        Some(path) => {
            tracing::info!("Loading classification rules from {}", path);
            RuleSet::from_file(path)
        }
        None => Ok(RuleSet::default()),
    }
}

/// Create the main router with all routes
fn create_router(state: AppState) -> Router {
    // Public routes (no auth required)
    let public_routes = Router::new()
        .route("/", get(handlers::health::root))
        .route("/health", get(handlers::health::check))
        .route("/api/scan", post(handlers::scan::scan));

    // Report routes (static bearer token required)
    let report_routes = Router::new()
        .route("/api/report", post(handlers::report::report))
        .route("/api/reports", get(handlers::report::list))
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::auth::require_reporter_auth,
        ));

    // Combine all routes
    Router::new()
        .merge(public_routes)
        .merge(report_routes)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        )
        .with_state(state)
}
