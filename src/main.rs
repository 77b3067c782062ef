//! Tank Registry Backend
//!
//! A small REST backend holding one user profile and a collection of water
//! tank records, persisted in SQLite.

mod api;
mod config;
mod db;
mod errors;
mod models;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use config::Config;
use db::Repository;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<Repository>,
    pub config: Arc<Config>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Tank Registry Backend");
    tracing::info!("Database: {}", config.database_url);
    tracing::info!("Allowed origin: {:?}", config.allowed_origin);
    tracing::info!("Bind address: {}", config.bind_addr);

    // Initialize database
    let pool = db::init_database(&config.database_url).await?;
    let repo = Arc::new(Repository::new(pool));
    tracing::info!(
        "Store holds {} profile(s) and {} tank(s)",
        repo.count_profiles().await?,
        repo.count_tanks().await?
    );

    // Create application state
    let state = AppState {
        repo,
        config: Arc::new(config.clone()),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes.
pub fn create_router(state: AppState) -> Router {
    // Credentialed CORS cannot use wildcards, so methods and headers are mirrored.
    // The origin header is only echoed back when the request comes from the allowed origin.
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list([state.config.allowed_origin.clone()]))
        .allow_credentials(true)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request());

    let api_routes = Router::new()
        // Profile
        .route("/profile", post(api::create_profile).get(api::get_profile))
        // Tanks
        .route("/tank", get(api::list_tanks).post(api::create_tank))
        .route(
            "/tank/{id}",
            get(api::get_tank)
                .patch(api::update_tank)
                .delete(api::delete_tank),
        );

    // Health check
    let health_routes = Router::new().route("/health", get(health_check));

    Router::new()
        .merge(api_routes)
        .merge(health_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}
