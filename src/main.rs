//! CMDB Console
//!
//! View server for the CMDB front end. Fetches collections from the CMDB REST API and
//! serves searchable record tables, cross-referenced detail pages and a dashboard.

mod api;
mod config;
mod errors;
mod gateway;
mod models;
mod page;
mod table;
mod views;
mod xref;

use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use config::Config;
use gateway::ApiGateway;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub gateway: Arc<ApiGateway>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let registry = tracing_subscriber::registry().with(env_filter);
    if config.log_json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    tracing::info!("Starting CMDB Console");
    tracing::info!("CMDB API: {}", config.api_url);
    tracing::info!("Bind address: {}", config.bind_addr);

    let state = AppState {
        gateway: Arc::new(ApiGateway::new(&config.api_url)?),
    };

    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        .route("/dashboard", get(api::get_dashboard))
        .route(
            "/{resource}",
            get(api::list_resource).post(api::create_resource),
        )
        .route(
            "/{resource}/{id}",
            get(api::get_resource)
                .put(api::update_resource)
                .delete(api::delete_resource),
        );

    Router::new()
        .nest("/api", api_routes)
        .route("/health", get(health_check))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}
