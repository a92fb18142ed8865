//! Hi-Fi Shop Storefront Backend
//!
//! A REST backend for the storefront app: a login gate backed by a remote
//! auth endpoint and a product list persisted as one blob in a durable
//! key-value store.

mod api;
mod auth;
mod config;
mod errors;
mod kv;
mod models;
mod session;
mod store;

use std::sync::Arc;

use axum::{
    middleware,
    routing::{delete, get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use auth::AuthClient;
use config::Config;
use kv::KvStore;
use session::SessionGate;
use store::ProductStore;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<ProductStore>,
    pub gate: SessionGate,
    pub auth: Arc<AuthClient>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env();

    // Initialize logging
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Hi-Fi Shop Storefront Backend");
    tracing::info!("Database path: {:?}", config.db_path);
    tracing::info!("Auth endpoint: {}", config.auth_url);
    tracing::info!("Bind address: {}", config.bind_addr);

    // Initialize the durable key-value store
    let pool = kv::init_store(&config.db_path).await?;
    let kv = KvStore::new(pool);

    // Initialize the product store and populate it from storage
    let store = Arc::new(ProductStore::new(kv.clone()));
    match store.load().await {
        Ok(count) => tracing::info!("Product store loaded with {} products", count),
        Err(e) => tracing::warn!("Product store load failed, starting empty: {}", e),
    }

    let gate = SessionGate::new(kv);
    let auth = Arc::new(AuthClient::new(config.auth_url.clone()));

    // Create application state
    let state = AppState { store, gate, auth };

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
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Clone the gate for the session layer
    let gate = state.gate.clone();

    // Product routes require a stored session token
    let product_routes = Router::new()
        .route("/products", get(api::list_products))
        .route("/products", post(api::create_product))
        .route("/products/search", get(api::search_products))
        .route("/products/{id}", delete(api::delete_product))
        .layer(middleware::from_fn(move |req, next| {
            session::session_gate_layer(gate.clone(), req, next)
        }));

    // Session routes are how you get a token in the first place
    let session_routes = Router::new()
        .route("/login", post(api::login))
        .route("/logout", post(api::logout))
        .route("/session", get(api::get_session));

    // Health check (no auth required)
    let health_routes = Router::new().route("/health", get(health_check));

    Router::new()
        .nest("/api", product_routes.merge(session_routes))
        .merge(health_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}
