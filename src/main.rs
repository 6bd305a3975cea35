//! Favourites Service Backend
//!
//! A REST backend where authenticated users bookmark charts, insights and
//! audience segments, with paginated, type-grouped retrieval.

mod api;
mod auth;
mod config;
mod db;
mod errors;
mod favourites;
mod models;
mod pagination;

use std::sync::Arc;

use axum::{
    middleware,
    routing::{delete, get, patch, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use config::Config;
use db::{Database, UserRepository};
use favourites::FavouriteService;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub favourites: FavouriteService,
    pub users: UserRepository,
    pub config: Arc<Config>,
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

    tracing::info!("Starting Favourites Service Backend");
    tracing::info!("Environment: {}", config.environment);
    tracing::info!("Bind address: {}", config.bind_addr);

    // Warn if running on the baked-in dev secrets
    if !config.is_dev() {
        if config.jwt_secret == config::DEV_JWT_SECRET {
            tracing::warn!("JWT_SECRET_KEY is not set; using the dev default!");
        }
        if config.hashing_salt == config::DEV_HASHING_SALT {
            tracing::warn!("HASHING_SALT is not set; using the dev default!");
        }
    }

    // Initialize storage
    let database = Arc::new(Database::new());
    if config.is_dev() {
        let salt = config.hashing_salt.clone();
        database
            .seed_dev(|password| auth::hash_password(&salt, password))
            .await;
        tracing::info!("Seeded dev dataset (user {})", db::seed::USER_ID);
    }

    // Create application state
    let state = AppState {
        favourites: FavouriteService::new(database.clone()),
        users: UserRepository::new(database),
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
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Clone the signing secret for the auth layer
    let secret = state.config.jwt_secret.clone();

    // Favourites routes require a bearer token
    let favourite_routes = Router::new()
        .route("/favourites", get(api::list_favourites))
        .route("/favourites", post(api::create_favourite))
        .route("/favourites/{id}", patch(api::update_favourite))
        .route("/favourites/{id}", delete(api::delete_favourite))
        .layer(middleware::from_fn(move |req, next| {
            auth::jwt_auth_layer(secret.clone(), req, next)
        }));

    let user_routes = Router::new()
        .route("/login", post(api::login))
        .merge(favourite_routes);

    // Health check (no auth required)
    let health_routes = Router::new().route("/health", get(health_check));

    Router::new()
        .nest("/v1/user", user_routes)
        .merge(health_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}
