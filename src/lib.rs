//! Credential service: registers users, authenticates logins and issues
//! signed session tokens for other internal services.
//!
//! Callers deliver `auth.register` / `auth.login` messages to
//! `POST /messages/:pattern`; replies are either `{ user, token }` or a
//! `{ status, message }` failure.

pub mod auth;
pub mod config;
pub mod db;
pub mod error;

use auth::{
    health_handler, message_handler, CredentialService, InMemoryUserStore, PasswordService, PgUserStore,
    TokenIssuer, UserStore,
};
use axum::{
    routing::{get, post},
    Router,
};
use config::{Config, StoreBackend};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

/// Builds the credential service from configuration
/// Connects to PostgreSQL and applies migrations when that store is selected
pub async fn build_service(config: &Config) -> Result<CredentialService, Box<dyn std::error::Error + Send + Sync>> {
    let store: Arc<dyn UserStore> = match &config.store {
        StoreBackend::Postgres { database_url } => {
            tracing::info!("Connecting to database...");
            let pool = db::create_pool(database_url).await?;
            db::run_migrations(&pool).await?;
            Arc::new(PgUserStore::new(pool))
        }
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory user store; users are lost on restart");
            Arc::new(InMemoryUserStore::new())
        }
    };

    let passwords = PasswordService::new(config.hash_cost)?;
    let tokens = TokenIssuer::new(config.jwt_secret.expose());

    Ok(CredentialService::new(store, passwords, tokens))
}

/// Creates the application router
pub fn create_router(service: CredentialService) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/messages/:pattern", post(message_handler))
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(Arc::new(service))
}
