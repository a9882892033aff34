use credential_service::{build_service, config::Config, create_router};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Initialize tracing subscriber for logging, RUST_LOG overrides the default level
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .with_level(true)
        .init();

    tracing::info!("Credential service - Starting...");

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    let service = match build_service(&config).await {
        Ok(service) => service,
        Err(e) => {
            tracing::error!("Failed to initialize credential service: {}", e);
            std::process::exit(1);
        }
    };

    let app = create_router(service);

    let addr = config.bind_address();
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind to address");

    tracing::info!("Credential service is running on http://{}", addr);

    axum::serve(listener, app)
        .await
        .expect("Server error");
}
