use std::sync::Arc;

use anyhow::Result;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use scheduling_service::infrastructure::config::Settings;
use scheduling_service::infrastructure::HttpHardRequestStore;
use scheduling_service::api;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "scheduling_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Scheduling Service...");

    let settings = Settings::new()?;
    tracing::info!("Configuration loaded: {:?}", settings);

    let hard_request_store =
        Arc::new(HttpHardRequestStore::new(settings.hard_request_store.url.clone()));
    let state = api::AppState::new(hard_request_store, Arc::new(settings.clone()));

    let app = api::create_router(state).layer(cors_layer_from_env());

    let listener = tokio::net::TcpListener::bind(settings.server_address()).await?;
    let addr = listener.local_addr()?;
    tracing::info!("Scheduling Service listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Builds the CORS policy from the `CORS_ORIGINS` environment variable
/// (comma-separated, per SPEC_FULL.md §6). Unset or empty means no
/// deployment-specific restriction has been configured, so any origin is
/// allowed; otherwise only the listed origins may call the API.
fn cors_layer_from_env() -> CorsLayer {
    let origins: Vec<_> = std::env::var("CORS_ORIGINS")
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .filter_map(|o| o.parse().ok())
        .collect();

    let allow_origin = if origins.is_empty() {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([axum::http::Method::GET, axum::http::Method::POST])
        .allow_headers([axum::http::header::CONTENT_TYPE])
}
