//! Care navigator REST API server binary.
//!
//! ## Purpose
//! Serves symptom triage and provider lookup over HTTP (with
//! OpenAPI/Swagger UI).

use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use api_rest::{router, ApiDoc, AppState};
use navigator_core::config::{DEFAULT_CACHE_TTL, DEFAULT_REQUEST_TIMEOUT, DEFAULT_SEARCH_CITY};
use navigator_core::NavigatorConfig;
use navigator_places::PlacesService;

/// Main entry point for the care navigator REST API server
///
/// Starts the REST API server on the configured address (default:
/// 0.0.0.0:3001). Configuration is resolved from the environment once at
/// startup; request handlers never read environment variables.
///
/// # Environment Variables
/// - `NAVIGATOR_REST_ADDR`: Server address (default: "0.0.0.0:3001")
/// - `GOOGLE_API_KEY`: Provider directory credential; when absent the
///   `/api/places` endpoint answers with an empty provider list
/// - `NAVIGATOR_SEARCH_CITY`: City appended to directory queries
///   (default: "Santa Monica")
///
/// # Errors
/// Returns an error if:
/// - the logging/tracing configuration cannot be initialised,
/// - the configuration is invalid,
/// - the server address cannot be bound, or
/// - the HTTP server fails while running.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("api_rest=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let addr = std::env::var("NAVIGATOR_REST_ADDR").unwrap_or_else(|_| "0.0.0.0:3001".into());
    let api_key = std::env::var("GOOGLE_API_KEY").ok();
    let search_city =
        std::env::var("NAVIGATOR_SEARCH_CITY").unwrap_or_else(|_| DEFAULT_SEARCH_CITY.into());

    let cfg = Arc::new(NavigatorConfig::new(
        api_key,
        search_city,
        DEFAULT_REQUEST_TIMEOUT,
        DEFAULT_CACHE_TTL,
    )?);

    if cfg.places_api_key().is_none() {
        tracing::warn!("no GOOGLE_API_KEY configured; /api/places will return empty results");
    }

    tracing::info!("-- Starting care navigator REST API on {}", addr);

    let places = Arc::new(PlacesService::new(cfg)?);
    let app = router(AppState::new(places)).merge(
        SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
    );

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
