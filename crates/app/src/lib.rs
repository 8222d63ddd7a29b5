//! Showcase application composition root
//!
//! Composes the domain routers into a single application.

use std::sync::Arc;

use axum::{http::HeaderValue, Router};
use showcase_catalog::CatalogState;
use showcase_common::config::Config;
use showcase_progressions::{ProgressionRepository, ProgressionsState};
use sqlx::PgPool;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    limit::RequestBodyLimitLayer,
};

/// Largest request body accepted by the API
pub const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Create the main application router with all routes and middleware
pub fn create_app(config: &Config, pool: PgPool) -> Router {
    let catalog_state = CatalogState::new(pool.clone());
    let progressions_state = ProgressionsState::new(Arc::new(ProgressionRepository::new(pool)));

    Router::new()
        .route("/health", axum::routing::get(health_check))
        .route(
            "/",
            axum::routing::get(|| async { "Showcase API v0.0.1-SNAPSHOT" }),
        )
        .merge(showcase_catalog::routes().with_state(catalog_state))
        .merge(showcase_progressions::routes().with_state(progressions_state))
        .layer(build_cors_layer(&config.cors_allowed_origins))
        .layer(body_limit_layer())
}

/// CORS for the admin front-end. No configured origins means permissive.
pub fn build_cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() {
        return CorsLayer::permissive();
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods(Any)
        .allow_headers(Any)
}

pub fn body_limit_layer() -> RequestBodyLimitLayer {
    RequestBodyLimitLayer::new(MAX_BODY_BYTES)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
