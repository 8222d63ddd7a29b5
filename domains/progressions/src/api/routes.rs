//! Route definitions for Progressions domain API

use axum::{routing::get, Router};

use super::handlers::progressions;
use super::middleware::ProgressionsState;

/// Create all Progressions domain API routes
pub fn routes() -> Router<ProgressionsState> {
    Router::new()
        .route(
            "/v1/progressions",
            get(progressions::list_progressions).post(progressions::create_progression),
        )
        .route("/v1/progressions/states", get(progressions::list_states))
        .route(
            "/v1/progressions/{id}",
            get(progressions::get_progression)
                .put(progressions::update_progression)
                .delete(progressions::delete_progression),
        )
        .route(
            "/v1/projects/{id}/progression",
            get(progressions::get_project_progression),
        )
}
