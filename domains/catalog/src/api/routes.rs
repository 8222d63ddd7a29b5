//! Route definitions for Catalog domain API

use axum::{
    routing::{get, put},
    Router,
};

use super::handlers::{faqs, genres, highlights, links, projects};
use super::middleware::CatalogState;

/// Create all Catalog domain API routes
pub fn routes() -> Router<CatalogState> {
    Router::new()
        // Projects
        .route(
            "/v1/projects",
            get(projects::list_projects).post(projects::create_project),
        )
        .route(
            "/v1/projects/{id}",
            get(projects::get_project)
                .put(projects::update_project)
                .delete(projects::delete_project),
        )
        .route(
            "/v1/projects/by-slug/{slug}",
            get(projects::get_project_by_slug),
        )
        .route("/v1/projects/{id}/genres", put(projects::sync_project_genres))
        // Genres
        .route(
            "/v1/genres",
            get(genres::list_genres).post(genres::create_genre),
        )
        .route(
            "/v1/genres/{id}",
            get(genres::get_genre)
                .put(genres::update_genre)
                .delete(genres::delete_genre),
        )
        // Highlights
        .route(
            "/v1/highlights",
            get(highlights::list_highlights).post(highlights::create_highlight),
        )
        .route(
            "/v1/highlights/{id}",
            get(highlights::get_highlight)
                .put(highlights::update_highlight)
                .delete(highlights::delete_highlight),
        )
        // Links
        .route("/v1/links", get(links::list_links).post(links::create_link))
        .route(
            "/v1/links/{id}",
            get(links::get_link)
                .put(links::update_link)
                .delete(links::delete_link),
        )
        // FAQs
        .route("/v1/faqs", get(faqs::list_faqs).post(faqs::create_faq))
        .route(
            "/v1/faqs/{id}",
            get(faqs::get_faq)
                .put(faqs::update_faq)
                .delete(faqs::delete_faq),
        )
}
