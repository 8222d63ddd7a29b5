//! Catalog domain: projects, genres, highlights, links, FAQs

pub mod api;
pub mod domain;
pub mod repository;

// Re-export domain types at the crate root for convenience
pub use domain::entities::{
    Category, Faq, Genre, Highlight, HighlightListItem, Link, Project, ProjectFields, Season,
};

// Re-export repository types
pub use repository::{
    CatalogRepositories, FaqRepository, GenreRepository, HighlightRepository, LinkRepository,
    ProjectRepository,
};

// Re-export API types
pub use api::routes;
pub use api::CatalogState;
