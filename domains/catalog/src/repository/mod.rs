//! Repository implementations for Catalog domain

pub mod faqs;
pub mod genres;
pub mod highlights;
pub mod links;
pub mod projects;

use sqlx::{PgPool, Postgres, Transaction};

pub use faqs::FaqRepository;
pub use genres::GenreRepository;
pub use highlights::HighlightRepository;
pub use links::LinkRepository;
pub use projects::ProjectRepository;

/// Combined repository access for the Catalog domain
#[derive(Clone)]
pub struct CatalogRepositories {
    pool: PgPool,
    pub projects: ProjectRepository,
    pub genres: GenreRepository,
    pub highlights: HighlightRepository,
    pub links: LinkRepository,
    pub faqs: FaqRepository,
}

impl CatalogRepositories {
    pub fn new(pool: PgPool) -> Self {
        Self {
            projects: ProjectRepository::new(pool.clone()),
            genres: GenreRepository::new(pool.clone()),
            highlights: HighlightRepository::new(pool.clone()),
            links: LinkRepository::new(pool.clone()),
            faqs: FaqRepository::new(pool.clone()),
            pool,
        }
    }

    /// Begin a new database transaction.
    pub async fn begin(&self) -> std::result::Result<Transaction<'static, Postgres>, sqlx::Error> {
        self.pool.begin().await
    }
}
