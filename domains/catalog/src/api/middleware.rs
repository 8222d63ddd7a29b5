//! Catalog domain state

use sqlx::PgPool;

use crate::repository::CatalogRepositories;

/// Application state for the Catalog domain
#[derive(Clone)]
pub struct CatalogState {
    pub repos: CatalogRepositories,
}

impl CatalogState {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repos: CatalogRepositories::new(pool),
        }
    }
}
