//! Storage for the Progressions domain
//!
//! `ProgressionStore` is the seam between the service and persistence. The
//! Postgres repository backs the running service; the in-memory store backs
//! tests and database-less local runs. Both enforce one progression per
//! project atomically.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use showcase_common::RepositoryError;
use uuid::Uuid;

use crate::domain::entities::{Progression, ProgressionListItem};

pub use memory::InMemoryProgressionStore;
pub use postgres::ProgressionRepository;

/// Name of the unique constraint on `progressions.project_id`
pub const PROJECT_UNIQUE_CONSTRAINT: &str = "progressions_project_id_key";

/// Name of the foreign key from `progressions.project_id` to `projects.id`
pub const PROJECT_FOREIGN_KEY: &str = "progressions_project_id_fkey";

pub type StoreResult<T> = std::result::Result<T, RepositoryError>;

#[async_trait]
pub trait ProgressionStore: Send + Sync {
    /// One page of list rows, newest first, plus the total row count
    async fn list(&self, offset: i64, limit: i64)
        -> StoreResult<(Vec<ProgressionListItem>, i64)>;

    async fn find(&self, id: Uuid) -> StoreResult<Option<Progression>>;

    async fn find_by_project(&self, project_id: Uuid) -> StoreResult<Option<Progression>>;

    async fn project_exists(&self, project_id: Uuid) -> StoreResult<bool>;

    /// Whether another progression (other than `excluding`) already references the project
    async fn project_taken(&self, project_id: Uuid, excluding: Option<Uuid>)
        -> StoreResult<bool>;

    /// Insert a new record. Fails with `UniqueViolation(PROJECT_UNIQUE_CONSTRAINT)`
    /// when the project is already tracked.
    async fn insert(&self, progression: &Progression) -> StoreResult<Progression>;

    /// Replace the record with the same id; `None` when it no longer exists
    async fn replace(&self, progression: &Progression) -> StoreResult<Option<Progression>>;

    /// Remove a record; `false` when nothing was deleted
    async fn delete(&self, id: Uuid) -> StoreResult<bool>;
}
