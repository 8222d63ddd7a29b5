//! Progression use cases: list, read, create, edit, delete

use std::sync::Arc;

use showcase_common::{Error, Page, Pagination, RepositoryError, Result, Rule, ValidationErrors};
use uuid::Uuid;

use crate::domain::entities::{Progression, ProgressionListItem};
use crate::domain::validation::{ProgressionInput, ProgressionValidator};
use crate::repository::{ProgressionStore, PROJECT_FOREIGN_KEY, PROJECT_UNIQUE_CONSTRAINT};

#[derive(Clone)]
pub struct ProgressionService {
    store: Arc<dyn ProgressionStore>,
}

impl ProgressionService {
    pub fn new(store: Arc<dyn ProgressionStore>) -> Self {
        Self { store }
    }

    pub async fn list(&self, pagination: &Pagination) -> Result<Page<ProgressionListItem>> {
        let (rows, total) = self
            .store
            .list(pagination.offset(), pagination.limit())
            .await?;
        Ok(Page::new(rows, total, pagination))
    }

    pub async fn get(&self, id: Uuid) -> Result<Progression> {
        self.store
            .find(id)
            .await?
            .ok_or_else(|| Error::NotFound("Progression not found".to_string()))
    }

    /// The progression tracking a project (has-one)
    pub async fn get_for_project(&self, project_id: Uuid) -> Result<Progression> {
        self.store
            .find_by_project(project_id)
            .await?
            .ok_or_else(|| Error::NotFound("Progression not found".to_string()))
    }

    /// Validate and insert a new progression
    pub async fn create(&self, input: ProgressionInput) -> Result<Progression> {
        let valid = ProgressionValidator::new(self.store.as_ref())
            .validate(input, None)
            .await?;

        let progression = Progression::new(valid);
        let created = self
            .store
            .insert(&progression)
            .await
            .map_err(write_error)?;

        tracing::info!(
            progression_id = %created.id,
            project_id = %created.project_id,
            "Progression created"
        );
        Ok(created)
    }

    /// Validate and replace every field of an existing progression
    pub async fn update(&self, id: Uuid, input: ProgressionInput) -> Result<Progression> {
        let mut progression = self.get(id).await?;

        let valid = ProgressionValidator::new(self.store.as_ref())
            .validate(input, Some(id))
            .await?;
        progression.apply(valid);

        let updated = self
            .store
            .replace(&progression)
            .await
            .map_err(write_error)?
            .ok_or_else(|| Error::NotFound("Progression not found".to_string()))?;

        tracing::info!(progression_id = %updated.id, "Progression updated");
        Ok(updated)
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        if !self.store.delete(id).await? {
            return Err(Error::NotFound("Progression not found".to_string()));
        }

        tracing::info!(progression_id = %id, "Progression deleted");
        Ok(())
    }
}

/// Constraint violations that slipped past validation (a concurrent write won)
/// are reported as the field errors validation would have produced.
fn write_error(err: RepositoryError) -> Error {
    match err.constraint() {
        Some(PROJECT_UNIQUE_CONSTRAINT) => {
            tracing::warn!("Concurrent progression write lost the project uniqueness race");
            ValidationErrors::single("project_id", Rule::Unique).into()
        }
        Some(PROJECT_FOREIGN_KEY) => ValidationErrors::single("project_id", Rule::Exists).into(),
        _ => err.into(),
    }
}
