//! In-memory progression store
//!
//! Holds projects (id and title only) and progressions behind one mutex, so
//! the project uniqueness check and the write it guards happen atomically.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use showcase_common::RepositoryError;
use uuid::Uuid;

use super::{ProgressionStore, StoreResult, PROJECT_FOREIGN_KEY, PROJECT_UNIQUE_CONSTRAINT};
use crate::domain::entities::{Progression, ProgressionListItem};

#[derive(Debug, Default)]
struct Inner {
    projects: HashMap<Uuid, String>,
    progressions: HashMap<Uuid, Progression>,
}

impl Inner {
    fn taken(&self, project_id: Uuid, excluding: Option<Uuid>) -> bool {
        self.progressions
            .values()
            .any(|p| p.project_id == project_id && Some(p.id) != excluding)
    }
}

/// Mutex-backed `ProgressionStore`
#[derive(Debug, Default)]
pub struct InMemoryProgressionStore {
    inner: Mutex<Inner>,
}

impl InMemoryProgressionStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Register a project and return its id
    pub fn add_project(&self, title: impl Into<String>) -> Uuid {
        let id = Uuid::new_v4();
        self.state().projects.insert(id, title.into());
        id
    }

    /// Remove a project, cascading to its progression
    pub fn remove_project(&self, project_id: Uuid) -> bool {
        let mut state = self.state();
        state.progressions.retain(|_, p| p.project_id != project_id);
        state.projects.remove(&project_id).is_some()
    }

    /// Number of stored progressions
    pub fn len(&self) -> usize {
        self.state().progressions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl ProgressionStore for InMemoryProgressionStore {
    async fn list(&self, offset: i64, limit: i64) -> StoreResult<(Vec<ProgressionListItem>, i64)> {
        let state = self.state();

        let mut rows: Vec<&Progression> = state.progressions.values().collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.id.cmp(&b.id)));

        let total = rows.len() as i64;
        let page = rows
            .into_iter()
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
            .map(|p| ProgressionListItem {
                id: p.id,
                name: p.name.clone(),
                project_id: p.project_id,
                project_title: state.projects.get(&p.project_id).cloned().unwrap_or_default(),
                states: p.states.clone(),
                created_at: p.created_at,
                updated_at: p.updated_at,
            })
            .collect();

        Ok((page, total))
    }

    async fn find(&self, id: Uuid) -> StoreResult<Option<Progression>> {
        Ok(self.state().progressions.get(&id).cloned())
    }

    async fn find_by_project(&self, project_id: Uuid) -> StoreResult<Option<Progression>> {
        Ok(self
            .state()
            .progressions
            .values()
            .find(|p| p.project_id == project_id)
            .cloned())
    }

    async fn project_exists(&self, project_id: Uuid) -> StoreResult<bool> {
        Ok(self.state().projects.contains_key(&project_id))
    }

    async fn project_taken(&self, project_id: Uuid, excluding: Option<Uuid>) -> StoreResult<bool> {
        Ok(self.state().taken(project_id, excluding))
    }

    async fn insert(&self, progression: &Progression) -> StoreResult<Progression> {
        let mut state = self.state();

        if !state.projects.contains_key(&progression.project_id) {
            return Err(RepositoryError::ForeignKeyViolation(
                PROJECT_FOREIGN_KEY.to_string(),
            ));
        }
        if state.taken(progression.project_id, None) {
            return Err(RepositoryError::UniqueViolation(
                PROJECT_UNIQUE_CONSTRAINT.to_string(),
            ));
        }
        if state.progressions.contains_key(&progression.id) {
            return Err(RepositoryError::UniqueViolation("progressions_pkey".to_string()));
        }

        state
            .progressions
            .insert(progression.id, progression.clone());
        Ok(progression.clone())
    }

    async fn replace(&self, progression: &Progression) -> StoreResult<Option<Progression>> {
        let mut state = self.state();

        if !state.progressions.contains_key(&progression.id) {
            return Ok(None);
        }
        if !state.projects.contains_key(&progression.project_id) {
            return Err(RepositoryError::ForeignKeyViolation(
                PROJECT_FOREIGN_KEY.to_string(),
            ));
        }
        if state.taken(progression.project_id, Some(progression.id)) {
            return Err(RepositoryError::UniqueViolation(
                PROJECT_UNIQUE_CONSTRAINT.to_string(),
            ));
        }

        state
            .progressions
            .insert(progression.id, progression.clone());
        Ok(Some(progression.clone()))
    }

    async fn delete(&self, id: Uuid) -> StoreResult<bool> {
        Ok(self.state().progressions.remove(&id).is_some())
    }
}
