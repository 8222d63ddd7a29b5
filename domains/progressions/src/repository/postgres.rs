//! Progression repository (PostgreSQL)

use async_trait::async_trait;
use showcase_common::RepositoryError;
use sqlx::PgPool;
use uuid::Uuid;

use super::{ProgressionStore, StoreResult};
use crate::domain::entities::{Progression, ProgressionListItem};

#[derive(Clone)]
pub struct ProgressionRepository {
    pool: PgPool,
}

impl ProgressionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProgressionStore for ProgressionRepository {
    async fn list(&self, offset: i64, limit: i64) -> StoreResult<(Vec<ProgressionListItem>, i64)> {
        let rows = sqlx::query_as::<_, ProgressionListItem>(
            r#"
            SELECT p.id, p.name, p.project_id, pr.title AS project_title,
                   p.states, p.created_at, p.updated_at
            FROM progressions p
            INNER JOIN projects pr ON pr.id = p.project_id
            ORDER BY p.created_at DESC, p.id
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(RepositoryError::from_sqlx)?;

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM progressions")
            .fetch_one(&self.pool)
            .await
            .map_err(RepositoryError::from_sqlx)?;

        Ok((rows, total))
    }

    async fn find(&self, id: Uuid) -> StoreResult<Option<Progression>> {
        sqlx::query_as::<_, Progression>(
            r#"
            SELECT id, project_id, name, states, created_at, updated_at
            FROM progressions
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(RepositoryError::from_sqlx)
    }

    async fn find_by_project(&self, project_id: Uuid) -> StoreResult<Option<Progression>> {
        sqlx::query_as::<_, Progression>(
            r#"
            SELECT id, project_id, name, states, created_at, updated_at
            FROM progressions
            WHERE project_id = $1
            "#,
        )
        .bind(project_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(RepositoryError::from_sqlx)
    }

    async fn project_exists(&self, project_id: Uuid) -> StoreResult<bool> {
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM projects WHERE id = $1)")
            .bind(project_id)
            .fetch_one(&self.pool)
            .await
            .map_err(RepositoryError::from_sqlx)
    }

    async fn project_taken(&self, project_id: Uuid, excluding: Option<Uuid>) -> StoreResult<bool> {
        sqlx::query_scalar(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM progressions
                WHERE project_id = $1 AND ($2::uuid IS NULL OR id <> $2)
            )
            "#,
        )
        .bind(project_id)
        .bind(excluding)
        .fetch_one(&self.pool)
        .await
        .map_err(RepositoryError::from_sqlx)
    }

    async fn insert(&self, progression: &Progression) -> StoreResult<Progression> {
        sqlx::query_as::<_, Progression>(
            r#"
            INSERT INTO progressions (id, project_id, name, states, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, project_id, name, states, created_at, updated_at
            "#,
        )
        .bind(progression.id)
        .bind(progression.project_id)
        .bind(&progression.name)
        .bind(&progression.states)
        .bind(progression.created_at)
        .bind(progression.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(RepositoryError::from_sqlx)
    }

    async fn replace(&self, progression: &Progression) -> StoreResult<Option<Progression>> {
        sqlx::query_as::<_, Progression>(
            r#"
            UPDATE progressions SET
                project_id = $2,
                name = $3,
                states = $4,
                updated_at = $5
            WHERE id = $1
            RETURNING id, project_id, name, states, created_at, updated_at
            "#,
        )
        .bind(progression.id)
        .bind(progression.project_id)
        .bind(&progression.name)
        .bind(&progression.states)
        .bind(progression.updated_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(RepositoryError::from_sqlx)
    }

    async fn delete(&self, id: Uuid) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM progressions WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(RepositoryError::from_sqlx)?;

        Ok(result.rows_affected() > 0)
    }
}
