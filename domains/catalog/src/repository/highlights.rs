//! Highlight repository

use showcase_common::{RepositoryError, Result};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entities::{Highlight, HighlightListItem};

#[derive(Clone)]
pub struct HighlightRepository {
    pool: PgPool,
}

impl HighlightRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List highlights with their project titles, newest first
    pub async fn list(&self, limit: i64, offset: i64) -> Result<Vec<HighlightListItem>> {
        let rows = sqlx::query_as::<_, HighlightListItem>(
            r#"
            SELECT h.id, h.project_id, p.title AS project_title, h.description,
                   h.created_at, h.updated_at
            FROM highlights h
            INNER JOIN projects p ON p.id = h.project_id
            ORDER BY h.created_at DESC, h.id
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    pub async fn count(&self) -> Result<i64> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM highlights")
            .fetch_one(&self.pool)
            .await?;
        Ok(total)
    }

    pub async fn find(&self, id: Uuid) -> Result<Option<Highlight>> {
        let highlight = sqlx::query_as::<_, Highlight>(
            r#"
            SELECT id, project_id, description, created_at, updated_at
            FROM highlights
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(highlight)
    }

    /// The highlight of a project (has-one)
    pub async fn find_by_project(&self, project_id: Uuid) -> Result<Option<Highlight>> {
        let highlight = sqlx::query_as::<_, Highlight>(
            r#"
            SELECT id, project_id, description, created_at, updated_at
            FROM highlights
            WHERE project_id = $1
            "#,
        )
        .bind(project_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(highlight)
    }

    /// Whether another highlight (other than `excluding`) already features the project
    pub async fn project_taken(&self, project_id: Uuid, excluding: Option<Uuid>) -> Result<bool> {
        let taken: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM highlights
                WHERE project_id = $1 AND ($2::uuid IS NULL OR id <> $2)
            )
            "#,
        )
        .bind(project_id)
        .bind(excluding)
        .fetch_one(&self.pool)
        .await?;

        Ok(taken)
    }

    pub async fn create(&self, highlight: &Highlight) -> Result<Highlight> {
        let created = sqlx::query_as::<_, Highlight>(
            r#"
            INSERT INTO highlights (id, project_id, description, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, project_id, description, created_at, updated_at
            "#,
        )
        .bind(highlight.id)
        .bind(highlight.project_id)
        .bind(&highlight.description)
        .bind(highlight.created_at)
        .bind(highlight.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(RepositoryError::from_sqlx)?;

        Ok(created)
    }

    pub async fn update(&self, highlight: &Highlight) -> Result<Option<Highlight>> {
        let updated = sqlx::query_as::<_, Highlight>(
            r#"
            UPDATE highlights SET project_id = $2, description = $3, updated_at = $4
            WHERE id = $1
            RETURNING id, project_id, description, created_at, updated_at
            "#,
        )
        .bind(highlight.id)
        .bind(highlight.project_id)
        .bind(&highlight.description)
        .bind(highlight.updated_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(RepositoryError::from_sqlx)?;

        Ok(updated)
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM highlights WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
