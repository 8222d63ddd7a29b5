//! Link repository

use showcase_common::{RepositoryError, Result};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entities::Link;

#[derive(Clone)]
pub struct LinkRepository {
    pool: PgPool,
}

impl LinkRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List links, optionally only those of one project, newest first
    pub async fn list(
        &self,
        project_id: Option<Uuid>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Link>> {
        let links = sqlx::query_as::<_, Link>(
            r#"
            SELECT id, project_id, name, url, created_at, updated_at
            FROM links
            WHERE ($1::uuid IS NULL OR project_id = $1)
            ORDER BY created_at DESC, id
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(project_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(links)
    }

    pub async fn count(&self, project_id: Option<Uuid>) -> Result<i64> {
        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM links WHERE ($1::uuid IS NULL OR project_id = $1)",
        )
        .bind(project_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(total)
    }

    /// Every link of a project (has-many), by name
    pub async fn list_by_project(&self, project_id: Uuid) -> Result<Vec<Link>> {
        let links = sqlx::query_as::<_, Link>(
            r#"
            SELECT id, project_id, name, url, created_at, updated_at
            FROM links
            WHERE project_id = $1
            ORDER BY name ASC
            "#,
        )
        .bind(project_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(links)
    }

    pub async fn find(&self, id: Uuid) -> Result<Option<Link>> {
        let link = sqlx::query_as::<_, Link>(
            r#"
            SELECT id, project_id, name, url, created_at, updated_at
            FROM links
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(link)
    }

    pub async fn create(&self, link: &Link) -> Result<Link> {
        let created = sqlx::query_as::<_, Link>(
            r#"
            INSERT INTO links (id, project_id, name, url, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, project_id, name, url, created_at, updated_at
            "#,
        )
        .bind(link.id)
        .bind(link.project_id)
        .bind(&link.name)
        .bind(&link.url)
        .bind(link.created_at)
        .bind(link.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(RepositoryError::from_sqlx)?;

        Ok(created)
    }

    pub async fn update(&self, link: &Link) -> Result<Option<Link>> {
        let updated = sqlx::query_as::<_, Link>(
            r#"
            UPDATE links SET project_id = $2, name = $3, url = $4, updated_at = $5
            WHERE id = $1
            RETURNING id, project_id, name, url, created_at, updated_at
            "#,
        )
        .bind(link.id)
        .bind(link.project_id)
        .bind(&link.name)
        .bind(&link.url)
        .bind(link.updated_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(RepositoryError::from_sqlx)?;

        Ok(updated)
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM links WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
