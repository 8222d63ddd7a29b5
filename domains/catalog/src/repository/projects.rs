//! Project repository

use std::collections::HashSet;

use showcase_common::{unique_slug, RepositoryError, Result};
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::domain::entities::{Genre, Project};

const PROJECT_COLUMNS: &str = r#"
    id, title, slug, alternative_title, synopsis, episodes, year,
    season, category, miniature, cover, created_at, updated_at
"#;

#[derive(Clone)]
pub struct ProjectRepository {
    pool: PgPool,
}

impl ProjectRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List projects, newest first
    pub async fn list(&self, limit: i64, offset: i64) -> Result<Vec<Project>> {
        let projects = sqlx::query_as::<_, Project>(&format!(
            "SELECT {} FROM projects ORDER BY created_at DESC, id LIMIT $1 OFFSET $2",
            PROJECT_COLUMNS
        ))
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(projects)
    }

    pub async fn count(&self) -> Result<i64> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM projects")
            .fetch_one(&self.pool)
            .await?;
        Ok(total)
    }

    /// Find project by ID
    pub async fn find(&self, id: Uuid) -> Result<Option<Project>> {
        let project = sqlx::query_as::<_, Project>(&format!(
            "SELECT {} FROM projects WHERE id = $1",
            PROJECT_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(project)
    }

    /// Find project by slug
    pub async fn find_by_slug(&self, slug: &str) -> Result<Option<Project>> {
        let project = sqlx::query_as::<_, Project>(&format!(
            "SELECT {} FROM projects WHERE slug = $1",
            PROJECT_COLUMNS
        ))
        .bind(slug)
        .fetch_optional(&self.pool)
        .await?;

        Ok(project)
    }

    pub async fn exists(&self, id: Uuid) -> Result<bool> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM projects WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }

    /// First free slug in the `base`, `base-1`, ... sequence, ignoring the
    /// project being edited
    pub async fn available_slug(&self, base: &str, excluding: Option<Uuid>) -> Result<String> {
        let taken: Vec<String> = sqlx::query_scalar(
            r#"
            SELECT slug FROM projects
            WHERE (slug = $1 OR slug LIKE $1 || '-%')
              AND ($2::uuid IS NULL OR id <> $2)
            "#,
        )
        .bind(base)
        .bind(excluding)
        .fetch_all(&self.pool)
        .await?;

        let taken: HashSet<String> = taken.into_iter().collect();
        Ok(unique_slug(base, |candidate| taken.contains(candidate)))
    }

    /// Create a new project
    pub async fn create(&self, project: &Project) -> Result<Project> {
        let created = sqlx::query_as::<_, Project>(&format!(
            r#"
            INSERT INTO projects (
                id, title, slug, alternative_title, synopsis, episodes, year,
                season, category, miniature, cover, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            RETURNING {}
            "#,
            PROJECT_COLUMNS
        ))
        .bind(project.id)
        .bind(&project.title)
        .bind(&project.slug)
        .bind(&project.alternative_title)
        .bind(&project.synopsis)
        .bind(project.episodes)
        .bind(project.year)
        .bind(project.season)
        .bind(project.category)
        .bind(&project.miniature)
        .bind(&project.cover)
        .bind(project.created_at)
        .bind(project.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(RepositoryError::from_sqlx)?;

        Ok(created)
    }

    /// Replace every editable column of an existing project
    pub async fn update(&self, project: &Project) -> Result<Option<Project>> {
        let updated = sqlx::query_as::<_, Project>(&format!(
            r#"
            UPDATE projects SET
                title = $2, slug = $3, alternative_title = $4, synopsis = $5,
                episodes = $6, year = $7, season = $8, category = $9,
                miniature = $10, cover = $11, updated_at = $12
            WHERE id = $1
            RETURNING {}
            "#,
            PROJECT_COLUMNS
        ))
        .bind(project.id)
        .bind(&project.title)
        .bind(&project.slug)
        .bind(&project.alternative_title)
        .bind(&project.synopsis)
        .bind(project.episodes)
        .bind(project.year)
        .bind(project.season)
        .bind(project.category)
        .bind(&project.miniature)
        .bind(&project.cover)
        .bind(project.updated_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(RepositoryError::from_sqlx)?;

        Ok(updated)
    }

    /// Delete a project (cascades to links, highlight, progression, genre pivots)
    pub async fn delete(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Genres attached to a project, by name
    pub async fn genres(&self, project_id: Uuid) -> Result<Vec<Genre>> {
        let genres = sqlx::query_as::<_, Genre>(
            r#"
            SELECT g.id, g.name, g.created_at, g.updated_at
            FROM genres g
            INNER JOIN genre_project gp ON gp.genre_id = g.id
            WHERE gp.project_id = $1
            ORDER BY g.name ASC
            "#,
        )
        .bind(project_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(genres)
    }
}

/// Replace the genre set of a project inside a transaction
pub async fn sync_genres_tx(
    tx: &mut Transaction<'_, Postgres>,
    project_id: Uuid,
    genre_ids: &[Uuid],
) -> Result<()> {
    sqlx::query("DELETE FROM genre_project WHERE project_id = $1")
        .bind(project_id)
        .execute(&mut **tx)
        .await?;

    if !genre_ids.is_empty() {
        sqlx::query(
            r#"
            INSERT INTO genre_project (genre_id, project_id)
            SELECT genre_id, $2 FROM UNNEST($1::uuid[]) AS genre_id
            "#,
        )
        .bind(genre_ids)
        .bind(project_id)
        .execute(&mut **tx)
        .await
        .map_err(RepositoryError::from_sqlx)?;
    }

    Ok(())
}
