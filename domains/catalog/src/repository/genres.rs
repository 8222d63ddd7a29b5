//! Genre repository

use showcase_common::{RepositoryError, Result};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entities::Genre;

#[derive(Clone)]
pub struct GenreRepository {
    pool: PgPool,
}

impl GenreRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List genres alphabetically
    pub async fn list(&self, limit: i64, offset: i64) -> Result<Vec<Genre>> {
        let genres = sqlx::query_as::<_, Genre>(
            r#"
            SELECT id, name, created_at, updated_at
            FROM genres
            ORDER BY name ASC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(genres)
    }

    pub async fn count(&self) -> Result<i64> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM genres")
            .fetch_one(&self.pool)
            .await?;
        Ok(total)
    }

    pub async fn find(&self, id: Uuid) -> Result<Option<Genre>> {
        let genre = sqlx::query_as::<_, Genre>(
            "SELECT id, name, created_at, updated_at FROM genres WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(genre)
    }

    /// Whether another genre (other than `excluding`) already uses the name
    pub async fn name_taken(&self, name: &str, excluding: Option<Uuid>) -> Result<bool> {
        let taken: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM genres
                WHERE name = $1 AND ($2::uuid IS NULL OR id <> $2)
            )
            "#,
        )
        .bind(name)
        .bind(excluding)
        .fetch_one(&self.pool)
        .await?;

        Ok(taken)
    }

    /// The subset of `ids` that exist
    pub async fn existing_ids(&self, ids: &[Uuid]) -> Result<Vec<Uuid>> {
        let found: Vec<Uuid> = sqlx::query_scalar("SELECT id FROM genres WHERE id = ANY($1)")
            .bind(ids)
            .fetch_all(&self.pool)
            .await?;
        Ok(found)
    }

    pub async fn create(&self, genre: &Genre) -> Result<Genre> {
        let created = sqlx::query_as::<_, Genre>(
            r#"
            INSERT INTO genres (id, name, created_at, updated_at)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, created_at, updated_at
            "#,
        )
        .bind(genre.id)
        .bind(&genre.name)
        .bind(genre.created_at)
        .bind(genre.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(RepositoryError::from_sqlx)?;

        Ok(created)
    }

    pub async fn update(&self, genre: &Genre) -> Result<Option<Genre>> {
        let updated = sqlx::query_as::<_, Genre>(
            r#"
            UPDATE genres SET name = $2, updated_at = $3
            WHERE id = $1
            RETURNING id, name, created_at, updated_at
            "#,
        )
        .bind(genre.id)
        .bind(&genre.name)
        .bind(genre.updated_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(RepositoryError::from_sqlx)?;

        Ok(updated)
    }

    /// Delete a genre (detaches it from every project)
    pub async fn delete(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM genres WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
