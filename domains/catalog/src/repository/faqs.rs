//! FAQ repository

use showcase_common::Result;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entities::Faq;

#[derive(Clone)]
pub struct FaqRepository {
    pool: PgPool,
}

impl FaqRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List FAQs in creation order
    pub async fn list(&self, limit: i64, offset: i64) -> Result<Vec<Faq>> {
        let faqs = sqlx::query_as::<_, Faq>(
            r#"
            SELECT id, question, answer, created_at, updated_at
            FROM faqs
            ORDER BY created_at ASC, id
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(faqs)
    }

    pub async fn count(&self) -> Result<i64> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM faqs")
            .fetch_one(&self.pool)
            .await?;
        Ok(total)
    }

    pub async fn find(&self, id: Uuid) -> Result<Option<Faq>> {
        let faq = sqlx::query_as::<_, Faq>(
            "SELECT id, question, answer, created_at, updated_at FROM faqs WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(faq)
    }

    pub async fn create(&self, faq: &Faq) -> Result<Faq> {
        let created = sqlx::query_as::<_, Faq>(
            r#"
            INSERT INTO faqs (id, question, answer, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, question, answer, created_at, updated_at
            "#,
        )
        .bind(faq.id)
        .bind(&faq.question)
        .bind(&faq.answer)
        .bind(faq.created_at)
        .bind(faq.updated_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    pub async fn update(&self, faq: &Faq) -> Result<Option<Faq>> {
        let updated = sqlx::query_as::<_, Faq>(
            r#"
            UPDATE faqs SET question = $2, answer = $3, updated_at = $4
            WHERE id = $1
            RETURNING id, question, answer, created_at, updated_at
            "#,
        )
        .bind(faq.id)
        .bind(&faq.question)
        .bind(&faq.answer)
        .bind(faq.updated_at)
        .fetch_optional(&self.pool)
        .await?;

        Ok(updated)
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM faqs WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
