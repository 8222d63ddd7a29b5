//! FAQ management API handlers

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use showcase_common::{not_blank, ApiPath, ApiQuery, Error, Page, Pagination, Result, Rule, ValidatedJson, ValidationErrors};
use uuid::Uuid;
use validator::Validate;

use super::trimmed;
use crate::api::middleware::CatalogState;
use crate::domain::entities::Faq;

/// Request for creating or editing a FAQ entry
#[derive(Debug, Deserialize, Validate)]
pub struct FaqRequest {
    #[validate(required, custom(function = "not_blank"), length(max = 255))]
    pub question: Option<String>,

    #[validate(required, custom(function = "not_blank"))]
    pub answer: Option<String>,
}

impl FaqRequest {
    fn into_parts(self) -> Result<(String, String)> {
        let question = trimmed(self.question);
        let answer = trimmed(self.answer);

        let mut errors = ValidationErrors::new();
        if question.is_none() {
            errors.add("question", Rule::Required);
        }
        if answer.is_none() {
            errors.add("answer", Rule::Required);
        }

        match (question, answer) {
            (Some(question), Some(answer)) => Ok((question, answer)),
            _ => Err(errors.into()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct FaqResponse {
    pub id: Uuid,
    pub question: String,
    pub answer: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Faq> for FaqResponse {
    fn from(f: Faq) -> Self {
        Self {
            id: f.id,
            question: f.question,
            answer: f.answer,
            created_at: f.created_at,
            updated_at: f.updated_at,
        }
    }
}

fn faq_not_found(id: Uuid) -> Error {
    Error::NotFound(format!("FAQ {} not found", id))
}

pub async fn list_faqs(
    State(state): State<CatalogState>,
    ApiQuery(pagination): ApiQuery<Pagination>,
) -> Result<Json<Page<FaqResponse>>> {
    let faqs = state
        .repos
        .faqs
        .list(pagination.limit(), pagination.offset())
        .await?;
    let total = state.repos.faqs.count().await?;

    Ok(Json(Page::new(faqs, total, &pagination).map(Into::into)))
}

pub async fn create_faq(
    State(state): State<CatalogState>,
    ValidatedJson(request): ValidatedJson<FaqRequest>,
) -> Result<(StatusCode, Json<FaqResponse>)> {
    let (question, answer) = request.into_parts()?;
    let created = state.repos.faqs.create(&Faq::new(question, answer)).await?;

    tracing::info!(faq_id = %created.id, "FAQ created");

    Ok((StatusCode::CREATED, Json(created.into())))
}

pub async fn get_faq(
    State(state): State<CatalogState>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<FaqResponse>> {
    let faq = state
        .repos
        .faqs
        .find(id)
        .await?
        .ok_or_else(|| faq_not_found(id))?;

    Ok(Json(faq.into()))
}

pub async fn update_faq(
    State(state): State<CatalogState>,
    ApiPath(id): ApiPath<Uuid>,
    ValidatedJson(request): ValidatedJson<FaqRequest>,
) -> Result<Json<FaqResponse>> {
    let (question, answer) = request.into_parts()?;

    let mut faq = state
        .repos
        .faqs
        .find(id)
        .await?
        .ok_or_else(|| faq_not_found(id))?;
    faq.apply(question, answer);

    let updated = state
        .repos
        .faqs
        .update(&faq)
        .await?
        .ok_or_else(|| faq_not_found(id))?;

    tracing::info!(faq_id = %id, "FAQ updated");

    Ok(Json(updated.into()))
}

pub async fn delete_faq(
    State(state): State<CatalogState>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<StatusCode> {
    if !state.repos.faqs.delete(id).await? {
        return Err(faq_not_found(id));
    }

    tracing::info!(faq_id = %id, "FAQ deleted");

    Ok(StatusCode::NO_CONTENT)
}
