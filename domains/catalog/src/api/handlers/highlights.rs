//! Highlight management API handlers
//!
//! A highlight features one project on the public landing page. Each
//! project can be highlighted at most once.

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use showcase_common::{ApiPath, ApiQuery, Error, Page, Pagination, Result, Rule, ValidatedJson, ValidationErrors};
use uuid::Uuid;
use validator::Validate;

use super::trimmed;
use crate::api::middleware::CatalogState;
use crate::domain::entities::{Highlight, HighlightListItem};

/// Request for creating or editing a highlight
#[derive(Debug, Deserialize, Validate)]
pub struct HighlightRequest {
    #[validate(required)]
    pub project_id: Option<Uuid>,

    #[validate(length(max = 500))]
    pub description: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct HighlightResponse {
    pub id: Uuid,
    pub project_id: Uuid,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Highlight> for HighlightResponse {
    fn from(h: Highlight) -> Self {
        Self {
            id: h.id,
            project_id: h.project_id,
            description: h.description,
            created_at: h.created_at,
            updated_at: h.updated_at,
        }
    }
}

/// Row of the highlights table
#[derive(Debug, Serialize)]
pub struct HighlightListResponse {
    pub id: Uuid,
    pub project_id: Uuid,
    pub project_title: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<HighlightListItem> for HighlightListResponse {
    fn from(row: HighlightListItem) -> Self {
        Self {
            id: row.id,
            project_id: row.project_id,
            project_title: row.project_title,
            description: row.description,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

fn highlight_not_found(id: Uuid) -> Error {
    Error::NotFound(format!("Highlight {} not found", id))
}

/// Check the referenced project exists and is not highlighted elsewhere
async fn check_project(
    state: &CatalogState,
    project_id: Option<Uuid>,
    editing: Option<Uuid>,
) -> Result<Uuid> {
    let Some(project_id) = project_id else {
        return Err(ValidationErrors::single("project_id", Rule::Required).into());
    };

    if !state.repos.projects.exists(project_id).await? {
        return Err(ValidationErrors::single("project_id", Rule::Exists).into());
    }
    if state
        .repos
        .highlights
        .project_taken(project_id, editing)
        .await?
    {
        return Err(ValidationErrors::single("project_id", Rule::Unique).into());
    }

    Ok(project_id)
}

/// List highlights with their project titles
pub async fn list_highlights(
    State(state): State<CatalogState>,
    ApiQuery(pagination): ApiQuery<Pagination>,
) -> Result<Json<Page<HighlightListResponse>>> {
    let rows = state
        .repos
        .highlights
        .list(pagination.limit(), pagination.offset())
        .await?;
    let total = state.repos.highlights.count().await?;

    Ok(Json(Page::new(rows, total, &pagination).map(Into::into)))
}

/// Highlight a project
pub async fn create_highlight(
    State(state): State<CatalogState>,
    ValidatedJson(request): ValidatedJson<HighlightRequest>,
) -> Result<(StatusCode, Json<HighlightResponse>)> {
    let project_id = check_project(&state, request.project_id, None).await?;

    let highlight = Highlight::new(project_id, trimmed(request.description));
    let created = state.repos.highlights.create(&highlight).await?;

    tracing::info!(highlight_id = %created.id, project_id = %project_id, "Highlight created");

    Ok((StatusCode::CREATED, Json(created.into())))
}

pub async fn get_highlight(
    State(state): State<CatalogState>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<HighlightResponse>> {
    let highlight = state
        .repos
        .highlights
        .find(id)
        .await?
        .ok_or_else(|| highlight_not_found(id))?;

    Ok(Json(highlight.into()))
}

/// Replace a highlight's project and description
pub async fn update_highlight(
    State(state): State<CatalogState>,
    ApiPath(id): ApiPath<Uuid>,
    ValidatedJson(request): ValidatedJson<HighlightRequest>,
) -> Result<Json<HighlightResponse>> {
    let mut highlight = state
        .repos
        .highlights
        .find(id)
        .await?
        .ok_or_else(|| highlight_not_found(id))?;

    let project_id = check_project(&state, request.project_id, Some(id)).await?;
    highlight.apply(project_id, trimmed(request.description));

    let updated = state
        .repos
        .highlights
        .update(&highlight)
        .await?
        .ok_or_else(|| highlight_not_found(id))?;

    tracing::info!(highlight_id = %id, project_id = %project_id, "Highlight updated");

    Ok(Json(updated.into()))
}

pub async fn delete_highlight(
    State(state): State<CatalogState>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<StatusCode> {
    if !state.repos.highlights.delete(id).await? {
        return Err(highlight_not_found(id));
    }

    tracing::info!(highlight_id = %id, "Highlight deleted");

    Ok(StatusCode::NO_CONTENT)
}
