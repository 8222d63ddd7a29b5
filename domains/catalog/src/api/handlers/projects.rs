//! Project management API handlers
//!
//! Projects carry a slug derived from their title. The slug is made unique
//! on create and regenerated whenever an edit changes the title.

use std::collections::HashSet;

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use showcase_common::{
    is_valid_slug, not_blank, ApiPath, ApiQuery, Error, Page, Pagination, Result, Rule, Sluggable,
    ValidatedJson, ValidationErrors,
};
use uuid::Uuid;
use validator::Validate;

use super::genres::GenreResponse;
use super::highlights::HighlightResponse;
use super::links::LinkResponse;
use super::trimmed;
use crate::api::middleware::CatalogState;
use crate::domain::entities::{Category, Project, ProjectFields, Season};
use crate::repository::projects::sync_genres_tx;

/// Request for creating or editing a project. Edits replace every field.
#[derive(Debug, Deserialize, Validate)]
pub struct ProjectRequest {
    #[validate(required, custom(function = "not_blank"), length(max = 255))]
    pub title: Option<String>,

    #[validate(length(max = 255))]
    pub alternative_title: Option<String>,

    pub synopsis: Option<String>,

    #[validate(range(min = 0))]
    pub episodes: Option<i32>,

    #[validate(range(min = 1900, max = 2100))]
    pub year: Option<i32>,

    pub season: Option<Season>,

    pub category: Option<Category>,

    /// Media reference for the list thumbnail
    #[validate(length(max = 2048))]
    pub miniature: Option<String>,

    #[validate(length(max = 2048))]
    pub cover: Option<String>,
}

impl ProjectRequest {
    /// Normalize into entity fields. Blank titles were already rejected by
    /// `validate`; this keeps the same answer for unvalidated input.
    pub fn into_fields(self) -> Result<ProjectFields> {
        let Some(title) = trimmed(self.title) else {
            return Err(ValidationErrors::single("title", Rule::Required).into());
        };

        Ok(ProjectFields {
            title,
            alternative_title: trimmed(self.alternative_title),
            synopsis: trimmed(self.synopsis),
            episodes: self.episodes,
            year: self.year,
            season: self.season,
            category: self.category,
            miniature: trimmed(self.miniature),
            cover: trimmed(self.cover),
        })
    }
}

/// Request for replacing the genre set of a project
#[derive(Debug, Deserialize, Validate)]
pub struct SyncGenresRequest {
    #[validate(required)]
    pub genre_ids: Option<Vec<Uuid>>,
}

/// Project response DTO
#[derive(Debug, Serialize)]
pub struct ProjectResponse {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub alternative_title: Option<String>,
    pub synopsis: Option<String>,
    pub episodes: Option<i32>,
    pub year: Option<i32>,
    pub season: Option<Season>,
    pub category: Option<Category>,
    pub miniature: Option<String>,
    pub cover: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Project> for ProjectResponse {
    fn from(p: Project) -> Self {
        Self {
            id: p.id,
            title: p.title,
            slug: p.slug,
            alternative_title: p.alternative_title,
            synopsis: p.synopsis,
            episodes: p.episodes,
            year: p.year,
            season: p.season,
            category: p.category,
            miniature: p.miniature,
            cover: p.cover,
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

/// Project with its genres, links and highlight loaded
#[derive(Debug, Serialize)]
pub struct ProjectDetailResponse {
    #[serde(flatten)]
    pub project: ProjectResponse,
    pub genres: Vec<GenreResponse>,
    pub links: Vec<LinkResponse>,
    pub highlight: Option<HighlightResponse>,
}

async fn load_detail(state: &CatalogState, project: Project) -> Result<ProjectDetailResponse> {
    let genres = state.repos.projects.genres(project.id).await?;
    let links = state.repos.links.list_by_project(project.id).await?;
    let highlight = state.repos.highlights.find_by_project(project.id).await?;

    Ok(ProjectDetailResponse {
        project: project.into(),
        genres: genres.into_iter().map(Into::into).collect(),
        links: links.into_iter().map(Into::into).collect(),
        highlight: highlight.map(Into::into),
    })
}

fn project_not_found(id: Uuid) -> Error {
    Error::NotFound(format!("Project {} not found", id))
}

/// List projects, newest first
pub async fn list_projects(
    State(state): State<CatalogState>,
    ApiQuery(pagination): ApiQuery<Pagination>,
) -> Result<Json<Page<ProjectResponse>>> {
    let projects = state
        .repos
        .projects
        .list(pagination.limit(), pagination.offset())
        .await?;
    let total = state.repos.projects.count().await?;

    let page = Page::new(projects, total, &pagination).map(ProjectResponse::from);
    Ok(Json(page))
}

/// Create a project
///
/// **POST /v1/projects**
///
/// The slug is derived from the title; `-1`, `-2`, ... is appended when
/// another project already uses it.
pub async fn create_project(
    State(state): State<CatalogState>,
    ValidatedJson(request): ValidatedJson<ProjectRequest>,
) -> Result<(StatusCode, Json<ProjectResponse>)> {
    let mut project = Project::new(request.into_fields()?);
    project.slug = state
        .repos
        .projects
        .available_slug(&project.slug, None)
        .await?;

    let created = state.repos.projects.create(&project).await?;

    tracing::info!(project_id = %created.id, slug = %created.slug, "Project created");

    Ok((StatusCode::CREATED, Json(created.into())))
}

/// Get a project with its relations
pub async fn get_project(
    State(state): State<CatalogState>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<ProjectDetailResponse>> {
    let project = state
        .repos
        .projects
        .find(id)
        .await?
        .ok_or_else(|| project_not_found(id))?;

    Ok(Json(load_detail(&state, project).await?))
}

fn slug_not_found(slug: &str) -> Error {
    Error::NotFound(format!("Project '{}' not found", slug))
}

/// Get a project by its slug
///
/// A slug no project could carry is a 404 without touching the database.
pub async fn get_project_by_slug(
    State(state): State<CatalogState>,
    ApiPath(slug): ApiPath<String>,
) -> Result<Json<ProjectDetailResponse>> {
    if !is_valid_slug(&slug) {
        return Err(slug_not_found(&slug));
    }

    let project = state
        .repos
        .projects
        .find_by_slug(&slug)
        .await?
        .ok_or_else(|| slug_not_found(&slug))?;

    Ok(Json(load_detail(&state, project).await?))
}

/// Replace every field of a project
///
/// **PUT /v1/projects/{id}**
///
/// A changed title regenerates the slug.
pub async fn update_project(
    State(state): State<CatalogState>,
    ApiPath(id): ApiPath<Uuid>,
    ValidatedJson(request): ValidatedJson<ProjectRequest>,
) -> Result<Json<ProjectResponse>> {
    let fields = request.into_fields()?;

    let mut project = state
        .repos
        .projects
        .find(id)
        .await?
        .ok_or_else(|| project_not_found(id))?;

    if project.apply(fields) {
        project.slug = state
            .repos
            .projects
            .available_slug(&project.base_slug(), Some(id))
            .await?;
    }

    let updated = state
        .repos
        .projects
        .update(&project)
        .await?
        .ok_or_else(|| project_not_found(id))?;

    tracing::info!(project_id = %id, slug = %updated.slug, "Project updated");

    Ok(Json(updated.into()))
}

/// Delete a project along with its links, highlight and progression
pub async fn delete_project(
    State(state): State<CatalogState>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<StatusCode> {
    if !state.repos.projects.delete(id).await? {
        return Err(project_not_found(id));
    }

    tracing::info!(project_id = %id, "Project deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// Replace the genres attached to a project
///
/// **PUT /v1/projects/{id}/genres**
///
/// Unknown genre ids fail with `genre_ids: exists`; repeated ids are
/// attached once.
pub async fn sync_project_genres(
    State(state): State<CatalogState>,
    ApiPath(id): ApiPath<Uuid>,
    ValidatedJson(request): ValidatedJson<SyncGenresRequest>,
) -> Result<Json<Vec<GenreResponse>>> {
    if !state.repos.projects.exists(id).await? {
        return Err(project_not_found(id));
    }

    let genre_ids = dedup_ids(request.genre_ids.unwrap_or_default());

    let found = state.repos.genres.existing_ids(&genre_ids).await?;
    if found.len() != genre_ids.len() {
        return Err(ValidationErrors::single("genre_ids", Rule::Exists).into());
    }

    let mut tx = state.repos.begin().await?;
    sync_genres_tx(&mut tx, id, &genre_ids).await?;
    tx.commit().await?;

    tracing::info!(project_id = %id, genres = genre_ids.len(), "Project genres synced");

    let genres = state.repos.projects.genres(id).await?;
    Ok(Json(genres.into_iter().map(Into::into).collect()))
}

/// Drop repeated ids, keeping first-seen order
fn dedup_ids(ids: Vec<Uuid>) -> Vec<Uuid> {
    let mut seen = HashSet::with_capacity(ids.len());
    ids.into_iter().filter(|id| seen.insert(*id)).collect()
}
