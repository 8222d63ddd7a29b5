//! Link management API handlers

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
use crate::domain::entities::Link;

/// Request for creating or editing a link
#[derive(Debug, Deserialize, Validate)]
pub struct LinkRequest {
    #[validate(required)]
    pub project_id: Option<Uuid>,

    #[validate(required, custom(function = "not_blank"), length(max = 100))]
    pub name: Option<String>,

    #[validate(required, url)]
    pub url: Option<String>,
}

/// Validated link fields
struct LinkFields {
    project_id: Uuid,
    name: String,
    url: String,
}

impl LinkRequest {
    /// Collect blank-field and project existence errors together
    async fn check(self, state: &CatalogState) -> Result<LinkFields> {
        let mut errors = ValidationErrors::new();

        let name = trimmed(self.name);
        if name.is_none() {
            errors.add("name", Rule::Required);
        }
        let url = trimmed(self.url);
        if url.is_none() {
            errors.add("url", Rule::Required);
        }

        match self.project_id {
            Some(project_id) => {
                if !state.repos.projects.exists(project_id).await? {
                    errors.add("project_id", Rule::Exists);
                }
            }
            None => errors.add("project_id", Rule::Required),
        }

        match (self.project_id, name, url) {
            (Some(project_id), Some(name), Some(url)) if errors.is_empty() => Ok(LinkFields {
                project_id,
                name,
                url,
            }),
            _ => Err(errors.into()),
        }
    }
}

/// Optional filter for the links list
#[derive(Debug, Default, Deserialize)]
pub struct LinkFilter {
    pub project_id: Option<Uuid>,
}

#[derive(Debug, Serialize)]
pub struct LinkResponse {
    pub id: Uuid,
    pub project_id: Uuid,
    pub name: String,
    pub url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Link> for LinkResponse {
    fn from(l: Link) -> Self {
        Self {
            id: l.id,
            project_id: l.project_id,
            name: l.name,
            url: l.url,
            created_at: l.created_at,
            updated_at: l.updated_at,
        }
    }
}

fn link_not_found(id: Uuid) -> Error {
    Error::NotFound(format!("Link {} not found", id))
}

/// List links, optionally those of a single project
///
/// **GET /v1/links?project_id=...**
pub async fn list_links(
    State(state): State<CatalogState>,
    ApiQuery(filter): ApiQuery<LinkFilter>,
    ApiQuery(pagination): ApiQuery<Pagination>,
) -> Result<Json<Page<LinkResponse>>> {
    let links = state
        .repos
        .links
        .list(filter.project_id, pagination.limit(), pagination.offset())
        .await?;
    let total = state.repos.links.count(filter.project_id).await?;

    Ok(Json(Page::new(links, total, &pagination).map(Into::into)))
}

pub async fn create_link(
    State(state): State<CatalogState>,
    ValidatedJson(request): ValidatedJson<LinkRequest>,
) -> Result<(StatusCode, Json<LinkResponse>)> {
    let fields = request.check(&state).await?;

    let link = Link::new(fields.project_id, fields.name, fields.url);
    let created = state.repos.links.create(&link).await?;

    tracing::info!(link_id = %created.id, project_id = %created.project_id, "Link created");

    Ok((StatusCode::CREATED, Json(created.into())))
}

pub async fn get_link(
    State(state): State<CatalogState>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<LinkResponse>> {
    let link = state
        .repos
        .links
        .find(id)
        .await?
        .ok_or_else(|| link_not_found(id))?;

    Ok(Json(link.into()))
}

pub async fn update_link(
    State(state): State<CatalogState>,
    ApiPath(id): ApiPath<Uuid>,
    ValidatedJson(request): ValidatedJson<LinkRequest>,
) -> Result<Json<LinkResponse>> {
    let mut link = state
        .repos
        .links
        .find(id)
        .await?
        .ok_or_else(|| link_not_found(id))?;

    let fields = request.check(&state).await?;
    link.apply(fields.project_id, fields.name, fields.url);

    let updated = state
        .repos
        .links
        .update(&link)
        .await?
        .ok_or_else(|| link_not_found(id))?;

    tracing::info!(link_id = %id, "Link updated");

    Ok(Json(updated.into()))
}

pub async fn delete_link(
    State(state): State<CatalogState>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<StatusCode> {
    if !state.repos.links.delete(id).await? {
        return Err(link_not_found(id));
    }

    tracing::info!(link_id = %id, "Link deleted");

    Ok(StatusCode::NO_CONTENT)
}
