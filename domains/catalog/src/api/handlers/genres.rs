//! Genre management API handlers

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
use crate::domain::entities::Genre;

/// Request for creating or renaming a genre
#[derive(Debug, Deserialize, Validate)]
pub struct GenreRequest {
    #[validate(required, custom(function = "not_blank"), length(max = 100))]
    pub name: Option<String>,
}

impl GenreRequest {
    fn into_name(self) -> Result<String> {
        trimmed(self.name).ok_or_else(|| ValidationErrors::single("name", Rule::Required).into())
    }
}

/// Genre response DTO
#[derive(Debug, Serialize)]
pub struct GenreResponse {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Genre> for GenreResponse {
    fn from(g: Genre) -> Self {
        Self {
            id: g.id,
            name: g.name,
            created_at: g.created_at,
            updated_at: g.updated_at,
        }
    }
}

fn genre_not_found(id: Uuid) -> Error {
    Error::NotFound(format!("Genre {} not found", id))
}

async fn ensure_name_free(state: &CatalogState, name: &str, excluding: Option<Uuid>) -> Result<()> {
    if state.repos.genres.name_taken(name, excluding).await? {
        return Err(ValidationErrors::single("name", Rule::Unique).into());
    }
    Ok(())
}

/// List genres alphabetically
pub async fn list_genres(
    State(state): State<CatalogState>,
    ApiQuery(pagination): ApiQuery<Pagination>,
) -> Result<Json<Page<GenreResponse>>> {
    let genres = state
        .repos
        .genres
        .list(pagination.limit(), pagination.offset())
        .await?;
    let total = state.repos.genres.count().await?;

    Ok(Json(Page::new(genres, total, &pagination).map(Into::into)))
}

/// Create a genre. Names are unique.
pub async fn create_genre(
    State(state): State<CatalogState>,
    ValidatedJson(request): ValidatedJson<GenreRequest>,
) -> Result<(StatusCode, Json<GenreResponse>)> {
    let name = request.into_name()?;
    ensure_name_free(&state, &name, None).await?;

    let created = state.repos.genres.create(&Genre::new(name)).await?;

    tracing::info!(genre_id = %created.id, name = %created.name, "Genre created");

    Ok((StatusCode::CREATED, Json(created.into())))
}

pub async fn get_genre(
    State(state): State<CatalogState>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<GenreResponse>> {
    let genre = state
        .repos
        .genres
        .find(id)
        .await?
        .ok_or_else(|| genre_not_found(id))?;

    Ok(Json(genre.into()))
}

/// Rename a genre
pub async fn update_genre(
    State(state): State<CatalogState>,
    ApiPath(id): ApiPath<Uuid>,
    ValidatedJson(request): ValidatedJson<GenreRequest>,
) -> Result<Json<GenreResponse>> {
    let name = request.into_name()?;

    let mut genre = state
        .repos
        .genres
        .find(id)
        .await?
        .ok_or_else(|| genre_not_found(id))?;

    ensure_name_free(&state, &name, Some(id)).await?;
    genre.rename(name);

    let updated = state
        .repos
        .genres
        .update(&genre)
        .await?
        .ok_or_else(|| genre_not_found(id))?;

    tracing::info!(genre_id = %id, "Genre updated");

    Ok(Json(updated.into()))
}

/// Delete a genre, detaching it from every project
pub async fn delete_genre(
    State(state): State<CatalogState>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<StatusCode> {
    if !state.repos.genres.delete(id).await? {
        return Err(genre_not_found(id));
    }

    tracing::info!(genre_id = %id, "Genre deleted");

    Ok(StatusCode::NO_CONTENT)
}
