//! Progression management API handlers

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use showcase_common::{ApiPath, ApiQuery, Error, Page, Pagination, Result};
use uuid::Uuid;

use crate::api::middleware::ProgressionsState;
use crate::domain::entities::{Progression, ProgressionListItem, ProgressionState};
use crate::domain::validation::ProgressionInput;

/// Progression response DTO
#[derive(Debug, Serialize)]
pub struct ProgressionResponse {
    pub id: Uuid,
    pub name: String,
    pub states: Vec<ProgressionState>,
    pub project_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Progression> for ProgressionResponse {
    fn from(p: Progression) -> Self {
        Self {
            id: p.id,
            name: p.name,
            states: p.states.0,
            project_id: p.project_id,
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

/// Row of the progressions table
#[derive(Debug, Serialize)]
pub struct ProgressionListResponse {
    pub id: Uuid,
    pub name: String,
    pub project_id: Uuid,
    pub project_title: String,
    pub states: Vec<ProgressionState>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ProgressionListItem> for ProgressionListResponse {
    fn from(row: ProgressionListItem) -> Self {
        Self {
            id: row.id,
            name: row.name,
            project_id: row.project_id,
            project_title: row.project_title,
            states: row.states.0,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Selectable state for the progression form
#[derive(Debug, Serialize)]
pub struct StateOption {
    pub value: ProgressionState,
    pub label: &'static str,
}

fn parse_input(
    payload: std::result::Result<Json<ProgressionInput>, JsonRejection>,
) -> Result<ProgressionInput> {
    payload
        .map(|Json(input)| input)
        .map_err(|e| Error::Validation(e.body_text()))
}

/// List progressions with their project titles
pub async fn list_progressions(
    State(state): State<ProgressionsState>,
    ApiQuery(pagination): ApiQuery<Pagination>,
) -> Result<Json<Page<ProgressionListResponse>>> {
    let page = state.progressions.list(&pagination).await?;
    Ok(Json(page.map(Into::into)))
}

/// List the states a progression can include
pub async fn list_states() -> Json<Vec<StateOption>> {
    Json(
        ProgressionState::ALL
            .iter()
            .map(|s| StateOption {
                value: *s,
                label: s.label(),
            })
            .collect(),
    )
}

/// Create a progression
pub async fn create_progression(
    State(state): State<ProgressionsState>,
    payload: std::result::Result<Json<ProgressionInput>, JsonRejection>,
) -> Result<(StatusCode, Json<ProgressionResponse>)> {
    let input = parse_input(payload)?;
    let created = state.progressions.create(input).await?;
    Ok((StatusCode::CREATED, Json(created.into())))
}

/// Get a single progression by ID
pub async fn get_progression(
    State(state): State<ProgressionsState>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<ProgressionResponse>> {
    let progression = state.progressions.get(id).await?;
    Ok(Json(progression.into()))
}

/// Get the progression tracking a project
pub async fn get_project_progression(
    State(state): State<ProgressionsState>,
    ApiPath(project_id): ApiPath<Uuid>,
) -> Result<Json<ProgressionResponse>> {
    let progression = state.progressions.get_for_project(project_id).await?;
    Ok(Json(progression.into()))
}

/// Replace a progression's name, states and project
pub async fn update_progression(
    State(state): State<ProgressionsState>,
    ApiPath(id): ApiPath<Uuid>,
    payload: std::result::Result<Json<ProgressionInput>, JsonRejection>,
) -> Result<Json<ProgressionResponse>> {
    let input = parse_input(payload)?;
    let updated = state.progressions.update(id, input).await?;
    Ok(Json(updated.into()))
}

/// Delete a progression
pub async fn delete_progression(
    State(state): State<ProgressionsState>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<StatusCode> {
    state.progressions.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
