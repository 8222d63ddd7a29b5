//! Domain entities for the Progressions domain
//!
//! A progression tracks where a project sits in its release lifecycle as an
//! ordered set of named states. Each project has at most one progression.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use uuid::Uuid;

use crate::domain::validation::ValidProgression;

/// Lifecycle state a progression can include
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressionState {
    Announced,
    Upcoming,
    Airing,
    Hiatus,
    Finished,
    Cancelled,
    Licensed,
}

impl ProgressionState {
    /// Every state, in declaration order
    pub const ALL: [ProgressionState; 7] = [
        ProgressionState::Announced,
        ProgressionState::Upcoming,
        ProgressionState::Airing,
        ProgressionState::Hiatus,
        ProgressionState::Finished,
        ProgressionState::Cancelled,
        ProgressionState::Licensed,
    ];

    /// Look a state up by its wire name, e.g. `"hiatus"`
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|state| state.to_string() == name)
    }

    /// Human readable label shown in the admin UI
    #[mutants::skip] // Display-only text
    pub fn label(&self) -> &'static str {
        match self {
            ProgressionState::Announced => "Announced",
            ProgressionState::Upcoming => "Upcoming",
            ProgressionState::Airing => "Airing",
            ProgressionState::Hiatus => "On hiatus",
            ProgressionState::Finished => "Finished",
            ProgressionState::Cancelled => "Cancelled",
            ProgressionState::Licensed => "Licensed",
        }
    }
}

impl std::fmt::Display for ProgressionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProgressionState::Announced => write!(f, "announced"),
            ProgressionState::Upcoming => write!(f, "upcoming"),
            ProgressionState::Airing => write!(f, "airing"),
            ProgressionState::Hiatus => write!(f, "hiatus"),
            ProgressionState::Finished => write!(f, "finished"),
            ProgressionState::Cancelled => write!(f, "cancelled"),
            ProgressionState::Licensed => write!(f, "licensed"),
        }
    }
}

/// Progression entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Progression {
    pub id: Uuid,
    pub project_id: Uuid,
    pub name: String,
    pub states: Json<Vec<ProgressionState>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Progression {
    /// Create a new progression from validated input
    pub fn new(input: ValidProgression) -> Self {
        let now = Utc::now();
        Progression {
            id: Uuid::new_v4(),
            project_id: input.project_id,
            name: input.name,
            states: Json(input.states),
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace every editable field with validated input
    pub fn apply(&mut self, input: ValidProgression) {
        self.project_id = input.project_id;
        self.name = input.name;
        self.states = Json(input.states);
        self.updated_at = Utc::now();
    }

    pub fn states(&self) -> &[ProgressionState] {
        &self.states.0
    }
}

/// Row of the progressions table listing, joined with the owning project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct ProgressionListItem {
    pub id: Uuid,
    pub name: String,
    pub project_id: Uuid,
    pub project_title: String,
    pub states: Json<Vec<ProgressionState>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
