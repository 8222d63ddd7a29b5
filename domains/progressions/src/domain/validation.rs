//! Progression validation
//!
//! Every rule is checked before anything is written. Field rules run first;
//! the project reference rules (`exists`, `unique`) only run when the field
//! rules passed for `project_id`, since they need the store.

use serde::Deserialize;
use uuid::Uuid;

use showcase_common::{Error, Result, Rule, ValidationErrors};

use crate::domain::entities::ProgressionState;
use crate::repository::ProgressionStore;

/// Maximum number of states a progression can track
pub const MAX_STATES: usize = 5;

/// Maximum progression name length
pub const MAX_NAME_LENGTH: usize = 255;

/// Candidate progression as submitted by the create and edit forms
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProgressionInput {
    #[serde(default)]
    pub name: Option<String>,
    /// State names as submitted; unknown names fail as `states: invalid`
    #[serde(default)]
    pub states: Option<Vec<String>>,
    #[serde(default)]
    pub project_id: Option<Uuid>,
}

/// Input that passed every rule
#[derive(Debug, Clone, PartialEq)]
pub struct ValidProgression {
    pub name: String,
    pub states: Vec<ProgressionState>,
    pub project_id: Uuid,
}

/// Validates progression input against field and storage rules
pub struct ProgressionValidator<'a> {
    store: &'a dyn ProgressionStore,
}

impl<'a> ProgressionValidator<'a> {
    pub fn new(store: &'a dyn ProgressionStore) -> Self {
        Self { store }
    }

    /// Rules that need no storage access: `required`, `invalid`, `max`, `distinct`
    pub fn check_fields(input: &ProgressionInput) -> ValidationErrors {
        let mut errors = ValidationErrors::new();

        match input.name.as_deref().map(str::trim) {
            None | Some("") => errors.add("name", Rule::Required),
            Some(name) if name.chars().count() > MAX_NAME_LENGTH => {
                errors.add("name", Rule::Max)
            }
            Some(_) => {}
        }

        match input.states.as_deref() {
            None | Some([]) => errors.add("states", Rule::Required),
            Some(names) => match parse_states(names) {
                None => errors.add("states", Rule::Invalid),
                Some(states) if states.len() > MAX_STATES => errors.add("states", Rule::Max),
                Some(states) if has_duplicates(&states) => errors.add("states", Rule::Distinct),
                Some(_) => {}
            },
        }

        if input.project_id.is_none() {
            errors.add("project_id", Rule::Required);
        }

        errors
    }

    /// Run every rule. `editing` is the id of the record being edited, which
    /// is allowed to keep its own project.
    pub async fn validate(
        &self,
        input: ProgressionInput,
        editing: Option<Uuid>,
    ) -> Result<ValidProgression> {
        let mut errors = Self::check_fields(&input);

        if let Some(project_id) = input.project_id {
            if !self.store.project_exists(project_id).await? {
                errors.add("project_id", Rule::Exists);
            } else if self.store.project_taken(project_id, editing).await? {
                errors.add("project_id", Rule::Unique);
            }
        }

        errors.into_result().map_err(Error::InvalidFields)?;

        // All three fields are present and parse once the rules passed
        match input {
            ProgressionInput {
                name: Some(name),
                states: Some(names),
                project_id: Some(project_id),
            } => {
                let states = parse_states(&names).ok_or_else(|| {
                    Error::Internal("Progression states passed validation unparsed".to_string())
                })?;
                Ok(ValidProgression {
                    name: name.trim().to_string(),
                    states,
                    project_id,
                })
            }
            _ => Err(Error::Internal(
                "Progression input passed validation with missing fields".to_string(),
            )),
        }
    }
}

/// `None` as soon as one name is not a known state
fn parse_states(names: &[String]) -> Option<Vec<ProgressionState>> {
    names
        .iter()
        .map(|name| ProgressionState::from_name(name))
        .collect()
}

fn has_duplicates(states: &[ProgressionState]) -> bool {
    states
        .iter()
        .enumerate()
        .any(|(i, state)| states[..i].contains(state))
}
