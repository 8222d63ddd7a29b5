//! Progressions domain state

use std::sync::Arc;

use crate::domain::service::ProgressionService;
use crate::repository::ProgressionStore;

/// Application state for the Progressions domain
#[derive(Clone)]
pub struct ProgressionsState {
    pub progressions: ProgressionService,
}

impl ProgressionsState {
    pub fn new(store: Arc<dyn ProgressionStore>) -> Self {
        Self {
            progressions: ProgressionService::new(store),
        }
    }
}
