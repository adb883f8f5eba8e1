use std::sync::Arc;
use std::sync::Mutex;

use uuid::Uuid;

use crate::models::Selection;

#[derive(Clone)]
pub struct AppState {
    pub selection: Arc<Mutex<Selection>>,
    pub active_run: Arc<Mutex<Option<Uuid>>>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            selection: Arc::new(Mutex::new(Selection::default())),
            active_run: Arc::new(Mutex::new(None)),
        }
    }

    /// Claims the single run slot; `false` when a run is already active.
    pub fn try_claim_run(&self, run_id: Uuid) -> bool {
        let mut active = self.active_run.lock().unwrap();
        if active.is_some() {
            return false;
        }
        *active = Some(run_id);
        true
    }

    pub fn release_run(&self) {
        *self.active_run.lock().unwrap() = None;
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
