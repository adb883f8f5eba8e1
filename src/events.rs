//! Event fan-out from the build thread to whatever is watching.
//!
//! The pipeline only ever talks to an [`EventSink`]; the Tauri layer plugs
//! in [`EmitterSink`], which posts fire-and-forget events onto the webview
//! event queue, while tests plug in an in-memory collector and run the
//! whole pipeline without a window.

use tauri::Emitter;
use uuid::Uuid;

use crate::models::BuildStage;

pub trait EventSink: Send + Sync {
    /// A pipeline stage was entered.
    fn stage(&self, stage: BuildStage);
    /// One line of build output arrived.
    fn line(&self, line: &str);
}

/// Forwards build events to the frontend as Tauri events.
///
/// Frontend listens to `build_stage` (payload: {run_id, stage, label}) and
/// `build_log_line` (payload: {run_id, line}).
pub struct EmitterSink {
    app: tauri::AppHandle,
    run_id: Uuid,
}

impl EmitterSink {
    pub fn new(app: tauri::AppHandle, run_id: Uuid) -> Self {
        Self { app, run_id }
    }
}

impl EventSink for EmitterSink {
    fn stage(&self, stage: BuildStage) {
        let _ = self.app.emit(
            "build_stage",
            serde_json::json!({
                "run_id": self.run_id,
                "stage": stage,
                "label": stage.label(),
            }),
        );
    }

    fn line(&self, line: &str) {
        let _ = self.app.emit(
            "build_log_line",
            serde_json::json!({
                "run_id": self.run_id,
                "line": line,
            }),
        );
    }
}
