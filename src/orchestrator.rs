//! Build pipeline sequencing and the run lifecycle.
//!
//! A run walks `Probing -> InstallingDeps -> Bundling` on one dedicated
//! background thread, at most one run at a time. The pipeline core
//! ([`execute`]) is headless: it reads an explicit [`BuildRequest`] and
//! reports through an [`EventSink`], so tests drive it without a window.
//! The Tauri layer below it owns the active-run guard, the completion
//! notification, and the `build_started`/`build_done` events.

use std::path::PathBuf;
use std::thread;

use log::{error, info};
use tauri::{Emitter, Manager};
use uuid::Uuid;

use crate::bundler;
use crate::error::{BuildError, SelectionError};
use crate::events::{EmitterSink, EventSink};
use crate::install::{self, REQUIRED_PACKAGES};
use crate::models::{BuildOutcome, BuildReport, BuildStage, Selection};
use crate::paths;
use crate::state::AppState;
use crate::toolchain;

/// Everything a run needs, captured up front so the pipeline itself never
/// reads shared state.
#[derive(Debug, Clone)]
pub struct BuildRequest {
    pub run_id: Uuid,
    pub root: PathBuf,
    /// Manifest path as stored by the selection gate, usually relative to
    /// `root`.
    pub manifest: String,
    pub output_file: String,
    pub interpreter: String,
}

impl BuildRequest {
    pub fn new(root: PathBuf, manifest: String) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            root,
            manifest,
            output_file: paths::OUTPUT_FILE.to_string(),
            interpreter: toolchain::default_interpreter().to_string(),
        }
    }

    fn from_selection(selection: &Selection) -> Result<Self, SelectionError> {
        match (&selection.root_dir, &selection.manifest) {
            (Some(root), Some(manifest)) if !manifest.trim().is_empty() => {
                Ok(Self::new(root.clone(), manifest.clone()))
            }
            _ => Err(SelectionError::Incomplete),
        }
    }
}

/// Runs the pipeline stages in order and folds every failure into the
/// returned report; nothing propagates past here.
pub fn execute(request: &BuildRequest, sink: &dyn EventSink) -> BuildReport {
    let started_at = chrono::Local::now().to_rfc3339();
    let result = run_stages(request, sink);
    let finished_at = chrono::Local::now().to_rfc3339();

    match result {
        Ok(()) => {
            sink.stage(BuildStage::Succeeded);
            BuildReport {
                run_id: request.run_id,
                outcome: BuildOutcome::Succeeded,
                error_kind: None,
                error: None,
                output_file: Some(
                    paths::output_artifact(&request.root)
                        .to_string_lossy()
                        .to_string(),
                ),
                started_at,
                finished_at,
            }
        }
        Err(e) => {
            if let BuildError::Unexpected(msg) = &e {
                sink.line(&format!("UNEXPECTED ERROR: {msg}"));
            }
            sink.stage(BuildStage::Failed);
            BuildReport {
                run_id: request.run_id,
                outcome: BuildOutcome::Failed,
                error_kind: Some(e.kind().to_string()),
                error: Some(e.to_string()),
                output_file: None,
                started_at,
                finished_at,
            }
        }
    }
}

fn run_stages(request: &BuildRequest, sink: &dyn EventSink) -> Result<(), BuildError> {
    sink.stage(BuildStage::Probing);
    if let Err(e) = toolchain::ensure_pip(&request.interpreter, sink) {
        if matches!(e, BuildError::ToolchainUnavailable) {
            sink.line("BUILD STOPPED: PIP not functional.");
        }
        return Err(e);
    }

    sink.stage(BuildStage::InstallingDeps);
    if let Err(e) = install::install_dependencies(&request.interpreter, REQUIRED_PACKAGES, sink) {
        if matches!(e, BuildError::DependencyInstall { .. }) {
            sink.line("BUILD STOPPED: Dependency error.");
        }
        return Err(e);
    }

    sink.stage(BuildStage::Bundling);
    sink.line("STARTING BUILD PROCESS...");
    let exit = bundler::invoke_bundler(
        &request.interpreter,
        &request.root,
        &request.manifest,
        &request.output_file,
        sink,
    )?;

    if exit.succeeded() {
        sink.line("");
        sink.line("=== BUILD SUCCESSFUL! ===");
        sink.line(&format!(
            "Output file created: {}",
            paths::output_artifact(&request.root).display()
        ));
        Ok(())
    } else {
        sink.line("");
        sink.line("=== BUILD FAILED! ===");
        Err(BuildError::Bundle {
            exit_code: exit.exit_code,
            marker_seen: exit.marker_seen,
        })
    }
}

/// Starts a build run on a dedicated background thread and returns its run
/// id immediately. Rejected while another run is active or while the
/// two-step selection is incomplete.
///
/// Frontend listens to `build_started` (and clears its log view on it),
/// `build_stage`, `build_log_line`, and `build_done` (payload:
/// [`BuildReport`]).
#[tauri::command]
pub fn start_build(app: tauri::AppHandle, state: tauri::State<AppState>) -> Result<String, String> {
    let request = {
        let selection = state.selection.lock().unwrap();
        BuildRequest::from_selection(&selection).map_err(|e| e.to_string())?
    };

    let run_id = request.run_id;
    if !state.try_claim_run(run_id) {
        return Err("A build is already running.".into());
    }

    info!("starting build run {} for {}", run_id, request.manifest);
    let _ = app.emit("build_started", serde_json::json!({ "run_id": run_id }));

    let app_handle = app.clone();
    thread::spawn(move || {
        let sink = EmitterSink::new(app_handle.clone(), run_id);
        let report = execute(&request, &sink);

        // Free the trigger before the frontend hears the outcome.
        app_handle.state::<AppState>().release_run();

        info!(
            "build run {} finished: {:?}",
            report.run_id, report.outcome
        );
        notify_outcome(&app_handle, &report);
        let _ = app_handle.emit("build_done", &report);
    });

    Ok(run_id.to_string())
}

/// Whether a run is currently active, and which one.
#[tauri::command]
pub fn get_build_status(state: tauri::State<AppState>) -> Result<serde_json::Value, String> {
    let active = state.active_run.lock().unwrap();
    Ok(serde_json::json!({
        "running": active.is_some(),
        "run_id": *active,
    }))
}

/// Reveals the produced archive in the system file manager.
#[tauri::command]
pub fn reveal_output(state: tauri::State<AppState>) -> Result<bool, String> {
    let artifact = {
        let selection = state.selection.lock().unwrap();
        let root = selection
            .root_dir
            .as_ref()
            .ok_or("No project directory selected")?;
        paths::output_artifact(root)
    };
    if !artifact.exists() {
        return Err(format!("Output file not found: {}", artifact.display()));
    }
    tauri_plugin_opener::reveal_item_in_dir(&artifact)
        .map(|_| true)
        .map_err(|e| format!("Failed to open path: {e}"))
}

fn notify_outcome(app: &tauri::AppHandle, report: &BuildReport) {
    use tauri_plugin_notification::NotificationExt;

    let (title, body) = match report.outcome {
        BuildOutcome::Succeeded => (
            "Success!",
            "The Flipper Zero application package was created successfully as package.zip!"
                .to_string(),
        ),
        BuildOutcome::Failed => (
            "Build failed",
            report.error.clone().unwrap_or_else(|| {
                "The build process failed. Please check the logs for details.".to_string()
            }),
        ),
    };
    if let Err(e) = app.notification().builder().title(title).body(body).show() {
        error!("failed to show completion notification: {e}");
    }
}
