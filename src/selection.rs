//! Selection gate: Step 1 (project root) and Step 2 (manifest) validation.
//!
//! The gate is the only writer of [`Selection`]. Manifest selection and the
//! build trigger stay locked until a root directory containing
//! `Tools/bundle.py` has been recorded; an invalid root choice resets
//! everything that depended on it.

use std::path::Path;

use log::info;

use crate::error::SelectionError;
use crate::models::{ManifestSelection, Selection, SelectionInfo};
use crate::paths;
use crate::state::AppState;

pub(crate) fn select_root(selection: &mut Selection, path: &Path) -> Result<(), SelectionError> {
    if paths::root_is_valid(path) {
        selection.root_dir = Some(path.to_path_buf());
        Ok(())
    } else {
        // Dependent state is cleared along with the root.
        *selection = Selection::default();
        Err(SelectionError::InvalidRoot)
    }
}

pub(crate) fn select_manifest(
    selection: &mut Selection,
    path: &Path,
) -> Result<ManifestSelection, SelectionError> {
    let root = selection
        .root_dir
        .clone()
        .ok_or(SelectionError::ManifestBeforeRoot)?;
    let (stored, cross_volume) = paths::relativize_manifest(&root, path);
    selection.manifest = Some(stored.clone());
    selection.cross_volume = cross_volume;
    Ok(ManifestSelection {
        path: stored,
        cross_volume,
    })
}

/// Validates and records the project root directory (Step 1).
///
/// Succeeds only if `<path>/Tools/bundle.py` exists; failure clears the
/// whole selection and surfaces the path error to the frontend dialog.
#[tauri::command]
pub fn set_root_directory(
    state: tauri::State<AppState>,
    path: String,
) -> Result<SelectionInfo, String> {
    let mut selection = state.selection.lock().unwrap();
    select_root(&mut selection, Path::new(&path)).map_err(|e| e.to_string())?;
    info!("project root set to {path}");
    Ok(selection.info())
}

/// Records the manifest choice (Step 2), stored relative to the root when a
/// relative walk exists. Requires a previously validated root.
#[tauri::command]
pub fn set_manifest(
    state: tauri::State<AppState>,
    path: String,
) -> Result<ManifestSelection, String> {
    let mut selection = state.selection.lock().unwrap();
    let stored = select_manifest(&mut selection, Path::new(&path)).map_err(|e| e.to_string())?;
    info!(
        "manifest set to {} (cross_volume: {})",
        stored.path, stored.cross_volume
    );
    Ok(stored)
}

/// Current selection snapshot, for frontend re-hydration.
#[tauri::command]
pub fn get_selection(state: tauri::State<AppState>) -> Result<SelectionInfo, String> {
    Ok(state.selection.lock().unwrap().info())
}

/// Suggested starting directory for the manifest picker
/// (`<root>/applications`).
#[tauri::command]
pub fn manifest_start_dir(state: tauri::State<AppState>) -> Result<String, String> {
    let selection = state.selection.lock().unwrap();
    let root = selection
        .root_dir
        .as_ref()
        .ok_or_else(|| SelectionError::ManifestBeforeRoot.to_string())?;
    Ok(paths::manifest_start_dir(root).to_string_lossy().to_string())
}
