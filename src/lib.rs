//! # Flipper App Builder Tauri Application
//!
//! This is the main entry point for the Flipper Zero application package
//! builder. The Rust backend owns the two-step selection gate (project root,
//! manifest) and the build pipeline (pip verification, dependency install,
//! bundler invocation); the frontend is a thin form that calls the commands
//! below and renders the streamed build log.

// Learn more about Tauri commands at https://tauri.app/develop/calling-rust/

// Module declarations for organizing code
pub mod bundler;
pub mod error;
pub mod events;
pub mod install;
pub mod models;
pub mod orchestrator;
pub mod paths;
pub mod process;
pub mod selection;
pub mod state;
pub mod toolchain;

// Import command functions to bring them into scope for the handler
use crate::orchestrator::{get_build_status, reveal_output, start_build};
use crate::selection::{get_selection, manifest_start_dir, set_manifest, set_root_directory};
use crate::state::AppState;

/// Main entry point for the Tauri application.
///
/// Sets up the plugins, the managed selection/run state, and the command
/// handlers, then hands control to the Tauri event loop.
///
/// # Panics
/// Panics if the Tauri application fails to run
#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    tauri::Builder::default()
        .plugin(
            tauri_plugin_log::Builder::new()
                .level(log::LevelFilter::Info)
                .build(),
        )
        .plugin(tauri_plugin_opener::init()) // Opener plugin for revealing the output archive
        .plugin(tauri_plugin_dialog::init()) // Dialog plugin for file/folder pickers
        .plugin(tauri_plugin_notification::init()) // Notification plugin for desktop toasts
        .manage(AppState::new())
        .invoke_handler(tauri::generate_handler![
            // List of all Tauri commands exposed to the frontend
            set_root_directory,
            set_manifest,
            get_selection,
            manifest_start_dir,
            start_build,
            get_build_status,
            reveal_output
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
