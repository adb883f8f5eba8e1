//! Error taxonomy for the selection gate and the build pipeline.
//!
//! Selection errors surface as blocking dialogs before a run ever starts;
//! build errors terminate the current run and are carried on the final
//! `build_done` report. Tauri command boundaries flatten both to `String`.

use thiserror::Error;

/// Errors raised by the selection gate (Step 1 / Step 2 validation).
#[derive(Debug, Error)]
pub enum SelectionError {
    /// The chosen directory does not contain the bundler marker file.
    #[error("Could not find Tools/bundle.py in the selected directory. Please choose the root directory containing the 'Tools' folder.")]
    InvalidRoot,

    /// A manifest was offered before a root directory was validated.
    #[error("Please select the project's root directory first (Step 1).")]
    ManifestBeforeRoot,

    /// The build trigger was pulled with an incomplete selection.
    #[error("Please complete both steps (select directory and manifest).")]
    Incomplete,
}

/// Terminal failures of a build run, one per pipeline stage plus a catch-all.
#[derive(Debug, Error)]
pub enum BuildError {
    /// pip is missing and the ensurepip bootstrap failed too.
    #[error("PIP is not functional. Please install it manually.")]
    ToolchainUnavailable,

    /// `pip install` exited non-zero.
    #[error("Dependencies could not be installed. Check your internet connection or permissions.")]
    DependencyInstall { exit_code: i32 },

    /// The bundler finished but did not satisfy both success conditions
    /// (exit code zero and the success marker observed in its output).
    #[error("The build process failed. Please check the logs for details.")]
    Bundle { exit_code: i32, marker_seen: bool },

    /// Anything else: spawn failures, broken pipes, poisoned state.
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

impl BuildError {
    /// Stable machine-readable tag carried on the `build_done` payload.
    pub fn kind(&self) -> &'static str {
        match self {
            BuildError::ToolchainUnavailable => "toolchain_unavailable",
            BuildError::DependencyInstall { .. } => "dependency_install",
            BuildError::Bundle { .. } => "bundle",
            BuildError::Unexpected(_) => "unexpected",
        }
    }
}

impl From<std::io::Error> for BuildError {
    fn from(e: std::io::Error) -> Self {
        BuildError::Unexpected(e.to_string())
    }
}
