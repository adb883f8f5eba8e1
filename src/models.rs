//! # Models Module
//!
//! Data structures shared between the Rust backend and the frontend:
//! the two-step selection state, build pipeline stages, and the terminal
//! build report. All wire types serialize with Serde using snake_case
//! names so the frontend sees stable, predictable payloads.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stages of a build run, in execution order.
///
/// The label is what the trigger button shows while the stage is active;
/// terminal stages hand the idle caption back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuildStage {
    Idle,
    Probing,
    InstallingDeps,
    Bundling,
    Succeeded,
    Failed,
}

impl BuildStage {
    /// Trigger-button caption for this stage.
    pub fn label(self) -> &'static str {
        match self {
            BuildStage::Idle | BuildStage::Succeeded | BuildStage::Failed => {
                "START BUILD (bundle.py)"
            }
            BuildStage::Probing => "VERIFYING PIP...",
            BuildStage::InstallingDeps => "INSTALLING DEPENDENCIES...",
            BuildStage::Bundling => "BUILDING...",
        }
    }
}

/// Backend-side selection state (Step 1 and Step 2 of the window).
///
/// `manifest` is only ever set while `root_dir` holds a validated root;
/// an invalid root choice clears both.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    /// Validated project root (the directory containing `Tools/bundle.py`).
    pub root_dir: Option<PathBuf>,
    /// Manifest path as stored: relative to the root when possible,
    /// absolute otherwise.
    pub manifest: Option<String>,
    /// Set when the manifest could not be relativized against the root.
    pub cross_volume: bool,
}

impl Selection {
    pub fn is_complete(&self) -> bool {
        self.root_dir.is_some()
            && self
                .manifest
                .as_deref()
                .map(|m| !m.trim().is_empty())
                .unwrap_or(false)
    }

    pub fn info(&self) -> SelectionInfo {
        SelectionInfo {
            root_dir: self
                .root_dir
                .as_ref()
                .map(|p| p.to_string_lossy().to_string()),
            manifest: self.manifest.clone(),
            cross_volume: self.cross_volume,
            ready: self.is_complete(),
        }
    }
}

/// Snapshot of [`Selection`] handed to the frontend for re-hydration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectionInfo {
    pub root_dir: Option<String>,
    pub manifest: Option<String>,
    pub cross_volume: bool,
    pub ready: bool,
}

/// Result of storing a manifest choice.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestSelection {
    pub path: String,
    pub cross_volume: bool,
}

/// Raw completion data of the bundler process.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BundleExit {
    pub exit_code: i32,
    /// Whether the literal success marker was observed in the output.
    pub marker_seen: bool,
}

impl BundleExit {
    /// The exit code alone is not trusted; success needs the marker too.
    pub fn succeeded(self) -> bool {
        self.exit_code == 0 && self.marker_seen
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuildOutcome {
    Succeeded,
    Failed,
}

/// Terminal payload of the `build_done` event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildReport {
    pub run_id: Uuid,
    pub outcome: BuildOutcome,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Absolute path of the produced archive, present on success.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_file: Option<String>,
    pub started_at: String,
    pub finished_at: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_exit_zero_with_marker_succeeds() {
        assert!(BundleExit { exit_code: 0, marker_seen: true }.succeeded());
        assert!(!BundleExit { exit_code: 0, marker_seen: false }.succeeded());
        assert!(!BundleExit { exit_code: 1, marker_seen: true }.succeeded());
        assert!(!BundleExit { exit_code: 1, marker_seen: false }.succeeded());
    }

    #[test]
    fn stage_labels_follow_the_trigger_button() {
        assert_eq!(BuildStage::Idle.label(), "START BUILD (bundle.py)");
        assert_eq!(BuildStage::Probing.label(), "VERIFYING PIP...");
        assert_eq!(
            BuildStage::InstallingDeps.label(),
            "INSTALLING DEPENDENCIES..."
        );
        assert_eq!(BuildStage::Bundling.label(), "BUILDING...");
        assert_eq!(BuildStage::Failed.label(), BuildStage::Idle.label());
    }

    #[test]
    fn selection_completeness_requires_both_steps() {
        let mut sel = Selection::default();
        assert!(!sel.is_complete());
        sel.root_dir = Some(PathBuf::from("/proj"));
        assert!(!sel.is_complete());
        sel.manifest = Some("   ".into());
        assert!(!sel.is_complete());
        sel.manifest = Some("applications/app/manifest.yml".into());
        assert!(sel.is_complete());
    }
}
