/// Project-root and manifest path utilities for the builder.
///
/// A valid project root is any directory with the bundler script at
/// `Tools/bundle.py`; everything else here derives from that root: the
/// manifest path stored relative to it, the suggested manifest picker
/// location, and the fixed-name output archive the bundler writes.
use std::path::{Component, Path, PathBuf};

/// The bundler script expected under `<root>/Tools/`.
pub const BUNDLE_FILENAME: &str = "bundle.py";

/// Fixed name of the archive the bundler writes into the root directory.
pub const OUTPUT_FILE: &str = "package.zip";

/// Full path of the bundler script for a given project root.
pub fn bundler_script(root: &Path) -> PathBuf {
    root.join("Tools").join(BUNDLE_FILENAME)
}

/// Whether `root` is a usable project root (the marker script exists).
pub fn root_is_valid(root: &Path) -> bool {
    bundler_script(root).is_file()
}

/// Suggested starting directory for the manifest picker.
pub fn manifest_start_dir(root: &Path) -> PathBuf {
    root.join("applications")
}

/// Where the bundler leaves the produced archive.
pub fn output_artifact(root: &Path) -> PathBuf {
    root.join(OUTPUT_FILE)
}

/// Stores a manifest selection the way the bundler wants to see it:
/// relative to the project root with forward-slash separators.
///
/// Returns the stored string plus a cross-volume flag. The flag is set when
/// no relative walk from `root` to `manifest` exists (on Windows, selections
/// on a different drive) and the absolute path had to be kept.
pub fn relativize_manifest(root: &Path, manifest: &Path) -> (String, bool) {
    match relative_to(root, manifest) {
        Some(rel) => (forward_slashes(&rel), false),
        None => (forward_slashes(manifest), true),
    }
}

// Relative walk from `base` to `target`, `..`-ing out of `base` as needed.
// None when the two share no common ancestor (e.g. different drive prefixes).
fn relative_to(base: &Path, target: &Path) -> Option<PathBuf> {
    let base_comps: Vec<Component> = base.components().collect();
    let target_comps: Vec<Component> = target.components().collect();

    let mut common = 0;
    while common < base_comps.len()
        && common < target_comps.len()
        && base_comps[common] == target_comps[common]
    {
        common += 1;
    }
    if common == 0 {
        return None;
    }

    let mut rel = PathBuf::new();
    for _ in common..base_comps.len() {
        rel.push("..");
    }
    for comp in &target_comps[common..] {
        rel.push(comp.as_os_str());
    }
    if rel.as_os_str().is_empty() {
        rel.push(".");
    }
    Some(rel)
}

fn forward_slashes(p: &Path) -> String {
    p.to_string_lossy().replace('\\', "/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn root_is_valid_only_with_marker_script() {
        let tmp = TempDir::new().expect("create temp dir");
        assert!(!root_is_valid(tmp.path()));

        fs::create_dir_all(tmp.path().join("Tools")).unwrap();
        assert!(!root_is_valid(tmp.path()));

        fs::write(tmp.path().join("Tools").join(BUNDLE_FILENAME), "# bundler").unwrap();
        assert!(root_is_valid(tmp.path()));
    }

    #[test]
    fn manifest_under_root_stores_relative_with_forward_slashes() {
        let (stored, cross) = relativize_manifest(
            Path::new("/proj"),
            Path::new("/proj/applications/app/manifest.yml"),
        );
        assert_eq!(stored, "applications/app/manifest.yml");
        assert!(!cross);
    }

    #[test]
    fn manifest_outside_root_walks_up() {
        let (stored, cross) =
            relativize_manifest(Path::new("/proj/fw"), Path::new("/proj/apps/manifest.yml"));
        assert_eq!(stored, "../apps/manifest.yml");
        assert!(!cross);
    }

    #[test]
    fn unrelated_paths_fall_back_to_absolute() {
        // A relative target shares nothing with an absolute base, which is
        // the portable stand-in for a different-drive selection.
        let (stored, cross) =
            relativize_manifest(Path::new("/proj"), Path::new("other/manifest.yml"));
        assert_eq!(stored, "other/manifest.yml");
        assert!(cross);
    }

    #[test]
    fn output_artifact_sits_in_the_root() {
        assert_eq!(
            output_artifact(Path::new("/proj")),
            PathBuf::from("/proj/package.zip")
        );
    }
}
