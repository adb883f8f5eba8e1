//! Invocation of the external `Tools/bundle.py` packaging script.
//!
//! The bundler is an opaque collaborator: it is handed the manifest and the
//! output filename and trusted to do the rest. Its only success signal is a
//! literal marker line in its output, scanned here alongside the exit code.

use std::path::Path;
use std::process::Command;

use crate::error::BuildError;
use crate::events::EventSink;
use crate::models::BundleExit;
use crate::paths::BUNDLE_FILENAME;
use crate::process;

/// The literal completion heuristic the bundler prints on success.
pub fn success_marker(output_file: &str) -> String {
    format!("Bundle created: {output_file}")
}

/// Single place the marker heuristic lives, so it can be replaced wholesale
/// if the bundler ever grows a structured success signal.
pub fn is_success_marker(line: &str, marker: &str) -> bool {
    line.contains(marker)
}

/// Runs the bundler with the project root as working directory, streaming
/// its merged output and recording whether the success marker was seen.
///
/// Classification of the result is the caller's job: per
/// [`BundleExit::succeeded`], exit code zero and the marker are both
/// required.
pub fn invoke_bundler(
    interpreter: &str,
    root: &Path,
    manifest: &str,
    output_file: &str,
    sink: &dyn EventSink,
) -> Result<BundleExit, BuildError> {
    let script = Path::new("Tools").join(BUNDLE_FILENAME);
    let mut cmd = Command::new(interpreter);
    cmd.arg(script)
        .arg("--nolint")
        .arg(manifest)
        .arg(output_file)
        .current_dir(root);

    let marker = success_marker(output_file);
    let mut marker_seen = false;
    let exit_code = process::run_streaming(cmd, |line| {
        sink.line(line);
        if is_success_marker(line, &marker) {
            marker_seen = true;
        }
    })?;

    Ok(BundleExit {
        exit_code,
        marker_seen,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marker_matches_as_a_substring() {
        let marker = success_marker("package.zip");
        assert!(is_success_marker("Bundle created: package.zip", &marker));
        assert!(is_success_marker(
            "[INFO] Bundle created: package.zip (4096 bytes)",
            &marker
        ));
        assert!(!is_success_marker("Bundle created: other.zip", &marker));
        assert!(!is_success_marker("creating bundle...", &marker));
    }
}
