//! pip probing and bootstrap.

use std::process::Command;

use log::{info, warn};

use crate::error::BuildError;
use crate::events::EventSink;
use crate::process;

/// Interpreter used for pip and the bundler: the `py` launcher on Windows,
/// `python3` everywhere else.
pub fn default_interpreter() -> &'static str {
    if cfg!(windows) {
        "py"
    } else {
        "python3"
    }
}

/// Verifies that pip answers `--version`; when it does not, attempts a
/// bootstrap install through `ensurepip`. Both failing is
/// [`BuildError::ToolchainUnavailable`], which is fatal to the run — there
/// is no retry.
pub fn ensure_pip(interpreter: &str, sink: &dyn EventSink) -> Result<(), BuildError> {
    sink.line("--- Verifying 'pip' installation ---");

    let probe = Command::new(interpreter)
        .args(["-m", "pip", "--version"])
        .output();
    if let Ok(out) = &probe {
        if out.status.success() {
            sink.line("PIP: 'pip' is already installed and functional.");
            return Ok(());
        }
    }

    sink.line("PIP: 'pip' command not found or failed. Attempting to install 'pip' using ensurepip...");
    info!("pip probe failed, bootstrapping via ensurepip");

    let mut bootstrap = Command::new(interpreter);
    bootstrap.args(["-m", "ensurepip", "--default-pip"]);
    match process::run_streaming(bootstrap, |line| sink.line(line)) {
        Ok(0) => {
            sink.line("PIP: 'pip' installed successfully using ensurepip!");
            Ok(())
        }
        Ok(code) => {
            warn!("ensurepip bootstrap exited with code {code}");
            sink.line(&format!(
                "PIP: Failed to install 'pip' via ensurepip. Exit code: {code}"
            ));
            sink.line("PIP: Please install 'pip' manually using 'python -m ensurepip --default-pip' in your console.");
            Err(BuildError::ToolchainUnavailable)
        }
        Err(e) => {
            warn!("ensurepip bootstrap could not be started: {e}");
            sink.line(&format!(
                "PIP: Failed to install 'pip' via ensurepip. Error: {e}"
            ));
            sink.line("PIP: Please install 'pip' manually using 'python -m ensurepip --default-pip' in your console.");
            Err(BuildError::ToolchainUnavailable)
        }
    }
}
