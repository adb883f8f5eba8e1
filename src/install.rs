//! Installation of the Python packages the bundler needs.

use std::process::Command;

use log::warn;

use crate::error::BuildError;
use crate::events::EventSink;
use crate::process;

/// Packages the bundler script imports. Installed on every run; pip keeps
/// already-satisfied entries as no-ops.
pub const REQUIRED_PACKAGES: &[&str] = &["pyyaml", "requests"];

/// Runs `pip install` for `packages`, forwarding each merged output line to
/// the sink prefixed `DEP: ` as it arrives. Non-zero exit terminates the
/// run with [`BuildError::DependencyInstall`]; nothing is retried.
pub fn install_dependencies(
    interpreter: &str,
    packages: &[&str],
    sink: &dyn EventSink,
) -> Result<(), BuildError> {
    sink.line("--- Checking required Python packages ---");

    let mut cmd = Command::new(interpreter);
    cmd.args(["-m", "pip", "install"]).args(packages);

    let code = match process::run_streaming(cmd, |line| sink.line(&format!("DEP: {line}"))) {
        Ok(code) => code,
        Err(e) => {
            sink.line(&format!("--- ERROR during dependency check: {e} ---"));
            return Err(e);
        }
    };

    if code == 0 {
        sink.line("--- All dependencies checked and installed successfully. ---");
        Ok(())
    } else {
        warn!("pip install exited with code {code}");
        sink.line("--- DEPENDENCY INSTALLATION FAILED! Check connection/permissions. ---");
        Err(BuildError::DependencyInstall { exit_code: code })
    }
}
