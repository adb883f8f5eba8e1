//! Child-process output streaming.
//!
//! Every external process in the pipeline (pip probe aside) is run through
//! [`run_streaming`]: stdout and stderr are piped, read on their own
//! threads, and forwarded line by line as they arrive so the log view shows
//! live progress instead of a dump at exit.

use std::io::{BufRead, BufReader, Read};
use std::process::{Command, Stdio};
use std::sync::mpsc;
use std::thread;

use crate::error::BuildError;

/// Runs `cmd` to completion, handing every output line to `on_line` as it
/// arrives. Lines from the two pipes are interleaved in arrival order.
///
/// Returns the exit code, `-1` when the process was terminated by a signal.
pub fn run_streaming(
    mut cmd: Command,
    mut on_line: impl FnMut(&str),
) -> Result<i32, BuildError> {
    cmd.stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    let mut child = cmd.spawn()?;

    let (tx, rx) = mpsc::channel::<String>();
    let mut readers = Vec::new();
    if let Some(out) = child.stdout.take() {
        readers.push(spawn_reader(out, tx.clone()));
    }
    if let Some(err) = child.stderr.take() {
        readers.push(spawn_reader(err, tx.clone()));
    }
    // The loop below ends once both reader threads drop their senders.
    drop(tx);

    for line in rx {
        on_line(&line);
    }
    for handle in readers {
        let _ = handle.join();
    }

    let status = child.wait()?;
    Ok(status.code().unwrap_or(-1))
}

fn spawn_reader(
    pipe: impl Read + Send + 'static,
    tx: mpsc::Sender<String>,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let reader = BufReader::new(pipe);
        for line in reader.lines() {
            match line {
                Ok(l) => {
                    if tx.send(l).is_err() {
                        break;
                    }
                }
                Err(_) => break,
            }
        }
    })
}

#[cfg(test)]
#[cfg(unix)]
mod tests {
    use super::*;

    #[test]
    fn streams_lines_and_reports_exit_code() {
        let mut cmd = Command::new("sh");
        cmd.args(["-c", "echo one; echo two >&2; echo three; exit 3"]);
        let mut lines = Vec::new();
        let code = run_streaming(cmd, |l| lines.push(l.to_string())).unwrap();
        assert_eq!(code, 3);
        assert_eq!(lines.len(), 3);
        assert!(lines.contains(&"one".to_string()));
        assert!(lines.contains(&"two".to_string()));
        assert!(lines.contains(&"three".to_string()));
    }

    #[test]
    fn missing_program_is_an_error() {
        let cmd = Command::new("definitely-not-a-real-binary-xyz");
        assert!(run_streaming(cmd, |_| {}).is_err());
    }
}
