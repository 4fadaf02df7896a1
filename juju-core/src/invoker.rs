//! Blocking subprocess invocation with full output capture.

use std::path::Path;
use std::thread;
use std::time::{Duration, Instant};

use duct::cmd;
use tracing::debug;
use which::which;

use crate::error::{ExecError, Result};

/// Captured outcome of one external command invocation.
///
/// Produced once per invocation and immutable afterwards. A non-zero
/// `exit_code` is a normal value here, not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessResult {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

/// Run `program` with `args` inside `workdir`, blocking until it exits, and
/// capture the entirety of both output streams.
///
/// With `timeout_secs` set, the process is killed once the deadline elapses
/// and `ExecError::Timeout` is returned. `None` waits indefinitely.
pub fn run_command(
    program: &str,
    args: &[String],
    workdir: &Path,
    timeout_secs: Option<u64>,
) -> Result<ProcessResult> {
    let full_command = format!("{} {}", program, args.join(" "));
    debug!("Executing in {}: {}", workdir.display(), full_command);

    let expression = cmd(program, args)
        .dir(workdir)
        .stdout_capture()
        .stderr_capture()
        .unchecked();

    match timeout_secs {
        None => {
            let output = expression
                .run()
                .map_err(|e| spawn_or_wait_error(program, &full_command, e))?;
            into_process_result(program, &output)
        }
        Some(secs) => {
            let handle = expression
                .start()
                .map_err(|e| spawn_or_wait_error(program, &full_command, e))?;

            let start = Instant::now();
            let timeout = Duration::from_secs(secs);

            loop {
                if start.elapsed() >= timeout {
                    let _ = handle.kill();
                    return Err(ExecError::Timeout {
                        command: full_command,
                        timeout_secs: secs,
                    });
                }

                match handle.try_wait() {
                    Ok(Some(output)) => return into_process_result(program, output),
                    Ok(None) => thread::sleep(Duration::from_millis(50)),
                    Err(e) => {
                        return Err(ExecError::Wait {
                            command: full_command,
                            source: e,
                        })
                    }
                }
            }
        }
    }
}

fn into_process_result(program: &str, output: &std::process::Output) -> Result<ProcessResult> {
    let exit_code = output.status.code().ok_or_else(|| ExecError::Signaled {
        program: program.to_string(),
    })?;

    Ok(ProcessResult {
        exit_code,
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
    })
}

fn spawn_or_wait_error(program: &str, full_command: &str, e: std::io::Error) -> ExecError {
    use std::io::ErrorKind;
    match e.kind() {
        ErrorKind::NotFound | ErrorKind::PermissionDenied => ExecError::Spawn {
            program: program.to_string(),
            source: e,
        },
        _ => ExecError::Wait {
            command: full_command.to_string(),
            source: e,
        },
    }
}

/// Checks if a command-line tool is available in the system's PATH.
pub fn is_tool_installed(tool_name: &str) -> bool {
    which(tool_name).is_ok()
}
