use thiserror::Error;

pub type Result<T> = std::result::Result<T, ExecError>;

/// Failures that prevent a `ProcessResult` from being produced.
///
/// A non-zero exit code is not an error at this layer; it comes back inside
/// the `ProcessResult` and is interpreted by the classifier.
#[derive(Error, Debug)]
pub enum ExecError {
    #[error("Failed to launch '{program}': {source}")]
    Spawn {
        program: String,
        source: std::io::Error,
    },

    #[error("Process '{program}' was terminated by a signal")]
    Signaled { program: String },

    #[error("Command timed out after {timeout_secs}s: {command}")]
    Timeout { command: String, timeout_secs: u64 },

    #[error("Error waiting for '{command}': {source}")]
    Wait {
        command: String,
        source: std::io::Error,
    },
}
