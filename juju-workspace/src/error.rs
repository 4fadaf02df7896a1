use thiserror::Error;

pub type Result<T> = std::result::Result<T, WorkspaceError>;

#[derive(Error, Debug)]
pub enum WorkspaceError {
    /// A payload could not be written into the workspace directory. Fatal to
    /// the triggering operation; never retried. No invocation is attempted
    /// after a staging failure.
    #[error("Failed to stage payload '{filename}': {source}")]
    Stage {
        filename: String,
        source: std::io::Error,
    },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Workspace directory error: {0}")]
    Directory(#[from] std::io::Error),

    #[error(transparent)]
    Exec(#[from] juju_core::ExecError),
}
