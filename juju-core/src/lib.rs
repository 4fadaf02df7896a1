//! Foundation layer: process invocation and shared error types.
//!
//! This crate knows nothing about juju or helm semantics. It launches an
//! arbitrary program inside a given working directory, captures both output
//! streams in full, and reports abnormal terminations (spawn failure, signal,
//! deadline exceeded) as errors distinct from an ordinary non-zero exit.

pub mod error;
pub mod invoker;

pub use error::{ExecError, Result};
pub use invoker::{is_tool_installed, run_command, ProcessResult};
