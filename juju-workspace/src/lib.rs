//! Workspace-scoped command execution engine
//!
//! This crate contains the core logic for driving the external orchestration
//! tools (juju, helm) from an isolated working directory: staging input
//! artifacts, building per-operation argument vectors, invoking the tool, and
//! classifying its exit into a caller-facing outcome. It is consumed by the
//! juju-api HTTP service but can also be used by CLI commands or other entry
//! points.

pub mod classify;
pub mod error;
pub mod workspace;

pub use classify::{classify, OperationKind, Outcome};
pub use error::{Result, WorkspaceError};
pub use workspace::{ControllerSpec, Workspace, K8S_CONTROL_PLANE_UNIT};
