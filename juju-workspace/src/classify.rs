//! Per-operation exit-code policy.
//!
//! The policy observed at the original call sites is not uniform across
//! operations, so it lives here as one table instead of being scattered
//! through the HTTP handlers.

use juju_core::ProcessResult;

/// Which classification policy applies to an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    /// Exit 0 surfaces stdout; anything else surfaces stderr as a failure.
    Default,
    /// Lookup operations (show-cloud, show-model, ...). Exit 1 is an
    /// informational miss: stderr is surfaced as a normal response body.
    Detail,
    /// Mutating create operations (add-cloud, bootstrap, add-model, deploy).
    /// The tool emits its progress text on stderr, and the original service
    /// surfaced that stream even on success; kept as documented behavior.
    Create,
    /// Credential create/update: stdout on success, stderr otherwise.
    Credential,
}

/// Classified outcome of one invocation, carrying the payload to surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Success(String),
    Failure(String),
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    /// The text to relay to the caller, success or not.
    pub fn into_body(self) -> String {
        match self {
            Outcome::Success(body) | Outcome::Failure(body) => body,
        }
    }
}

/// Map a raw process result to a caller-facing outcome for `kind`.
pub fn classify(result: &ProcessResult, kind: OperationKind) -> Outcome {
    match kind {
        OperationKind::Default => match result.exit_code {
            0 => Outcome::Success(result.stdout.clone()),
            _ => Outcome::Failure(result.stderr.clone()),
        },
        OperationKind::Detail => match result.exit_code {
            0 => Outcome::Success(result.stdout.clone()),
            1 => Outcome::Success(result.stderr.clone()),
            _ => Outcome::Failure(result.stderr.clone()),
        },
        OperationKind::Create => match result.exit_code {
            0 => Outcome::Success(result.stderr.clone()),
            _ => Outcome::Failure(result.stderr.clone()),
        },
        OperationKind::Credential => match result.exit_code {
            0 => Outcome::Success(result.stdout.clone()),
            _ => Outcome::Failure(result.stderr.clone()),
        },
    }
}
