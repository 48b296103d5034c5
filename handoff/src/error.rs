//! Handoff error types
//!
//! Every validation gate has its own variant, and every variant carries a
//! remediation hint an operator can act on directly. Mutation failures are
//! tagged with the step that failed so a partial transfer can be repaired by
//! hand.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for handoff operations
pub type HandoffResult<T> = Result<T, HandoffError>;

/// Which mutation step of a transfer failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferStep {
    /// Copy of the staged artifact to its destination
    Deliver,
    /// Copy of the staged artifact into the lifecycle archive
    Archive,
    /// Deletion of the staged original
    Cleanup,
}

impl std::fmt::Display for TransferStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Deliver => write!(f, "deliver"),
            Self::Archive => write!(f, "archive"),
            Self::Cleanup => write!(f, "cleanup"),
        }
    }
}

/// Errors that can occur during handoff operations
#[derive(Error, Debug)]
pub enum HandoffError {
    /// Role name outside the fixed enumeration
    #[error("unknown role '{name}'")]
    UnknownRole { name: String },

    /// Unit name that is not a single path segment
    #[error("invalid unit name '{name}': {reason}")]
    InvalidUnitName { name: String, reason: String },

    /// No request staged in the planner's staging area
    #[error("no staged request at {path}")]
    MissingStagedRequest { path: PathBuf },

    /// No response staged in the role's directory
    #[error("no staged response at {path}")]
    MissingStagedResponse { path: PathBuf },

    /// Lifecycle unit directory does not exist
    #[error("lifecycle unit '{unit}' not found at {path}")]
    UnknownUnit { unit: String, path: PathBuf },

    /// Lifecycle unit has no requirements artifact
    #[error("lifecycle unit '{unit}' has no requirements artifact at {path}")]
    MissingRequirements { unit: String, path: PathBuf },

    /// Staged request does not reference the unit's requirements artifact
    #[error("staged request does not reference '{reference}'")]
    UnboundRequest { reference: String },

    /// A mutation step failed after validation passed
    #[error("{step} step failed for {path}: {source}")]
    StepFailed {
        step: TransferStep,
        path: PathBuf,
        source: std::io::Error,
    },

    /// IO error wrapper
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl HandoffError {
    /// Create an invalid unit name error
    pub fn invalid_unit_name(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidUnitName {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Create a step failure error
    pub fn step_failed(step: TransferStep, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::StepFailed {
            step,
            path: path.into(),
            source,
        }
    }

    /// Remediation hint for the operator
    pub fn remediation(&self) -> Option<String> {
        match self {
            Self::UnknownRole { .. } => {
                Some("valid roles are: dev, test, review, doc".to_string())
            }
            Self::InvalidUnitName { .. } => Some(
                "use the bare lifecycle folder name, e.g. 'issue-42', not a path".to_string(),
            ),
            Self::MissingStagedRequest { path } => Some(format!(
                "write the outgoing request to {} before sending",
                path.display()
            )),
            Self::MissingStagedResponse { path } => Some(format!(
                "write the outgoing response to {} before sending",
                path.display()
            )),
            Self::UnknownUnit { path, .. } => Some(format!(
                "create the lifecycle folder first: mkdir -p {}",
                path.display()
            )),
            Self::MissingRequirements { path, .. } => Some(format!(
                "author the requirements artifact at {} before sending a request",
                path.display()
            )),
            Self::UnboundRequest { reference } => Some(format!(
                "the request text must mention {} so the handoff is bound to its requirements",
                reference
            )),
            Self::StepFailed { step, .. } => Some(format!(
                "no rollback is performed; inspect the workspace and re-run once the {} step's cause is fixed",
                step
            )),
            Self::Io(_) => None,
        }
    }

    /// Error message with the remediation hint appended
    pub fn with_remediation(&self) -> String {
        match self.remediation() {
            Some(hint) => format!("{}\nhint: {}", self, hint),
            None => self.to_string(),
        }
    }
}
