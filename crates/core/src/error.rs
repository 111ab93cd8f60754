// Central Error Type for the Use Cases

use crate::domain::DomainError;
use crate::port::CollaboratorError;
use std::fmt;
use thiserror::Error;

/// Step of the executor sequence that raised an error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Precondition,
    Build,
    Persist,
    Publish,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Precondition => write!(f, "PRECONDITION"),
            Step::Build => write!(f, "BUILD"),
            Step::Persist => write!(f, "PERSIST"),
            Step::Publish => write!(f, "PUBLISH"),
        }
    }
}

/// Use-case error type
///
/// Collaborator failures are surfaced unchanged as the `source` of the
/// variant for the step that raised them.
#[derive(Error, Debug)]
pub enum UseCaseError {
    #[error("Precondition failed for {subject_id}: {reason}")]
    PreconditionFailed { subject_id: String, reason: String },

    #[error("Precondition check errored for {subject_id}: {source}")]
    PreconditionCheck {
        subject_id: String,
        #[source]
        source: CollaboratorError,
    },

    #[error("Persistence failed: {0}")]
    PersistenceFailed(#[source] CollaboratorError),

    #[error("Publish failed for {entity_id} (compensated: {compensated}): {source}")]
    PublishFailed {
        entity_id: String,
        compensated: bool,
        #[source]
        source: CollaboratorError,
    },

    #[error("Deadline of {deadline_ms}ms exceeded during {step} (committed: {committed})")]
    DeadlineExceeded {
        deadline_ms: u64,
        /// Step that was pending when the deadline elapsed
        step: Step,
        /// True only once persist has returned and no compensation undid it
        committed: bool,
    },

    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),
}

impl UseCaseError {
    /// Step that raised the error
    pub fn step(&self) -> Step {
        match self {
            UseCaseError::PreconditionFailed { .. } | UseCaseError::PreconditionCheck { .. } => {
                Step::Precondition
            }
            UseCaseError::Domain(_) => Step::Build,
            UseCaseError::PersistenceFailed(_) => Step::Persist,
            UseCaseError::PublishFailed { .. } => Step::Publish,
            UseCaseError::DeadlineExceeded { step, .. } => *step,
        }
    }

    /// True when the entity was committed by the store before the failure
    pub fn is_committed(&self) -> bool {
        matches!(
            self,
            UseCaseError::PublishFailed {
                compensated: false,
                ..
            } | UseCaseError::DeadlineExceeded {
                committed: true,
                ..
            }
        )
    }
}

/// Result type alias using UseCaseError
pub type Result<T> = std::result::Result<T, UseCaseError>;
