use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::{Deserialize, Serialize};

use crate::error::{ErrorKind, VideoError};

/// Why an operation ended in `Failed`: a structured kind plus the display message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Failure {
    pub kind: ErrorKind,
    pub message: String,
}

impl From<&VideoError> for Failure {
    fn from(err: &VideoError) -> Self {
        Failure {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

impl Display for Failure {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.message)
    }
}

/// Progress of one asynchronous operation.
///
/// Per call the state moves `Idle | Succeeded | Failed -> InProgress -> Succeeded | Failed`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "state", content = "value", rename_all = "snake_case")]
pub enum OperationState<T> {
    #[default]
    Idle,
    InProgress,
    Succeeded(T),
    Failed(Failure),
}

pub type UploadState = OperationState<()>;
pub type ListState = OperationState<()>;

impl<T> OperationState<T> {
    pub fn is_in_progress(&self) -> bool {
        matches!(self, OperationState::InProgress)
    }

    pub fn is_succeeded(&self) -> bool {
        matches!(self, OperationState::Succeeded(_))
    }

    pub fn failure(&self) -> Option<&Failure> {
        match self {
            OperationState::Failed(failure) => Some(failure),
            _ => None,
        }
    }

    /// Terminal state for a finished call.
    pub fn from_result(result: &Result<T, VideoError>) -> Self
    where
        T: Clone,
    {
        match result {
            Ok(value) => OperationState::Succeeded(value.clone()),
            Err(err) => OperationState::Failed(Failure::from(err)),
        }
    }
}

impl<T> Display for OperationState<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            OperationState::Idle => write!(f, "idle"),
            OperationState::InProgress => write!(f, "in_progress"),
            OperationState::Succeeded(_) => write!(f, "succeeded"),
            OperationState::Failed(failure) => write!(f, "failed: {}", failure),
        }
    }
}
