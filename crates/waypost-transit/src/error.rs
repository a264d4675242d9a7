//! Transit gateway lifecycle error types

use crate::api::ApiError;
use crate::model::ResourceKind;
use std::time::Duration;
use thiserror::Error;
use waypost::{PollError, SpecError};

#[derive(Error, Debug)]
pub enum TransitError {
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// The remote system never confirmed completion in the allotted time.
    #[error(
        "{kind} {id} is still in progress after {} minutes (last status {last_status:?})",
        .elapsed.as_secs() / 60
    )]
    StillInProgress {
        kind: ResourceKind,
        id: String,
        elapsed: Duration,
        last_status: Option<String>,
    },

    /// The remote system gave up on the operation.
    #[error("{kind} {id} was rejected by the remote system (status {status:?})")]
    Rejected {
        kind: ResourceKind,
        id: String,
        status: String,
    },

    #[error("{kind} {id} reported unexpected status {status:?}")]
    UnexpectedStatus {
        kind: ResourceKind,
        id: String,
        status: String,
    },

    #[error("{kind} {id} disappeared while waiting for it")]
    Vanished { kind: ResourceKind, id: String },

    #[error("Waiting for {kind} {id} was cancelled")]
    Cancelled { kind: ResourceKind, id: String },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid poll specification: {0}")]
    Spec(#[from] SpecError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl TransitError {
    /// Map the end of a failed polling run onto a user-facing error.
    pub fn from_poll<T>(kind: ResourceKind, id: &str, err: PollError<T, ApiError>) -> Self {
        let id = id.to_string();
        match err {
            PollError::Timeout {
                elapsed,
                last_status,
                ..
            } => TransitError::StillInProgress {
                kind,
                id,
                elapsed,
                last_status,
            },
            PollError::FetchFailed { source, .. } => TransitError::Api(source),
            PollError::NotFound { .. } => TransitError::Vanished { kind, id },
            PollError::UnexpectedState { status, .. } => {
                TransitError::UnexpectedStatus { kind, id, status }
            }
            PollError::Failed { status, .. } => TransitError::Rejected { kind, id, status },
            PollError::Cancelled { .. } => TransitError::Cancelled { kind, id },
        }
    }

    /// True when the operation may still complete on the remote side.
    pub fn is_still_in_progress(&self) -> bool {
        matches!(self, TransitError::StillInProgress { .. })
    }

    /// True when the remote side rejected or failed the operation.
    pub fn is_rejected(&self) -> bool {
        matches!(
            self,
            TransitError::Rejected { .. } | TransitError::UnexpectedStatus { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, TransitError>;
