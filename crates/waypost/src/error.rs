//! Poller error types

use std::time::Duration;
use thiserror::Error;

/// Terminal failure of a single polling run.
///
/// `T` is the remote object type, `E` the error type returned by the fetch
/// function. Every variant is fatal to the run; nothing here is retried.
#[derive(Error, Debug)]
pub enum PollError<T, E> {
    /// The deadline elapsed while the resource was still pending.
    #[error(
        "Timeout: still in progress after {elapsed:?} ({attempts} checks, last status {last_status:?})"
    )]
    Timeout {
        elapsed: Duration,
        attempts: u32,
        last_status: Option<String>,
        last_object: Option<T>,
    },

    /// The status query itself failed.
    #[error("Status check {attempt} failed: {source}")]
    FetchFailed { attempt: u32, source: E },

    /// The resource disappeared and absence is not an accepted outcome.
    #[error("Resource not found after {attempts} checks")]
    NotFound { attempts: u32 },

    /// The remote side reported a status the caller's table does not know.
    #[error("Unexpected state {status:?} on check {attempt}, expected one of {expected:?}")]
    UnexpectedState {
        status: String,
        attempt: u32,
        expected: Vec<String>,
    },

    /// The remote side reported one of the configured failure states.
    #[error("Resource entered failure state {status:?} on check {attempt}")]
    Failed {
        status: String,
        attempt: u32,
        object: T,
    },

    #[error("Polling cancelled after {attempts} checks")]
    Cancelled { attempts: u32 },
}

impl<T, E> PollError<T, E> {
    pub fn is_timeout(&self) -> bool {
        matches!(self, PollError::Timeout { .. })
    }

    /// True when the run ended because the status query could not be answered.
    pub fn is_fetch_failure(&self) -> bool {
        matches!(
            self,
            PollError::FetchFailed { .. } | PollError::NotFound { .. }
        )
    }

    /// The last status observed before the run ended, if any.
    pub fn last_status(&self) -> Option<&str> {
        match self {
            PollError::Timeout { last_status, .. } => last_status.as_deref(),
            PollError::UnexpectedState { status, .. } | PollError::Failed { status, .. } => {
                Some(status)
            }
            _ => None,
        }
    }

    /// Number of fetch calls made before the run ended.
    pub fn attempts(&self) -> u32 {
        match self {
            PollError::Timeout { attempts, .. }
            | PollError::NotFound { attempts }
            | PollError::Cancelled { attempts } => *attempts,
            PollError::FetchFailed { attempt, .. }
            | PollError::UnexpectedState { attempt, .. }
            | PollError::Failed { attempt, .. } => *attempt,
        }
    }
}

/// Rejected poll configuration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SpecError {
    #[error("State {status:?} appears in more than one of pending/target/failure")]
    Overlap { status: String },

    #[error("Target state set is empty")]
    NoTarget,

    #[error("Poll interval must be greater than zero")]
    ZeroInterval,

    #[error("Continuous target occurrence must be at least 1")]
    ZeroOccurrence,
}

pub type Result<T> = std::result::Result<T, SpecError>;
