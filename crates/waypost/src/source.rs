//! Remote status source abstraction

use crate::poller::Observation;
use async_trait::async_trait;

/// Anything that can answer "what is the current status of resource X".
///
/// Implementations bind a concrete remote identifier to a read call on a
/// provider client. One call performs exactly one round-trip; retrying is
/// the poller's job, not the source's.
#[async_trait]
pub trait StatusSource: Send + Sync {
    /// Remote object returned by a successful fetch
    type Object: Send;

    /// Error returned when the status query itself fails
    type Error: Send;

    /// Human-readable identifier for log events (e.g. "connection gw-1/conn-2")
    fn describe(&self) -> String;

    /// Fetch the current status once.
    ///
    /// A missing resource is reported as [`Observation::Gone`], not as an
    /// error, so the poller can honour the absence sentinel.
    async fn fetch(&self) -> Result<Observation<Self::Object>, Self::Error>;
}
