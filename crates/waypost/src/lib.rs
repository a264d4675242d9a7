//! Waypost
//!
//! Bounded status polling for cloud resources that are provisioned
//! asynchronously. A lifecycle operation issues its mutating request, then
//! hands a status fetch and a [`PollSpec`] to a [`StatusPoller`] and awaits
//! the outcome.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │          resource lifecycle handlers             │
//! │      (create / delete, e.g. waypost-transit)     │
//! └─────────────────┬───────────────────────────────┘
//!                   │ PollSpec + fetch
//! ┌─────────────────▼───────────────────────────────┐
//! │                   waypost                        │
//! │  ┌──────────────────────────────────────────┐   │
//! │  │   StatusPoller: delay → fetch → classify  │   │
//! │  └──────────────────────────────────────────┘   │
//! │  ┌──────────────┐  ┌──────────────┐            │
//! │  │ StatusTable  │  │ StatusSource │            │
//! │  └──────────────┘  └──────────────┘            │
//! └─────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```ignore
//! use waypost::{Observation, PollSpec, StatusTable, poll};
//!
//! const ATTACH: StatusTable = StatusTable::new(&["pending"], &["attached", "failed"]);
//!
//! let spec = PollSpec::from_table(&ATTACH)?;
//! let converged = poll(|| async {
//!     let conn = client.get_connection(&gateway_id, &connection_id).await?;
//!     Ok::<_, ApiError>(Observation::found(conn.clone(), conn.status))
//! }, &spec).await?;
//! ```

pub mod error;
pub mod poller;
pub mod source;
pub mod spec;

// Re-exports
pub use error::{PollError, SpecError};
pub use poller::{Converged, Observation, StatusPoller, poll};
pub use source::StatusSource;
pub use spec::{
    ABSENT, DEFAULT_INTERVAL, DEFAULT_TIMEOUT, PollSpec, PollSpecBuilder, StateClass, StatusTable,
};
pub use tokio_util::sync::CancellationToken;
