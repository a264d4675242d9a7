//! Status vocabularies
//!
//! Each lifecycle operation waits on one of these tables. `failed` is part
//! of the attach targets: the poller stops on it and the lifecycle handler
//! re-reads the final status to report the rejection.

use waypost::{ABSENT, StatusTable};

pub const PENDING: &str = "pending";
pub const ATTACHED: &str = "attached";
pub const FAILED: &str = "failed";
pub const DELETING: &str = "deleting";
pub const DETACHING: &str = "detaching";
pub const DETACHED: &str = "detached";
pub const COMPLETE: &str = "complete";

pub const CONNECTION_ATTACH: StatusTable = StatusTable::new(&[PENDING], &[ATTACHED, FAILED]);

pub const CONNECTION_DETACH: StatusTable =
    StatusTable::new(&[DELETING, DETACHING], &[DETACHED, ABSENT]);

pub const TUNNEL_ATTACH: StatusTable = StatusTable::new(&[PENDING], &[ATTACHED, FAILED]);

pub const TUNNEL_DETACH: StatusTable =
    StatusTable::new(&[DELETING, DETACHING], &[DETACHED, ABSENT]);

pub const ROUTE_REPORT: StatusTable = StatusTable::new(&[PENDING], &[COMPLETE]);
