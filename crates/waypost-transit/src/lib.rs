//! Transit gateway lifecycle for Waypost
//!
//! Creates and deletes transit gateway connections, GRE tunnels and route
//! reports, waiting on each until the remote side settles.
//!
//! # Operations
//!
//! | Operation                | Waits on            | Settles when                |
//! |--------------------------|---------------------|-----------------------------|
//! | `attach_connection`      | `CONNECTION_ATTACH` | `attached` (or `failed`)    |
//! | `detach_connection`      | `CONNECTION_DETACH` | `detached` or gone          |
//! | `attach_tunnel`          | `TUNNEL_ATTACH`     | `attached` (or `failed`)    |
//! | `detach_tunnel`          | `TUNNEL_DETACH`     | `detached` or gone          |
//! | `generate_route_report`  | `ROUTE_REPORT`      | `complete`                  |
//!
//! # Example
//!
//! ```ignore
//! use waypost_transit::{ConnectionRequest, TransitConfig, TransitGateway};
//!
//! let gateway = TransitGateway::new(client, TransitConfig::from_env()?);
//! let request = ConnectionRequest::new("vpc-east", "vpc").with_network_id(vpc_crn);
//!
//! match gateway.attach_connection("gw-1", &request).await {
//!     Ok(conn) => println!("attached {}", conn.id),
//!     Err(e) if e.is_still_in_progress() => eprintln!("not confirmed yet: {e}"),
//!     Err(e) => eprintln!("rejected: {e}"),
//! }
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod lifecycle;
pub mod model;
pub mod source;
pub mod status;

pub use api::{ApiError, TransitGatewayApi};
pub use config::TransitConfig;
pub use error::{Result, TransitError};
pub use lifecycle::TransitGateway;
pub use model::{
    Connection, ConnectionRequest, GreTunnel, RemoteObject, ResourceKind, Route, RouteReport,
    RouteReportConnection, TunnelRequest,
};
pub use source::{ConnectionStatus, RouteReportStatus, TunnelStatus};
