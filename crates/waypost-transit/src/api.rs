//! Transit gateway API abstraction
//!
//! The vendor SDK (HTTP transport, authentication, request marshalling)
//! lives behind [`TransitGatewayApi`]. Lifecycle handlers only ever talk to
//! this trait.

use crate::model::{Connection, ConnectionRequest, GreTunnel, RouteReport, TunnelRequest};
use async_trait::async_trait;
use thiserror::Error;

/// Errors reported by the transit gateway API client
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("API error ({code}): {message}")]
    Status { code: u16, message: String },

    #[error("Transport error: {0}")]
    Transport(String),
}

impl ApiError {
    /// True for "the resource does not exist" answers, however the client
    /// chose to report them.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            ApiError::NotFound(_) | ApiError::Status { code: 404, .. }
        )
    }
}

/// Transit gateway API
///
/// Every method is a single request/response round-trip.
#[async_trait]
pub trait TransitGatewayApi: Send + Sync {
    async fn create_connection(
        &self,
        gateway_id: &str,
        request: &ConnectionRequest,
    ) -> Result<Connection, ApiError>;

    async fn get_connection(
        &self,
        gateway_id: &str,
        connection_id: &str,
    ) -> Result<Connection, ApiError>;

    async fn delete_connection(
        &self,
        gateway_id: &str,
        connection_id: &str,
    ) -> Result<(), ApiError>;

    async fn create_tunnel(
        &self,
        gateway_id: &str,
        connection_id: &str,
        request: &TunnelRequest,
    ) -> Result<GreTunnel, ApiError>;

    async fn get_tunnel(
        &self,
        gateway_id: &str,
        connection_id: &str,
        tunnel_id: &str,
    ) -> Result<GreTunnel, ApiError>;

    async fn delete_tunnel(
        &self,
        gateway_id: &str,
        connection_id: &str,
        tunnel_id: &str,
    ) -> Result<(), ApiError>;

    async fn create_route_report(&self, gateway_id: &str) -> Result<RouteReport, ApiError>;

    async fn get_route_report(
        &self,
        gateway_id: &str,
        report_id: &str,
    ) -> Result<RouteReport, ApiError>;

    async fn delete_route_report(&self, gateway_id: &str, report_id: &str) -> Result<(), ApiError>;
}
