//! Transit gateway resource models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kind of remote object a lifecycle operation waits on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Connection,
    GreTunnel,
    RouteReport,
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResourceKind::Connection => write!(f, "connection"),
            ResourceKind::GreTunnel => write!(f, "GRE tunnel"),
            ResourceKind::RouteReport => write!(f, "route report"),
        }
    }
}

/// Common view over the remote objects the poller inspects
pub trait RemoteObject {
    fn id(&self) -> &str;
    fn status(&self) -> &str;
}

/// Transit gateway connection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Connection {
    pub id: String,

    pub name: String,

    /// Network type (e.g. "vpc", "classic", "gre_tunnel", "directlink")
    pub network_type: String,

    /// CRN or ID of the attached network
    #[serde(default)]
    pub network_id: Option<String>,

    pub status: String,

    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl RemoteObject for Connection {
    fn id(&self) -> &str {
        &self.id
    }

    fn status(&self) -> &str {
        &self.status
    }
}

/// Request body for creating a connection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectionRequest {
    pub name: String,

    pub network_type: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network_id: Option<String>,

    /// Underlay connection for GRE-type connections
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_connection_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zone: Option<String>,
}

impl ConnectionRequest {
    pub fn new(name: impl Into<String>, network_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            network_type: network_type.into(),
            network_id: None,
            base_connection_id: None,
            zone: None,
        }
    }

    pub fn with_network_id(mut self, network_id: impl Into<String>) -> Self {
        self.network_id = Some(network_id.into());
        self
    }

    pub fn with_base_connection(mut self, connection_id: impl Into<String>) -> Self {
        self.base_connection_id = Some(connection_id.into());
        self
    }

    pub fn with_zone(mut self, zone: impl Into<String>) -> Self {
        self.zone = Some(zone.into());
        self
    }
}

/// GRE tunnel on a redundant GRE connection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GreTunnel {
    pub id: String,

    pub name: String,

    pub status: String,

    pub local_gateway_ip: String,

    pub local_tunnel_ip: String,

    pub remote_gateway_ip: String,

    pub remote_tunnel_ip: String,

    #[serde(default)]
    pub remote_bgp_asn: Option<u32>,

    #[serde(default)]
    pub zone: Option<String>,

    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl RemoteObject for GreTunnel {
    fn id(&self) -> &str {
        &self.id
    }

    fn status(&self) -> &str {
        &self.status
    }
}

/// Request body for creating a GRE tunnel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TunnelRequest {
    pub name: String,
    pub local_gateway_ip: String,
    pub local_tunnel_ip: String,
    pub remote_gateway_ip: String,
    pub remote_tunnel_ip: String,
    pub zone: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remote_bgp_asn: Option<u32>,
}

/// Snapshot of the routes known to a transit gateway
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteReport {
    pub id: String,

    pub status: String,

    #[serde(default)]
    pub connections: Vec<RouteReportConnection>,

    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl RemoteObject for RouteReport {
    fn id(&self) -> &str {
        &self.id
    }

    fn status(&self) -> &str {
        &self.status
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteReportConnection {
    pub id: String,

    pub name: String,

    #[serde(rename = "type")]
    pub connection_type: String,

    #[serde(default)]
    pub routes: Vec<Route>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    pub prefix: String,
}
