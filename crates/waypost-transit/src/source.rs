//! Status sources for transit gateway resources
//!
//! Each source binds remote identifiers to one `get_*` call. A not-found
//! answer from the API becomes [`Observation::Gone`].

use crate::api::{ApiError, TransitGatewayApi};
use crate::model::{Connection, GreTunnel, RemoteObject, RouteReport};
use async_trait::async_trait;
use waypost::{Observation, StatusSource};

fn observe<T: RemoteObject>(result: Result<T, ApiError>) -> Result<Observation<T>, ApiError> {
    match result {
        Ok(object) => {
            let status = object.status().to_string();
            Ok(Observation::found(object, status))
        }
        Err(err) if err.is_not_found() => Ok(Observation::Gone),
        Err(err) => Err(err),
    }
}

/// Status of one transit gateway connection
pub struct ConnectionStatus<'a, A: ?Sized> {
    api: &'a A,
    gateway_id: &'a str,
    connection_id: &'a str,
}

impl<'a, A: ?Sized> ConnectionStatus<'a, A> {
    pub fn new(api: &'a A, gateway_id: &'a str, connection_id: &'a str) -> Self {
        Self {
            api,
            gateway_id,
            connection_id,
        }
    }
}

#[async_trait]
impl<'a, A> StatusSource for ConnectionStatus<'a, A>
where
    A: TransitGatewayApi + ?Sized,
{
    type Object = Connection;
    type Error = ApiError;

    fn describe(&self) -> String {
        format!("connection {}/{}", self.gateway_id, self.connection_id)
    }

    async fn fetch(&self) -> Result<Observation<Connection>, ApiError> {
        observe(
            self.api
                .get_connection(self.gateway_id, self.connection_id)
                .await,
        )
    }
}

/// Status of one GRE tunnel
pub struct TunnelStatus<'a, A: ?Sized> {
    api: &'a A,
    gateway_id: &'a str,
    connection_id: &'a str,
    tunnel_id: &'a str,
}

impl<'a, A: ?Sized> TunnelStatus<'a, A> {
    pub fn new(
        api: &'a A,
        gateway_id: &'a str,
        connection_id: &'a str,
        tunnel_id: &'a str,
    ) -> Self {
        Self {
            api,
            gateway_id,
            connection_id,
            tunnel_id,
        }
    }
}

#[async_trait]
impl<'a, A> StatusSource for TunnelStatus<'a, A>
where
    A: TransitGatewayApi + ?Sized,
{
    type Object = GreTunnel;
    type Error = ApiError;

    fn describe(&self) -> String {
        format!(
            "GRE tunnel {}/{}/{}",
            self.gateway_id, self.connection_id, self.tunnel_id
        )
    }

    async fn fetch(&self) -> Result<Observation<GreTunnel>, ApiError> {
        observe(
            self.api
                .get_tunnel(self.gateway_id, self.connection_id, self.tunnel_id)
                .await,
        )
    }
}

/// Status of one route report
pub struct RouteReportStatus<'a, A: ?Sized> {
    api: &'a A,
    gateway_id: &'a str,
    report_id: &'a str,
}

impl<'a, A: ?Sized> RouteReportStatus<'a, A> {
    pub fn new(api: &'a A, gateway_id: &'a str, report_id: &'a str) -> Self {
        Self {
            api,
            gateway_id,
            report_id,
        }
    }
}

#[async_trait]
impl<'a, A> StatusSource for RouteReportStatus<'a, A>
where
    A: TransitGatewayApi + ?Sized,
{
    type Object = RouteReport;
    type Error = ApiError;

    fn describe(&self) -> String {
        format!("route report {}/{}", self.gateway_id, self.report_id)
    }

    async fn fetch(&self) -> Result<Observation<RouteReport>, ApiError> {
        observe(
            self.api
                .get_route_report(self.gateway_id, self.report_id)
                .await,
        )
    }
}
