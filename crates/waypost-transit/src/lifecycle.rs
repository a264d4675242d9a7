//! Transit gateway lifecycle operations
//!
//! Every mutating call issues its request, then blocks on a fresh polling
//! run until the remote object settles.

use crate::api::{ApiError, TransitGatewayApi};
use crate::config::TransitConfig;
use crate::error::{Result, TransitError};
use crate::model::{
    Connection, ConnectionRequest, GreTunnel, RemoteObject, ResourceKind, RouteReport,
    TunnelRequest,
};
use crate::source::{ConnectionStatus, RouteReportStatus, TunnelStatus};
use crate::status::{
    CONNECTION_ATTACH, CONNECTION_DETACH, FAILED, ROUTE_REPORT, TUNNEL_ATTACH, TUNNEL_DETACH,
};
use std::time::Duration;
use waypost::{CancellationToken, Converged, StatusPoller, StatusSource, StatusTable};

/// Lifecycle handler for one transit gateway API client
pub struct TransitGateway<A> {
    api: A,
    config: TransitConfig,
    cancel: Option<CancellationToken>,
}

impl<A: TransitGatewayApi> TransitGateway<A> {
    pub fn new(api: A, config: TransitConfig) -> Self {
        Self {
            api,
            config,
            cancel: None,
        }
    }

    /// Abort in-flight waits when `token` is cancelled.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn config(&self) -> &TransitConfig {
        &self.config
    }

    /// Create a connection and wait until it is attached.
    pub async fn attach_connection(
        &self,
        gateway_id: &str,
        request: &ConnectionRequest,
    ) -> Result<Connection> {
        tracing::info!(gateway = gateway_id, name = %request.name, "Creating connection");
        let created = self.api.create_connection(gateway_id, request).await?;

        let source = ConnectionStatus::new(&self.api, gateway_id, &created.id);
        let converged = self
            .wait(
                ResourceKind::Connection,
                &created.id,
                &source,
                &CONNECTION_ATTACH,
                self.config.create_timeout(),
            )
            .await?;

        settled(ResourceKind::Connection, &created.id, converged)
    }

    /// Delete a connection and wait until it is gone.
    pub async fn detach_connection(&self, gateway_id: &str, connection_id: &str) -> Result<()> {
        tracing::info!(
            gateway = gateway_id,
            connection = connection_id,
            "Deleting connection"
        );
        let deleted = self.api.delete_connection(gateway_id, connection_id).await;
        if !delete_issued(deleted)? {
            return Ok(());
        }

        let source = ConnectionStatus::new(&self.api, gateway_id, connection_id);
        self.wait(
            ResourceKind::Connection,
            connection_id,
            &source,
            &CONNECTION_DETACH,
            self.config.delete_timeout(),
        )
        .await?;
        Ok(())
    }

    /// Create a GRE tunnel on `connection_id` and wait until it is attached.
    pub async fn attach_tunnel(
        &self,
        gateway_id: &str,
        connection_id: &str,
        request: &TunnelRequest,
    ) -> Result<GreTunnel> {
        tracing::info!(
            gateway = gateway_id,
            connection = connection_id,
            name = %request.name,
            "Creating GRE tunnel"
        );
        let created = self
            .api
            .create_tunnel(gateway_id, connection_id, request)
            .await?;

        let source = TunnelStatus::new(&self.api, gateway_id, connection_id, &created.id);
        let converged = self
            .wait(
                ResourceKind::GreTunnel,
                &created.id,
                &source,
                &TUNNEL_ATTACH,
                self.config.create_timeout(),
            )
            .await?;

        settled(ResourceKind::GreTunnel, &created.id, converged)
    }

    /// Delete a GRE tunnel and wait until it is gone.
    pub async fn detach_tunnel(
        &self,
        gateway_id: &str,
        connection_id: &str,
        tunnel_id: &str,
    ) -> Result<()> {
        tracing::info!(
            gateway = gateway_id,
            connection = connection_id,
            tunnel = tunnel_id,
            "Deleting GRE tunnel"
        );
        let deleted = self
            .api
            .delete_tunnel(gateway_id, connection_id, tunnel_id)
            .await;
        if !delete_issued(deleted)? {
            return Ok(());
        }

        let source = TunnelStatus::new(&self.api, gateway_id, connection_id, tunnel_id);
        self.wait(
            ResourceKind::GreTunnel,
            tunnel_id,
            &source,
            &TUNNEL_DETACH,
            self.config.delete_timeout(),
        )
        .await?;
        Ok(())
    }

    /// Request a route report and wait until it is complete.
    pub async fn generate_route_report(&self, gateway_id: &str) -> Result<RouteReport> {
        tracing::info!(gateway = gateway_id, "Requesting route report");
        let created = self.api.create_route_report(gateway_id).await?;

        let source = RouteReportStatus::new(&self.api, gateway_id, &created.id);
        let converged = self
            .wait(
                ResourceKind::RouteReport,
                &created.id,
                &source,
                &ROUTE_REPORT,
                self.config.create_timeout(),
            )
            .await?;

        settled(ResourceKind::RouteReport, &created.id, converged)
    }

    /// Delete a route report. Reports are removed synchronously, so there
    /// is nothing to wait for.
    pub async fn delete_route_report(&self, gateway_id: &str, report_id: &str) -> Result<()> {
        tracing::info!(
            gateway = gateway_id,
            report = report_id,
            "Deleting route report"
        );
        let deleted = self.api.delete_route_report(gateway_id, report_id).await;
        delete_issued(deleted)?;
        Ok(())
    }

    async fn wait<S>(
        &self,
        kind: ResourceKind,
        id: &str,
        source: &S,
        table: &StatusTable,
        timeout: Duration,
    ) -> Result<Converged<S::Object>>
    where
        S: StatusSource<Error = ApiError>,
    {
        let spec = self.config.poll_spec(table, timeout)?;
        let mut poller = StatusPoller::new(spec);
        if let Some(token) = &self.cancel {
            poller = poller.with_cancellation(token.clone());
        }

        poller
            .watch(source)
            .await
            .map_err(|err| TransitError::from_poll(kind, id, err))
    }
}

/// Returns false when the resource was already gone.
fn delete_issued(result: std::result::Result<(), ApiError>) -> Result<bool> {
    match result {
        Ok(()) => Ok(true),
        Err(err) if err.is_not_found() => {
            tracing::debug!("Resource already deleted: {}", err);
            Ok(false)
        }
        Err(err) => Err(err.into()),
    }
}

/// Unwrap a converged create and reject domain-level failure.
fn settled<T: RemoteObject>(kind: ResourceKind, id: &str, converged: Converged<T>) -> Result<T> {
    let object = converged.object.ok_or_else(|| TransitError::Vanished {
        kind,
        id: id.to_string(),
    })?;

    if object.status() == FAILED {
        tracing::warn!(resource = %kind, id = object.id(), "Remote system reported failure");
        return Err(TransitError::Rejected {
            kind,
            id: object.id().to_string(),
            status: object.status().to_string(),
        });
    }

    Ok(object)
}
