use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;
use waypost_transit::{
    ApiError, Connection, ConnectionRequest, GreTunnel, RouteReport, TransitGatewayApi,
    TunnelRequest,
};

/// Scripted answer for the next `get_*` call
#[derive(Debug, Clone, Copy)]
pub enum Reply {
    Status(&'static str),
    Gone,
    Error(u16),
}

/// In-memory transit gateway API. `get_*` calls replay `replies` in order;
/// the last reply repeats.
#[derive(Default)]
pub struct MockApi {
    replies: Mutex<VecDeque<Reply>>,
    calls: Mutex<Vec<String>>,
    create_error: Option<ApiError>,
    delete_error: Option<ApiError>,
}

impl MockApi {
    pub fn new(replies: &[Reply]) -> Self {
        Self {
            replies: Mutex::new(replies.iter().copied().collect()),
            ..Default::default()
        }
    }

    #[allow(dead_code)]
    pub fn failing_create(mut self, err: ApiError) -> Self {
        self.create_error = Some(err);
        self
    }

    #[allow(dead_code)]
    pub fn failing_delete(mut self, err: ApiError) -> Self {
        self.delete_error = Some(err);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, call: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| *c == call)
            .count()
    }

    fn record(&self, call: &str) {
        self.calls.lock().unwrap().push(call.to_string());
    }

    fn reply<T>(&self, build: impl FnOnce(&str) -> T) -> Result<T, ApiError> {
        let next = {
            let mut replies = self.replies.lock().unwrap();
            if replies.len() > 1 {
                replies.pop_front().unwrap_or(Reply::Gone)
            } else {
                replies.front().copied().unwrap_or(Reply::Gone)
            }
        };
        match next {
            Reply::Status(status) => Ok(build(status)),
            Reply::Gone => Err(ApiError::Status {
                code: 404,
                message: "Not Found".to_string(),
            }),
            Reply::Error(code) => Err(ApiError::Status {
                code,
                message: "scripted failure".to_string(),
            }),
        }
    }

    fn created<T>(&self, object: T) -> Result<T, ApiError> {
        match &self.create_error {
            Some(err) => Err(err.clone()),
            None => Ok(object),
        }
    }

    fn deleted(&self) -> Result<(), ApiError> {
        match &self.delete_error {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}

pub fn connection(id: &str, status: &str) -> Connection {
    Connection {
        id: id.to_string(),
        name: "vpc-east".to_string(),
        network_type: "vpc".to_string(),
        network_id: Some("crn:v1:vpc:east".to_string()),
        status: status.to_string(),
        created_at: None,
        updated_at: None,
    }
}

pub fn tunnel(id: &str, status: &str) -> GreTunnel {
    GreTunnel {
        id: id.to_string(),
        name: "gre-a".to_string(),
        status: status.to_string(),
        local_gateway_ip: "192.168.100.1".to_string(),
        local_tunnel_ip: "192.168.101.1".to_string(),
        remote_gateway_ip: "10.242.63.12".to_string(),
        remote_tunnel_ip: "192.168.101.2".to_string(),
        remote_bgp_asn: Some(65010),
        zone: Some("us-south-1".to_string()),
        created_at: None,
    }
}

pub fn report(id: &str, status: &str) -> RouteReport {
    RouteReport {
        id: id.to_string(),
        status: status.to_string(),
        connections: Vec::new(),
        created_at: None,
        updated_at: None,
    }
}

#[allow(dead_code)]
pub fn tunnel_request() -> TunnelRequest {
    TunnelRequest {
        name: "gre-a".to_string(),
        local_gateway_ip: "192.168.100.1".to_string(),
        local_tunnel_ip: "192.168.101.1".to_string(),
        remote_gateway_ip: "10.242.63.12".to_string(),
        remote_tunnel_ip: "192.168.101.2".to_string(),
        zone: "us-south-1".to_string(),
        remote_bgp_asn: Some(65010),
    }
}

#[async_trait]
impl TransitGatewayApi for MockApi {
    async fn create_connection(
        &self,
        _gateway_id: &str,
        _request: &ConnectionRequest,
    ) -> Result<Connection, ApiError> {
        self.record("create_connection");
        self.created(connection("conn-1", "pending"))
    }

    async fn get_connection(
        &self,
        _gateway_id: &str,
        connection_id: &str,
    ) -> Result<Connection, ApiError> {
        self.record("get_connection");
        self.reply(|status| connection(connection_id, status))
    }

    async fn delete_connection(
        &self,
        _gateway_id: &str,
        _connection_id: &str,
    ) -> Result<(), ApiError> {
        self.record("delete_connection");
        self.deleted()
    }

    async fn create_tunnel(
        &self,
        _gateway_id: &str,
        _connection_id: &str,
        _request: &TunnelRequest,
    ) -> Result<GreTunnel, ApiError> {
        self.record("create_tunnel");
        self.created(tunnel("tunnel-1", "pending"))
    }

    async fn get_tunnel(
        &self,
        _gateway_id: &str,
        _connection_id: &str,
        tunnel_id: &str,
    ) -> Result<GreTunnel, ApiError> {
        self.record("get_tunnel");
        self.reply(|status| tunnel(tunnel_id, status))
    }

    async fn delete_tunnel(
        &self,
        _gateway_id: &str,
        _connection_id: &str,
        _tunnel_id: &str,
    ) -> Result<(), ApiError> {
        self.record("delete_tunnel");
        self.deleted()
    }

    async fn create_route_report(&self, _gateway_id: &str) -> Result<RouteReport, ApiError> {
        self.record("create_route_report");
        self.created(report("report-1", "pending"))
    }

    async fn get_route_report(
        &self,
        _gateway_id: &str,
        report_id: &str,
    ) -> Result<RouteReport, ApiError> {
        self.record("get_route_report");
        self.reply(|status| report(report_id, status))
    }

    async fn delete_route_report(
        &self,
        _gateway_id: &str,
        _report_id: &str,
    ) -> Result<(), ApiError> {
        self.record("delete_route_report");
        self.deleted()
    }
}
