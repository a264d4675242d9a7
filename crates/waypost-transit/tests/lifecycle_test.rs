mod common;

use common::{MockApi, Reply, tunnel_request};
use std::time::Duration;
use tokio_test::{assert_err, assert_ok};
use waypost::CancellationToken;
use waypost_transit::{
    ApiError, ConnectionRequest, ResourceKind, TransitConfig, TransitError, TransitGateway,
};

fn gateway(replies: &[Reply]) -> TransitGateway<MockApi> {
    TransitGateway::new(MockApi::new(replies), TransitConfig::default())
}

fn request() -> ConnectionRequest {
    ConnectionRequest::new("vpc-east", "vpc").with_network_id("crn:v1:vpc:east")
}

#[tokio::test(start_paused = true)]
async fn test_attach_connection_waits_until_attached() {
    let gateway = gateway(&[
        Reply::Status("pending"),
        Reply::Status("pending"),
        Reply::Status("attached"),
    ]);

    let connection = assert_ok!(gateway.attach_connection("gw-1", &request()).await);

    assert_eq!(connection.id, "conn-1");
    assert_eq!(connection.status, "attached");
    assert_eq!(
        gateway.api().calls(),
        vec![
            "create_connection",
            "get_connection",
            "get_connection",
            "get_connection"
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn test_attach_connection_reports_remote_failure() {
    let gateway = gateway(&[Reply::Status("pending"), Reply::Status("failed")]);

    let err = assert_err!(gateway.attach_connection("gw-1", &request()).await);

    assert!(err.is_rejected());
    assert!(!err.is_still_in_progress());
    match err {
        TransitError::Rejected { kind, id, status } => {
            assert_eq!(kind, ResourceKind::Connection);
            assert_eq!(id, "conn-1");
            assert_eq!(status, "failed");
        }
        other => panic!("Expected Rejected, got {other:?}"),
    }
    assert_eq!(gateway.api().count("get_connection"), 2);
}

#[tokio::test(start_paused = true)]
async fn test_attach_connection_times_out() {
    let config = TransitConfig {
        create_timeout_secs: 25,
        ..Default::default()
    };
    let gateway = TransitGateway::new(MockApi::new(&[Reply::Status("pending")]), config);

    let err = assert_err!(gateway.attach_connection("gw-1", &request()).await);

    assert!(err.is_still_in_progress());
    match err {
        TransitError::StillInProgress {
            kind,
            elapsed,
            last_status,
            ..
        } => {
            assert_eq!(kind, ResourceKind::Connection);
            assert!(elapsed > Duration::from_secs(25));
            assert_eq!(last_status.as_deref(), Some("pending"));
        }
        other => panic!("Expected StillInProgress, got {other:?}"),
    }
    assert_eq!(gateway.api().count("get_connection"), 3);
}

#[tokio::test(start_paused = true)]
async fn test_attach_connection_unexpected_status() {
    let gateway = gateway(&[Reply::Status("pending"), Reply::Status("suspended")]);

    let err = assert_err!(gateway.attach_connection("gw-1", &request()).await);

    assert!(matches!(
        err,
        TransitError::UnexpectedStatus { ref status, .. } if status == "suspended"
    ));
    assert!(err.is_rejected());
    assert_eq!(gateway.api().count("get_connection"), 2);
}

#[tokio::test(start_paused = true)]
async fn test_attach_connection_fetch_error_is_not_retried() {
    let gateway = gateway(&[
        Reply::Status("pending"),
        Reply::Error(500),
        Reply::Status("attached"),
    ]);

    let err = assert_err!(gateway.attach_connection("gw-1", &request()).await);

    assert!(matches!(err, TransitError::Api(ApiError::Status { code: 500, .. })));
    assert_eq!(gateway.api().count("get_connection"), 2);
}

#[tokio::test(start_paused = true)]
async fn test_attach_connection_vanishing_is_an_error() {
    let gateway = gateway(&[Reply::Status("pending"), Reply::Gone]);

    let err = assert_err!(gateway.attach_connection("gw-1", &request()).await);

    assert!(matches!(
        err,
        TransitError::Vanished {
            kind: ResourceKind::Connection,
            ..
        }
    ));
}

#[tokio::test(start_paused = true)]
async fn test_create_error_skips_polling() {
    let api = MockApi::new(&[Reply::Status("attached")]).failing_create(ApiError::Status {
        code: 400,
        message: "bad network id".to_string(),
    });
    let gateway = TransitGateway::new(api, TransitConfig::default());

    let err = assert_err!(gateway.attach_connection("gw-1", &request()).await);

    assert!(matches!(err, TransitError::Api(_)));
    assert_eq!(gateway.api().calls(), vec!["create_connection"]);
}

#[tokio::test(start_paused = true)]
async fn test_detach_connection_waits_until_gone() {
    let gateway = gateway(&[
        Reply::Status("deleting"),
        Reply::Status("detaching"),
        Reply::Gone,
    ]);

    assert_ok!(gateway.detach_connection("gw-1", "conn-1").await);

    assert_eq!(gateway.api().count("delete_connection"), 1);
    assert_eq!(gateway.api().count("get_connection"), 3);
}

#[tokio::test(start_paused = true)]
async fn test_detach_connection_accepts_detached_status() {
    let gateway = gateway(&[Reply::Status("detaching"), Reply::Status("detached")]);

    assert_ok!(gateway.detach_connection("gw-1", "conn-1").await);
    assert_eq!(gateway.api().count("get_connection"), 2);
}

#[tokio::test(start_paused = true)]
async fn test_detach_already_deleted_connection() {
    let api = MockApi::new(&[Reply::Gone]).failing_delete(ApiError::NotFound("conn-1".to_string()));
    let gateway = TransitGateway::new(api, TransitConfig::default());

    assert_ok!(gateway.detach_connection("gw-1", "conn-1").await);
    assert_eq!(gateway.api().calls(), vec!["delete_connection"]);
}

#[tokio::test(start_paused = true)]
async fn test_attach_and_detach_tunnel() {
    let gateway = gateway(&[Reply::Status("pending"), Reply::Status("attached")]);

    let tunnel = assert_ok!(
        gateway
            .attach_tunnel("gw-1", "conn-1", &tunnel_request())
            .await
    );
    assert_eq!(tunnel.id, "tunnel-1");
    assert_eq!(tunnel.status, "attached");

    let gateway = self::gateway(&[Reply::Status("detaching"), Reply::Gone]);
    assert_ok!(gateway.detach_tunnel("gw-1", "conn-1", "tunnel-1").await);
    assert_eq!(gateway.api().count("get_tunnel"), 2);
}

#[tokio::test(start_paused = true)]
async fn test_attach_tunnel_reports_remote_failure() {
    let gateway = gateway(&[Reply::Status("failed")]);

    let err = assert_err!(
        gateway
            .attach_tunnel("gw-1", "conn-1", &tunnel_request())
            .await
    );

    assert!(matches!(
        err,
        TransitError::Rejected {
            kind: ResourceKind::GreTunnel,
            ..
        }
    ));
}

#[tokio::test(start_paused = true)]
async fn test_generate_route_report() {
    let gateway = gateway(&[Reply::Status("pending"), Reply::Status("complete")]);

    let report = assert_ok!(gateway.generate_route_report("gw-1").await);

    assert_eq!(report.id, "report-1");
    assert_eq!(report.status, "complete");
    assert_eq!(gateway.api().count("get_route_report"), 2);
}

#[tokio::test(start_paused = true)]
async fn test_delete_route_report_does_not_poll() {
    let gateway = gateway(&[Reply::Status("complete")]);

    assert_ok!(gateway.delete_route_report("gw-1", "report-1").await);
    assert_eq!(gateway.api().calls(), vec!["delete_route_report"]);
}

#[tokio::test(start_paused = true)]
async fn test_cancelled_wait() {
    let token = CancellationToken::new();
    token.cancel();
    let gateway = gateway(&[Reply::Status("pending")]).with_cancellation(token);

    let err = assert_err!(gateway.generate_route_report("gw-1").await);

    assert!(matches!(
        err,
        TransitError::Cancelled {
            kind: ResourceKind::RouteReport,
            ..
        }
    ));
    assert_eq!(gateway.api().calls(), vec!["create_route_report"]);
}
