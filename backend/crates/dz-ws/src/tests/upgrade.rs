use crate::endpoint_server::build_router;
use crate::tests::endpoint;
use crate::{EndpointConfig, TenantEndpoint};

use std::time::Duration;

use axum_test::{TestServer, TestWebSocket};
use dz_core::{BroadcastSink, ShutdownCoordinator};
use serde_json::{Value, json};
use tokio::time::timeout;

fn test_server(endpoint: &TenantEndpoint, shutdown: &ShutdownCoordinator) -> TestServer {
    let config = EndpointConfig::default();
    let app = build_router(
        &config.path,
        endpoint.clone(),
        config.connection,
        shutdown.clone(),
    );
    TestServer::builder()
        .http_transport()
        .build(app)
        .expect("Failed to create test server")
}

async fn connect(server: &TestServer) -> TestWebSocket {
    server.get_websocket("/ws").await.into_websocket().await
}

async fn wait_for_clients(endpoint: &TenantEndpoint, expected: usize) {
    timeout(Duration::from_secs(2), async {
        while endpoint.client_count() != expected {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    })
    .await
    .expect("client count never reached the expected value");
}

#[tokio::test]
async fn given_websocket_client_when_connected_then_counted() {
    // Given
    let alpha = endpoint("ALPHA", 10305);
    let shutdown = ShutdownCoordinator::new();
    let server = test_server(&alpha, &shutdown);

    // When
    let client = connect(&server).await;

    // Then
    wait_for_clients(&alpha, 1).await;
    client.close().await;
}

#[tokio::test]
async fn given_connected_client_when_tick_emitted_then_event_frame_received() {
    // Given
    let alpha = endpoint("ALPHA", 10305);
    let shutdown = ShutdownCoordinator::new();
    let server = test_server(&alpha, &shutdown);
    let mut client = connect(&server).await;
    wait_for_clients(&alpha, 1).await;

    // When
    alpha.emit("tick", &json!({ "x": 1 }));

    // Then
    let text = timeout(Duration::from_secs(2), client.receive_text())
        .await
        .expect("no frame received");
    let frame: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(frame, json!({ "event": "tick", "data": { "x": 1 } }));
    client.close().await;
}

#[tokio::test]
async fn given_connected_client_when_closed_then_count_returns_to_zero() {
    // Given
    let alpha = endpoint("ALPHA", 10305);
    let shutdown = ShutdownCoordinator::new();
    let server = test_server(&alpha, &shutdown);
    let client = connect(&server).await;
    wait_for_clients(&alpha, 1).await;

    // When
    client.close().await;

    // Then
    wait_for_clients(&alpha, 0).await;
}

#[tokio::test]
async fn given_two_demozones_when_one_emits_then_other_client_receives_nothing() {
    // Given
    let alpha = endpoint("ALPHA", 10305);
    let bravo = endpoint("BRAVO", 10306);
    let shutdown = ShutdownCoordinator::new();
    let alpha_server = test_server(&alpha, &shutdown);
    let bravo_server = test_server(&bravo, &shutdown);
    let mut alpha_client = connect(&alpha_server).await;
    let mut bravo_client = connect(&bravo_server).await;
    wait_for_clients(&alpha, 1).await;
    wait_for_clients(&bravo, 1).await;

    // When
    alpha.emit("tick", &json!({ "x": 1 }));

    // Then
    let received = timeout(Duration::from_secs(2), alpha_client.receive_text()).await;
    assert!(received.is_ok());
    let leaked = timeout(Duration::from_millis(200), bravo_client.receive_text()).await;
    assert!(leaked.is_err());
}
