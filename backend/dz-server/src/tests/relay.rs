use crate::tests::FakeSource;
use crate::{Relay, ServerError};

use dz_broker::{BrokerError, ConnectionState, InMemoryBroker};
use dz_config::Config;
use dz_core::{BroadcastSink, CoreError, RelayMessage, ShutdownCoordinator, TenantId};
use dz_setup::{SetupError, TenantDescriptor};
use dz_ws::ConnectionId;

use std::sync::Arc;
use std::sync::atomic::Ordering;

use serde_json::{Value, json};
use serial_test::serial;
use tokio::net::TcpStream;
use tokio::time::{Duration, timeout};

const TEMPLATE: &str = "wedo-{demozone}-events";

fn local_config() -> Config {
    let mut config = Config::default();
    config.websocket.host = String::from("127.0.0.1");
    config
}

#[tokio::test]
#[serial]
async fn given_alpha_on_proxyport_5_when_bootstrapped_then_event_reaches_its_client() {
    // Given
    let source = FakeSource::new(vec![TenantDescriptor::new("ALPHA", "Alpha", "5")], TEMPLATE);
    let broker = InMemoryBroker::new();
    let shutdown = ShutdownCoordinator::new();
    let relay = Relay::bootstrap(&source, Arc::new(broker.clone()), &local_config(), &shutdown)
        .await
        .unwrap();

    let alpha = relay.endpoint(&TenantId::normalize("alpha")).unwrap();
    assert_eq!(alpha.port(), 10305);
    assert_eq!(broker.subscribed_topics(), vec!["wedo-alpha-events"]);

    alpha.client_connected(ConnectionId::new());
    let mut frames = alpha.subscribe();

    // When
    broker
        .publish(
            "wedo-alpha-events",
            r#"{"demozone":"alpha","eventname":"tick","payload":{"x":1}}"#,
        )
        .await;

    // Then
    let text = timeout(Duration::from_secs(1), frames.recv())
        .await
        .unwrap()
        .unwrap();
    let frame: Value = serde_json::from_str(text.as_str()).unwrap();
    assert_eq!(frame, json!({ "event": "tick", "data": { "x": 1 } }));
    assert!(frames.try_recv().is_err());

    relay.shutdown().await;
    assert!(broker.is_closed());
}

#[tokio::test]
#[serial]
async fn given_two_demozones_when_event_for_one_then_other_gets_nothing() {
    // Given
    let source = FakeSource::new(
        vec![
            TenantDescriptor::new("ALPHA", "Alpha", "5"),
            TenantDescriptor::new("BRAVO", "Bravo", "6"),
        ],
        TEMPLATE,
    );
    let broker = InMemoryBroker::new();
    let shutdown = ShutdownCoordinator::new();
    let relay = Relay::bootstrap(&source, Arc::new(broker.clone()), &local_config(), &shutdown)
        .await
        .unwrap();

    let alpha = relay.endpoint(&TenantId::normalize("ALPHA")).unwrap().clone();
    let bravo = relay.endpoint(&TenantId::normalize("BRAVO")).unwrap().clone();
    alpha.client_connected(ConnectionId::new());
    bravo.client_connected(ConnectionId::new());
    let mut alpha_frames = alpha.subscribe();
    let mut bravo_frames = bravo.subscribe();

    // When: delivered through the shared router queue, as the ingest endpoint does
    relay
        .route_sender()
        .send(RelayMessage::new("Bravo", "goal", json!(7)))
        .await
        .unwrap();

    // Then
    let text = timeout(Duration::from_secs(1), bravo_frames.recv())
        .await
        .unwrap()
        .unwrap();
    assert!(text.as_str().contains("goal"));
    assert!(alpha_frames.try_recv().is_err());
    assert_eq!(bravo.client_count(), 1);

    relay.shutdown().await;
}

#[tokio::test]
#[serial]
async fn given_zero_demozones_when_bootstrapped_then_aborts_before_broker_and_endpoints() {
    // Given
    let source = FakeSource::new(Vec::new(), TEMPLATE);
    let broker = InMemoryBroker::new();
    let shutdown = ShutdownCoordinator::new();

    // When
    let result =
        Relay::bootstrap(&source, Arc::new(broker.clone()), &local_config(), &shutdown).await;

    // Then
    assert!(matches!(
        result,
        Err(ServerError::Setup(SetupError::NoTenants { .. }))
    ));
    assert_eq!(source.event_hub_calls.load(Ordering::SeqCst), 0);
    assert!(!broker.set_state(dz_broker::ConnectionState::Connected));
    assert!(broker.subscribed_topics().is_empty());
}

#[tokio::test]
#[serial]
async fn given_template_without_placeholder_when_bootstrapped_then_rejected_before_connect() {
    let source = FakeSource::new(vec![TenantDescriptor::new("ALPHA", "Alpha", "5")], "events");
    let broker = InMemoryBroker::new();
    let shutdown = ShutdownCoordinator::new();

    let result =
        Relay::bootstrap(&source, Arc::new(broker.clone()), &local_config(), &shutdown).await;

    assert!(matches!(
        result,
        Err(ServerError::Core(CoreError::InvalidTopicTemplate { .. }))
    ));
    assert!(!broker.set_state(dz_broker::ConnectionState::Connected));
}

async fn assert_port_closed(port: u16) {
    let connected = TcpStream::connect(("127.0.0.1", port)).await;
    assert!(connected.is_err(), "port {port} still accepts connections");
}

#[tokio::test]
#[serial]
async fn given_failing_subscription_when_bootstrapped_then_endpoints_stopped_and_broker_closed() {
    // Given
    let source = FakeSource::new(
        vec![
            TenantDescriptor::new("ALPHA", "Alpha", "5"),
            TenantDescriptor::new("BRAVO", "Bravo", "6"),
        ],
        TEMPLATE,
    );
    let broker = InMemoryBroker::new();
    broker.fail_subscriptions_to("wedo-bravo-events");
    let shutdown = ShutdownCoordinator::new();

    // When
    let result =
        Relay::bootstrap(&source, Arc::new(broker.clone()), &local_config(), &shutdown).await;

    // Then
    assert!(matches!(
        result,
        Err(ServerError::Broker(BrokerError::Subscribe { .. }))
    ));
    assert!(broker.is_closed());
    assert!(shutdown.is_shutdown());
    assert_port_closed(10305).await;
    assert_port_closed(10306).await;
}

#[tokio::test]
#[serial]
async fn given_broker_never_connecting_when_interrupted_then_broker_closed() {
    // Given
    let source = FakeSource::new(vec![TenantDescriptor::new("ALPHA", "Alpha", "5")], TEMPLATE);
    let broker = InMemoryBroker::with_initial_states(vec![ConnectionState::Disconnected]);
    let shutdown = ShutdownCoordinator::new();
    let interrupt = shutdown.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        interrupt.shutdown();
    });

    // When
    let result = timeout(
        Duration::from_secs(2),
        Relay::bootstrap(&source, Arc::new(broker.clone()), &local_config(), &shutdown),
    )
    .await
    .unwrap();

    // Then
    assert!(matches!(result, Err(ServerError::Interrupted)));
    assert!(broker.is_closed());
    assert_port_closed(10305).await;
}

#[tokio::test]
#[serial]
async fn given_connected_broker_when_interrupted_during_subscriptions_then_everything_stopped() {
    // Given
    let source = FakeSource::new(
        vec![
            TenantDescriptor::new("ALPHA", "Alpha", "5"),
            TenantDescriptor::new("BRAVO", "Bravo", "6"),
        ],
        TEMPLATE,
    );
    let broker = InMemoryBroker::new();
    broker.stall_subscriptions_to("wedo-bravo-events");
    let shutdown = ShutdownCoordinator::new();
    let interrupt = shutdown.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(100)).await;
        interrupt.shutdown();
    });

    // When
    let result = timeout(
        Duration::from_secs(2),
        Relay::bootstrap(&source, Arc::new(broker.clone()), &local_config(), &shutdown),
    )
    .await
    .unwrap();

    // Then
    assert!(matches!(result, Err(ServerError::Interrupted)));
    assert_eq!(broker.subscribed_topics(), vec!["wedo-alpha-events"]);
    assert!(broker.is_closed());
    assert_port_closed(10305).await;
    assert_port_closed(10306).await;
}

#[cfg(not(feature = "kafka"))]
#[tokio::test]
#[serial]
async fn given_no_broker_backend_when_bootstrapped_then_fails_at_connect() {
    let source = FakeSource::new(vec![TenantDescriptor::new("ALPHA", "Alpha", "5")], TEMPLATE);
    let shutdown = ShutdownCoordinator::new();

    let result = Relay::bootstrap(&source, crate::default_broker_client(), &local_config(), &shutdown)
        .await;

    assert!(matches!(
        result,
        Err(ServerError::Broker(BrokerError::Client { .. }))
    ));
    assert_eq!(source.event_hub_calls.load(Ordering::SeqCst), 1);
}
