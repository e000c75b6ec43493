use crate::tests::RecordingSink;
use crate::{Metrics, MissingField, RelayMessage, Router, RoutingOutcome, TenantId};

use std::sync::Arc;

use googletest::prelude::*;
use googletest::matchers::is_empty as empty;
use serde_json::json;

fn router_with(tenants: &[(&str, Arc<RecordingSink>)]) -> Router {
    let mut router = Router::new(Metrics::new());
    for (id, sink) in tenants {
        router
            .register(TenantId::parse(id).unwrap(), sink.clone())
            .unwrap();
    }
    router
}

// =========================================================================
// Validation order
// =========================================================================

#[test]
fn given_message_without_payload_or_demozone_when_routed_then_payload_reported() {
    // Given
    let router = router_with(&[("ALPHA", Arc::new(RecordingSink::with_clients(1)))]);
    let message = RelayMessage {
        demozone: None,
        eventname: Some("tick".into()),
        payload: None,
    };

    // When
    let outcome = router.route(message);

    // Then
    assert_that!(
        outcome,
        eq(&RoutingOutcome::DroppedInvalid(MissingField::Payload))
    );
}

#[test]
fn given_null_payload_when_routed_then_dropped_invalid() {
    let router = router_with(&[("ALPHA", Arc::new(RecordingSink::with_clients(1)))]);
    let message = RelayMessage::from_value(json!({
        "demozone": "alpha",
        "eventname": "tick",
        "payload": null
    }));

    let outcome = router.route(message);

    assert_eq!(outcome, RoutingOutcome::DroppedInvalid(MissingField::Payload));
}

#[test]
fn given_missing_demozone_when_routed_then_dropped_invalid() {
    let router = router_with(&[("ALPHA", Arc::new(RecordingSink::with_clients(1)))]);
    let message = RelayMessage::from_value(json!({ "eventname": "tick", "payload": {"x": 1} }));

    let outcome = router.route(message);

    assert_eq!(
        outcome,
        RoutingOutcome::DroppedInvalid(MissingField::Demozone)
    );
}

#[test]
fn given_unknown_demozone_and_no_eventname_when_routed_then_unknown_tenant_wins() {
    // Given: tenant lookup happens before the eventname check
    let router = router_with(&[("ALPHA", Arc::new(RecordingSink::with_clients(1)))]);
    let message = RelayMessage::from_value(json!({ "demozone": "beta", "payload": {"x": 1} }));

    // When
    let outcome = router.route(message);

    // Then
    assert_eq!(
        outcome,
        RoutingOutcome::DroppedUnknownTenant(TenantId::normalize("BETA"))
    );
}

#[test]
fn given_known_demozone_without_eventname_when_routed_then_dropped_invalid() {
    let sink = Arc::new(RecordingSink::with_clients(1));
    let router = router_with(&[("ALPHA", sink.clone())]);
    let message = RelayMessage::from_value(json!({ "demozone": "alpha", "payload": {"x": 1} }));

    let outcome = router.route(message);

    assert_eq!(
        outcome,
        RoutingOutcome::DroppedInvalid(MissingField::Eventname)
    );
    assert_that!(sink.emitted(), empty());
}

// =========================================================================
// Client gate and delivery
// =========================================================================

#[test]
fn given_valid_message_and_no_clients_when_routed_then_nothing_emitted() {
    // Given
    let sink = Arc::new(RecordingSink::with_clients(0));
    let router = router_with(&[("ALPHA", sink.clone())]);

    // When
    let outcome = router.route(RelayMessage::new("alpha", "tick", json!({"x": 1})));

    // Then
    assert_eq!(
        outcome,
        RoutingOutcome::DroppedNoClients(TenantId::normalize("alpha"))
    );
    assert_that!(sink.emitted(), empty());
}

#[test]
fn given_valid_message_and_connected_client_when_routed_then_emitted_once() {
    // Given
    let sink = Arc::new(RecordingSink::with_clients(1));
    let router = router_with(&[("ALPHA", sink.clone())]);

    // When
    let outcome = router.route(RelayMessage::new("alpha", "tick", json!({"x": 1})));

    // Then
    assert!(outcome.is_delivered());
    assert_eq!(sink.emitted(), vec![("tick".to_string(), json!({"x": 1}))]);
}

#[test]
fn given_two_tenants_when_routed_to_one_then_other_never_emits() {
    // Given
    let alpha = Arc::new(RecordingSink::with_clients(3));
    let beta = Arc::new(RecordingSink::with_clients(3));
    let router = router_with(&[("ALPHA", alpha.clone()), ("BETA", beta.clone())]);

    // When
    router.route(RelayMessage::new("Beta", "alarm", json!({"level": "high"})));

    // Then
    assert_that!(alpha.emitted(), empty());
    assert_that!(beta.emitted(), len(eq(1)));
}

#[test]
fn given_mixed_case_demozone_when_routed_then_resolves_tenant() {
    let sink = Arc::new(RecordingSink::with_clients(1));
    let router = router_with(&[("Alpha", sink.clone())]);

    let outcome = router.route(RelayMessage::new("aLpHa", "tick", json!([1, 2])));

    assert_eq!(outcome, RoutingOutcome::Delivered(TenantId::normalize("ALPHA")));
}

// =========================================================================
// Registration
// =========================================================================

#[test]
fn given_registered_tenant_when_registered_again_then_error() {
    let mut router = router_with(&[("ALPHA", Arc::new(RecordingSink::default()))]);

    let result = router.register(
        TenantId::parse("alpha").unwrap(),
        Arc::new(RecordingSink::default()),
    );

    assert_that!(result, err(anything()));
    assert_eq!(router.tenant_count(), 1);
}
