use crate::{BrokerHandle, BrokerResult, SubscriptionEvent, decode_record};

use dz_core::{
    Metrics, RelayMessage, RouteSender, ShutdownCoordinator, ShutdownGuard, Tenant, TenantId,
    TopicTemplate,
};
use log::{debug, error, info, warn};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Forwards one tenant topic into the router queue.
pub struct TenantConsumer {
    tenant_id: TenantId,
    topic: String,
    task: JoinHandle<u64>,
}

impl TenantConsumer {
    /// Subscribe to the tenant's topic and start forwarding.
    ///
    /// Resolves once the subscription is established.
    pub async fn subscribe(
        handle: &BrokerHandle,
        tenant: &Tenant,
        template: &TopicTemplate,
        route_tx: RouteSender,
        metrics: Metrics,
        shutdown_guard: ShutdownGuard,
    ) -> BrokerResult<Self> {
        let topic = tenant.topic(template);
        let events = handle.subscribe(&topic).await?;
        info!("Consumer for demozone {} ready on topic {}", tenant.id, topic);

        let task = tokio::spawn(forward(
            tenant.id.clone(),
            topic.clone(),
            events,
            route_tx,
            metrics,
            shutdown_guard,
        ));

        Ok(Self {
            tenant_id: tenant.id.clone(),
            topic,
            task,
        })
    }

    pub fn tenant_id(&self) -> &TenantId {
        &self.tenant_id
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    /// Wait for the consumer to stop. Returns how many records it forwarded.
    pub async fn join(self) -> u64 {
        self.task.await.unwrap_or(0)
    }

    pub fn abort(&self) {
        self.task.abort();
    }
}

/// Subscribe every tenant in order, waiting for each subscription before
/// starting the next. The first failure aborts the rest.
pub async fn subscribe_all(
    handle: &BrokerHandle,
    tenants: &[Tenant],
    template: &TopicTemplate,
    route_tx: &RouteSender,
    metrics: &Metrics,
    shutdown: &ShutdownCoordinator,
) -> BrokerResult<Vec<TenantConsumer>> {
    let mut consumers = Vec::with_capacity(tenants.len());

    for tenant in tenants {
        let consumer = TenantConsumer::subscribe(
            handle,
            tenant,
            template,
            route_tx.clone(),
            metrics.clone(),
            shutdown.subscribe_guard(),
        )
        .await;

        match consumer {
            Ok(consumer) => consumers.push(consumer),
            Err(e) => {
                consumers.iter().for_each(TenantConsumer::abort);
                return Err(e);
            }
        }
    }

    info!("{} consumer(s) subscribed", consumers.len());
    Ok(consumers)
}

async fn forward(
    tenant_id: TenantId,
    topic: String,
    mut events: mpsc::Receiver<SubscriptionEvent>,
    route_tx: RouteSender,
    metrics: Metrics,
    mut shutdown_guard: ShutdownGuard,
) -> u64 {
    let mut forwarded = 0u64;

    loop {
        tokio::select! {
            event = events.recv() => {
                match event {
                    Some(SubscriptionEvent::Record(record)) => {
                        let value = match decode_record(&record.value) {
                            Ok(value) => value,
                            Err(e) => {
                                error!(
                                    "Dropping record {} on {}: {}",
                                    record.offset, topic, e
                                );
                                metrics.decode_failed(&tenant_id);
                                continue;
                            }
                        };

                        debug!("Record {} on {} decoded", record.offset, topic);
                        if route_tx.send(RelayMessage::from_value(value)).await.is_err() {
                            warn!("Router queue closed, consumer for {} stopping", tenant_id);
                            break;
                        }
                        forwarded += 1;
                    }
                    Some(SubscriptionEvent::Error(message)) => {
                        error!("Consumer for demozone {} reported: {}", tenant_id, message);
                    }
                    None => {
                        info!("Subscription to {} ended", topic);
                        break;
                    }
                }
            }
            _ = shutdown_guard.wait() => {
                debug!("Consumer for demozone {} stopping on shutdown", tenant_id);
                break;
            }
        }
    }

    forwarded
}
