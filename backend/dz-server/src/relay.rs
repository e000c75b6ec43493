use crate::{ServerError, ServerResult};

use std::sync::Arc;

use dz_broker::{
    BrokerClient, BrokerConnectionManager, BrokerCoordinates, BrokerHandle, TenantConsumer,
    subscribe_all,
};
use dz_config::Config;
use dz_core::{
    DEFAULT_ROUTE_QUEUE_CAPACITY, Dispatcher, Metrics, RouteSender, Router, ShutdownCoordinator,
    Tenant, TenantId, TopicTemplate, route_channel,
};
use dz_setup::{SetupSource, TenantRegistry};
use dz_ws::{EndpointConfig, TenantEndpoint, bind_all};
use log::{info, warn};
use tokio::task::JoinHandle;

/// The running relay: registry, broker connection, endpoints, router and
/// consumers.
pub struct Relay {
    registry: TenantRegistry,
    broker: BrokerHandle,
    endpoints: Vec<TenantEndpoint>,
    consumers: Vec<TenantConsumer>,
    route_tx: RouteSender,
    dispatcher: JoinHandle<u64>,
    servers: Vec<JoinHandle<()>>,
    shutdown: ShutdownCoordinator,
}

impl Relay {
    /// Bring the relay up. Strictly ordered, and any failure aborts the rest:
    ///
    /// 1. fetch the demozone list
    /// 2. fetch the event hub setup
    /// 3. connect to the broker
    /// 4. bind one endpoint per demozone, in registry order
    /// 5. start the router dispatcher
    /// 6. subscribe one consumer per demozone, in registry order
    ///
    /// Shutdown signalled while this runs aborts it with
    /// [`ServerError::Interrupted`]. Whatever the cause, an aborted startup
    /// leaves the broker closed and no endpoint listening. A failure after the
    /// endpoints started serving triggers `shutdown` to stop them.
    pub async fn bootstrap(
        source: &dyn SetupSource,
        broker_client: Arc<dyn BrokerClient>,
        config: &Config,
        shutdown: &ShutdownCoordinator,
    ) -> ServerResult<Self> {
        let mut interrupted = shutdown.subscribe_guard();

        let (registry, template, broker) = tokio::select! {
            biased;
            _ = interrupted.wait() => {
                broker_client.close().await;
                return Err(ServerError::Interrupted);
            }
            connected = connect_broker(source, Arc::clone(&broker_client), config) => connected?,
        };

        let metrics = Metrics::new();
        let endpoint_config = EndpointConfig::from(&config.websocket);
        let bound = match bind_all(registry.tenants(), &endpoint_config, &metrics).await {
            Ok(bound) => bound,
            Err(e) => {
                broker.close().await;
                return Err(e.into());
            }
        };

        let mut router = Router::new(metrics.clone());
        let mut endpoints = Vec::with_capacity(bound.len());
        for server in &bound {
            let endpoint = server.endpoint().clone();
            if let Err(e) =
                router.register(endpoint.tenant_id().clone(), Arc::new(endpoint.clone()))
            {
                broker.close().await;
                return Err(e.into());
            }
            endpoints.push(endpoint);
        }

        let (route_tx, route_rx) = route_channel(DEFAULT_ROUTE_QUEUE_CAPACITY);
        let dispatcher = tokio::spawn(
            Dispatcher::new(router, route_rx).run(shutdown.subscribe_guard()),
        );

        let servers: Vec<JoinHandle<()>> = bound
            .into_iter()
            .map(|server| {
                let shutdown = shutdown.clone();
                tokio::spawn(async move {
                    if let Err(e) = server.serve(shutdown).await {
                        warn!("{}", e);
                    }
                })
            })
            .collect();

        let subscribed = tokio::select! {
            biased;
            _ = interrupted.wait() => Err(ServerError::Interrupted),
            consumers = subscribe_all(
                &broker,
                registry.tenants(),
                &template,
                &route_tx,
                &metrics,
                shutdown,
            ) => consumers.map_err(ServerError::from),
        };

        let consumers = match subscribed {
            Ok(consumers) => consumers,
            Err(e) => {
                drop(route_tx);
                abort_startup(shutdown, &broker, dispatcher, servers).await;
                return Err(e);
            }
        };

        info!("Relay ready for {} demozone(s)", registry.len());

        Ok(Self {
            registry,
            broker,
            endpoints,
            consumers,
            route_tx,
            dispatcher,
            servers,
            shutdown: shutdown.clone(),
        })
    }

    pub fn tenants(&self) -> &[Tenant] {
        self.registry.tenants()
    }

    pub fn endpoint(&self, tenant_id: &TenantId) -> Option<&TenantEndpoint> {
        self.endpoints.iter().find(|e| e.tenant_id() == tenant_id)
    }

    /// Producer side of the router queue, for non-broker message sources
    pub fn route_sender(&self) -> RouteSender {
        self.route_tx.clone()
    }

    /// Best-effort stop: consumers, then the broker connection, then the
    /// endpoints and the router.
    pub async fn shutdown(self) {
        self.shutdown.shutdown();

        for consumer in self.consumers {
            let topic = consumer.topic().to_string();
            let forwarded = consumer.join().await;
            info!("Consumer on {} stopped after {} record(s)", topic, forwarded);
        }

        self.broker.close().await;

        for server in self.servers {
            let _ = server.await;
        }

        drop(self.route_tx);
        let routed = self.dispatcher.await.unwrap_or(0);
        info!("Relay stopped after routing {} message(s)", routed);
    }
}

/// Steps 1 to 3: registry, event hub, broker connection.
async fn connect_broker(
    source: &dyn SetupSource,
    broker_client: Arc<dyn BrokerClient>,
    config: &Config,
) -> ServerResult<(TenantRegistry, TopicTemplate, BrokerHandle)> {
    let registry = TenantRegistry::load(source).await?;
    info!("Loaded {} demozone(s)", registry.len());

    let event_hub = source.event_hub().await?;
    let template = TopicTemplate::parse(event_hub.eventtopic.as_str())?;
    info!(
        "Event hub at {} with topic template {}",
        event_hub.zookeeperhost, template
    );

    // `zookeeperhost` is handed to the broker client as its bootstrap address
    let coordinates = BrokerCoordinates {
        bootstrap: event_hub.zookeeperhost.clone(),
        client_id: config.broker.client_id.clone(),
        group_id: config.broker.group_id.clone(),
        session_timeout_ms: config.broker.session_timeout_ms,
        auto_commit: config.broker.auto_commit,
    };
    let broker = BrokerConnectionManager::new(broker_client)
        .connect(&coordinates)
        .await?;

    Ok((registry, template, broker))
}

/// Undo a startup that already serves endpoints: stop them and the
/// dispatcher, close the broker.
async fn abort_startup(
    shutdown: &ShutdownCoordinator,
    broker: &BrokerHandle,
    dispatcher: JoinHandle<u64>,
    servers: Vec<JoinHandle<()>>,
) {
    warn!("Startup aborted, stopping endpoints and closing the broker");
    shutdown.shutdown();
    broker.close().await;

    for server in servers {
        let _ = server.await;
    }
    let _ = dispatcher.await;
}
