use crate::{
    BrokerClient, BrokerCoordinates, BrokerError, BrokerRecord, BrokerResult, ConnectionState,
    SUBSCRIPTION_BUFFER, SubscriptionEvent, TENANT_PARTITION,
};

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use log::{debug, warn};
use rdkafka::client::ClientContext;
use rdkafka::config::ClientConfig;
use rdkafka::consumer::{Consumer, ConsumerContext, StreamConsumer};
use rdkafka::error::{KafkaError, RDKafkaErrorCode};
use rdkafka::message::Message;
use rdkafka::statistics::Statistics;
use rdkafka::topic_partition_list::{Offset, TopicPartitionList};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

const METADATA_TIMEOUT: Duration = Duration::from_secs(10);
const STATISTICS_INTERVAL_MS: &str = "5000";

/// rdkafka backed broker client. librdkafka reconnects on its own; this
/// client turns its callbacks into [`ConnectionState`] notifications.
#[derive(Default)]
pub struct KafkaBroker {
    session: Mutex<Option<Session>>,
}

struct Session {
    config: ClientConfig,
    context: RelayContext,
    tasks: Vec<JoinHandle<()>>,
}

/// Callback context shared by every consumer of the session.
#[derive(Clone)]
struct RelayContext {
    states: mpsc::UnboundedSender<ConnectionState>,
}

impl ClientContext for RelayContext {
    fn stats(&self, statistics: Statistics) {
        if statistics.brokers.values().any(|b| b.state == "UP") {
            let _ = self.states.send(ConnectionState::Connected);
        }
    }

    fn error(&self, error: KafkaError, reason: &str) {
        match classify(&error) {
            Some(state) => {
                let _ = self.states.send(state);
            }
            None => warn!("Broker client error: {} ({})", error, reason),
        }
    }
}

impl ConsumerContext for RelayContext {}

pub(crate) fn classify(error: &KafkaError) -> Option<ConnectionState> {
    match error.rdkafka_error_code() {
        Some(RDKafkaErrorCode::AllBrokersDown) => Some(ConnectionState::Disconnected),
        Some(RDKafkaErrorCode::Fatal) => Some(ConnectionState::Expired),
        _ => None,
    }
}

impl KafkaBroker {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn client_config(coordinates: &BrokerCoordinates) -> ClientConfig {
        let mut config = ClientConfig::new();
        config
            .set("bootstrap.servers", &coordinates.bootstrap)
            .set("client.id", &coordinates.client_id)
            .set("group.id", &coordinates.group_id)
            .set(
                "session.timeout.ms",
                coordinates.session_timeout_ms.to_string(),
            )
            .set("enable.auto.commit", coordinates.auto_commit.to_string())
            .set("auto.offset.reset", "latest")
            .set("statistics.interval.ms", STATISTICS_INTERVAL_MS);
        config
    }

    fn create_consumer(
        config: &ClientConfig,
        context: &RelayContext,
    ) -> BrokerResult<StreamConsumer<RelayContext>> {
        config
            .create_with_context(context.clone())
            .map_err(|e| BrokerError::client(e.to_string()))
    }
}

#[async_trait]
impl BrokerClient for KafkaBroker {
    async fn connect(
        &self,
        coordinates: &BrokerCoordinates,
        states: mpsc::UnboundedSender<ConnectionState>,
    ) -> BrokerResult<()> {
        let config = Self::client_config(coordinates);
        let context = RelayContext { states };
        let probe = Self::create_consumer(&config, &context)?;

        // The first metadata round trip marks the initial connection.
        let probe_states = context.states.clone();
        tokio::task::spawn_blocking(move || {
            match probe.fetch_metadata(None, METADATA_TIMEOUT) {
                Ok(metadata) => {
                    debug!("Broker metadata: {} broker(s)", metadata.brokers().len());
                    let _ = probe_states.send(ConnectionState::Connected);
                }
                Err(e) => {
                    warn!("Broker metadata request failed: {}", e);
                    let _ = probe_states.send(ConnectionState::Disconnected);
                }
            }
        });

        let mut session = self
            .session
            .lock()
            .map_err(|_| BrokerError::client("session lock poisoned"))?;
        *session = Some(Session {
            config,
            context,
            tasks: Vec::new(),
        });

        Ok(())
    }

    async fn subscribe(&self, topic: &str) -> BrokerResult<mpsc::Receiver<SubscriptionEvent>> {
        let mut guard = self
            .session
            .lock()
            .map_err(|_| BrokerError::client("session lock poisoned"))?;
        let session = guard.as_mut().ok_or_else(BrokerError::closed)?;

        let consumer = Self::create_consumer(&session.config, &session.context)?;
        let mut assignment = TopicPartitionList::new();
        assignment
            .add_partition_offset(topic, TENANT_PARTITION, Offset::Stored)
            .map_err(|e| BrokerError::subscribe(topic, e.to_string()))?;
        consumer
            .assign(&assignment)
            .map_err(|e| BrokerError::subscribe(topic, e.to_string()))?;

        let (sender, receiver) = mpsc::channel(SUBSCRIPTION_BUFFER);
        session.tasks.push(tokio::spawn(pump(consumer, sender)));

        Ok(receiver)
    }

    async fn close(&self) {
        let session = match self.session.lock() {
            Ok(mut guard) => guard.take(),
            Err(_) => None,
        };

        if let Some(session) = session {
            session.tasks.iter().for_each(JoinHandle::abort);
        }
    }
}

async fn pump(consumer: StreamConsumer<RelayContext>, sender: mpsc::Sender<SubscriptionEvent>) {
    loop {
        let event = match consumer.recv().await {
            Ok(message) => SubscriptionEvent::Record(BrokerRecord {
                offset: message.offset(),
                value: message.payload().map(<[u8]>::to_vec).unwrap_or_default(),
            }),
            Err(e) => SubscriptionEvent::Error(e.to_string()),
        };

        if sender.send(event).await.is_err() {
            break;
        }
    }
}
