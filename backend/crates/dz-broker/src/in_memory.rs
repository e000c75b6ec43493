use crate::{
    BrokerClient, BrokerCoordinates, BrokerError, BrokerRecord, BrokerResult, ConnectionState,
    SUBSCRIPTION_BUFFER, SubscriptionEvent,
};

use std::collections::HashMap;
use std::future::pending;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use tokio::sync::mpsc;

/// In-process broker used for local runs and tests.
///
/// Topics exist once something subscribes to them; records published to a
/// topic nobody consumes are discarded.
#[derive(Clone, Default)]
pub struct InMemoryBroker {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Default)]
struct Inner {
    initial_states: Option<Vec<ConnectionState>>,
    states: Option<mpsc::UnboundedSender<ConnectionState>>,
    topics: HashMap<String, Topic>,
    subscribed: Vec<String>,
    failing_topics: Vec<String>,
    stalled_topics: Vec<String>,
    closed: bool,
}

struct Topic {
    sender: mpsc::Sender<SubscriptionEvent>,
    next_offset: i64,
}

impl InMemoryBroker {
    /// Broker that reports `Connected` as soon as it is asked to connect.
    pub fn new() -> Self {
        Self::default()
    }

    /// Broker that reports `states` on connect instead of a lone `Connected`.
    /// An empty list reports nothing and drops the channel.
    pub fn with_initial_states(states: Vec<ConnectionState>) -> Self {
        let broker = Self::default();
        broker.lock().initial_states = Some(states);
        broker
    }

    /// Make subscriptions to `topic` fail.
    pub fn fail_subscriptions_to(&self, topic: &str) {
        self.lock().failing_topics.push(topic.to_string());
    }

    /// Make subscriptions to `topic` never complete.
    pub fn stall_subscriptions_to(&self, topic: &str) {
        self.lock().stalled_topics.push(topic.to_string());
    }

    /// Publish raw bytes on `topic`. Returns false when nobody consumes it.
    pub async fn publish(&self, topic: &str, value: impl Into<Vec<u8>>) -> bool {
        let (sender, offset) = {
            let mut inner = self.lock();
            match inner.topics.get_mut(topic) {
                Some(t) => {
                    let offset = t.next_offset;
                    t.next_offset += 1;
                    (t.sender.clone(), offset)
                }
                None => return false,
            }
        };

        let record = BrokerRecord {
            offset,
            value: value.into(),
        };
        sender.send(SubscriptionEvent::Record(record)).await.is_ok()
    }

    /// Report a subscription-level error on `topic`.
    pub async fn publish_error(&self, topic: &str, message: &str) -> bool {
        let sender = match self.lock().topics.get(topic) {
            Some(t) => t.sender.clone(),
            None => return false,
        };
        sender
            .send(SubscriptionEvent::Error(message.to_string()))
            .await
            .is_ok()
    }

    /// Push a state notification as the real client would on a callback.
    pub fn set_state(&self, state: ConnectionState) -> bool {
        self.lock()
            .states
            .as_ref()
            .is_some_and(|tx| tx.send(state).is_ok())
    }

    /// Topics subscribed so far, in subscription order
    pub fn subscribed_topics(&self) -> Vec<String> {
        self.lock().subscribed.clone()
    }

    pub fn is_closed(&self) -> bool {
        self.lock().closed
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl BrokerClient for InMemoryBroker {
    async fn connect(
        &self,
        _coordinates: &BrokerCoordinates,
        states: mpsc::UnboundedSender<ConnectionState>,
    ) -> BrokerResult<()> {
        let mut inner = self.lock();
        if inner.closed {
            return Err(BrokerError::closed());
        }

        match inner.initial_states.take() {
            Some(initial) if initial.is_empty() => {}
            Some(initial) => {
                for state in initial {
                    let _ = states.send(state);
                }
                inner.states = Some(states);
            }
            None => {
                let _ = states.send(ConnectionState::Connected);
                inner.states = Some(states);
            }
        }

        Ok(())
    }

    async fn subscribe(&self, topic: &str) -> BrokerResult<mpsc::Receiver<SubscriptionEvent>> {
        let stalled = self.lock().stalled_topics.iter().any(|t| t == topic);
        if stalled {
            pending::<()>().await;
        }

        let mut inner = self.lock();
        if inner.closed {
            return Err(BrokerError::closed());
        }
        if inner.failing_topics.iter().any(|t| t == topic) {
            return Err(BrokerError::subscribe(topic, "topic does not exist"));
        }

        let (sender, receiver) = mpsc::channel(SUBSCRIPTION_BUFFER);
        inner.topics.insert(
            topic.to_string(),
            Topic {
                sender,
                next_offset: 0,
            },
        );
        inner.subscribed.push(topic.to_string());

        Ok(receiver)
    }

    async fn close(&self) {
        let mut inner = self.lock();
        inner.closed = true;
        inner.topics.clear();
        inner.states = None;
    }
}
