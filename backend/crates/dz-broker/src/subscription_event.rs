/// One raw record from a tenant topic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrokerRecord {
    pub offset: i64,
    pub value: Vec<u8>,
}

/// What a subscription yields to its consumer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubscriptionEvent {
    Record(BrokerRecord),
    /// Subscription-level error reported by the client. Not terminal.
    Error(String),
}
