/// Everything needed to open the broker connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrokerCoordinates {
    /// Broker (or coordination service) address, `host:port[,host:port]`
    pub bootstrap: String,
    pub client_id: String,
    pub group_id: String,
    pub session_timeout_ms: u32,
    pub auto_commit: bool,
}

impl BrokerCoordinates {
    pub fn new(bootstrap: impl Into<String>) -> Self {
        Self {
            bootstrap: bootstrap.into(),
            client_id: String::from("RETAIL"),
            group_id: String::from("demozone-relay"),
            session_timeout_ms: 6000,
            auto_commit: true,
        }
    }
}
