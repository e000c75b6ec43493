use serde::Deserialize;

/// Broker coordinates as published by the setup server.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EventHubSetup {
    /// Address of the broker's coordination service
    pub zookeeperhost: String,
    /// Topic template carrying a `{demozone}` placeholder
    pub eventtopic: String,
}
