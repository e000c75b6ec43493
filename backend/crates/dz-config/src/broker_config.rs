use crate::{
    ConfigError, ConfigErrorResult, DEFAULT_BROKER_CLIENT_ID, DEFAULT_BROKER_GROUP_ID,
    DEFAULT_BROKER_SESSION_TIMEOUT_MS,
};

use serde::Deserialize;

/// Broker client settings. The broker address itself comes from the setup server.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BrokerConfig {
    pub client_id: String,
    pub group_id: String,
    pub session_timeout_ms: u32,
    pub auto_commit: bool,
}

impl Default for BrokerConfig {
    fn default() -> Self {
        Self {
            client_id: String::from(DEFAULT_BROKER_CLIENT_ID),
            group_id: String::from(DEFAULT_BROKER_GROUP_ID),
            session_timeout_ms: DEFAULT_BROKER_SESSION_TIMEOUT_MS,
            auto_commit: true,
        }
    }
}

impl BrokerConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.client_id.trim().is_empty() {
            return Err(ConfigError::broker("broker.client_id cannot be empty"));
        }

        if self.group_id.trim().is_empty() {
            return Err(ConfigError::broker("broker.group_id cannot be empty"));
        }

        if self.session_timeout_ms == 0 {
            return Err(ConfigError::broker(
                "broker.session_timeout_ms must be greater than 0",
            ));
        }

        Ok(())
    }
}
