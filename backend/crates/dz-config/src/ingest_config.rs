use crate::{ConfigError, ConfigErrorResult, DEFAULT_BIND_HOST, DEFAULT_INGEST_PORT};

use serde::Deserialize;

/// HTTP ingestion endpoint (disabled unless asked for)
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct IngestConfig {
    pub enabled: bool,
    pub host: String,
    pub port: u16,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            host: String::from(DEFAULT_BIND_HOST),
            port: DEFAULT_INGEST_PORT,
        }
    }
}

impl IngestConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.enabled && self.port == 0 {
            return Err(ConfigError::ingest("ingest.port must be set when enabled"));
        }

        Ok(())
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
