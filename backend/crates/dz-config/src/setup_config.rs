use crate::{
    ConfigError, ConfigErrorResult, DEFAULT_DEMOZONE_PATH, DEFAULT_EVENTHUB_PATH,
    DEFAULT_SETUP_PROTOCOL,
};

use serde::Deserialize;

/// Where the demozone list and event hub setup are fetched from.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SetupConfig {
    /// Setup server `host:port`. Required before startup.
    pub dbhost: Option<String>,
    pub protocol: String,
    pub demozone_path: String,
    pub eventhub_path: String,
    /// The setup server historically runs with a self-signed certificate
    pub accept_invalid_certs: bool,
}

impl Default for SetupConfig {
    fn default() -> Self {
        Self {
            dbhost: None,
            protocol: String::from(DEFAULT_SETUP_PROTOCOL),
            demozone_path: String::from(DEFAULT_DEMOZONE_PATH),
            eventhub_path: String::from(DEFAULT_EVENTHUB_PATH),
            accept_invalid_certs: true,
        }
    }
}

impl SetupConfig {
    /// Base URL of the setup server. A `dbhost` that already carries a
    /// scheme is used as is.
    pub fn base_url(&self) -> ConfigErrorResult<String> {
        let dbhost = self
            .dbhost
            .as_deref()
            .map(str::trim)
            .filter(|host| !host.is_empty())
            .ok_or_else(|| ConfigError::missing_option("dbhost"))?;

        let base = if dbhost.contains("://") {
            dbhost.to_string()
        } else {
            format!("{}://{}", self.protocol, dbhost)
        };

        Ok(base.trim_end_matches('/').to_string())
    }

    pub fn validate(&self) -> ConfigErrorResult<()> {
        self.base_url()?;

        if self.protocol != "http" && self.protocol != "https" {
            return Err(ConfigError::setup(format!(
                "setup.protocol must be 'http' or 'https', got '{}'",
                self.protocol
            )));
        }

        for (name, path) in [
            ("setup.demozone_path", &self.demozone_path),
            ("setup.eventhub_path", &self.eventhub_path),
        ] {
            if !path.starts_with('/') {
                return Err(ConfigError::setup(format!(
                    "{} must start with '/', got '{}'",
                    name, path
                )));
            }
        }

        Ok(())
    }
}
