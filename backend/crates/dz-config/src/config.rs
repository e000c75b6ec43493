use crate::{
    BrokerConfig, CONFIG_DIR_ENV, CONFIG_FILENAME, ConfigError, ConfigErrorResult,
    DEFAULT_CONFIG_DIR, IngestConfig, LoggingConfig, SetupConfig, WebSocketConfig,
};

use std::path::{Path, PathBuf};

use log::info;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub setup: SetupConfig,
    pub websocket: WebSocketConfig,
    pub broker: BrokerConfig,
    pub ingest: IngestConfig,
    pub logging: LoggingConfig,
}

impl Config {
    /// Load config.
    ///
    /// Loading order:
    /// 1. Check for DZ_CONFIG_DIR env var, else use ./.dz/
    /// 2. Load config.toml from there if it exists, else use defaults
    /// 3. Apply DZ_* environment variable overrides
    ///
    /// Command-line options are layered on top by the caller.
    /// Does NOT validate - call validate() after load().
    pub fn load() -> ConfigErrorResult<Self> {
        let config_path = Self::config_dir()?.join(CONFIG_FILENAME);

        let mut config = if config_path.exists() {
            Self::load_toml(&config_path)?
        } else {
            Config::default()
        };

        config.apply_env_overrides();

        Ok(config)
    }

    /// Load and parse TOML file with detailed error context.
    fn load_toml(path: &Path) -> ConfigErrorResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::Toml {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Get the config directory.
    /// Priority: DZ_CONFIG_DIR env var > ./.dz/ (relative to cwd)
    pub fn config_dir() -> ConfigErrorResult<PathBuf> {
        if let Ok(dir) = std::env::var(CONFIG_DIR_ENV) {
            return Ok(PathBuf::from(dir));
        }

        let cwd = std::env::current_dir()
            .map_err(|_| ConfigError::config("Cannot determine current working directory"))?;
        Ok(cwd.join(DEFAULT_CONFIG_DIR))
    }

    /// Validate all configuration.
    /// Call after load() and any command-line overrides.
    pub fn validate(&self) -> ConfigErrorResult<()> {
        self.setup.validate()?;
        self.websocket.validate()?;
        self.broker.validate()?;
        self.ingest.validate()?;

        Ok(())
    }

    /// Absolute path of the log file, when file logging is configured.
    pub fn log_file_path(&self) -> ConfigErrorResult<Option<PathBuf>> {
        match self.logging.file {
            Some(ref filename) => {
                let dir = Self::config_dir()?.join(&self.logging.dir);
                Ok(Some(dir.join(filename)))
            }
            None => Ok(None),
        }
    }

    /// Log configuration summary.
    pub fn log_summary(&self) {
        info!("Configuration loaded:");
        info!(
            "  setup: {}://{} (demozones: {}, eventhub: {})",
            self.setup.protocol,
            self.setup.dbhost.as_deref().unwrap_or("<unset>"),
            self.setup.demozone_path,
            self.setup.eventhub_path
        );
        info!(
            "  websocket: host={} path={} ping={}ms/{}ms buffer={} capacity={}",
            self.websocket.host,
            self.websocket.path,
            self.websocket.ping_interval_ms,
            self.websocket.ping_timeout_ms,
            self.websocket.send_buffer_size,
            self.websocket.channel_capacity
        );
        info!(
            "  broker: client_id={}, group_id={}, session_timeout={}ms",
            self.broker.client_id, self.broker.group_id, self.broker.session_timeout_ms
        );
        info!(
            "  ingest: {}",
            if self.ingest.enabled {
                self.ingest.bind_addr()
            } else {
                String::from("disabled")
            }
        );
        info!(
            "  logging: {} (colored: {})",
            *self.logging.level, self.logging.colored
        );
    }

    fn apply_env_overrides(&mut self) {
        // Setup
        Self::apply_env_option_string("DZ_DBHOST", &mut self.setup.dbhost);
        Self::apply_env_string("DZ_SETUP_PROTOCOL", &mut self.setup.protocol);

        // WebSocket
        Self::apply_env_string("DZ_WS_HOST", &mut self.websocket.host);
        Self::apply_env_string("DZ_WS_PATH", &mut self.websocket.path);
        Self::apply_env_parse(
            "DZ_WS_PING_INTERVAL_MS",
            &mut self.websocket.ping_interval_ms,
        );
        Self::apply_env_parse("DZ_WS_PING_TIMEOUT_MS", &mut self.websocket.ping_timeout_ms);
        Self::apply_env_parse(
            "DZ_WS_SEND_BUFFER_SIZE",
            &mut self.websocket.send_buffer_size,
        );

        // Broker
        Self::apply_env_string("DZ_BROKER_CLIENT_ID", &mut self.broker.client_id);
        Self::apply_env_string("DZ_BROKER_GROUP_ID", &mut self.broker.group_id);

        // Ingest
        Self::apply_env_bool("DZ_INGEST_ENABLED", &mut self.ingest.enabled);
        Self::apply_env_parse("DZ_INGEST_PORT", &mut self.ingest.port);

        // Logging
        Self::apply_env_parse("DZ_LOG_LEVEL", &mut self.logging.level);
        Self::apply_env_bool("DZ_LOG_COLORED", &mut self.logging.colored);
        Self::apply_env_option_string("DZ_LOG_FILE", &mut self.logging.file);
    }

    /// Helper: Apply environment variable override for String values
    fn apply_env_string(var_name: &str, target: &mut String) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val;
        }
    }

    /// Helper: Apply environment variable override for bool values (accepts "true"/"1")
    fn apply_env_bool(var_name: &str, target: &mut bool) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val == "true" || val == "1";
        }
    }

    /// Helper: Apply environment variable override for parseable values
    fn apply_env_parse<T: std::str::FromStr>(var_name: &str, target: &mut T) {
        if let Ok(val) = std::env::var(var_name)
            && let Ok(parsed) = val.parse()
        {
            *target = parsed;
        }
    }

    /// Helper: Apply environment variable override for Option<String> values
    fn apply_env_option_string(var_name: &str, target: &mut Option<String>) {
        if let Ok(val) = std::env::var(var_name) {
            *target = Some(val);
        }
    }
}
