mod broker_config;
mod config;
mod error;
mod ingest_config;
mod log_level;
mod logging_config;
mod setup_config;
mod websocket_config;

#[cfg(test)]
mod tests;

pub use broker_config::BrokerConfig;
pub use config::Config;
pub use error::{ConfigError, ConfigErrorResult};
pub use ingest_config::IngestConfig;
pub use log_level::LogLevel;
pub use logging_config::LoggingConfig;
pub use setup_config::SetupConfig;
pub use websocket_config::{
    DEFAULT_PING_INTERVAL_MS, DEFAULT_PING_TIMEOUT_MS, MAX_PING_MS, MIN_PING_MS, WebSocketConfig,
};

/// Environment variable naming the config directory
pub const CONFIG_DIR_ENV: &str = "DZ_CONFIG_DIR";
const DEFAULT_CONFIG_DIR: &str = ".dz";
const CONFIG_FILENAME: &str = "config.toml";

const DEFAULT_BIND_HOST: &str = "0.0.0.0";
const DEFAULT_SETUP_PROTOCOL: &str = "https";
const DEFAULT_DEMOZONE_PATH: &str = "/ords/pdb1/wedoindustry/demozone/zone";
const DEFAULT_EVENTHUB_PATH: &str = "/ords/pdb1/wedoindustry/setup/eventhub";
const DEFAULT_BROKER_CLIENT_ID: &str = "RETAIL";
const DEFAULT_BROKER_GROUP_ID: &str = "demozone-relay";
const DEFAULT_BROKER_SESSION_TIMEOUT_MS: u32 = 6000;
const DEFAULT_INGEST_PORT: u16 = 10001;
const DEFAULT_LOG_LEVEL_STRING: &str = "info";
const DEFAULT_LOG_LEVEL: log::LevelFilter = log::LevelFilter::Info;
const DEFAULT_LOG_DIRECTORY: &str = "log";
