use crate::{ConfigError, ConfigErrorResult, DEFAULT_BIND_HOST};

use serde::Deserialize;

// Ping interval/timeout constraints (milliseconds)
pub const MIN_PING_MS: u64 = 100;
pub const MAX_PING_MS: u64 = 600_000;
pub const DEFAULT_PING_INTERVAL_MS: u64 = 25_000;
pub const DEFAULT_PING_TIMEOUT_MS: u64 = 60_000;

// Send buffer size constraints
pub const MIN_SEND_BUFFER_SIZE: usize = 1;
pub const MAX_SEND_BUFFER_SIZE: usize = 10_000;
pub const DEFAULT_SEND_BUFFER_SIZE: usize = 100;

// Broadcast channel capacity constraints
pub const MIN_CHANNEL_CAPACITY: usize = 1;
pub const MAX_CHANNEL_CAPACITY: usize = 100_000;
pub const DEFAULT_CHANNEL_CAPACITY: usize = 1000;

pub const DEFAULT_WS_PATH: &str = "/ws";

/// Settings shared by every tenant broadcast endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WebSocketConfig {
    /// Interface tenant endpoints bind to
    pub host: String,
    /// Upgrade path on each tenant port
    pub path: String,
    /// Keepalive ping interval in milliseconds
    pub ping_interval_ms: u64,
    /// How long a client may leave a ping unanswered, in milliseconds
    pub ping_timeout_ms: u64,
    /// Per-client outgoing buffer
    pub send_buffer_size: usize,
    /// Per-tenant broadcast channel capacity
    pub channel_capacity: usize,
}

impl Default for WebSocketConfig {
    fn default() -> Self {
        Self {
            host: String::from(DEFAULT_BIND_HOST),
            path: String::from(DEFAULT_WS_PATH),
            ping_interval_ms: DEFAULT_PING_INTERVAL_MS,
            ping_timeout_ms: DEFAULT_PING_TIMEOUT_MS,
            send_buffer_size: DEFAULT_SEND_BUFFER_SIZE,
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
        }
    }
}

impl WebSocketConfig {
    /// Validate all fields are within acceptable ranges.
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if !self.path.starts_with('/') {
            return Err(ConfigError::websocket(format!(
                "websocket.path must start with '/', got '{}'",
                self.path
            )));
        }

        if self.ping_interval_ms < MIN_PING_MS || self.ping_interval_ms > MAX_PING_MS {
            return Err(ConfigError::websocket(format!(
                "websocket.ping_interval_ms must be {}-{}, got {}",
                MIN_PING_MS, MAX_PING_MS, self.ping_interval_ms
            )));
        }

        if self.ping_timeout_ms < MIN_PING_MS || self.ping_timeout_ms > MAX_PING_MS {
            return Err(ConfigError::websocket(format!(
                "websocket.ping_timeout_ms must be {}-{}, got {}",
                MIN_PING_MS, MAX_PING_MS, self.ping_timeout_ms
            )));
        }

        if self.send_buffer_size < MIN_SEND_BUFFER_SIZE
            || self.send_buffer_size > MAX_SEND_BUFFER_SIZE
        {
            return Err(ConfigError::websocket(format!(
                "websocket.send_buffer_size must be {}-{}, got {}",
                MIN_SEND_BUFFER_SIZE, MAX_SEND_BUFFER_SIZE, self.send_buffer_size
            )));
        }

        if self.channel_capacity < MIN_CHANNEL_CAPACITY
            || self.channel_capacity > MAX_CHANNEL_CAPACITY
        {
            return Err(ConfigError::websocket(format!(
                "websocket.channel_capacity must be {}-{}, got {}",
                MIN_CHANNEL_CAPACITY, MAX_CHANNEL_CAPACITY, self.channel_capacity
            )));
        }

        Ok(())
    }
}
