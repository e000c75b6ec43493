use std::net::SocketAddr;
use std::time::Duration;

use dz_config::WebSocketConfig;

/// Per-client session settings
#[derive(Debug, Clone)]
pub struct ConnectionConfig {
    /// Send buffer size (bounded to handle backpressure)
    pub send_buffer_size: usize,
    /// Time between server pings
    pub ping_interval: Duration,
    /// How long a ping may stay unanswered
    pub ping_timeout: Duration,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            send_buffer_size: 100,
            ping_interval: Duration::from_millis(25_000),
            ping_timeout: Duration::from_millis(60_000),
        }
    }
}

/// Settings shared by every tenant endpoint
#[derive(Debug, Clone)]
pub struct EndpointConfig {
    pub host: String,
    pub path: String,
    pub channel_capacity: usize,
    pub connection: ConnectionConfig,
}

impl EndpointConfig {
    pub fn bind_addr(&self, port: u16) -> String {
        match self.host.parse::<std::net::IpAddr>() {
            Ok(ip) => SocketAddr::new(ip, port).to_string(),
            Err(_) => format!("{}:{}", self.host, port),
        }
    }
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self::from(&WebSocketConfig::default())
    }
}

impl From<&WebSocketConfig> for EndpointConfig {
    fn from(config: &WebSocketConfig) -> Self {
        Self {
            host: config.host.clone(),
            path: config.path.clone(),
            channel_capacity: config.channel_capacity,
            connection: ConnectionConfig {
                send_buffer_size: config.send_buffer_size,
                ping_interval: Duration::from_millis(config.ping_interval_ms),
                ping_timeout: Duration::from_millis(config.ping_timeout_ms),
            },
        }
    }
}
