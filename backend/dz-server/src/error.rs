use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Config error: {0}")]
    Config(#[from] dz_config::ConfigError),

    #[error("Setup error: {0}")]
    Setup(#[from] dz_setup::SetupError),

    #[error("Invalid setup data: {0}")]
    Core(#[from] dz_core::CoreError),

    #[error("Broker error: {0}")]
    Broker(#[from] dz_broker::BrokerError),

    #[error("Endpoint error: {0}")]
    Ws(#[from] dz_ws::WsError),

    #[error("Failed to bind ingest endpoint {addr}: {source}")]
    IngestBind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Logger error: {message}")]
    Logger { message: String },

    #[error("Interrupted during startup")]
    Interrupted,
}

impl ServerError {
    /// Errors caused by missing or invalid startup options
    pub fn is_usage(&self) -> bool {
        matches!(self, ServerError::Config(_))
    }

    pub fn is_interrupted(&self) -> bool {
        matches!(self, ServerError::Interrupted)
    }
}

pub type Result<T> = std::result::Result<T, ServerError>;
