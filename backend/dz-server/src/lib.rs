pub mod broker_backend;
pub mod cli;
pub mod error;
pub mod ingest;
pub mod logger;
pub mod relay;

#[cfg(test)]
mod tests;

pub use broker_backend::default_broker_client;
pub use cli::Cli;
pub use error::{Result as ServerResult, ServerError};
pub use ingest::{IngestServer, build_router, parse_ingest_body};
pub use relay::Relay;

/// Exit status after a fatal bootstrap error or an interrupt
pub const EXIT_FATAL: u8 = 2;

/// Exit status (-1) when required options are missing or invalid
pub const EXIT_USAGE: u8 = 255;
