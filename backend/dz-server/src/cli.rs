use dz_config::{Config, LogLevel};

use clap::Parser;
use log::LevelFilter;

/// Broker backend note printed under the usage text
#[cfg(feature = "kafka")]
pub const BACKEND_NOTE: &str = "Broker backend: Kafka (rdkafka).";

/// Broker backend note printed under the usage text
#[cfg(not(feature = "kafka"))]
pub const BACKEND_NOTE: &str =
    "Broker backend: none compiled in; rebuild with `--features kafka` to connect.";

#[derive(Parser, Debug)]
#[command(name = "demozone-relay")]
#[command(about = "Relays demozone events from the broker to per-demozone WebSocket endpoints")]
#[command(version)]
#[command(after_help = BACKEND_NOTE)]
pub struct Cli {
    /// Setup server host[:port] serving the demozone list and event hub setup
    #[arg(short = 'd', long, value_name = "HOST")]
    pub dbhost: Option<String>,

    /// Interval between WebSocket pings, in milliseconds [default: 25000]
    #[arg(short = 'i', long, value_name = "MS")]
    pub pinginterval: Option<u64>,

    /// Time a client may leave a ping unanswered, in milliseconds [default: 60000]
    #[arg(short = 't', long, value_name = "MS")]
    pub pingtimeout: Option<u64>,

    /// Debug logging
    #[arg(short = 'v', long)]
    pub verbose: bool,
}

impl Cli {
    /// Layer command-line options over the loaded configuration.
    pub fn apply(&self, config: &mut Config) {
        if let Some(ref dbhost) = self.dbhost {
            config.setup.dbhost = Some(dbhost.clone());
        }
        if let Some(interval) = self.pinginterval {
            config.websocket.ping_interval_ms = interval;
        }
        if let Some(timeout) = self.pingtimeout {
            config.websocket.ping_timeout_ms = timeout;
        }
        if self.verbose {
            config.logging.level = LogLevel(LevelFilter::Debug);
        }
    }
}
