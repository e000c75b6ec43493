mod router;

use crate::BroadcastSink;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, Once};

use log::{LevelFilter, Log, Metadata, Record};
use serde_json::Value;

/// Sink that records every emission and reports a settable client count
#[derive(Default)]
pub(crate) struct RecordingSink {
    clients: AtomicUsize,
    emitted: Mutex<Vec<(String, Value)>>,
}

impl RecordingSink {
    pub(crate) fn with_clients(clients: usize) -> Self {
        let sink = Self::default();
        sink.clients.store(clients, Ordering::SeqCst);
        sink
    }

    pub(crate) fn emitted(&self) -> Vec<(String, Value)> {
        self.emitted.lock().unwrap().clone()
    }
}

impl BroadcastSink for RecordingSink {
    fn client_count(&self) -> usize {
        self.clients.load(Ordering::SeqCst)
    }

    fn emit(&self, event_name: &str, payload: &Value) {
        self.emitted
            .lock()
            .unwrap()
            .push((event_name.to_string(), payload.clone()));
    }
}

/// Logger that keeps the text of every record, for counting log lines
struct CapturingLogger;

static LOGGER: CapturingLogger = CapturingLogger;
static CAPTURED: Mutex<Vec<String>> = Mutex::new(Vec::new());
static INSTALL: Once = Once::new();

impl Log for CapturingLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        CAPTURED.lock().unwrap().push(record.args().to_string());
    }

    fn flush(&self) {}
}

pub(crate) fn capture_logs() {
    INSTALL.call_once(|| {
        log::set_logger(&LOGGER).unwrap();
        log::set_max_level(LevelFilter::Trace);
    });
}

/// Captured lines mentioning `needle`, at any level
pub(crate) fn log_lines_mentioning(needle: &str) -> usize {
    CAPTURED
        .lock()
        .unwrap()
        .iter()
        .filter(|line| line.contains(needle))
        .count()
}
