use serde_json::Value;

/// A tenant's broadcast endpoint as seen by the router.
pub trait BroadcastSink: Send + Sync {
    /// Clients currently connected to this endpoint.
    fn client_count(&self) -> usize;

    /// Fire-and-forget emission to every connected client of this endpoint.
    fn emit(&self, event_name: &str, payload: &Value);
}
