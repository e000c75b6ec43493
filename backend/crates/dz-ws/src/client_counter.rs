use std::sync::atomic::{AtomicUsize, Ordering};

/// Live client count of one tenant endpoint. Never goes below zero.
#[derive(Debug, Default)]
pub struct ClientCounter {
    count: AtomicUsize,
}

impl ClientCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a connect. Returns the new count.
    pub fn connected(&self) -> usize {
        self.count.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Record a disconnect, saturating at zero. Returns the new count.
    pub fn disconnected(&self) -> usize {
        let previous = self
            .count
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| Some(n.saturating_sub(1)))
            .unwrap_or(0);
        previous.saturating_sub(1)
    }

    pub fn get(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }
}
