mod relay;

use dz_setup::{DemozoneList, EventHubSetup, SetupError, SetupResult, SetupSource, TenantDescriptor};

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

/// Setup source answering from memory and counting requests
pub(crate) struct FakeSource {
    items: Vec<TenantDescriptor>,
    event_topic: String,
    pub(crate) event_hub_calls: AtomicUsize,
}

impl FakeSource {
    pub(crate) fn new(items: Vec<TenantDescriptor>, event_topic: &str) -> Self {
        Self {
            items,
            event_topic: event_topic.to_string(),
            event_hub_calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl SetupSource for FakeSource {
    async fn demozones(&self) -> SetupResult<DemozoneList> {
        Ok(DemozoneList {
            items: self.items.clone(),
        })
    }

    async fn event_hub(&self) -> SetupResult<EventHubSetup> {
        self.event_hub_calls.fetch_add(1, Ordering::SeqCst);
        if self.event_topic.is_empty() {
            return Err(SetupError::status("fake://eventhub", 404));
        }
        Ok(EventHubSetup {
            zookeeperhost: String::from("zk.test:2181"),
            eventtopic: self.event_topic.clone(),
        })
    }
}
