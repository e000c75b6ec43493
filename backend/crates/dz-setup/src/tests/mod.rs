
use crate::{DemozoneList, EventHubSetup, SetupError, SetupResult, SetupSource, TenantDescriptor};

use async_trait::async_trait;

/// In-process setup source returning canned answers
pub(crate) struct FakeSource {
    pub items: Option<Vec<TenantDescriptor>>,
    pub event_hub: Option<EventHubSetup>,
}

impl FakeSource {
    pub(crate) fn with_items(items: Vec<TenantDescriptor>) -> Self {
        Self {
            items: Some(items),
            event_hub: None,
        }
    }

    pub(crate) fn unreachable() -> Self {
        Self {
            items: None,
            event_hub: None,
        }
    }
}

#[async_trait]
impl SetupSource for FakeSource {
    async fn demozones(&self) -> SetupResult<DemozoneList> {
        match &self.items {
            Some(items) => Ok(DemozoneList {
                items: items.clone(),
            }),
            None => Err(SetupError::status("fake://demozones", 503)),
        }
    }

    async fn event_hub(&self) -> SetupResult<EventHubSetup> {
        self.event_hub
            .clone()
            .ok_or_else(|| SetupError::status("fake://eventhub", 503))
    }
}
