use crate::{DemozoneList, EventHubSetup, SetupResult};

use async_trait::async_trait;

/// Where tenants and broker coordinates come from at startup.
#[async_trait]
pub trait SetupSource: Send + Sync {
    async fn demozones(&self) -> SetupResult<DemozoneList>;

    async fn event_hub(&self) -> SetupResult<EventHubSetup>;
}
