pub(crate) mod error;
pub(crate) mod models;
pub(crate) mod setup_client;
pub(crate) mod setup_source;
pub(crate) mod tenant_registry;

#[cfg(test)]
mod tests;

pub use error::{Result as SetupResult, SetupError};
pub use models::{DemozoneList, EventHubSetup, TenantDescriptor};
pub use setup_client::SetupClient;
pub use setup_source::SetupSource;
pub use tenant_registry::TenantRegistry;
