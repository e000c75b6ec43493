mod demozone_list;
mod event_hub_setup;
mod tenant_descriptor;

pub use demozone_list::DemozoneList;
pub use event_hub_setup::EventHubSetup;
pub use tenant_descriptor::TenantDescriptor;
