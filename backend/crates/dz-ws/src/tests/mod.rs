mod client_counter;
mod property_tests;
mod upgrade;

use crate::TenantEndpoint;

use dz_core::{Metrics, Tenant, TenantId};

pub(crate) fn endpoint(id: &str, port: u16) -> TenantEndpoint {
    let tenant = Tenant::new(TenantId::parse(id).unwrap(), id, port);
    TenantEndpoint::new(&tenant, 16, Metrics::new())
}
