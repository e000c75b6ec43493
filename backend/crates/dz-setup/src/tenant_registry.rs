use crate::{SetupError, SetupResult, SetupSource, TenantDescriptor};

use std::collections::HashMap;
use std::panic::Location;

use dz_core::{Tenant, TenantId, compute_port};
use error_location::ErrorLocation;
use log::info;

/// Tenants known to this process. Fixed once loaded.
#[derive(Debug, Clone)]
pub struct TenantRegistry {
    tenants: Vec<Tenant>,
}

impl TenantRegistry {
    /// Fetch the demozone list and build the registry. No retry.
    pub async fn load(source: &dyn SetupSource) -> SetupResult<Self> {
        let list = source.demozones().await?;
        Self::from_descriptors(list.items)
    }

    /// Build the registry from raw descriptors, keeping their order.
    #[track_caller]
    pub fn from_descriptors(items: Vec<TenantDescriptor>) -> SetupResult<Self> {
        let caller = Location::caller();

        if items.is_empty() {
            return Err(SetupError::NoTenants {
                location: ErrorLocation::from(caller),
            });
        }

        let mut tenants: Vec<Tenant> = Vec::with_capacity(items.len());
        let mut ports: HashMap<u16, TenantId> = HashMap::with_capacity(items.len());

        for item in items {
            let id = TenantId::parse(&item.id)?;
            let port = compute_port(&item.id, &item.proxyport)?;

            if tenants.iter().any(|t| t.id == id) {
                return Err(SetupError::DuplicateTenant {
                    tenant_id: id.to_string(),
                    location: ErrorLocation::from(caller),
                });
            }

            if let Some(existing) = ports.get(&port) {
                return Err(SetupError::PortCollision {
                    first: existing.to_string(),
                    second: id.to_string(),
                    port,
                    location: ErrorLocation::from(caller),
                });
            }

            info!("Demozone {} ({}) -> port {}", id, item.name, port);
            ports.insert(port, id.clone());
            tenants.push(Tenant::new(id, item.name, port));
        }

        Ok(Self { tenants })
    }

    pub fn tenants(&self) -> &[Tenant] {
        &self.tenants
    }

    pub fn get(&self, id: &TenantId) -> Option<&Tenant> {
        self.tenants.iter().find(|t| &t.id == id)
    }

    pub fn len(&self) -> usize {
        self.tenants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tenants.is_empty()
    }
}
