use crate::TenantDescriptor;

use serde::Deserialize;

/// Body of the demozone list request.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DemozoneList {
    pub items: Vec<TenantDescriptor>,
}
