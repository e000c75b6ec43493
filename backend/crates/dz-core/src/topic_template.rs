use crate::{CoreError, CoreResult, DEMOZONE_PLACEHOLDER, TenantId};

use std::fmt;
use std::panic::Location;

use error_location::ErrorLocation;

/// Broker topic name template, e.g. `wedo-{demozone}-events`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicTemplate(String);

impl TopicTemplate {
    /// Templates must contain the `{demozone}` placeholder.
    #[track_caller]
    pub fn parse(template: impl Into<String>) -> CoreResult<Self> {
        let template = template.into();

        if !template.contains(DEMOZONE_PLACEHOLDER) {
            return Err(CoreError::InvalidTopicTemplate {
                template,
                placeholder: DEMOZONE_PLACEHOLDER,
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(Self(template))
    }

    /// Substitute the first placeholder with the lowercased tenant id.
    pub fn render(&self, tenant_id: &TenantId) -> String {
        self.0
            .replacen(DEMOZONE_PLACEHOLDER, &tenant_id.topic_segment(), 1)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TopicTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
