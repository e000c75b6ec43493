use serde::{Deserialize, Deserializer, de};
use serde_json::Value;

/// One entry of the demozone list, exactly as the setup server sends it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TenantDescriptor {
    pub id: String,
    #[serde(default)]
    pub name: String,
    /// Accepted as a JSON string or number
    #[serde(deserialize_with = "proxyport_as_string")]
    pub proxyport: String,
}

impl TenantDescriptor {
    pub fn new(id: &str, name: &str, proxyport: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            proxyport: proxyport.to_string(),
        }
    }
}

fn proxyport_as_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(de::Error::custom(format!(
            "proxyport must be a string or number, got {}",
            other
        ))),
    }
}
