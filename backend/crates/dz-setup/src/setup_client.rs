use crate::{DemozoneList, EventHubSetup, SetupError, SetupResult, SetupSource};

use async_trait::async_trait;
use dz_config::SetupConfig;
use log::debug;
use reqwest::Client as ReqwestClient;
use serde::de::DeserializeOwned;

/// HTTP client for the setup server
pub struct SetupClient {
    pub base_url: String,
    demozone_path: String,
    eventhub_path: String,
    client: ReqwestClient,
}

impl SetupClient {
    /// Create a new client
    ///
    /// # Arguments
    /// * `base_url` - Setup server URL (e.g., "https://10.0.0.5:443")
    /// * `accept_invalid_certs` - Skip TLS certificate verification
    pub fn new(
        base_url: &str,
        demozone_path: &str,
        eventhub_path: &str,
        accept_invalid_certs: bool,
    ) -> SetupResult<Self> {
        let client = ReqwestClient::builder()
            .danger_accept_invalid_certs(accept_invalid_certs)
            .build()
            .map_err(|e| SetupError::from_reqwest(base_url, e))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            demozone_path: demozone_path.to_string(),
            eventhub_path: eventhub_path.to_string(),
            client,
        })
    }

    pub fn from_config(config: &SetupConfig) -> SetupResult<Self> {
        let base_url = config.base_url()?;
        Self::new(
            &base_url,
            &config.demozone_path,
            &config.eventhub_path,
            config.accept_invalid_certs,
        )
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> SetupResult<T> {
        let url = format!("{}{}", self.base_url, path);
        debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| SetupError::from_reqwest(&url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SetupError::status(&url, status.as_u16()));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| SetupError::from_reqwest(&url, e))?;

        serde_json::from_slice(&body).map_err(|e| SetupError::from_json(&url, e))
    }
}

#[async_trait]
impl SetupSource for SetupClient {
    async fn demozones(&self) -> SetupResult<DemozoneList> {
        self.get(&self.demozone_path).await
    }

    async fn event_hub(&self) -> SetupResult<EventHubSetup> {
        self.get(&self.eventhub_path).await
    }
}
