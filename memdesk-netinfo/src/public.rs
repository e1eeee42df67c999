//! Public address lookup through IP-echo services

use memdesk_core::config::NetworkConfig;
use memdesk_core::{Error, Result};
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tracing::{debug, info, warn};

const USER_AGENT: &str = concat!("memdesk/", env!("CARGO_PKG_VERSION"));

/// Queries IP-echo endpoints in order until one answers
pub struct PublicIpLookup {
    endpoints: Vec<String>,
    client: Client,
}

impl PublicIpLookup {
    /// Create a lookup with a per-request timeout
    pub fn new(endpoints: Vec<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| Error::Network(e.to_string()))?;
        Ok(Self { endpoints, client })
    }

    pub fn from_config(config: &NetworkConfig) -> Result<Self> {
        Self::new(
            config.ip_endpoints.clone(),
            Duration::from_secs(config.timeout_secs),
        )
    }

    /// Public addresses reported by the first endpoint that answers 200 with a
    /// non-empty body. Empty when none does.
    pub async fn discover(&self) -> Vec<String> {
        for endpoint in &self.endpoints {
            match self.query(endpoint).await {
                Ok(ip) => {
                    info!(endpoint = %endpoint, "Public IP resolved: {}", ip);
                    return vec![ip];
                }
                Err(e) => debug!(endpoint = %endpoint, "IP-echo lookup failed: {}", e),
            }
        }
        warn!("No IP-echo endpoint answered; public IP unavailable");
        Vec::new()
    }

    async fn query(&self, endpoint: &str) -> Result<String> {
        let response = self
            .client
            .get(endpoint)
            .send()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;

        if response.status() != StatusCode::OK {
            return Err(Error::Network(format!("HTTP {}", response.status())));
        }

        let body = response
            .text()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;
        let ip = body.trim();
        if ip.is_empty() {
            return Err(Error::Network("empty response body".to_string()));
        }
        Ok(ip.to_string())
    }
}
