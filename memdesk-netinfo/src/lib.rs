//! Network reachability information printed when memdesk starts
//!
//! Nothing here is fatal: lookups that fail turn into placeholder text and
//! the server starts regardless.

pub mod banner;
pub mod private;
pub mod public;

pub use banner::{print_startup_banner, render_banner};
pub use private::discover_private_ip;
pub use public::PublicIpLookup;

use memdesk_core::config::NetworkConfig;
use tracing::warn;

/// Shown when no IP-echo endpoint answered
pub const PUBLIC_IP_UNAVAILABLE: &str = "无法获取公网IP";
/// Shown when the local hostname could not be resolved
pub const PRIVATE_IP_UNAVAILABLE: &str = "无法获取私有IP";

/// Addresses discovered at startup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkInfo {
    /// Public addresses, empty when every endpoint failed
    pub public_ips: Vec<String>,
    /// Private address or [`PRIVATE_IP_UNAVAILABLE`]
    pub private_ip: String,
}

impl NetworkInfo {
    /// `http://<first public ip or localhost>:<port>`
    pub fn base_url(&self, port: u16) -> String {
        let host = self
            .public_ips
            .first()
            .map(String::as_str)
            .unwrap_or("localhost");
        format!("http://{}:{}", host, port)
    }
}

/// Query the public address lookup and resolve the private address
pub async fn discover_network_info(config: &NetworkConfig) -> NetworkInfo {
    let public_ips = match PublicIpLookup::from_config(config) {
        Ok(lookup) => lookup.discover().await,
        Err(e) => {
            warn!("Public IP lookup disabled: {}", e);
            Vec::new()
        }
    };

    let private_ip = discover_private_ip()
        .await
        .map(|ip| ip.to_string())
        .unwrap_or_else(|| PRIVATE_IP_UNAVAILABLE.to_string());

    NetworkInfo {
        public_ips,
        private_ip,
    }
}
