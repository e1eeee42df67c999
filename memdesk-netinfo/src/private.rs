//! Private address lookup through local hostname resolution

use std::net::IpAddr;
use tracing::debug;

/// Resolve the machine's hostname, preferring an IPv4 address
pub async fn discover_private_ip() -> Option<IpAddr> {
    let name = match hostname::get() {
        Ok(name) => name.to_string_lossy().to_string(),
        Err(e) => {
            debug!("Failed to read hostname: {}", e);
            return None;
        }
    };

    let addrs: Vec<IpAddr> = match tokio::net::lookup_host((name.as_str(), 0)).await {
        Ok(addrs) => addrs.map(|addr| addr.ip()).collect(),
        Err(e) => {
            debug!(hostname = %name, "Failed to resolve hostname: {}", e);
            return None;
        }
    };

    pick_address(&addrs)
}

fn pick_address(addrs: &[IpAddr]) -> Option<IpAddr> {
    addrs
        .iter()
        .find(|ip| ip.is_ipv4())
        .or_else(|| addrs.first())
        .copied()
}
