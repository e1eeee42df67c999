//! Startup banner

use crate::{NetworkInfo, PUBLIC_IP_UNAVAILABLE};
use memdesk_core::{MemoryKind, MemoryLayout};
use std::fmt::Write;

const RULE: &str = "==============================";

/// Text of the startup banner
pub fn render_banner(info: &NetworkInfo, port: u16, layout: &MemoryLayout) -> String {
    let public = if info.public_ips.is_empty() {
        PUBLIC_IP_UNAVAILABLE.to_string()
    } else {
        info.public_ips.join(", ")
    };

    let mut out = String::new();
    let _ = writeln!(out, "========== 系统信息 ==========");
    let _ = writeln!(out, "公网 IP: {}", public);
    let _ = writeln!(out, "私网 IP: {}", info.private_ip);
    let _ = writeln!(out, "访问地址: {}", info.base_url(port));
    for kind in [MemoryKind::Short, MemoryKind::Long] {
        let _ = writeln!(
            out,
            "{}文件路径: {}",
            kind.label(),
            layout.path_of(kind).display()
        );
    }
    let _ = writeln!(out, "{}", RULE);
    out
}

/// Write the startup banner to stdout
pub fn print_startup_banner(info: &NetworkInfo, port: u16, layout: &MemoryLayout) {
    print!("{}", render_banner(info, port, layout));
}
