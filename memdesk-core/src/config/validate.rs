//! Configuration validation rules.

use super::schema::Config;
use std::path::{Component, Path};

/// Validate configuration and return aggregated validation errors.
pub fn validate_config(config: &Config) -> crate::Result<()> {
    let mut errors = Vec::new();

    if config.server.host.trim().is_empty() {
        errors.push("server.host must not be empty".to_string());
    }
    if config.server.max_content_length == 0 {
        errors.push("server.max_content_length must be > 0".to_string());
    }

    for (key, name) in [
        ("storage.short_file", &config.storage.short_file),
        ("storage.long_file", &config.storage.long_file),
    ] {
        if !is_plain_filename(name) {
            errors.push(format!("{key} must be a plain file name, got {name:?}"));
        }
    }
    if config.storage.short_file == config.storage.long_file {
        errors.push("storage.short_file and storage.long_file must differ".to_string());
    }

    if config.network.timeout_secs == 0 {
        errors.push("network.timeout_secs must be > 0".to_string());
    }
    for endpoint in &config.network.ip_endpoints {
        if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
            errors.push(format!(
                "network.ip_endpoints entries must be http(s) URLs, got {endpoint:?}"
            ));
        }
    }

    let format = config.logging.format.to_ascii_lowercase();
    if format != "text" && format != "json" {
        errors.push("logging.format must be one of: text, json".to_string());
    }
    if config.logging.file.trim().is_empty() {
        errors.push("logging.file must not be empty".to_string());
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(crate::Error::Validation(errors.join("; ")))
    }
}

/// A single normal path component, no separators or `..`
fn is_plain_filename(name: &str) -> bool {
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}
