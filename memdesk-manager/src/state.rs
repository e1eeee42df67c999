use memdesk_core::config::Config;
use memdesk_core::{GuardedDir, MemoryLayout};
use std::sync::Arc;

/// Shared, read-only request state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub layout: Arc<MemoryLayout>,
    pub files: Arc<GuardedDir>,
}

impl AppState {
    pub fn new(config: Config, layout: MemoryLayout) -> memdesk_core::Result<Self> {
        let files = layout.guarded(config.storage.containment)?;
        Ok(Self {
            config: Arc::new(config),
            layout: Arc::new(layout),
            files: Arc::new(files),
        })
    }

    /// Maximum accepted `content` length in bytes
    pub fn max_content_length(&self) -> usize {
        self.config.server.max_content_length
    }
}
