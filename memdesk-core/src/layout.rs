//! Memory file layout: the base directory and the two well-known files.

use crate::config::schema::StorageConfig;
use crate::guard::GuardedDir;
use crate::utils::normalize_path;
use crate::{Error, Result};
use std::fs::OpenOptions;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::info;

/// The two memory files exposed for editing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MemoryKind {
    Long,
    Short,
}

impl MemoryKind {
    /// Display order on the home page
    pub const ALL: [MemoryKind; 2] = [MemoryKind::Long, MemoryKind::Short];

    /// Logical key
    pub fn key(self) -> &'static str {
        match self {
            MemoryKind::Short => "short",
            MemoryKind::Long => "long",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MemoryKind::Short => "短记忆",
            MemoryKind::Long => "长记忆",
        }
    }

    /// Shown instead of content that is empty or unreadable
    pub fn empty_placeholder(self) -> &'static str {
        match self {
            MemoryKind::Short => "短记忆文件为空",
            MemoryKind::Long => "长记忆文件为空",
        }
    }
}

/// Resolved base directory plus the filenames of both memory files
#[derive(Debug, Clone)]
pub struct MemoryLayout {
    directory: PathBuf,
    short_file: String,
    long_file: String,
}

impl MemoryLayout {
    /// Build a layout rooted at an explicit directory
    pub fn new<P: AsRef<Path>>(
        directory: P,
        short_file: impl Into<String>,
        long_file: impl Into<String>,
    ) -> Result<Self> {
        Ok(Self {
            directory: normalize_path(directory)?,
            short_file: short_file.into(),
            long_file: long_file.into(),
        })
    }

    /// Build a layout from storage configuration.
    ///
    /// An empty `base_dir` resolves to the directory holding the running
    /// executable.
    pub fn from_config(config: &StorageConfig) -> Result<Self> {
        let directory = if config.base_dir.trim().is_empty() {
            let exe = std::env::current_exe()?;
            exe.parent().map(Path::to_path_buf).ok_or_else(|| {
                Error::Config(format!("executable {:?} has no parent directory", exe))
            })?
        } else {
            PathBuf::from(&config.base_dir)
        };
        Self::new(directory, &config.short_file, &config.long_file)
    }

    /// Create the base directory and any missing memory file (empty).
    /// Existing files are left untouched, so repeated calls are harmless.
    pub fn ensure(&self) -> Result<()> {
        std::fs::create_dir_all(&self.directory)?;

        for kind in MemoryKind::ALL {
            let path = self.path_of(kind);
            match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(_) => info!(file = %path.display(), "Created empty {} file", kind.key()),
                Err(e) if e.kind() == ErrorKind::AlreadyExists => {}
                Err(e) => return Err(e.into()),
            }
        }
        Ok(())
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn filename(&self, kind: MemoryKind) -> &str {
        match kind {
            MemoryKind::Short => &self.short_file,
            MemoryKind::Long => &self.long_file,
        }
    }

    /// Logical key to filename mapping
    pub fn filenames(&self) -> [(MemoryKind, &str); 2] {
        [
            (MemoryKind::Short, self.filename(MemoryKind::Short)),
            (MemoryKind::Long, self.filename(MemoryKind::Long)),
        ]
    }

    /// Absolute path of a memory file
    pub fn path_of(&self, kind: MemoryKind) -> PathBuf {
        self.directory.join(self.filename(kind))
    }

    /// A guard confined to this layout's directory
    pub fn guarded(&self, policy: crate::guard::ContainmentPolicy) -> Result<GuardedDir> {
        GuardedDir::new(&self.directory, policy)
    }
}
