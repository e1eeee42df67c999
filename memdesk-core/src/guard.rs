//! Guarded file access confined to a base directory.
//!
//! Every open goes through [`GuardedDir`], which normalises the requested path
//! and refuses anything that does not resolve inside the base directory.
//! Read-side failures collapse to `None` so callers substitute placeholder
//! content; writes report why they failed.
//!
//! The inside-the-base test is selected by [`ContainmentPolicy`]. The default
//! compares path components. `Prefix` keeps the older raw string comparison,
//! which also accepts siblings such as `/base_evil` for a base of `/base`.
//! Neither policy resolves symlinks.

use crate::utils::normalize_path;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs::{File, OpenOptions};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// How a candidate path is matched against the base directory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContainmentPolicy {
    /// Base must be a component-wise ancestor of the candidate
    #[default]
    Ancestor,
    /// Base must be a string prefix of the candidate
    Prefix,
}

impl ContainmentPolicy {
    /// Check whether `candidate` lies in `base`. Both must already be normalised.
    pub fn contains(self, base: &Path, candidate: &Path) -> bool {
        match self {
            ContainmentPolicy::Ancestor => candidate.starts_with(base),
            ContainmentPolicy::Prefix => candidate
                .as_os_str()
                .to_string_lossy()
                .starts_with(base.as_os_str().to_string_lossy().as_ref()),
        }
    }
}

/// File open mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenMode {
    Read,
    /// Create or truncate
    Write,
}

/// A directory that bounds all file access
#[derive(Debug, Clone)]
pub struct GuardedDir {
    base: PathBuf,
    policy: ContainmentPolicy,
}

impl GuardedDir {
    /// Create a guard rooted at `base`
    pub fn new<P: AsRef<Path>>(base: P, policy: ContainmentPolicy) -> Result<Self> {
        Ok(Self {
            base: normalize_path(base)?,
            policy,
        })
    }

    /// The normalised base directory
    pub fn base(&self) -> &Path {
        &self.base
    }

    pub fn policy(&self) -> ContainmentPolicy {
        self.policy
    }

    /// Join a caller-supplied name onto the base directory. The result is not
    /// checked here; the check happens when it is opened.
    pub fn join(&self, name: &str) -> PathBuf {
        self.base.join(name)
    }

    /// Resolve `path` to its normalised absolute form if it is inside the base
    pub fn resolve<P: AsRef<Path>>(&self, path: P) -> Option<PathBuf> {
        let path = path.as_ref();
        let normalized = normalize_path(path).ok()?;
        if self.policy.contains(&self.base, &normalized) {
            Some(normalized)
        } else {
            warn!(path = %path.display(), base = %self.base.display(), "Denied access outside base directory");
            None
        }
    }

    /// Open `path` in `mode`, reporting the reason on failure
    pub fn try_open<P: AsRef<Path>>(&self, path: P, mode: OpenMode) -> Result<File> {
        let path = path.as_ref();
        let resolved = self
            .resolve(path)
            .ok_or_else(|| Error::AccessDenied(path.display().to_string()))?;

        let file = match mode {
            OpenMode::Read => File::open(&resolved)?,
            OpenMode::Write => OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&resolved)?,
        };
        Ok(file)
    }

    /// Open `path` in `mode`; `None` on traversal denial or any I/O error.
    /// The file is closed when the handle is dropped.
    pub fn open<P: AsRef<Path>>(&self, path: P, mode: OpenMode) -> Option<File> {
        let path = path.as_ref();
        match self.try_open(path, mode) {
            Ok(file) => Some(file),
            Err(e) => {
                debug!(path = %path.display(), ?mode, "Guarded open failed: {}", e);
                None
            }
        }
    }

    /// Read a whole UTF-8 file, `None` when unavailable
    pub fn read_to_string<P: AsRef<Path>>(&self, path: P) -> Option<String> {
        let path = path.as_ref();
        let mut file = self.open(path, OpenMode::Read)?;
        let mut content = String::new();
        match file.read_to_string(&mut content) {
            Ok(_) => Some(content),
            Err(e) => {
                debug!(path = %path.display(), "Guarded read failed: {}", e);
                None
            }
        }
    }

    /// Overwrite `path` with `content`
    pub fn write<P: AsRef<Path>>(&self, path: P, content: &str) -> Result<()> {
        let mut file = self.try_open(path, OpenMode::Write)?;
        file.write_all(content.as_bytes())?;
        file.flush()?;
        Ok(())
    }
}
