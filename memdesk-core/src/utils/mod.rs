//! Utility functions and helpers

use std::path::{Component, Path, PathBuf};

/// Make `path` absolute against the current directory and fold `.` and `..`
/// components without touching the filesystem.
///
/// `..` at the root stays at the root, matching how the OS resolves it.
pub fn normalize_path<P: AsRef<Path>>(path: P) -> std::io::Result<PathBuf> {
    let absolute = std::path::absolute(path.as_ref())?;
    let mut normalized = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::Prefix(_) | Component::RootDir | Component::Normal(_) => {
                normalized.push(component.as_os_str());
            }
            Component::CurDir => {}
            Component::ParentDir => {
                if normalized.parent().is_some() {
                    normalized.pop();
                }
            }
        }
    }
    Ok(normalized)
}
