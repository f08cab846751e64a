//! Storage availability checks

use std::path::Path;

/// Whether the documents location can take writes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageState {
    Mounted,
    MountedReadOnly,
    Unmounted,
}

/// Reports the state of the storage behind a directory
pub trait StorageProbe: Send + Sync {
    fn state(&self, dir: &Path) -> StorageState;
}

/// Probes the local filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct FilesystemProbe;

impl StorageProbe for FilesystemProbe {
    fn state(&self, dir: &Path) -> StorageState {
        match std::fs::metadata(dir) {
            Ok(meta) if !meta.is_dir() => StorageState::Unmounted,
            Ok(meta) if meta.permissions().readonly() => StorageState::MountedReadOnly,
            Ok(_) => StorageState::Mounted,
            Err(err) => {
                log::debug!("cannot stat {}: {}", dir.display(), err);
                StorageState::Unmounted
            }
        }
    }
}

/// A fixed state, for hosts that report storage state themselves
impl StorageProbe for StorageState {
    fn state(&self, _dir: &Path) -> StorageState {
        *self
    }
}
