use crate::error::{Result, SyncError};
use std::fs;
use std::path::{Path, PathBuf};

#[cfg(test)]
pub mod memory;
#[cfg(test)]
pub use memory::MemoryStore;

/// File access used by the artifact updaters.
///
/// Paths are relative to the project root the store was opened on.
pub trait ArtifactStore {
    fn exists(&self, path: &Path) -> bool;

    fn read(&self, path: &Path) -> Result<String>;

    fn write(&self, path: &Path, content: &str) -> Result<()>;
}

/// Store backed by the real filesystem under a project directory.
pub struct DiskStore {
    root: PathBuf,
}

impl DiskStore {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        self.root.join(path)
    }
}

impl ArtifactStore for DiskStore {
    fn exists(&self, path: &Path) -> bool {
        self.resolve(path).is_file()
    }

    fn read(&self, path: &Path) -> Result<String> {
        fs::read_to_string(self.resolve(path)).map_err(|source| SyncError::ArtifactIo {
            path: path.to_path_buf(),
            source,
        })
    }

    fn write(&self, path: &Path, content: &str) -> Result<()> {
        let target = self.resolve(path);
        let io_error = |source: std::io::Error| SyncError::ArtifactIo {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).map_err(io_error)?;
        }
        fs::write(&target, content).map_err(io_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn disk_store_reads_and_writes_relative_to_root() {
        let dir = tempdir().unwrap();
        let store = DiskStore::new(dir.path());
        let path = Path::new("VERSION");

        assert!(!store.exists(path));
        store.write(path, "1.0.0").unwrap();
        assert!(store.exists(path));
        assert_eq!(store.read(path).unwrap(), "1.0.0");
        assert_eq!(fs::read_to_string(dir.path().join("VERSION")).unwrap(), "1.0.0");
    }

    #[test]
    fn disk_store_creates_missing_parent_directories() {
        let dir = tempdir().unwrap();
        let store = DiskStore::new(dir.path());
        let path = Path::new("pkg/VERSION");

        store.write(path, "2.0.0").unwrap();

        assert_eq!(
            fs::read_to_string(dir.path().join("pkg/VERSION")).unwrap(),
            "2.0.0"
        );
    }

    #[test]
    fn disk_store_treats_directories_as_missing() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("docs")).unwrap();
        let store = DiskStore::new(dir.path());
        assert!(!store.exists(Path::new("docs")));
    }

    #[test]
    fn disk_store_reports_path_on_failure() {
        let dir = tempdir().unwrap();
        let store = DiskStore::new(dir.path());
        let err = store.read(Path::new("absent.md")).unwrap_err();
        assert!(matches!(err, SyncError::ArtifactIo { ref path, .. } if path == Path::new("absent.md")));
    }
}
