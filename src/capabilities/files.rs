/// File I/O
/// Byte and text reads/writes, scoped to one directory like the fs plugin

use std::fs;
use std::path::{Component, Path, PathBuf};

use crate::error::CapabilityError;

pub trait FileStore {
    fn read_file(&self, path: &Path) -> Result<Vec<u8>, CapabilityError>;

    fn write_file(&self, path: &Path, contents: &[u8]) -> Result<(), CapabilityError>;

    fn read_text_file(&self, path: &Path) -> Result<String, CapabilityError>;

    fn write_text_file(&self, path: &Path, contents: &str) -> Result<(), CapabilityError>;
}

/// Files under a root directory; relative paths only, no escaping via `..`
pub struct ScopedFileStore {
    root: PathBuf,
}

impl ScopedFileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Map a relative path into the root, lexically
    pub fn resolve(&self, path: &Path) -> Result<PathBuf, CapabilityError> {
        let mut parts: Vec<&std::ffi::OsStr> = Vec::new();
        for component in path.components() {
            match component {
                Component::Normal(part) => parts.push(part),
                Component::CurDir => {}
                Component::ParentDir => {
                    if parts.pop().is_none() {
                        return Err(CapabilityError::OutsideScope(path.to_path_buf()));
                    }
                }
                Component::RootDir | Component::Prefix(_) => {
                    return Err(CapabilityError::OutsideScope(path.to_path_buf()));
                }
            }
        }

        if parts.is_empty() {
            return Err(CapabilityError::OutsideScope(path.to_path_buf()));
        }

        let mut resolved = self.root.clone();
        resolved.extend(parts);
        Ok(resolved)
    }

    fn prepare_write(&self, path: &Path) -> Result<PathBuf, CapabilityError> {
        let target = self.resolve(path)?;
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        Ok(target)
    }
}

impl FileStore for ScopedFileStore {
    fn read_file(&self, path: &Path) -> Result<Vec<u8>, CapabilityError> {
        Ok(fs::read(self.resolve(path)?)?)
    }

    fn write_file(&self, path: &Path, contents: &[u8]) -> Result<(), CapabilityError> {
        let target = self.prepare_write(path)?;
        fs::write(&target, contents)?;
        log::debug!("[Files] wrote {} bytes to {}", contents.len(), target.display());
        Ok(())
    }

    fn read_text_file(&self, path: &Path) -> Result<String, CapabilityError> {
        Ok(fs::read_to_string(self.resolve(path)?)?)
    }

    fn write_text_file(&self, path: &Path, contents: &str) -> Result<(), CapabilityError> {
        self.write_file(path, contents.as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_round_trip_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let store = ScopedFileStore::new(dir.path());

        store
            .write_text_file(Path::new("notes/today.txt"), "hello")
            .unwrap();

        assert_eq!(
            store.read_text_file(Path::new("notes/today.txt")).unwrap(),
            "hello"
        );
        assert!(dir.path().join("notes").is_dir());
    }

    #[test]
    fn bytes_are_written_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let store = ScopedFileStore::new(dir.path());

        store.write_file(Path::new("blob.bin"), &[0, 159, 255]).unwrap();

        assert_eq!(store.read_file(Path::new("blob.bin")).unwrap(), vec![0, 159, 255]);
    }

    #[test]
    fn parent_dir_inside_scope_is_allowed() {
        let store = ScopedFileStore::new("/data");

        let resolved = store.resolve(Path::new("a/../b.txt")).unwrap();

        assert_eq!(resolved, PathBuf::from("/data/b.txt"));
    }

    #[test]
    fn escaping_the_root_is_rejected() {
        let store = ScopedFileStore::new("/data");

        let err = store.resolve(Path::new("../secret")).unwrap_err();
        assert!(matches!(err, CapabilityError::OutsideScope(_)));

        let err = store.resolve(Path::new("/etc/passwd")).unwrap_err();
        assert!(matches!(err, CapabilityError::OutsideScope(_)));
    }

    #[test]
    fn root_itself_is_not_a_file() {
        let store = ScopedFileStore::new("/data");
        assert!(store.resolve(Path::new(".")).is_err());
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = ScopedFileStore::new(dir.path());

        let err = store.read_text_file(Path::new("nope.txt")).unwrap_err();

        assert!(matches!(err, CapabilityError::Io(_)));
    }
}
