//! Local filesystem storage backend.
//!
//! This module provides a read-only storage backend for a collection living in
//! a directory on the local filesystem, accessed with `std::fs`.

use crate::error::ErrorKind;
use crate::models::Entry;
use crate::path::validate_or_root;
use crate::{StorageBackend, error::Result};
use std::fs::{self, DirEntry};
use std::path::{Path, PathBuf};
use tracing::{instrument, trace};

/// Local filesystem storage backend.
///
/// Lists directories beneath a configured root. All paths are relative to the
/// root directory; an empty path lists the root itself.
///
/// # Examples
///
/// ```no_run
/// use zxorg_storage::backend::LocalBackend;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let backend = LocalBackend::new("FE", "/srv/zx/TOSEC FULL EDITION")?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct LocalBackend {
    name: String,
    /// Root directory of the collection
    root: PathBuf,
}
impl LocalBackend {
    /// Create a new local filesystem backend.
    ///
    /// # Arguments
    /// * `root` - Absolute path to the collection root directory
    ///
    /// # Errors
    ///
    /// Returns [`InvalidPath`](ErrorKind::InvalidPath) if the path is not
    /// absolute, [`NotFound`](ErrorKind::NotFound) if it doesn't exist and
    /// [`NotADirectory`](ErrorKind::NotADirectory) if it isn't a directory.
    /// The root is never created: this backend doesn't write.
    pub fn new(name: impl Into<String>, root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        if !root.is_absolute() {
            exn::bail!(ErrorKind::InvalidPath(root));
        }
        let metadata = fs::metadata(&root).map_err(|e| Self::map_io_error(e, &root))?;
        if !metadata.is_dir() {
            exn::bail!(ErrorKind::NotADirectory(root));
        }
        Ok(Self { name: name.into(), root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Get the absolute path for a relative storage path.
    ///
    /// Validates the path and joins it with the root directory.
    fn absolute_path(&self, path: impl AsRef<Path>) -> Result<PathBuf> {
        let validated = validate_or_root(path.as_ref())?;
        Ok(self.root.join(validated))
    }

    fn map_io_error(e: std::io::Error, path: &Path) -> ErrorKind {
        match e.kind() {
            std::io::ErrorKind::NotFound => ErrorKind::NotFound(path.to_path_buf()),
            std::io::ErrorKind::PermissionDenied => ErrorKind::PermissionDenied(path.to_path_buf()),
            std::io::ErrorKind::NotADirectory => ErrorKind::NotADirectory(path.to_path_buf()),
            _ => ErrorKind::Io(e),
        }
    }

    /// Turn a raw directory entry into an [`Entry`], following symlinks but
    /// remembering that it was one. Returns `None` for anything that can't be
    /// named or classified.
    fn process_entry(entry: DirEntry) -> Option<Entry> {
        let path = entry.path();
        let Ok(name) = entry.file_name().into_string() else {
            trace!(path = %path.display(), "skipping entry with non UTF-8 name");
            return None;
        };
        let symlink = entry.file_type().is_ok_and(|file_type| file_type.is_symlink());
        // Note: fs::metadata follows symlinks, a broken one fails here.
        let metadata = match fs::metadata(&path) {
            Ok(metadata) => metadata,
            Err(e) => {
                trace!(path = %path.display(), error = %e, "skipping unreadable entry");
                return None;
            },
        };
        let entry = match (metadata.is_dir(), metadata.is_file()) {
            (true, _) => Entry::directory(name),
            (_, true) => Entry::file(name, metadata.len()),
            _ => return None,
        };
        Some(entry.with_symlink(symlink))
    }
}

impl StorageBackend for LocalBackend {
    fn name(&self) -> &str {
        &self.name
    }

    #[instrument(skip_all, fields(backend = %self.name, path = %path.display()))]
    fn list_dir(&self, path: &Path) -> Result<Vec<Entry>> {
        let absolute = self.absolute_path(path)?;
        let reader = fs::read_dir(&absolute).map_err(|e| Self::map_io_error(e, path))?;
        let mut entries = Vec::new();
        for entry in reader {
            let entry = entry.map_err(|e| Self::map_io_error(e, path))?;
            if let Some(entry) = Self::process_entry(entry) {
                entries.push(entry);
            }
        }
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        trace!(count = entries.len(), "listed directory");
        Ok(entries)
    }

    fn exists(&self, path: &Path) -> Result<bool> {
        let absolute = self.absolute_path(path)?;
        absolute.try_exists().map_err(|e| Self::map_io_error(e, path).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{File, create_dir_all};
    use std::io::Write;

    fn touch(root: &Path, relative: &str, data: &[u8]) {
        let path = root.join(relative);
        create_dir_all(path.parent().unwrap()).unwrap();
        File::create(path).unwrap().write_all(data).unwrap();
    }

    #[test]
    fn test_new_requires_absolute_path() {
        let result = LocalBackend::new("name", "relative/path");
        assert!(matches!(&*result.unwrap_err(), ErrorKind::InvalidPath(_)));
    }

    #[test]
    fn test_new_does_not_create_root() {
        let temp_dir = tempfile::tempdir().unwrap();
        let missing = temp_dir.path().join("missing");
        let result = LocalBackend::new("name", &missing);
        assert!(matches!(&*result.unwrap_err(), ErrorKind::NotFound(_)));
        assert!(!missing.exists());
    }

    #[test]
    fn test_new_rejects_file_root() {
        let temp_dir = tempfile::tempdir().unwrap();
        touch(temp_dir.path(), "file.tap", b"data");
        let result = LocalBackend::new("name", temp_dir.path().join("file.tap"));
        assert!(matches!(&*result.unwrap_err(), ErrorKind::NotADirectory(_)));
    }

    #[test]
    fn test_list_root() {
        let temp_dir = tempfile::tempdir().unwrap();
        touch(temp_dir.path(), "b.tap", b"12345");
        touch(temp_dir.path(), "A - C/x.tap", b"");
        let backend = LocalBackend::new("name", temp_dir.path()).unwrap();
        let entries = backend.list_dir(Path::new("")).unwrap();
        assert_eq!(entries, vec![Entry::directory("A - C"), Entry::file("b.tap", 5)]);
    }

    #[test]
    fn test_list_is_sorted() {
        let temp_dir = tempfile::tempdir().unwrap();
        for name in ["FRUIT - FY-FY", "FERRO - FLIPI", "FRA - FROZE", "FLIPP - FP"] {
            create_dir_all(temp_dir.path().join("F").join(name)).unwrap();
        }
        let backend = LocalBackend::new("name", temp_dir.path()).unwrap();
        let names = backend.subdirectories(Path::new("F")).unwrap();
        assert_eq!(names, vec!["FERRO - FLIPI", "FLIPP - FP", "FRA - FROZE", "FRUIT - FY-FY"]);
    }

    #[test]
    fn test_files_and_subdirectories() {
        let temp_dir = tempfile::tempdir().unwrap();
        touch(temp_dir.path(), "F/Frogger (1983)(A'n'F).tap", b"abc");
        create_dir_all(temp_dir.path().join("F/FROGGER")).unwrap();
        let backend = LocalBackend::new("name", temp_dir.path()).unwrap();
        assert_eq!(backend.subdirectories(Path::new("F")).unwrap(), vec!["FROGGER"]);
        let files = backend.files(Path::new("F")).unwrap();
        assert_eq!(files, vec![Entry::file("Frogger (1983)(A'n'F).tap", 3)]);
    }

    #[test]
    fn test_list_missing_directory() {
        let temp_dir = tempfile::tempdir().unwrap();
        let backend = LocalBackend::new("name", temp_dir.path()).unwrap();
        let err = backend.list_dir(Path::new("nonexistent")).unwrap_err();
        assert!(matches!(&*err, ErrorKind::NotFound(_)));
    }

    #[test]
    fn test_list_file_is_not_a_directory() {
        let temp_dir = tempfile::tempdir().unwrap();
        touch(temp_dir.path(), "file.tap", b"data");
        let backend = LocalBackend::new("name", temp_dir.path()).unwrap();
        let err = backend.list_dir(Path::new("file.tap")).unwrap_err();
        assert!(matches!(&*err, ErrorKind::NotADirectory(_)));
    }

    #[cfg(unix)]
    #[test]
    fn test_broken_symlink_is_skipped() {
        let temp_dir = tempfile::tempdir().unwrap();
        touch(temp_dir.path(), "real.tap", b"data");
        std::os::unix::fs::symlink(temp_dir.path().join("gone"), temp_dir.path().join("dangling")).unwrap();
        let backend = LocalBackend::new("name", temp_dir.path()).unwrap();
        let entries = backend.list_dir(Path::new("")).unwrap();
        assert_eq!(entries, vec![Entry::file("real.tap", 4)]);
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinks_are_followed_and_flagged() {
        let temp_dir = tempfile::tempdir().unwrap();
        touch(temp_dir.path(), "F/real.tap", b"data");
        std::os::unix::fs::symlink(temp_dir.path(), temp_dir.path().join("F/loop")).unwrap();
        std::os::unix::fs::symlink(temp_dir.path().join("F/real.tap"), temp_dir.path().join("F/alias.tap")).unwrap();
        let backend = LocalBackend::new("name", temp_dir.path()).unwrap();
        let entries = backend.list_dir(Path::new("F")).unwrap();
        assert_eq!(
            entries,
            vec![
                Entry::file("alias.tap", 4).with_symlink(true),
                Entry::directory("loop").with_symlink(true),
                Entry::file("real.tap", 4),
            ]
        );
        assert_eq!(backend.subdirectories(Path::new("F")).unwrap(), vec!["loop"]);
    }

    #[test]
    fn test_exists() {
        let temp_dir = tempfile::tempdir().unwrap();
        touch(temp_dir.path(), "F/TAPs/file.tap", b"data");
        let backend = LocalBackend::new("name", temp_dir.path()).unwrap();
        assert!(backend.exists(Path::new("F/TAPs")).unwrap());
        assert!(backend.exists(Path::new("F/TAPs/file.tap")).unwrap());
        assert!(!backend.exists(Path::new("G")).unwrap());
    }

    #[test]
    fn test_path_security() {
        let temp_dir = tempfile::tempdir().unwrap();
        let backend = LocalBackend::new("name", temp_dir.path()).unwrap();
        // Attempts to escape the root should fail
        assert!(backend.list_dir(Path::new("../etc")).is_err());
        assert!(backend.list_dir(Path::new("etc/../../passwd")).is_err());
        assert!(backend.exists(Path::new("../../file")).is_err());
    }
}
