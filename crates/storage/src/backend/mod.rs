//! Storage backend trait and implementations.
//!
//! This module defines the `StorageBackend` trait, which provides a read-only
//! view of a collection tree. Destination planning never writes: it only needs
//! to know which folders already exist and what files sit in them.
//!

mod local;
#[cfg(feature = "mock")]
mod mock;

pub use self::local::LocalBackend;
#[cfg(feature = "mock")]
pub use self::mock::MockBackend;
use crate::error::Result;
use crate::models::Entry;
use std::path::Path;

/// Unified interface for collection storage.
///
/// Every method is synchronous; a lookup is a single directory listing and the
/// planner runs one suggestion at a time.
///
/// # Path Handling
/// All paths are relative to the collection root and must be validated using
/// [`validate_path`](crate::validate_path) before use. Implementations should
/// enforce this validation. An empty path refers to the root itself.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use zxorg_storage::{backend::StorageBackend, error::Result};
///
/// fn count_range_folders(backend: &dyn StorageBackend) -> Result<usize> {
///     let letter = Path::new("02 CLASICOS/ALFABETO CLASICOS/F/TAPs");
///     if !backend.exists(letter)? {
///         return Ok(0);
///     }
///     Ok(backend.subdirectories(letter)?.iter().filter(|name| name.contains(" - ")).count())
/// }
/// ```
pub trait StorageBackend: Send + Sync {
    /// Name of the configured backend (usually the collection it serves).
    /// Used for logging only.
    fn name(&self) -> &str;

    /// List the direct children of a directory, sorted by name.
    ///
    /// Returns [`NotFound`](crate::error::ErrorKind::NotFound) if the
    /// directory does not exist, [`NotADirectory`](crate::error::ErrorKind::NotADirectory)
    /// if the path is a file, and [`PermissionDenied`](crate::error::ErrorKind::PermissionDenied)
    /// if it cannot be read.
    fn list_dir(&self, path: &Path) -> Result<Vec<Entry>>;

    /// Check if a file or directory exists.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use std::path::Path;
    /// # use zxorg_storage::{backend::StorageBackend, error::Result};
    /// # fn example(backend: &dyn StorageBackend) -> Result<()> {
    /// if backend.exists(Path::new("00 CARPETAS/F"))? {
    ///     println!("Letter folder exists!");
    /// }
    /// # Ok(())
    /// # }
    /// ```
    fn exists(&self, path: &Path) -> Result<bool>;

    /// Names of the direct subdirectories of `path`, sorted.
    ///
    /// Default implementation filters [`list_dir()`](Self::list_dir).
    fn subdirectories(&self, path: &Path) -> Result<Vec<String>> {
        Ok(self.list_dir(path)?.into_iter().filter(Entry::is_dir).map(|entry| entry.name).collect())
    }

    /// Direct file entries of `path`, sorted by name.
    ///
    /// Default implementation filters [`list_dir()`](Self::list_dir).
    fn files(&self, path: &Path) -> Result<Vec<Entry>> {
        Ok(self.list_dir(path)?.into_iter().filter(Entry::is_file).collect())
    }
}
