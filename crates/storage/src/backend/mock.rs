//! In-memory storage backend for testing.

use crate::error::{ErrorKind, Result};
use crate::models::Entry;
use crate::path::validate_or_root;
use crate::StorageBackend;
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Node {
    Directory,
    File(u64),
}

/// In-memory storage backend for testing.
///
/// The tree is fixed at construction, so all trait methods operate on `&self`
/// without locking. Parent directories of every registered path are implied.
/// Ideal for unit tests that need a [`StorageBackend`] without touching the
/// filesystem.
///
/// # Examples
///
/// ```
/// use zxorg_storage::backend::{MockBackend, StorageBackend};
/// use std::path::Path;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let backend = MockBackend::with_dirs(["F/TAPs/FRA - FROZE"])
///     .with_files([("F/TAPs/Frogger (1983)(A'n'F).tap", 1024)]);
/// assert!(backend.exists(Path::new("F/TAPs"))?);
/// assert_eq!(backend.subdirectories(Path::new("F/TAPs"))?, vec!["FRA - FROZE"]);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct MockBackend {
    name: String,
    nodes: BTreeMap<PathBuf, Node>,
    denied: BTreeSet<PathBuf>,
}

impl Default for MockBackend {
    fn default() -> Self {
        Self {
            name: "mock".to_string(),
            nodes: BTreeMap::new(),
            denied: BTreeSet::new(),
        }
    }
}

impl MockBackend {
    /// Create a mock backend pre-populated with (possibly nested) directories.
    ///
    /// Panics if any path fails validation (e.g. path traversal). If test
    /// setup is wrong, then test should not pass.
    pub fn with_dirs(dirs: impl IntoIterator<Item = impl Into<PathBuf>>) -> Self {
        Self::default().and_dirs(dirs)
    }

    /// Add more directories to an existing mock.
    pub fn and_dirs(mut self, dirs: impl IntoIterator<Item = impl Into<PathBuf>>) -> Self {
        for dir in dirs {
            let validated = Self::checked("and_dirs", dir.into());
            self.insert_ancestors(&validated);
            self.nodes.insert(validated, Node::Directory);
        }
        self
    }

    /// Add files with their sizes in bytes.
    pub fn with_files(mut self, files: impl IntoIterator<Item = (impl Into<PathBuf>, u64)>) -> Self {
        for (path, size) in files {
            let validated = Self::checked("with_files", path.into());
            self.insert_ancestors(&validated);
            self.nodes.insert(validated, Node::File(size));
        }
        self
    }

    /// Make listing this directory fail with
    /// [`PermissionDenied`](ErrorKind::PermissionDenied).
    pub fn with_denied(mut self, path: impl Into<PathBuf>) -> Self {
        let validated = Self::checked("with_denied", path.into());
        self.insert_ancestors(&validated);
        self.nodes.insert(validated.clone(), Node::Directory);
        self.denied.insert(validated);
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    fn checked(caller: &str, path: PathBuf) -> PathBuf {
        match validate_or_root(&path) {
            // The panic here is DELIBERATE. MockBackend is intended to be
            // used in tests; panics are expected. There is no error result.
            Ok(validated) if validated.as_os_str().is_empty() => {
                panic!("MockBackend::{caller}: the root can't be registered")
            },
            Ok(validated) => validated,
            Err(_) => panic!("MockBackend::{caller}: invalid path {}", path.display()),
        }
    }

    fn insert_ancestors(&mut self, path: &Path) {
        for ancestor in path.ancestors().skip(1) {
            if ancestor.as_os_str().is_empty() {
                break;
            }
            self.nodes.entry(ancestor.to_path_buf()).or_insert(Node::Directory);
        }
    }
}

impl StorageBackend for MockBackend {
    fn name(&self) -> &str {
        &self.name
    }

    fn list_dir(&self, path: &Path) -> Result<Vec<Entry>> {
        let validated = validate_or_root(path)?;
        if self.denied.contains(&validated) {
            exn::bail!(ErrorKind::PermissionDenied(path.to_path_buf()));
        }
        if !validated.as_os_str().is_empty() {
            match self.nodes.get(&validated) {
                None => exn::bail!(ErrorKind::NotFound(path.to_path_buf())),
                Some(Node::File(_)) => exn::bail!(ErrorKind::NotADirectory(path.to_path_buf())),
                Some(Node::Directory) => {},
            }
        }
        let mut entries: Vec<Entry> = self
            .nodes
            .iter()
            .filter(|(child, _)| child.parent() == Some(validated.as_path()))
            .filter_map(|(child, node)| {
                let name = child.file_name()?.to_str()?.to_string();
                Some(match node {
                    Node::Directory => Entry::directory(name),
                    Node::File(size) => Entry::file(name, *size),
                })
            })
            .collect();
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }

    fn exists(&self, path: &Path) -> Result<bool> {
        let validated = validate_or_root(path)?;
        Ok(validated.as_os_str().is_empty() || self.nodes.contains_key(&validated))
    }
}
