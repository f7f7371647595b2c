//! Storage models.

/// What kind of filesystem node a listed [`Entry`] is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    Directory,
    File,
}

/// An immediate child of a listed directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Name of the child (a single path component).
    pub name: String,
    pub kind: EntryKind,
    /// Size in bytes; always zero for directories.
    pub size: u64,
    /// Reached through a symbolic link. `kind` and `size` describe the target.
    pub symlink: bool,
}
impl Entry {
    pub fn directory(name: impl Into<String>) -> Self {
        Self { name: name.into(), kind: EntryKind::Directory, size: 0, symlink: false }
    }

    pub fn file(name: impl Into<String>, size: u64) -> Self {
        Self { name: name.into(), kind: EntryKind::File, size, symlink: false }
    }

    pub fn with_symlink(mut self, symlink: bool) -> Self {
        self.symlink = symlink;
        self
    }

    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }

    pub fn is_file(&self) -> bool {
        self.kind == EntryKind::File
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind() {
        assert!(Entry::directory("A - B").is_dir());
        assert!(Entry::file("a.tap", 3).is_file());
        assert_eq!(Entry::directory("A").size, 0);
        assert!(!Entry::directory("A").symlink);
        assert!(Entry::directory("A").with_symlink(true).is_dir());
    }
}
