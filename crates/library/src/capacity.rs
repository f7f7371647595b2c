//! Folder fill levels for the segmented collection.

use crate::collection::Collection;
use crate::error::{ErrorKind, Result};
use exn::ResultExt;
use std::path::Path;
use tracing::instrument;
use zxorg_config::{CapacityLimits, FormatTable};
use zxorg_storage::StorageBackend;

/// How close a folder is to the per-folder file cap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum FolderCapacity {
    Ok,
    NearLimit,
    AtLimit,
}
impl FolderCapacity {
    /// Classify a direct-file count against the thresholds.
    ///
    /// ```
    /// use zxorg_config::CapacityLimits;
    /// use zxorg_library::FolderCapacity;
    /// let limits = CapacityLimits::default();
    /// assert_eq!(FolderCapacity::of(199, &limits), FolderCapacity::Ok);
    /// assert_eq!(FolderCapacity::of(200, &limits), FolderCapacity::NearLimit);
    /// assert_eq!(FolderCapacity::of(230, &limits), FolderCapacity::AtLimit);
    /// ```
    pub fn of(count: usize, limits: &CapacityLimits) -> Self {
        if count >= limits.at_limit {
            Self::AtLimit
        } else if count >= limits.near_limit {
            Self::NearLimit
        } else {
            Self::Ok
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FolderUsage {
    /// Displayable files directly inside the folder.
    pub files: usize,
    pub capacity: FolderCapacity,
}

/// Count the displayable files directly inside `dir` and classify the count.
/// Full-edition folders are never capped.
#[instrument(skip_all, fields(%collection, dir = %dir.display()))]
pub fn folder_capacity(
    backend: &dyn StorageBackend,
    formats: &FormatTable,
    limits: &CapacityLimits,
    collection: Collection,
    dir: &Path,
) -> Result<FolderUsage> {
    let files = backend
        .files(dir)
        .or_raise(|| ErrorKind::Storage)?
        .iter()
        .filter(|entry| formats.is_displayable(&zxorg_config::extension_of(&entry.name)))
        .count();
    let capacity = match collection.is_capped() {
        true => FolderCapacity::of(files, limits),
        false => FolderCapacity::Ok,
    };
    Ok(FolderUsage { files, capacity })
}
