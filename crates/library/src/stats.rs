//! Collection statistics.

use crate::error::{ErrorKind, Result};
use exn::ResultExt;
use std::collections::BTreeMap;
use std::path::PathBuf;
use tracing::{debug, instrument, warn};
use zxorg_config::{FormatTable, extension_of};
use zxorg_storage::StorageBackend;
use zxorg_tosec::{decade_bucket, parse};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CollectionStats {
    /// Files with a processable or generic extension.
    pub displayable: usize,
    /// Files with a processable extension.
    pub processable: usize,
    /// Processable files per display label.
    pub by_label: BTreeMap<String, usize>,
    /// Processable files per decade of their first year. Undated files
    /// aren't counted.
    pub by_decade: BTreeMap<String, usize>,
}
impl CollectionStats {
    fn record(&mut self, formats: &FormatTable, filename: &str) {
        let extension = extension_of(filename);
        if formats.is_displayable(&extension) {
            self.displayable += 1;
        }
        if !formats.is_processable(&extension) {
            return;
        }
        self.processable += 1;
        *self.by_label.entry(formats.label(&extension)).or_default() += 1;
        if let Some(year) = parse(filename).first_year() {
            *self.by_decade.entry(decade_bucket(year)).or_default() += 1;
        }
    }
}

/// Walk a whole collection tree and tally its files.
///
/// The root must be listable. Sub-directories that can't be listed are
/// skipped with a warning. Symlinked directories are never descended into,
/// so a link back up the tree can't make the walk loop.
#[instrument(skip_all, fields(backend = backend.name()))]
pub fn collection_stats(backend: &dyn StorageBackend, formats: &FormatTable) -> Result<CollectionStats> {
    let mut stats = CollectionStats::default();
    let mut pending = vec![PathBuf::new()];
    while let Some(dir) = pending.pop() {
        let entries = match backend.list_dir(&dir) {
            Ok(entries) => entries,
            Err(err) if dir.as_os_str().is_empty() => return Err(err).or_raise(|| ErrorKind::Storage),
            Err(err) => {
                warn!(dir = %dir.display(), error = ?err, "skipping unreadable directory");
                continue;
            },
        };
        for entry in entries {
            match (entry.is_dir(), entry.symlink) {
                (true, false) => pending.push(dir.join(&entry.name)),
                (true, true) => debug!(dir = %dir.display(), link = %entry.name, "not descending into symlinked directory"),
                (false, _) => stats.record(formats, &entry.name),
            }
        }
    }
    debug!(displayable = stats.displayable, processable = stats.processable, "collected statistics");
    Ok(stats)
}
