//! Staging folder scan.
//!
//! New files are dropped into a flat staging folder. Each displayable file is
//! listed with its classification; processable files also get parsed and a
//! destination plan.

use crate::destination::{DestinationBuilder, DestinationSuggestion};
use crate::error::{ErrorKind, Result};
use exn::ResultExt;
use std::path::Path;
use tracing::{debug, instrument};
use zxorg_config::extension_of;
use zxorg_storage::StorageBackend;
use zxorg_tosec::models::ParsedFilename;
use zxorg_tosec::parse;

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StagedFile {
    pub name: String,
    /// Normalized extension, without the dot.
    pub extension: String,
    pub label: String,
    pub size: u64,
    pub is_processable: bool,
    pub is_generic: bool,
    pub is_archive: bool,
    /// Only present for processable files.
    pub parsed: Option<ParsedFilename>,
    /// Empty for files that aren't processable.
    pub suggestion: DestinationSuggestion,
}

/// List the displayable files directly inside the staging folder, by name.
///
/// `staging` is a backend rooted at the staging folder itself.
#[instrument(skip_all, fields(backend = staging.name()))]
pub fn scan_staging(staging: &dyn StorageBackend, builder: &DestinationBuilder) -> Result<Vec<StagedFile>> {
    let formats = &builder.config().formats;
    let entries = staging.files(Path::new("")).or_raise(|| ErrorKind::Storage)?;
    let mut staged = Vec::with_capacity(entries.len());
    for entry in entries {
        let extension = extension_of(&entry.name);
        if !formats.is_displayable(&extension) {
            debug!(name = %entry.name, "ignoring file that isn't displayable");
            continue;
        }
        let is_processable = formats.is_processable(&extension);
        let (parsed, suggestion) = match is_processable {
            true => {
                let parsed = parse(&entry.name);
                let suggestion = builder.suggest(&parsed, &extension, &entry.name);
                (Some(parsed), suggestion)
            },
            false => (None, DestinationSuggestion::default()),
        };
        staged.push(StagedFile {
            label: formats.label(&extension),
            is_generic: formats.is_generic(&extension),
            is_archive: formats.is_archive(&extension),
            name: entry.name,
            size: entry.size,
            extension,
            is_processable,
            parsed,
            suggestion,
        });
    }
    Ok(staged)
}
