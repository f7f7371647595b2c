//! Per-game folders.
//!
//! Matching is exact on purpose: `ELITE` and `ELITE II` are different games
//! and must never share a folder.

use crate::range::is_range_folder;
use std::path::Path;
use tracing::{debug, instrument};
use zxorg_storage::StorageBackend;
use zxorg_storage::error::Result as StorageResult;
use zxorg_tosec::canonical_game_folder;

const DECORATIONS: [(char, char); 3] = [('[', ']'), ('(', ')'), ('{', '}')];

/// Strip surrounding whitespace and one pair of surrounding brackets.
///
/// ```
/// use zxorg_library::game::strip_decoration;
/// assert_eq!(strip_decoration(" [Elite] "), "Elite");
/// assert_eq!(strip_decoration("(Saga 2)"), "Saga 2");
/// assert_eq!(strip_decoration("[Elite)"), "[Elite)");
/// ```
pub fn strip_decoration(name: &str) -> &str {
    let name = name.trim();
    DECORATIONS
        .iter()
        .find_map(|(open, close)| name.strip_prefix(*open)?.strip_suffix(*close))
        .map(str::trim)
        .unwrap_or(name)
}

/// Choose the existing game folder for `title` from a directory's child names.
///
/// Range folders are never game folders. A folder matches when its undecorated,
/// upper-cased name equals the canonical folder name built from the title.
pub fn select_game_folder<S: AsRef<str>>(names: &[S], title: &str) -> Option<String> {
    let wanted = canonical_game_folder(title);
    if wanted.is_empty() {
        return None;
    }
    names
        .iter()
        .map(AsRef::as_ref)
        .filter(|name| !is_range_folder(name))
        .find(|name| strip_decoration(name).to_uppercase() == wanted)
        .map(str::to_string)
}

/// Resolve the existing game folder for `title` among the sub-folders of `dir`.
///
/// Returns the folder's real name as found on disk.
#[instrument(skip_all, fields(backend = backend.name(), dir = %dir.display(), title))]
pub fn resolve_game_folder(backend: &dyn StorageBackend, dir: &Path, title: &str) -> StorageResult<Option<String>> {
    let names = backend.subdirectories(dir)?;
    let game = select_game_folder(&names, title);
    debug!(game = game.as_deref(), "resolved game folder");
    Ok(game)
}
