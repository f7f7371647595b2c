//! Canonical naming for per-game folders.

use crate::consts;

/// Derives the folder name a title is filed under when no folder exists yet.
///
/// 1. Strips a trailing version marker (`v1`, `v2.3`, `v1.0 beta`).
/// 2. Then strips a trailing part/episode marker (`- Part 2`, `Episode 3`).
/// 3. Replaces characters that are illegal in filenames with `_`.
/// 4. Upper-cases the result.
///
/// A bare trailing number is a sequel, not a marker, and is kept.
///
/// ```
/// use zxorg_tosec::canonical_game_folder;
/// assert_eq!(canonical_game_folder("Elite v2.1"), "ELITE");
/// assert_eq!(canonical_game_folder("Saga 2"), "SAGA 2");
/// assert_eq!(canonical_game_folder("Dizzy - Part 3"), "DIZZY");
/// ```
pub fn canonical_game_folder(title: &str) -> String {
    let without_version = consts::VERSION_MARKER_REGEX.replace(title.trim(), "");
    let without_part = consts::PART_MARKER_REGEX.replace(without_version.trim(), "");
    consts::ILLEGAL_CHARS_REGEX.replace_all(without_part.trim(), "_").to_uppercase()
}
