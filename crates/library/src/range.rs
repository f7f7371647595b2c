//! Alphabetic range folders.
//!
//! Large letter folders are split into sub-folders named after the first and
//! last title they hold, e.g. `FERRO - FLIPI`. Curators split and rename these
//! by hand, so the ranges of one directory rarely tile the alphabet: there are
//! gaps between one folder's end and the next folder's start. A title that
//! lands in a gap goes to whichever neighbour's boundary it shares the longer
//! prefix with.

use crate::consts::RANGE_FOLDER_REGEX;
use std::path::Path;
use tracing::{debug, instrument};
use zxorg_storage::StorageBackend;
use zxorg_storage::error::Result as StorageResult;

/// Boundary keys of a range folder, upper-cased.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RangeToken {
    pub start_key: String,
    pub end_key: String,
}
impl RangeToken {
    /// Parse a folder name of the exact form `START - END`.
    ///
    /// ```
    /// use zxorg_library::range::RangeToken;
    /// let token = RangeToken::from_folder_name("fruit - fy-fy").unwrap();
    /// assert_eq!(token.start_key, "FRUIT");
    /// assert_eq!(token.end_key, "FY-FY");
    /// assert!(RangeToken::from_folder_name("QUIVIRA - THE ADVENTURE").is_none());
    /// ```
    pub fn from_folder_name(name: &str) -> Option<Self> {
        let captures = RANGE_FOLDER_REGEX.captures(name)?;
        Some(Self {
            start_key: captures["start"].to_uppercase(),
            end_key: captures["end"].to_uppercase(),
        })
    }
}

/// Whether a folder name follows the range grammar.
pub fn is_range_folder(name: &str) -> bool {
    RANGE_FOLDER_REGEX.is_match(name)
}

/// Longest common prefix of two strings, compared character by character.
pub fn longest_common_prefix<'a>(a: &'a str, b: &str) -> &'a str {
    let len: usize = a.chars().zip(b.chars()).take_while(|(x, y)| x == y).map(|(x, _)| x.len_utf8()).sum();
    &a[..len]
}

/// Choose the range folder a title belongs to from a directory's child names.
///
/// Names that aren't range folders are ignored. Returns `None` when no range
/// folders remain. When two folders share a start key, the one whose name
/// sorts first wins and the other is never chosen.
pub fn select_range<S: AsRef<str>>(names: &[S], title: &str) -> Option<String> {
    let mut tokens: Vec<(RangeToken, &str)> = names
        .iter()
        .map(AsRef::as_ref)
        .filter_map(|name| RangeToken::from_folder_name(name).map(|token| (token, name)))
        .collect();
    tokens.sort_by(|(a, a_name), (b, b_name)| a.start_key.cmp(&b.start_key).then_with(|| a_name.cmp(b_name)));
    tokens.dedup_by(|(later, _), (earlier, _)| later.start_key == earlier.start_key);

    let title = title.trim().to_uppercase();
    let (first, first_name) = tokens.first()?;
    if title < first.start_key {
        return Some(first_name.to_string());
    }
    for pair in tokens.windows(2) {
        let [(current, current_name), (next, next_name)] = pair else {
            continue;
        };
        if current.start_key <= title && title < next.start_key {
            if title <= current.end_key {
                return Some(current_name.to_string());
            }
            // The title sits in the gap between two folders.
            let towards_current = longest_common_prefix(&title, &current.end_key).chars().count();
            let towards_next = longest_common_prefix(&title, &next.start_key).chars().count();
            debug!(title = %title, current = current_name, next = next_name, towards_current, towards_next, "title between ranges");
            return match towards_next > towards_current {
                true => Some(next_name.to_string()),
                false => Some(current_name.to_string()),
            };
        }
    }
    tokens.last().map(|(_, name)| name.to_string())
}

/// Resolve the range folder for `title` among the sub-folders of `dir`.
///
/// `Ok(None)` means the directory exists but holds no range folders. A missing
/// or unreadable directory is reported as the backend's error.
#[instrument(skip_all, fields(backend = backend.name(), dir = %dir.display(), title))]
pub fn resolve_range(backend: &dyn StorageBackend, dir: &Path, title: &str) -> StorageResult<Option<String>> {
    let names = backend.subdirectories(dir)?;
    let range = select_range(&names, title);
    debug!(range = range.as_deref(), "resolved range folder");
    Ok(range)
}
