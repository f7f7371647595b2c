//! Path validation.
//!
//! Every path handed to a backend is relative to a collection root. Titles and
//! filenames end up as path components, so a hostile or sloppy name must never
//! be able to point a lookup outside the collection.

use std::path::{Component, Path, PathBuf};

use crate::error::{ErrorKind, Result};

/// Resolve a path relative to a collection root.
///
/// `.` segments, repeated separators and a leading `/` are dropped, and `..`
/// steps back one folder. The result must name something below the root.
///
/// > **Note:** This does **not** normalize backslashes, non-UTF8 bytes, or
/// >           platform-specific weirdness. Null bytes are explicitly rejected.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use zxorg_storage::validate_path;
/// assert!(validate_path("00 CARPETAS/F/FRUIT - FY-FY").is_ok());
/// assert!(validate_path("01 AÑOS/1982-1993 CLASICOS/1984").is_ok());
/// assert!(validate_path("../etc/passwd").is_err());
/// assert!(validate_path("a\0b").is_err());
/// assert!(validate_path(".").is_err());
/// assert_eq!(
///     validate_path("wrong/../F/./FERRO - FLIPI//").unwrap(),
///     Path::new("F/FERRO - FLIPI")
/// );
/// ```
pub fn validate(path: impl AsRef<Path>) -> Result<PathBuf> {
    let path = path.as_ref();
    let resolved = resolve(path)?;
    match resolved.as_os_str().is_empty() {
        true => exn::bail!(ErrorKind::InvalidPath(path.to_path_buf())),
        false => Ok(resolved),
    }
}

/// Check a path built from titles and filenames.
///
/// Unlike [`validate`] nothing is resolved away: every component must already
/// be a plain name, so a filename of `..` or `.` is rejected instead of
/// silently moving the destination.
///
/// ```
/// use zxorg_storage::validate_plain_path;
/// assert!(validate_plain_path("02 CLASICOS/ALFABETO CLASICOS/E/TAPs/Elite (1985)(Firebird).tap").is_ok());
/// assert!(validate_plain_path("00 CARPETAS/E/ELITE/..").is_err());
/// assert!(validate_plain_path("00 CARPETAS/./E").is_err());
/// ```
pub fn validate_plain(path: impl AsRef<Path>) -> Result<PathBuf> {
    let path = path.as_ref();
    if !path.components().all(|component| matches!(component, Component::Normal(_))) {
        exn::bail!(ErrorKind::InvalidPath(path.to_path_buf()));
    }
    validate(path)
}

/// Like [`validate`], but a path that resolves to nothing is the root itself.
pub(crate) fn validate_or_root(path: impl AsRef<Path>) -> Result<PathBuf> {
    resolve(path.as_ref())
}

fn resolve(path: &Path) -> Result<PathBuf> {
    let invalid = || ErrorKind::InvalidPath(path.to_path_buf());
    let mut resolved = PathBuf::new();
    for component in path.components() {
        match component {
            // Null bytes survive Path::components() on Unix but truncate C strings.
            Component::Normal(segment) if segment.as_encoded_bytes().contains(&0) => exn::bail!(invalid()),
            Component::Normal(segment) => resolved.push(segment),
            Component::CurDir | Component::RootDir => {},
            Component::ParentDir if resolved.pop() => {},
            Component::ParentDir | Component::Prefix(_) => exn::bail!(invalid()),
        }
    }
    Ok(resolved)
}
