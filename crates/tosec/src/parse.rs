//! Filename parsing for the `Title (Year)(Publisher)...` convention.

use crate::consts;
use crate::models::{Category, ParsedFilename};
use tracing::trace;

/// Year placeholder for filenames that don't follow the grammar.
pub const UNKNOWN_YEAR: &str = "unknown";

/// Parses a TOSEC filename into its title, year(s), publisher and category.
///
/// The extension may still be attached. Never fails: a filename that doesn't
/// match the grammar comes back with `is_recognized == false`, its title set
/// to the filename without extension, and no years.
///
/// ```
/// use zxorg_tosec::{models::Category, parse};
///
/// let parsed = parse("Springelr (1988-2025)(Microbyte).tap");
/// assert_eq!(parsed.title, "Springelr");
/// assert_eq!(parsed.years, vec![1988, 2025]);
/// assert_eq!(parsed.category, Category::Both);
///
/// let parsed = parse("readme.txt");
/// assert!(!parsed.is_recognized);
/// assert_eq!(parsed.title, "readme");
/// ```
pub fn parse(filename: &str) -> ParsedFilename {
    let Some(captures) = consts::TOSEC_REGEX.captures(filename) else {
        trace!(filename, "filename does not follow the TOSEC grammar");
        return unrecognized(filename);
    };
    let capture = |name: &str| captures.name(name).map(|m| m.as_str()).unwrap_or_default();
    let year_raw = capture("year");
    let years = years(year_raw);
    ParsedFilename {
        title: capture("title").trim().to_string(),
        year_raw: year_raw.to_string(),
        category: Category::from_years(&years),
        years,
        publisher: Some(capture("publisher").trim().to_string()),
        is_recognized: true,
    }
}

/// Splits a year block into its boundary years. Wildcards (`19xx`, `20xx`)
/// carry no usable year.
fn years(year_raw: &str) -> Vec<u16> {
    if year_raw.to_lowercase().contains("xx") {
        return Vec::new();
    }
    year_raw
        .split('-')
        .map(|part| part.trim().parse::<u16>())
        .collect::<Result<Vec<_>, _>>()
        // Unreachable with the current grammar (4 digits only), but a year
        // that fails to parse means "no year", not a failure.
        .unwrap_or_default()
}

fn unrecognized(filename: &str) -> ParsedFilename {
    ParsedFilename {
        title: strip_extension(filename).to_string(),
        year_raw: UNKNOWN_YEAR.to_string(),
        years: Vec::new(),
        publisher: None,
        category: Category::Unknown,
        is_recognized: false,
    }
}

/// Removes the last `.ext` from a filename. Leading dots (hidden files) are not
/// treated as an extension separator, so `.profile` stays as-is.
pub(crate) fn strip_extension(filename: &str) -> &str {
    let leading = filename.len() - filename.trim_start_matches('.').len();
    match filename[leading..].rfind('.') {
        Some(index) => &filename[..leading + index],
        None => filename,
    }
}
