use super::{Category, Era};

/// Facts extracted from a single TOSEC-style filename.
///
/// Produced fresh by [`parse`](crate::parse) and never mutated afterwards; the
/// same filename always yields an identical value.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParsedFilename {
    /// Title, trimmed. For unrecognized filenames, the filename minus its extension.
    pub title: String,
    /// Year block exactly as written (`1985`, `1988-2025`, `19xx`), or `unknown`.
    pub year_raw: String,
    /// Zero, one or two years: the start and end of a year range.
    pub years: Vec<u16>,
    /// Publisher block, trimmed. `None` when the filename wasn't recognized.
    pub publisher: Option<String>,
    pub category: Category,
    /// Whether the filename followed the `Title (Year)(Publisher)` grammar.
    pub is_recognized: bool,
}
impl ParsedFilename {
    /// Years in order of appearance with repeats removed, so `1990-1990`
    /// only yields one entry.
    pub fn distinct_years(&self) -> Vec<u16> {
        let mut seen = Vec::with_capacity(self.years.len());
        for year in &self.years {
            if !seen.contains(year) {
                seen.push(*year);
            }
        }
        seen
    }

    /// First resolved year, used wherever a single year is needed.
    pub fn first_year(&self) -> Option<u16> {
        self.years.first().copied()
    }

    /// Whether any of the file's years falls inside the given era.
    pub fn has_era(&self, era: Era) -> bool {
        self.category.includes(era)
    }
}
