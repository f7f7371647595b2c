use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use super::{Era, sanitize};
use crate::error::{Error, ErrorKind};

/// Era classification of a whole file, which may carry up to two years.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Category {
    /// Every year falls within the classic era.
    Classic,
    /// Every year falls within the homebrew era.
    Homebrew,
    /// The years span both eras (e.g. a `1988-2025` re-release).
    Both,
    /// No usable year, or years outside both eras.
    #[default]
    Unknown,
}
impl Category {
    /// Classifies a set of years against the era table. Only the years given
    /// are checked; a two-year range is never expanded into its interior.
    ///
    /// ```
    /// use zxorg_tosec::models::Category;
    /// assert_eq!(Category::from_years(&[1988, 2025]), Category::Both);
    /// assert_eq!(Category::from_years(&[1985]), Category::Classic);
    /// assert_eq!(Category::from_years(&[]), Category::Unknown);
    /// ```
    pub fn from_years(years: &[u16]) -> Self {
        let classic = years.iter().any(|year| Era::Classic.contains(*year));
        let homebrew = years.iter().any(|year| Era::Homebrew.contains(*year));
        match (classic, homebrew) {
            (true, true) => Self::Both,
            (true, false) => Self::Classic,
            (false, true) => Self::Homebrew,
            (false, false) => Self::Unknown,
        }
    }

    /// Whether files of this category belong under the given era's axes.
    pub fn includes(&self, era: Era) -> bool {
        match self {
            Self::Both => true,
            Self::Classic => era == Era::Classic,
            Self::Homebrew => era == Era::Homebrew,
            Self::Unknown => false,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Classic => "classic",
            Self::Homebrew => "homebrew",
            Self::Both => "both",
            Self::Unknown => "unknown",
        }
    }
}
impl FromStr for Category {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match sanitize(s).as_str() {
            "classic" => Self::Classic,
            "homebrew" => Self::Homebrew,
            "both" => Self::Both,
            "unknown" => Self::Unknown,
            _ => exn::bail!(ErrorKind::ParseError {
                field: "category",
                value: s.to_string(),
            }),
        })
    }
}
impl Display for Category {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(&[1982], Category::Classic)]
    #[case(&[1993, 1990], Category::Classic)]
    #[case(&[2013], Category::Homebrew)]
    #[case(&[1988, 2025], Category::Both)]
    #[case(&[1975], Category::Unknown)]
    #[case(&[1975, 1990], Category::Classic)]
    #[case(&[2030], Category::Unknown)]
    fn test_from_years(#[case] years: &[u16], #[case] expected: Category) {
        assert_eq!(Category::from_years(years), expected);
    }

    #[test]
    fn test_range_is_not_expanded() {
        // Walking 1980..=1995 would hit classic years; the boundaries alone don't.
        assert_eq!(Category::from_years(&[1980, 1995]), Category::Homebrew);
    }

    #[test]
    fn test_includes() {
        assert!(Category::Both.includes(Era::Classic));
        assert!(Category::Both.includes(Era::Homebrew));
        assert!(Category::Classic.includes(Era::Classic));
        assert!(!Category::Classic.includes(Era::Homebrew));
        assert!(!Category::Unknown.includes(Era::Classic));
    }

    #[test]
    fn test_round_trip_display() {
        for category in [Category::Classic, Category::Homebrew, Category::Both, Category::Unknown] {
            assert_eq!(category.to_string().parse::<Category>().unwrap(), category);
        }
    }
}
