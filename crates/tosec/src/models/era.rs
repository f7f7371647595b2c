use std::fmt::{Display, Formatter, Result as FmtResult};
use std::ops::RangeInclusive;
use std::str::FromStr;

use super::sanitize;
use crate::error::{Error, ErrorKind};

/// Release era of a title, derived from its year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Era {
    /// Commercial releases, 1982 to 1993 inclusive.
    Classic,
    /// Community releases, 1994 to 2025 inclusive.
    Homebrew,
}
impl Era {
    pub const ALL: [Era; 2] = [Era::Classic, Era::Homebrew];

    /// Inclusive span of years belonging to this era.
    pub const fn years(&self) -> RangeInclusive<u16> {
        match self {
            Era::Classic => 1982..=1993,
            Era::Homebrew => 1994..=2025,
        }
    }

    pub fn contains(&self, year: u16) -> bool {
        self.years().contains(&year)
    }

    /// Returns the era a year belongs to, or `None` for years outside both.
    ///
    /// ```
    /// use zxorg_tosec::models::Era;
    /// assert_eq!(Era::of(1984), Some(Era::Classic));
    /// assert_eq!(Era::of(2013), Some(Era::Homebrew));
    /// assert_eq!(Era::of(1979), None);
    /// ```
    pub fn of(year: u16) -> Option<Self> {
        Self::ALL.into_iter().find(|era| era.contains(year))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Era::Classic => "classic",
            Era::Homebrew => "homebrew",
        }
    }
}
impl FromStr for Era {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match sanitize(s).as_str() {
            "classic" | "clasicos" => Self::Classic,
            "homebrew" => Self::Homebrew,
            _ => exn::bail!(ErrorKind::ParseError {
                field: "era",
                value: s.to_string(),
            }),
        })
    }
}
impl Display for Era {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_str())
    }
}
