use crate::error::{Error, ErrorKind};
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::path::Path;
use std::str::FromStr;
use zxorg_config::CollectionConfig;

/// One of the two parallel collection trees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Collection {
    /// Full edition: flat, feature-rich taxonomy without folder caps.
    #[cfg_attr(feature = "serde", serde(rename = "FE"))]
    FullEdition,
    /// Segmented: capped folders, split further by range and game folders.
    #[cfg_attr(feature = "serde", serde(rename = "TS"))]
    Segmented,
}
impl Collection {
    pub const ALL: [Collection; 2] = [Collection::FullEdition, Collection::Segmented];

    pub fn tag(&self) -> &'static str {
        match self {
            Collection::FullEdition => "FE",
            Collection::Segmented => "TS",
        }
    }

    /// Configuration key holding this collection's root.
    pub fn config_key(&self) -> &'static str {
        match self {
            Collection::FullEdition => "collections.full_edition",
            Collection::Segmented => "collections.segmented",
        }
    }

    /// This collection's root in `config`, when one is set.
    pub fn root<'a>(&self, config: &'a CollectionConfig) -> Option<&'a Path> {
        match self {
            Collection::FullEdition => config.collections.full_edition.as_deref(),
            Collection::Segmented => config.collections.segmented.as_deref(),
        }
    }

    /// Whether folders in this collection are subject to a file-count cap.
    pub fn is_capped(&self) -> bool {
        matches!(self, Collection::Segmented)
    }
}
impl FromStr for Collection {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_uppercase().as_str() {
            "FE" => Self::FullEdition,
            "TS" => Self::Segmented,
            _ => exn::bail!(ErrorKind::UnknownCollection(s.to_string())),
        })
    }
}
impl Display for Collection {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.tag())
    }
}
