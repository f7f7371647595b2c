//! Collection configuration.
//!
//! A [`CollectionConfig`] is loaded once, validated, and then handed around
//! immutably. Layers are merged in this order, later layers winning:
//!
//! 1. Built-in defaults ([`CollectionConfig::default`]), merged key by key so
//!    a file that sets one label keeps all the others.
//! 2. A TOML, YAML or JSON file: either the explicit path passed to
//!    [`CollectionConfig::load`], or the first `config.{toml,yaml,yml,json}`
//!    found in the platform configuration directory.
//! 3. Environment variables prefixed with `ZXORG_`, nested keys separated by
//!    a double underscore (`ZXORG_COLLECTIONS__STAGING=/srv/zx/TEMP`).
//!
//! ```toml
//! [collections]
//! full_edition = "/srv/zx/TOSEC FULL EDITION"
//! segmented = "/srv/zx/TOSEC SEGMENTADO"
//! staging = "/srv/zx/TEMP"
//!
//! [capacity]
//! near_limit = 180
//! ```

pub mod error;
mod formats;

pub use crate::formats::{FormatTable, extension_of, normalize_extension};
use crate::error::{ErrorKind, Result};
use directories::ProjectDirs;
use exn::ResultExt;
use figment::Figment;
use figment::providers::{Env, Format, Json, Serialized, Toml, Yaml};
use std::path::{Component, Path, PathBuf};
use tracing::debug;

pub const ENV_PREFIX: &str = "ZXORG_";
pub const DEFAULT_SEGMENTED_SUBPATH: &str = "TOSEC_v40.9";
const CONFIG_FILE_NAMES: [&str; 4] = ["config.toml", "config.yaml", "config.yml", "config.json"];

/// Root paths of the two collection trees and the staging folder.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct CollectionRoots {
    /// Root of the full-edition (FE) tree.
    pub full_edition: Option<PathBuf>,
    /// Root of the segmented (TS) tree.
    pub segmented: Option<PathBuf>,
    /// Taxonomy lives below this folder inside the segmented root.
    pub segmented_subpath: String,
    /// Folder new files are dropped into before being placed.
    pub staging: Option<PathBuf>,
}
impl Default for CollectionRoots {
    fn default() -> Self {
        Self {
            full_edition: None,
            segmented: None,
            segmented_subpath: DEFAULT_SEGMENTED_SUBPATH.to_string(),
            staging: None,
        }
    }
}

/// Per-folder file-count thresholds for the segmented collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct CapacityLimits {
    pub near_limit: usize,
    pub at_limit: usize,
}
impl Default for CapacityLimits {
    fn default() -> Self {
        Self { near_limit: 200, at_limit: 230 }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct CollectionConfig {
    pub collections: CollectionRoots,
    pub formats: FormatTable,
    pub capacity: CapacityLimits,
}
impl CollectionConfig {
    /// Load the layered configuration.
    ///
    /// An explicit `path` must exist; the platform default file is optional.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let figment = Self::figment(path)?;
        Self::from_figment(&figment)
    }

    /// Build the provider stack without extracting it.
    pub fn figment(path: Option<&Path>) -> Result<Figment> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        let file = match path {
            Some(path) => {
                if !path.is_file() {
                    exn::bail!(ErrorKind::NotFound(path.to_path_buf()));
                }
                Some(path.to_path_buf())
            },
            None => Self::default_file(),
        };
        if let Some(file) = file {
            debug!(path = %file.display(), "reading configuration file");
            figment = Self::merge_file(figment, &file)?;
        }
        Ok(figment.merge(Env::prefixed(ENV_PREFIX).split("__")))
    }

    /// Extract and validate a configuration from any provider stack.
    pub fn from_figment(figment: &Figment) -> Result<Self> {
        let mut config: Self = figment.extract().or_raise(|| ErrorKind::Load)?;
        config.formats.normalize();
        config.validate()?;
        Ok(config)
    }

    /// First `config.*` file in the platform configuration directory.
    fn default_file() -> Option<PathBuf> {
        let dirs = ProjectDirs::from("", "", "zxorg")?;
        CONFIG_FILE_NAMES.iter().map(|name| dirs.config_dir().join(name)).find(|path| path.is_file())
    }

    fn merge_file(figment: Figment, path: &Path) -> Result<Figment> {
        let extension = path.extension().and_then(|ext| ext.to_str()).map(str::to_lowercase);
        Ok(match extension.as_deref() {
            Some("toml") => figment.merge(Toml::file_exact(path)),
            Some("yaml" | "yml") => figment.merge(Yaml::file_exact(path)),
            Some("json") => figment.merge(Json::file_exact(path)),
            _ => exn::bail!(ErrorKind::UnsupportedFormat(path.to_path_buf())),
        })
    }

    fn validate(&self) -> Result<()> {
        let subpath = Path::new(&self.collections.segmented_subpath);
        let is_relative = subpath.components().all(|component| matches!(component, Component::Normal(_)));
        if self.collections.segmented_subpath.trim().is_empty() || !is_relative {
            exn::bail!(ErrorKind::Invalid(format!(
                "collections.segmented_subpath must be a relative folder, found `{}`",
                self.collections.segmented_subpath
            )));
        }
        if self.capacity.at_limit < self.capacity.near_limit {
            exn::bail!(ErrorKind::Invalid(format!(
                "capacity.at_limit ({}) is below capacity.near_limit ({})",
                self.capacity.at_limit, self.capacity.near_limit
            )));
        }
        if self.formats.default_label.is_empty() {
            exn::bail!(ErrorKind::Invalid("formats.default_label must not be empty".to_string()));
        }
        Ok(())
    }
}
