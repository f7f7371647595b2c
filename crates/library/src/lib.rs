//! Destination resolution for TOSEC-named files.
//!
//! Builds on [`zxorg_tosec`] (what a filename says) and [`zxorg_storage`] (what
//! folders already exist) to decide where a file belongs in each collection:
//!
//! - [`range`] places a title into one of a letter folder's `START - END`
//!   sub-folders.
//! - [`game`] finds a title's existing per-game folder.
//! - [`DestinationBuilder`] composes both into a [`DestinationSuggestion`] per
//!   taxonomy axis and collection.
//!
//! Around it sit the staging scan, folder capacity checks and collection
//! statistics.

mod capacity;
mod collection;
mod consts;
mod destination;
pub mod error;
pub mod game;
pub mod range;
mod stage;
mod stats;

pub use crate::capacity::{FolderCapacity, FolderUsage, folder_capacity};
pub use crate::collection::Collection;
pub use crate::destination::{DestinationBuilder, DestinationSuggestion, era_alphabet_folder, era_years_folder, open_collection};
pub use crate::stage::{StagedFile, scan_staging};
pub use crate::stats::{CollectionStats, collection_stats};
