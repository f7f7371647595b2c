//! TOSEC filename parsing and classification.
//!
//! Pure functions over a filename string, no I/O:
//!
//! - [`parse`] extracts the title, year(s) and publisher and classifies the
//!   file into a [`Category`](models::Category).
//! - [`letter_bucket`] and [`decade_bucket`] compute the alphabetic and
//!   decade folders a title is filed under.
//! - [`canonical_game_folder`] derives the name of a fresh per-game folder.

mod consts;
mod decade;
pub mod error;
mod folder;
mod letter;
pub mod models;
mod parse;

pub use crate::decade::{UNDATED_DECADE, decade_bucket};
pub use crate::folder::canonical_game_folder;
pub use crate::letter::{NUMERIC_BUCKET, letter_bucket};
pub use crate::parse::{UNKNOWN_YEAR, parse};
