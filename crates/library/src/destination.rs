//! Destination planning.
//!
//! A file is filed once per taxonomy axis in each collection tree:
//!
//! | Axis          | Full edition (`FE`)                                   | Segmented (`TS`, below the subpath)                       |
//! |---------------|-------------------------------------------------------|-----------------------------------------------------------|
//! | alphabet      | `00 TOSEC ALL/ALFABETO TOSEC/{L}/`                    |                                                           |
//! | per game      | `00 TOSEC ALL/CARPETAS/{L}/{placement}/`              | `00 CARPETAS/{L}/{placement}/`                            |
//! | file type     | `00 TOSEC ALL/TIPOS DE ARCHIVO/{label}/{L}/`          |                                                           |
//! | classic year  | `01 AÑOS/1982-1993 CLASICOS/{year}/{L}/`              | `01 AÑOS/1982-1993 CLASICOS/{year}/{L}/{label}/[{range}/]` |
//! | homebrew year | `01 AÑOS/1994-2025 HOMEBREW/{decade}/{year}/`         | `01 AÑOS/1994-2025 HOMEBREW/{decade}/{year}/{label}/`      |
//! | era alphabet  | `0N {ERA}/ALFABETO {ERA}/{L}/{label}/[{range}/]`      | `0N {ERA}/ALFABETO {ERA}/{L}/{label}/[{range}/[{game}/]]`  |
//!
//! The per-game placement is an existing game folder in the letter folder if
//! there is one, otherwise the title's range folder (descending into a game
//! folder inside it when one exists), otherwise a fresh canonical folder name.
//!
//! Year axes repeat once per distinct year, era axes once per era the file
//! belongs to. Only directory listings are read; nothing is ever written.

use crate::collection::Collection;
use crate::error::{ErrorKind, Result};
use crate::game::{resolve_game_folder, select_game_folder};
use crate::range::{resolve_range, select_range};
use derive_more::Display;
use exn::{OptionExt, ResultExt};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, instrument, warn};
use zxorg_config::CollectionConfig;
use zxorg_storage::backend::LocalBackend;
use zxorg_storage::error::Result as StorageResult;
use zxorg_storage::{BackendHandle, StorageBackend, validate_plain_path};
use zxorg_tosec::models::{Era, ParsedFilename};
use zxorg_tosec::{canonical_game_folder, decade_bucket, letter_bucket};

const FE_ALL: &str = "00 TOSEC ALL";
const FE_ALPHABET: &str = "ALFABETO TOSEC";
const FE_GAMES: &str = "CARPETAS";
const FE_TYPES: &str = "TIPOS DE ARCHIVO";
const TS_GAMES: &str = "00 CARPETAS";
const YEARS: &str = "01 AÑOS";

/// Taxonomy axes, used for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
enum Axis {
    #[display("alphabet")]
    Alphabet,
    #[display("per-game")]
    Game,
    #[display("file-type")]
    FileType,
    #[display("year")]
    Year,
    #[display("era-alphabet")]
    EraAlphabet,
}

/// Folder name of an era: `CLASICOS` or `HOMEBREW`.
fn era_name(era: Era) -> &'static str {
    match era {
        Era::Classic => "CLASICOS",
        Era::Homebrew => "HOMEBREW",
    }
}

/// `1982-1993 CLASICOS`, below the years folder.
pub fn era_years_folder(era: Era) -> String {
    let years = era.years();
    format!("{}-{} {}", years.start(), years.end(), era_name(era))
}

/// `02 CLASICOS/ALFABETO CLASICOS` or `03 HOMEBREW/ALFABETO HOMEBREW`.
pub fn era_alphabet_folder(era: Era) -> PathBuf {
    let number = match era {
        Era::Classic => "02",
        Era::Homebrew => "03",
    };
    Path::new(&format!("{number} {}", era_name(era))).join(format!("ALFABETO {}", era_name(era)))
}

/// Candidate relative paths, per collection, in axis order.
///
/// Both collections are always present, possibly with no paths.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct DestinationSuggestion(BTreeMap<Collection, Vec<String>>);
impl Default for DestinationSuggestion {
    fn default() -> Self {
        Self(Collection::ALL.into_iter().map(|collection| (collection, Vec::new())).collect())
    }
}
impl DestinationSuggestion {
    /// Paths suggested inside one collection.
    pub fn paths(&self, collection: Collection) -> &[String] {
        self.0.get(&collection).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Collection, &[String])> {
        self.0.iter().map(|(collection, paths)| (*collection, paths.as_slice()))
    }

    /// Total number of suggested paths across both collections.
    pub fn len(&self) -> usize {
        self.0.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Per-file facts every axis needs.
struct Target<'a> {
    parsed: &'a ParsedFilename,
    filename: &'a str,
    letter: String,
    label: String,
    canonical: String,
}

/// Plans destinations against the live collection trees.
///
/// Holds the configuration and one storage backend per collection. A
/// collection without a backend is planned as if all its folders were empty,
/// which still yields every axis with fallback placements.
#[derive(Clone)]
pub struct DestinationBuilder {
    config: Arc<CollectionConfig>,
    backends: BTreeMap<Collection, BackendHandle>,
}
impl DestinationBuilder {
    pub fn new(config: impl Into<Arc<CollectionConfig>>) -> Self {
        Self { config: config.into(), backends: BTreeMap::new() }
    }

    /// Attach the backend that lists a collection's tree.
    pub fn with_backend(mut self, collection: Collection, backend: BackendHandle) -> Self {
        self.backends.insert(collection, backend);
        self
    }

    /// Build local filesystem backends for every configured collection root.
    ///
    /// A root that doesn't exist (an unmounted drive, say) is logged and left
    /// without a backend, so that collection still gets its fallback
    /// placements. Any other failure to open a root is an error.
    pub fn from_config(config: impl Into<Arc<CollectionConfig>>) -> Result<Self> {
        let config: Arc<CollectionConfig> = config.into();
        let mut builder = Self::new(Arc::clone(&config));
        for collection in Collection::ALL {
            let Some(root) = collection.root(&config) else {
                debug!(%collection, "collection root not configured");
                continue;
            };
            match LocalBackend::new(collection.tag(), root) {
                Ok(backend) => builder = builder.with_backend(collection, Arc::new(backend)),
                Err(err) if err.is_not_found() => {
                    warn!(%collection, root = %root.display(), "collection root missing, planning without it");
                },
                Err(err) => return Err(err).or_raise(|| ErrorKind::Storage),
            }
        }
        Ok(builder)
    }

    pub fn config(&self) -> &CollectionConfig {
        &self.config
    }

    pub fn backend(&self, collection: Collection) -> Option<&BackendHandle> {
        self.backends.get(&collection)
    }

    /// Suggest destinations for a parsed file.
    ///
    /// `extension` selects the file-type label; `filename` is the final path
    /// component of every suggestion. Never fails: an axis whose folder
    /// lookup errors (other than the folder not existing yet) is left out
    /// and logged.
    ///
    /// ```
    /// use zxorg_config::CollectionConfig;
    /// use zxorg_library::{Collection, DestinationBuilder};
    ///
    /// let builder = DestinationBuilder::new(CollectionConfig::default());
    /// let filename = "Elite (1985)(Firebird).tap";
    /// let suggestion = builder.suggest(&zxorg_tosec::parse(filename), "tap", filename);
    /// assert_eq!(
    ///     suggestion.paths(Collection::FullEdition)[0],
    ///     "00 TOSEC ALL/ALFABETO TOSEC/E/Elite (1985)(Firebird).tap"
    /// );
    /// ```
    #[instrument(skip_all, fields(filename, title = %parsed.title))]
    pub fn suggest(&self, parsed: &ParsedFilename, extension: &str, filename: &str) -> DestinationSuggestion {
        let target = Target {
            parsed,
            filename,
            letter: letter_bucket(&parsed.title),
            label: self.config.formats.label(extension),
            canonical: canonical_game_folder(&parsed.title),
        };
        let mut suggestion = DestinationSuggestion::default();
        suggestion.0.insert(Collection::FullEdition, self.full_edition(&target));
        suggestion.0.insert(Collection::Segmented, self.segmented(&target));
        debug!(paths = suggestion.len(), "planned destinations");
        suggestion
    }

    fn full_edition(&self, target: &Target<'_>) -> Vec<String> {
        let collection = Collection::FullEdition;
        let mut paths = Vec::new();
        let all = Path::new(FE_ALL);

        let alphabet = all.join(FE_ALPHABET).join(&target.letter);
        emit(&mut paths, collection, Axis::Alphabet, Ok(alphabet.join(target.filename)));

        let games = all.join(FE_GAMES).join(&target.letter);
        let placement = self.placement(collection, &games, target);
        emit(&mut paths, collection, Axis::Game, placement.map(|segments| under(&games, segments, target.filename)));

        let types = all.join(FE_TYPES).join(&target.label).join(&target.letter);
        emit(&mut paths, collection, Axis::FileType, Ok(types.join(target.filename)));

        for year in target.parsed.distinct_years() {
            let dir = match Era::of(year) {
                Some(era @ Era::Classic) => {
                    Path::new(YEARS).join(era_years_folder(era)).join(year.to_string()).join(&target.letter)
                },
                Some(era @ Era::Homebrew) => {
                    Path::new(YEARS).join(era_years_folder(era)).join(decade_bucket(year)).join(year.to_string())
                },
                None => continue,
            };
            emit(&mut paths, collection, Axis::Year, Ok(dir.join(target.filename)));
        }

        for era in Era::ALL.into_iter().filter(|era| target.parsed.has_era(*era)) {
            let dir = era_alphabet_folder(era).join(&target.letter).join(&target.label);
            let ranges = self.range_segments(collection, &dir, target, false);
            emit(&mut paths, collection, Axis::EraAlphabet, ranges.map(|segments| under(&dir, segments, target.filename)));
        }
        paths
    }

    fn segmented(&self, target: &Target<'_>) -> Vec<String> {
        let collection = Collection::Segmented;
        let mut paths = Vec::new();
        let base = Path::new(&self.config.collections.segmented_subpath);

        let games = base.join(TS_GAMES).join(&target.letter);
        let placement = self.placement(collection, &games, target);
        emit(&mut paths, collection, Axis::Game, placement.map(|segments| under(&games, segments, target.filename)));

        for year in target.parsed.distinct_years() {
            let years = base.join(YEARS);
            let result = match Era::of(year) {
                Some(era @ Era::Classic) => {
                    let dir = years.join(era_years_folder(era)).join(year.to_string()).join(&target.letter).join(&target.label);
                    self.range_segments(collection, &dir, target, false).map(|segments| under(&dir, segments, target.filename))
                },
                Some(era @ Era::Homebrew) => {
                    let dir = years.join(era_years_folder(era)).join(decade_bucket(year)).join(year.to_string());
                    Ok(dir.join(&target.label).join(target.filename))
                },
                None => continue,
            };
            emit(&mut paths, collection, Axis::Year, result);
        }

        for era in Era::ALL.into_iter().filter(|era| target.parsed.has_era(*era)) {
            let dir = base.join(era_alphabet_folder(era)).join(&target.letter).join(&target.label);
            let ranges = self.range_segments(collection, &dir, target, true);
            emit(&mut paths, collection, Axis::EraAlphabet, ranges.map(|segments| under(&dir, segments, target.filename)));
        }
        paths
    }

    fn lookup_backend(&self, collection: Collection) -> Option<&dyn StorageBackend> {
        self.backends.get(&collection).map(|backend| backend.as_ref() as &dyn StorageBackend)
    }

    /// Folders below `dir` for the per-game axis.
    fn placement(&self, collection: Collection, dir: &Path, target: &Target<'_>) -> StorageResult<Vec<String>> {
        let fallback = vec![target.canonical.clone()];
        let Some(backend) = self.lookup_backend(collection) else {
            return Ok(fallback);
        };
        let names = match backend.subdirectories(dir) {
            Ok(names) => names,
            Err(err) if err.is_not_found() => return Ok(fallback),
            Err(err) => return Err(err),
        };
        if let Some(game) = select_game_folder(&names, &target.parsed.title) {
            return Ok(vec![game]);
        }
        let Some(range) = select_range(&names, &target.parsed.title) else {
            return Ok(fallback);
        };
        let game = absent_as_none(resolve_game_folder(backend, &dir.join(&range), &target.parsed.title))?;
        Ok(std::iter::once(range).chain(game).collect())
    }

    /// Range folder (and optionally a game folder inside it) below `dir`.
    fn range_segments(&self, collection: Collection, dir: &Path, target: &Target<'_>, with_game: bool) -> StorageResult<Vec<String>> {
        let Some(backend) = self.lookup_backend(collection) else {
            return Ok(Vec::new());
        };
        let Some(range) = absent_as_none(resolve_range(backend, dir, &target.parsed.title))? else {
            return Ok(Vec::new());
        };
        if !with_game {
            return Ok(vec![range]);
        }
        let game = absent_as_none(resolve_game_folder(backend, &dir.join(&range), &target.parsed.title))?;
        Ok(std::iter::once(range).chain(game).collect())
    }
}

/// A folder that doesn't exist yet holds no range or game folders.
fn absent_as_none<T>(result: StorageResult<Option<T>>) -> StorageResult<Option<T>> {
    match result {
        Err(err) if err.is_not_found() => Ok(None),
        other => other,
    }
}

fn under(dir: &Path, segments: Vec<String>, filename: &str) -> PathBuf {
    let mut path = dir.to_path_buf();
    path.extend(segments);
    path.push(filename);
    path
}

/// Open the local backend for one collection's configured root.
///
/// Unlike [`DestinationBuilder::from_config`], a missing root is an error here:
/// callers that walk a collection need it to be there.
pub fn open_collection(config: &CollectionConfig, collection: Collection) -> Result<LocalBackend> {
    let root = collection.root(config).ok_or_raise(|| ErrorKind::NotConfigured(collection.config_key()))?;
    LocalBackend::new(collection.tag(), root).or_raise(|| ErrorKind::Storage)
}

/// Validate a planned path and append it with `/` separators, or log and
/// drop the axis. Every segment must be a plain name.
fn emit(paths: &mut Vec<String>, collection: Collection, axis: Axis, planned: StorageResult<PathBuf>) {
    let validated = planned.and_then(validate_plain_path);
    match validated {
        Ok(path) => {
            let segments: Vec<_> = path.iter().map(|segment| segment.to_string_lossy()).collect();
            paths.push(segments.join("/"));
        },
        Err(err) => warn!(%collection, %axis, error = ?err, "omitting destination axis"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use zxorg_storage::backend::MockBackend;
    use zxorg_tosec::parse;

    const SUBPATH: &str = "TOSEC_v40.9";

    fn builder(fe: Option<MockBackend>, ts: Option<MockBackend>) -> DestinationBuilder {
        let mut builder = DestinationBuilder::new(CollectionConfig::default());
        if let Some(fe) = fe {
            builder = builder.with_backend(Collection::FullEdition, Arc::new(fe));
        }
        if let Some(ts) = ts {
            builder = builder.with_backend(Collection::Segmented, Arc::new(ts));
        }
        builder
    }

    fn suggest(builder: &DestinationBuilder, filename: &str) -> DestinationSuggestion {
        builder.suggest(&parse(filename), &zxorg_config::extension_of(filename), filename)
    }

    #[test]
    fn test_classic_without_existing_folders() {
        let file = "Elite (1985)(Firebird).tap";
        let suggestion = suggest(&builder(None, None), file);
        assert_eq!(
            suggestion.paths(Collection::FullEdition),
            [
                format!("00 TOSEC ALL/ALFABETO TOSEC/E/{file}"),
                format!("00 TOSEC ALL/CARPETAS/E/ELITE/{file}"),
                format!("00 TOSEC ALL/TIPOS DE ARCHIVO/TAPs/E/{file}"),
                format!("01 AÑOS/1982-1993 CLASICOS/1985/E/{file}"),
                format!("02 CLASICOS/ALFABETO CLASICOS/E/TAPs/{file}"),
            ]
        );
        assert_eq!(
            suggestion.paths(Collection::Segmented),
            [
                format!("{SUBPATH}/00 CARPETAS/E/ELITE/{file}"),
                format!("{SUBPATH}/01 AÑOS/1982-1993 CLASICOS/1985/E/TAPs/{file}"),
                format!("{SUBPATH}/02 CLASICOS/ALFABETO CLASICOS/E/TAPs/{file}"),
            ]
        );
    }

    #[test]
    fn test_homebrew_year_uses_decade() {
        let file = "Snake Escape (2013)(Einar Saukas).tzx";
        let suggestion = suggest(&builder(None, None), file);
        let fe = suggestion.paths(Collection::FullEdition);
        assert!(fe.contains(&format!("01 AÑOS/1994-2025 HOMEBREW/2010-2019/2013/{file}")));
        assert!(fe.contains(&format!("03 HOMEBREW/ALFABETO HOMEBREW/S/TZXs/{file}")));
        let ts = suggestion.paths(Collection::Segmented);
        assert!(ts.contains(&format!("{SUBPATH}/01 AÑOS/1994-2025 HOMEBREW/2010-2019/2013/TZXs/{file}")));
        assert!(!ts.iter().any(|path| path.contains("CLASICOS")));
    }

    #[test]
    fn test_year_range_spanning_both_eras() {
        let file = "Manic Miner (1988-2025)(Bug-Byte).tap";
        let suggestion = suggest(&builder(None, None), file);
        let fe = suggestion.paths(Collection::FullEdition);
        let years: Vec<_> = fe.iter().filter(|path| path.starts_with("01 AÑOS")).collect();
        // Only the boundary years, never the years in between.
        assert_eq!(
            years,
            [
                &format!("01 AÑOS/1982-1993 CLASICOS/1988/M/{file}"),
                &format!("01 AÑOS/1994-2025 HOMEBREW/2020-2029/2025/{file}"),
            ]
        );
        assert!(fe.contains(&format!("02 CLASICOS/ALFABETO CLASICOS/M/TAPs/{file}")));
        assert!(fe.contains(&format!("03 HOMEBREW/ALFABETO HOMEBREW/M/TAPs/{file}")));
        let ts = suggestion.paths(Collection::Segmented);
        assert!(ts.contains(&format!("{SUBPATH}/02 CLASICOS/ALFABETO CLASICOS/M/TAPs/{file}")));
        assert!(ts.contains(&format!("{SUBPATH}/03 HOMEBREW/ALFABETO HOMEBREW/M/TAPs/{file}")));
    }

    #[test]
    fn test_repeated_year_is_emitted_once() {
        let file = "Elite (1985-1985)(Firebird).tap";
        let suggestion = suggest(&builder(None, None), file);
        let years = suggestion.paths(Collection::FullEdition).iter().filter(|path| path.starts_with("01 AÑOS")).count();
        assert_eq!(years, 1);
    }

    #[test]
    fn test_unrecognized_and_undated() {
        let file = "some readme.txt";
        let suggestion = suggest(&builder(None, None), file);
        assert_eq!(
            suggestion.paths(Collection::FullEdition),
            [
                format!("00 TOSEC ALL/ALFABETO TOSEC/S/{file}"),
                format!("00 TOSEC ALL/CARPETAS/S/SOME README/{file}"),
                format!("00 TOSEC ALL/TIPOS DE ARCHIVO/TXT/S/{file}"),
            ]
        );
        assert_eq!(suggestion.paths(Collection::Segmented), [format!("{SUBPATH}/00 CARPETAS/S/SOME README/{file}")]);

        let wildcard = "3D Deathchase (19xx)(Micromega).z80";
        let suggestion = suggest(&builder(None, None), wildcard);
        assert_eq!(suggestion.paths(Collection::FullEdition)[0], format!("00 TOSEC ALL/ALFABETO TOSEC/123/{wildcard}"));
        assert_eq!(suggestion.len(), 4);
    }

    #[test]
    fn test_segmented_range_and_game_folders() {
        let letter = format!("{SUBPATH}/02 CLASICOS/ALFABETO CLASICOS/F/TAPs");
        let ts = MockBackend::with_dirs(
            ["F-FERNA", "FERRO - FLIPI", "FLIPP - FP", "FRA - FROZE", "FRUIT - FY-FY", "FRA - FROZE/FROGGER"]
                .map(|name| format!("{letter}/{name}")),
        );
        let file = "Frogger (1983)(A'n'F).tap";
        let suggestion = suggest(&builder(None, Some(ts)), file);
        let ts = suggestion.paths(Collection::Segmented);
        assert!(ts.contains(&format!("{letter}/FRA - FROZE/FROGGER/{file}")));

        let file = "Fruity March (1986)(Unknown).tap";
        let suggestion = suggest(&builder(None, Some(MockBackend::with_dirs([format!("{letter}/FRUIT - FY-FY")]))), file);
        assert!(suggestion.paths(Collection::Segmented).contains(&format!("{letter}/FRUIT - FY-FY/{file}")));
    }

    #[test]
    fn test_full_edition_era_alphabet_has_no_game_folder() {
        let letter = "02 CLASICOS/ALFABETO CLASICOS/F/TAPs";
        let fe = MockBackend::with_dirs([format!("{letter}/FA - FZ/FROGGER")]);
        let file = "Frogger (1983)(A'n'F).tap";
        let suggestion = suggest(&builder(Some(fe), None), file);
        assert!(suggestion.paths(Collection::FullEdition).contains(&format!("{letter}/FA - FZ/{file}")));
    }

    #[test]
    fn test_segmented_classic_year_uses_range() {
        let dir = format!("{SUBPATH}/01 AÑOS/1982-1993 CLASICOS/1983/F/TAPs");
        let ts = MockBackend::with_dirs([format!("{dir}/FA - FN"), format!("{dir}/FO - FZ")]);
        let file = "Frogger (1983)(A'n'F).tap";
        let suggestion = suggest(&builder(None, Some(ts)), file);
        assert!(suggestion.paths(Collection::Segmented).contains(&format!("{dir}/FO - FZ/{file}")));
    }

    #[test]
    fn test_game_placement() {
        let games = "00 TOSEC ALL/CARPETAS";
        let fe = MockBackend::with_dirs([
            format!("{games}/E/[Elite]"),
            format!("{games}/F/FA - FR/FROGGER"),
            format!("{games}/F/FS - FZ"),
        ]);
        let builder = builder(Some(fe), None);

        // Existing game folder in the letter folder, real name kept.
        let file = "Elite v1.1 (1985)(Firebird).tap";
        assert_eq!(suggest(&builder, file).paths(Collection::FullEdition)[1], format!("{games}/E/[Elite]/{file}"));
        // Range folder with the game folder inside it.
        let file = "Frogger (1983)(A'n'F).tap";
        assert_eq!(suggest(&builder, file).paths(Collection::FullEdition)[1], format!("{games}/F/FA - FR/FROGGER/{file}"));
        // Range folder without a game folder.
        let file = "Fusion (1988)(Bug-Byte).tap";
        assert_eq!(suggest(&builder, file).paths(Collection::FullEdition)[1], format!("{games}/F/FS - FZ/{file}"));
        // Letter folder missing: canonical name.
        let file = "Saga 2 (1990)(Unknown).tap";
        assert_eq!(suggest(&builder, file).paths(Collection::FullEdition)[1], format!("{games}/S/SAGA 2/{file}"));
    }

    #[test]
    fn test_unreadable_folder_omits_only_that_axis() {
        let letter = format!("{SUBPATH}/02 CLASICOS/ALFABETO CLASICOS/F/TAPs");
        let ts = MockBackend::with_dirs([format!("{SUBPATH}/00 CARPETAS/F")]).with_denied(letter.clone());
        let file = "Frogger (1983)(A'n'F).tap";
        let suggestion = suggest(&builder(None, Some(ts)), file);
        let ts = suggestion.paths(Collection::Segmented);
        assert_eq!(ts.len(), 2);
        assert!(!ts.iter().any(|path| path.starts_with(&letter)));
        assert_eq!(ts[0], format!("{SUBPATH}/00 CARPETAS/F/FROGGER/{file}"));
    }

    #[test]
    fn test_suggestions_are_idempotent() {
        let letter = format!("{SUBPATH}/02 CLASICOS/ALFABETO CLASICOS/F/TAPs");
        let ts = MockBackend::with_dirs([format!("{letter}/FA - FM"), format!("{letter}/FN - FZ/FROGGER")]);
        let builder = builder(None, Some(ts));
        let file = "Frogger (1983)(A'n'F).tap";
        assert_eq!(suggest(&builder, file), suggest(&builder, file));
    }

    #[test]
    fn test_unsafe_filename_is_dropped() {
        let suggestion = builder(None, None).suggest(&parse(".."), "", "..");
        assert!(suggestion.is_empty());
        assert_eq!(suggestion.iter().count(), 2);
    }

    #[test]
    fn test_custom_subpath() {
        let mut config = CollectionConfig::default();
        config.collections.segmented_subpath = "TOSEC_v41".to_string();
        let file = "Elite (1985)(Firebird).tap";
        let suggestion = DestinationBuilder::new(config).suggest(&parse(file), "tap", file);
        assert!(suggestion.paths(Collection::Segmented).iter().all(|path| path.starts_with("TOSEC_v41/")));
    }

    #[test]
    fn test_from_config_without_roots() {
        let builder = DestinationBuilder::from_config(CollectionConfig::default()).unwrap();
        assert!(builder.backend(Collection::FullEdition).is_none());
    }

    #[test]
    fn test_from_config_with_roots() {
        let temp_dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(temp_dir.path().join("00 TOSEC ALL/CARPETAS/E/ELITE")).unwrap();
        let mut config = CollectionConfig::default();
        config.collections.full_edition = Some(temp_dir.path().to_path_buf());
        let builder = DestinationBuilder::from_config(config).unwrap();
        let file = "Elite (1985)(Firebird).tap";
        assert_eq!(suggest(&builder, file).paths(Collection::FullEdition)[1], format!("00 TOSEC ALL/CARPETAS/E/ELITE/{file}"));

        let mut config = CollectionConfig::default();
        config.collections.segmented = Some(temp_dir.path().join("00 TOSEC ALL/CARPETAS/E/ELITE"));
        std::fs::write(temp_dir.path().join("not-a-dir"), b"").unwrap();
        config.collections.full_edition = Some(temp_dir.path().join("not-a-dir"));
        assert!(DestinationBuilder::from_config(config).is_err());
    }

    #[test]
    fn test_from_config_with_missing_root() {
        let temp_dir = tempfile::tempdir().unwrap();
        let mut config = CollectionConfig::default();
        config.collections.full_edition = Some(temp_dir.path().join("unmounted"));
        config.collections.segmented = Some(temp_dir.path().to_path_buf());
        let builder = DestinationBuilder::from_config(config.clone()).unwrap();
        assert!(builder.backend(Collection::FullEdition).is_none());
        assert!(builder.backend(Collection::Segmented).is_some());

        let file = "Elite (1985)(Firebird).tap";
        let suggestion = suggest(&builder, file);
        assert_eq!(suggestion.paths(Collection::FullEdition)[1], format!("00 TOSEC ALL/CARPETAS/E/ELITE/{file}"));
        assert!(!suggestion.paths(Collection::Segmented).is_empty());

        let err = open_collection(&config, Collection::FullEdition).unwrap_err();
        assert!(matches!(&*err, ErrorKind::Storage));
        assert!(open_collection(&config, Collection::Segmented).is_ok());
    }

    #[test]
    fn test_open_unconfigured_collection() {
        let err = open_collection(&CollectionConfig::default(), Collection::Segmented).unwrap_err();
        assert!(matches!(&*err, ErrorKind::NotConfigured("collections.segmented")));
    }
}
