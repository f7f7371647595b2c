//! `zxorg`: plan where TOSEC-named files belong in the collection trees.
//!
//! Every command prints JSON to stdout. Logs go to stderr, filtered with
//! `RUST_LOG` (default `warn`).

mod error;

use crate::error::{ErrorKind, Result};
use clap::{Parser, Subcommand};
use exn::{OptionExt, ResultExt};
use serde::Serialize;
use std::collections::BTreeMap;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;
use zxorg_config::{CollectionConfig, extension_of};
use zxorg_library::{Collection, CollectionStats, DestinationBuilder, collection_stats, folder_capacity, open_collection, scan_staging};
use zxorg_storage::backend::LocalBackend;
use zxorg_tosec::parse;

#[derive(Parser, Debug)]
#[command(name = "zxorg", version, about = "Plan destinations for TOSEC-named ZX Spectrum files")]
struct Args {
    /// Configuration file (TOML, YAML or JSON)
    #[arg(short, long, global = true, env = "ZXORG_CONFIG", value_hint = clap::ValueHint::FilePath)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse filenames into title, years, publisher and category
    Parse {
        #[arg(required = true)]
        filenames: Vec<String>,
    },
    /// Suggest destination paths for a filename
    Suggest {
        filename: String,
        /// File type, taken from the filename when omitted
        #[arg(short, long)]
        extension: Option<String>,
    },
    /// List the staging folder with parse results and suggestions
    Stage,
    /// File counts per type and decade
    Stats {
        /// `FE` or `TS`; both when omitted
        collection: Option<String>,
    },
    /// How full a folder is, relative to its collection root
    Capacity {
        /// `FE` or `TS`
        collection: String,
        #[arg(value_hint = clap::ValueHint::DirPath)]
        dir: PathBuf,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err:?}");
            ExitCode::FAILURE
        },
    }
}

fn run(args: Args) -> Result<()> {
    let config = CollectionConfig::load(args.config.as_deref()).or_raise(|| ErrorKind::Config)?;
    debug!(?config, "loaded configuration");
    match args.command {
        Command::Parse { filenames } => {
            let parsed: Vec<_> = filenames.iter().map(|filename| parse(filename)).collect();
            print_json(&parsed)
        },
        Command::Suggest { filename, extension } => {
            let builder = DestinationBuilder::from_config(config).or_raise(|| ErrorKind::Storage)?;
            let extension = extension.unwrap_or_else(|| extension_of(&filename));
            let suggestion = builder.suggest(&parse(&filename), &extension, &filename);
            print_json(&suggestion)
        },
        Command::Stage => {
            let staging = config.collections.staging.clone().ok_or_raise(|| ErrorKind::NotConfigured("collections.staging"))?;
            let staging = LocalBackend::new("staging", staging).or_raise(|| ErrorKind::Storage)?;
            let builder = DestinationBuilder::from_config(config).or_raise(|| ErrorKind::Storage)?;
            let staged = scan_staging(&staging, &builder).or_raise(|| ErrorKind::Library)?;
            print_json(&staged)
        },
        Command::Stats { collection } => {
            let wanted = match collection {
                Some(tag) => vec![tag.parse::<Collection>().or_raise(|| ErrorKind::Usage)?],
                None => Collection::ALL.to_vec(),
            };
            let mut stats: BTreeMap<Collection, CollectionStats> = BTreeMap::new();
            for collection in wanted {
                let backend = open_collection(&config, collection).or_raise(|| ErrorKind::Library)?;
                let collected = collection_stats(&backend, &config.formats).or_raise(|| ErrorKind::Library)?;
                stats.insert(collection, collected);
            }
            print_json(&stats)
        },
        Command::Capacity { collection, dir } => {
            let collection = collection.parse::<Collection>().or_raise(|| ErrorKind::Usage)?;
            let backend = open_collection(&config, collection).or_raise(|| ErrorKind::Library)?;
            let usage = folder_capacity(&backend, &config.formats, &config.capacity, collection, &dir)
                .or_raise(|| ErrorKind::Library)?;
            print_json(&usage)
        },
    }
}

fn print_json(value: &impl Serialize) -> Result<()> {
    let mut stdout = std::io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value).or_raise(|| ErrorKind::Output)?;
    writeln!(stdout).or_raise(|| ErrorKind::Output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_parse_arguments() {
        let args = Args::try_parse_from(["zxorg", "suggest", "Elite (1985)(Firebird).tap", "-e", "TZX"]).unwrap();
        match args.command {
            Command::Suggest { filename, extension } => {
                assert_eq!(filename, "Elite (1985)(Firebird).tap");
                assert_eq!(extension.as_deref(), Some("TZX"));
            },
            other => panic!("unexpected command: {other:?}"),
        }
        assert!(Args::try_parse_from(["zxorg", "parse"]).is_err());

        let args = Args::try_parse_from(["zxorg", "capacity", "TS", "TOSEC_v40.9/00 CARPETAS/F"]).unwrap();
        match args.command {
            Command::Capacity { collection, dir } => {
                assert_eq!(collection, "TS");
                assert_eq!(dir, PathBuf::from("TOSEC_v40.9/00 CARPETAS/F"));
            },
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
