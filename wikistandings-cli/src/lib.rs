//! Command-line interface for browsing championships and rendering
//! standings tables.
#![forbid(unsafe_code)]

use std::io::Write;

use camino::Utf8Path;
use clap::{Parser, Subcommand};
use log::debug;
use wikistandings_core::SqliteRecordSource;
use wikistandings_fs::EntryKind;

mod catalogue;
mod error;
mod standings;
mod summary;

use catalogue::{ChampionshipsArgs, ClassificationsArgs};
pub use error::CliError;
use standings::StandingsArgs;
use summary::SummaryArgs;

pub(crate) const ARG_DATABASE: &str = "database";
pub(crate) const ARG_CHAMPIONSHIP: &str = "championship";
pub(crate) const ARG_CLASSIFICATION: &str = "classification";
pub(crate) const ARG_WIKIPEDIA: &str = "wikipedia";
pub(crate) const ARG_FORMAT: &str = "format";
pub(crate) const ARG_OUTPUT: &str = "output";
pub(crate) const ENV_CHAMPIONSHIPS_DATABASE: &str = "WIKISTANDINGS_CMDS_CHAMPIONSHIPS_DATABASE";
pub(crate) const ENV_CLASSIFICATIONS_DATABASE: &str =
    "WIKISTANDINGS_CMDS_CLASSIFICATIONS_DATABASE";
pub(crate) const ENV_CLASSIFICATIONS_CHAMPIONSHIP: &str =
    "WIKISTANDINGS_CMDS_CLASSIFICATIONS_CHAMPIONSHIP";
pub(crate) const ENV_SUMMARY_DATABASE: &str = "WIKISTANDINGS_CMDS_SUMMARY_DATABASE";
pub(crate) const ENV_SUMMARY_CLASSIFICATION: &str = "WIKISTANDINGS_CMDS_SUMMARY_CLASSIFICATION";
pub(crate) const ENV_STANDINGS_DATABASE: &str = "WIKISTANDINGS_CMDS_STANDINGS_DATABASE";
pub(crate) const ENV_STANDINGS_CLASSIFICATION: &str =
    "WIKISTANDINGS_CMDS_STANDINGS_CLASSIFICATION";

/// Wikipedia version used when none is configured.
pub(crate) const DEFAULT_WIKIPEDIA: &str = "enwiki";

/// Run the CLI with the current process arguments and environment, writing
/// to standard output.
///
/// # Errors
/// Returns [`CliError`] when arguments or configuration are invalid, the
/// database cannot be read, or output cannot be written.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    let mut stdout = std::io::stdout().lock();
    run_command_with(cli.command, &mut stdout)
}

fn run_command_with(command: Command, writer: &mut dyn Write) -> Result<(), CliError> {
    match command {
        Command::Championships(args) => catalogue::run_championships_with(args, writer),
        Command::Classifications(args) => catalogue::run_classifications_with(args, writer),
        Command::Summary(args) => summary::run_summary_with(args, writer),
        Command::Standings(args) => standings::run_standings_with(args, writer),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "wikistandings",
    about = "Render motorsport championship standings as Wikipedia tables",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List championships with results in an active classification.
    Championships(ChampionshipsArgs),
    /// List the scored classifications of a championship.
    Classifications(ClassificationsArgs),
    /// Summarise how far a classification's season has progressed.
    Summary(SummaryArgs),
    /// Assemble and render a classification's standings.
    Standings(StandingsArgs),
}

/// Check that the database path names an existing regular file.
pub(crate) fn require_database(path: &Utf8Path) -> Result<(), CliError> {
    match wikistandings_fs::inspect(path) {
        Ok(EntryKind::File) => Ok(()),
        Ok(EntryKind::Missing) => Err(CliError::MissingSourceFile {
            field: ARG_DATABASE,
            path: path.to_path_buf(),
        }),
        Ok(EntryKind::Other) => Err(CliError::SourcePathNotFile {
            field: ARG_DATABASE,
            path: path.to_path_buf(),
        }),
        Err(source) => Err(CliError::InspectSourcePath {
            field: ARG_DATABASE,
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Validate and open the championship database read-only.
pub(crate) fn open_database(path: &Utf8Path) -> Result<SqliteRecordSource, CliError> {
    require_database(path)?;
    debug!("opening championship database {path}");
    SqliteRecordSource::open(path).map_err(CliError::OpenDatabase)
}

#[cfg(test)]
mod tests;
