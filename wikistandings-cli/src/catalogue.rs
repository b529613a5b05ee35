//! `championships` and `classifications` commands.

use std::io::Write;

use camino::Utf8PathBuf;
use clap::Parser;
use log::info;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use wikistandings_core::{Catalogue, Championship, Classification};

use crate::{
    ARG_CHAMPIONSHIP, ARG_DATABASE, CliError, ENV_CHAMPIONSHIPS_DATABASE,
    ENV_CLASSIFICATIONS_CHAMPIONSHIP, ENV_CLASSIFICATIONS_DATABASE, open_database,
};

/// CLI arguments for the `championships` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    name = "championships",
    about = "List championships with results in an active classification"
)]
#[ortho_config(prefix = "WIKISTANDINGS")]
pub(crate) struct ChampionshipsArgs {
    /// Path to the championship SQLite database.
    #[arg(long = ARG_DATABASE, value_name = "path")]
    #[serde(default)]
    pub(crate) database: Option<Utf8PathBuf>,
}

impl ChampionshipsArgs {
    fn into_config(self) -> Result<ChampionshipsConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        ChampionshipsConfig::try_from(merged)
    }
}

/// Resolved `championships` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ChampionshipsConfig {
    pub(crate) database: Utf8PathBuf,
}

impl TryFrom<ChampionshipsArgs> for ChampionshipsConfig {
    type Error = CliError;

    fn try_from(args: ChampionshipsArgs) -> Result<Self, Self::Error> {
        let database = args.database.ok_or(CliError::MissingArgument {
            field: ARG_DATABASE,
            env: ENV_CHAMPIONSHIPS_DATABASE,
        })?;
        Ok(Self { database })
    }
}

/// CLI arguments for the `classifications` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    name = "classifications",
    about = "List the active classifications of a championship that have results"
)]
#[ortho_config(prefix = "WIKISTANDINGS")]
pub(crate) struct ClassificationsArgs {
    /// Path to the championship SQLite database.
    #[arg(long = ARG_DATABASE, value_name = "path")]
    #[serde(default)]
    pub(crate) database: Option<Utf8PathBuf>,
    /// Championship whose classifications are listed.
    #[arg(long = ARG_CHAMPIONSHIP, value_name = "id")]
    #[serde(default)]
    pub(crate) championship: Option<u32>,
}

impl ClassificationsArgs {
    fn into_config(self) -> Result<ClassificationsConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        ClassificationsConfig::try_from(merged)
    }
}

/// Resolved `classifications` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ClassificationsConfig {
    pub(crate) database: Utf8PathBuf,
    pub(crate) championship: u32,
}

impl TryFrom<ClassificationsArgs> for ClassificationsConfig {
    type Error = CliError;

    fn try_from(args: ClassificationsArgs) -> Result<Self, Self::Error> {
        let database = args.database.ok_or(CliError::MissingArgument {
            field: ARG_DATABASE,
            env: ENV_CLASSIFICATIONS_DATABASE,
        })?;
        let championship = args.championship.ok_or(CliError::MissingArgument {
            field: ARG_CHAMPIONSHIP,
            env: ENV_CLASSIFICATIONS_CHAMPIONSHIP,
        })?;
        Ok(Self {
            database,
            championship,
        })
    }
}

pub(crate) fn run_championships_with(
    args: ChampionshipsArgs,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = args.into_config()?;
    let source = open_database(&config.database)?;
    list_championships(&source, writer)
}

pub(crate) fn run_classifications_with(
    args: ClassificationsArgs,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = args.into_config()?;
    let source = open_database(&config.database)?;
    list_classifications(&source, config.championship, writer)
}

/// Write one `id. name` line per championship.
pub(crate) fn list_championships<C: Catalogue>(
    catalogue: &C,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let championships = catalogue
        .championships()
        .map_err(CliError::store("list championships"))?;
    info!("found {} championships with results", championships.len());
    let lines: String = championships.iter().map(championship_line).collect();
    writer
        .write_all(lines.as_bytes())
        .map_err(CliError::WriteOutput)
}

/// Write one `id. season title (TYPE)` line per classification.
pub(crate) fn list_classifications<C: Catalogue>(
    catalogue: &C,
    championship_id: u32,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let classifications = catalogue
        .classifications(championship_id)
        .map_err(CliError::store("list classifications"))?;
    info!(
        "found {} classifications with results in championship {championship_id}",
        classifications.len()
    );
    let lines: String = classifications.iter().map(classification_line).collect();
    writer
        .write_all(lines.as_bytes())
        .map_err(CliError::WriteOutput)
}

fn championship_line(championship: &Championship) -> String {
    format!("{}. {}\n", championship.id(), championship.name())
}

fn classification_line(classification: &Classification) -> String {
    format!(
        "{}. {} {} ({})\n",
        classification.id(),
        classification.season(),
        classification.title(),
        classification.kind()
    )
}
