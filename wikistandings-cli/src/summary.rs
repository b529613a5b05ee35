//! `summary` command.

use std::io::Write;

use camino::Utf8PathBuf;
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use wikistandings_core::{ClassificationSummary, RecordSource, ResultsEngine};

use crate::{
    ARG_CLASSIFICATION, ARG_DATABASE, CliError, ENV_SUMMARY_CLASSIFICATION, ENV_SUMMARY_DATABASE,
    open_database,
};

/// CLI arguments for the `summary` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    name = "summary",
    about = "Print races held, races configured and scoring cars of a classification"
)]
#[ortho_config(prefix = "WIKISTANDINGS")]
pub(crate) struct SummaryArgs {
    /// Path to the championship SQLite database.
    #[arg(long = ARG_DATABASE, value_name = "path")]
    #[serde(default)]
    pub(crate) database: Option<Utf8PathBuf>,
    /// Classification to summarise.
    #[arg(long = ARG_CLASSIFICATION, value_name = "id")]
    #[serde(default)]
    pub(crate) classification: Option<u32>,
}

impl SummaryArgs {
    fn into_config(self) -> Result<SummaryConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        SummaryConfig::try_from(merged)
    }
}

/// Resolved `summary` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SummaryConfig {
    pub(crate) database: Utf8PathBuf,
    pub(crate) classification: u32,
}

impl TryFrom<SummaryArgs> for SummaryConfig {
    type Error = CliError;

    fn try_from(args: SummaryArgs) -> Result<Self, Self::Error> {
        let database = args.database.ok_or(CliError::MissingArgument {
            field: ARG_DATABASE,
            env: ENV_SUMMARY_DATABASE,
        })?;
        let classification = args.classification.ok_or(CliError::MissingArgument {
            field: ARG_CLASSIFICATION,
            env: ENV_SUMMARY_CLASSIFICATION,
        })?;
        Ok(Self {
            database,
            classification,
        })
    }
}

pub(crate) fn run_summary_with(args: SummaryArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    let source = open_database(&config.database)?;
    write_summary(&source, config.classification, writer)
}

/// Summarise a classification and write one `label: value` line per fact.
pub(crate) fn write_summary<S: RecordSource>(
    source: &S,
    classification_id: u32,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let summary = ResultsEngine::new(source)
        .summarize(classification_id)
        .map_err(CliError::engine(classification_id))?;
    writer
        .write_all(summary_text(&summary).as_bytes())
        .map_err(CliError::WriteOutput)
}

fn summary_text(summary: &ClassificationSummary) -> String {
    let scoring_cars = summary
        .scoring_cars
        .map_or_else(|| "-".to_owned(), |cars| cars.to_string());
    format!(
        "races held: {}\nraces configured: {}\nscoring cars: {scoring_cars}\n",
        summary.races_held, summary.races_configured
    )
}
