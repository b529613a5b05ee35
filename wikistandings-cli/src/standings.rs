//! `standings` command: assemble a classification's standings and render
//! them as wikitable rows or JSON.

use std::io::Write;

use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, ValueEnum};
use log::info;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use wikistandings_core::{
    Catalogue, Classification, ClassificationSummary, RecordSource, ResultsEngine, Standing,
};
use wikistandings_wikitable::{Markup, render_standings};

use crate::{
    ARG_CLASSIFICATION, ARG_DATABASE, ARG_FORMAT, ARG_OUTPUT, ARG_WIKIPEDIA, CliError,
    DEFAULT_WIKIPEDIA, ENV_STANDINGS_CLASSIFICATION, ENV_STANDINGS_DATABASE, open_database,
};

/// How standings are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum OutputFormat {
    /// Body rows of a Wikipedia points table.
    #[default]
    Wikitable,
    /// Pretty-printed JSON report.
    Json,
}

/// CLI arguments for the `standings` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    name = "standings",
    long_about = "Consolidate every entity's results in a classification, rank \
                 them by points and render the table body. Options can come \
                 from CLI flags, configuration files, or environment \
                 variables.",
    about = "Assemble and render a classification's standings"
)]
#[ortho_config(prefix = "WIKISTANDINGS")]
pub(crate) struct StandingsArgs {
    /// Path to the championship SQLite database.
    #[arg(long = ARG_DATABASE, value_name = "path")]
    #[serde(default)]
    pub(crate) database: Option<Utf8PathBuf>,
    /// Classification to render.
    #[arg(long = ARG_CLASSIFICATION, value_name = "id")]
    #[serde(default)]
    pub(crate) classification: Option<u32>,
    /// Wikipedia version for article links and abbreviations (default `enwiki`).
    #[arg(long = ARG_WIKIPEDIA, value_name = "code")]
    #[serde(default)]
    pub(crate) wikipedia: Option<String>,
    /// Output format (default `wikitable`).
    #[arg(long = ARG_FORMAT, value_enum)]
    #[serde(default)]
    pub(crate) format: Option<OutputFormat>,
    /// Write to this file instead of standard output.
    #[arg(long = ARG_OUTPUT, value_name = "path")]
    #[serde(default)]
    pub(crate) output: Option<Utf8PathBuf>,
}

impl StandingsArgs {
    fn into_config(self) -> Result<StandingsConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        StandingsConfig::try_from(merged)
    }
}

/// Resolved `standings` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct StandingsConfig {
    pub(crate) database: Utf8PathBuf,
    pub(crate) classification: u32,
    pub(crate) wikipedia: String,
    pub(crate) format: OutputFormat,
    pub(crate) output: Option<Utf8PathBuf>,
}

impl TryFrom<StandingsArgs> for StandingsConfig {
    type Error = CliError;

    fn try_from(args: StandingsArgs) -> Result<Self, Self::Error> {
        let database = args.database.ok_or(CliError::MissingArgument {
            field: ARG_DATABASE,
            env: ENV_STANDINGS_DATABASE,
        })?;
        let classification = args.classification.ok_or(CliError::MissingArgument {
            field: ARG_CLASSIFICATION,
            env: ENV_STANDINGS_CLASSIFICATION,
        })?;
        Ok(Self {
            database,
            classification,
            wikipedia: args
                .wikipedia
                .unwrap_or_else(|| DEFAULT_WIKIPEDIA.to_owned()),
            format: args.format.unwrap_or_default(),
            output: args.output,
        })
    }
}

/// Standings written by `--format json`.
#[derive(Debug, Serialize)]
struct StandingsReport<'a> {
    classification: &'a Classification,
    summary: ClassificationSummary,
    standings: &'a [Standing],
}

pub(crate) fn run_standings_with(
    args: StandingsArgs,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = args.into_config()?;
    let source = open_database(&config.database)?;
    match &config.output {
        Some(path) => {
            let mut file = create_output(path)?;
            write_standings(&source, &config, &mut file)?;
            info!("wrote standings to {path}");
            Ok(())
        }
        None => write_standings(&source, &config, writer),
    }
}

fn create_output(path: &Utf8Path) -> Result<impl Write, CliError> {
    wikistandings_fs::create_file(path).map_err(|source| CliError::CreateOutput {
        path: path.to_path_buf(),
        source,
    })
}

/// Assemble the configured classification's standings and write them in the
/// configured format.
pub(crate) fn write_standings<S>(
    source: &S,
    config: &StandingsConfig,
    writer: &mut dyn Write,
) -> Result<(), CliError>
where
    S: RecordSource + Catalogue,
{
    let classification_id = config.classification;
    let classification = source
        .classification(classification_id)
        .map_err(CliError::store("look up classification"))?
        .ok_or(CliError::UnknownClassification {
            id: classification_id,
        })?;
    let wikipedia = source
        .wikipedia(&config.wikipedia)
        .map_err(CliError::store("look up Wikipedia version"))?
        .ok_or_else(|| CliError::UnknownWikipedia {
            code: config.wikipedia.clone(),
        })?;
    let entities = source
        .entities(&classification, wikipedia.id())
        .map_err(CliError::store("list entities"))?;

    let engine = ResultsEngine::new(source);
    let standings = engine
        .standings(classification_id, entities)
        .map_err(CliError::engine(classification_id))?;
    let summary = engine
        .summarize(classification_id)
        .map_err(CliError::engine(classification_id))?;
    info!(
        "assembled {} standings for {} {} after {} races",
        standings.len(),
        classification.season(),
        classification.title(),
        summary.races_held
    );

    let payload = match config.format {
        OutputFormat::Wikitable => {
            let abbreviations = source
                .abbreviations(wikipedia.id())
                .map_err(CliError::store("list abbreviations"))?;
            let markup = Markup::for_wikipedia(wikipedia.code());
            render_standings(&standings, &summary, &abbreviations, markup)
        }
        OutputFormat::Json => {
            let report = StandingsReport {
                classification: &classification,
                summary,
                standings: &standings,
            };
            let mut json =
                serde_json::to_string_pretty(&report).map_err(CliError::SerialiseStandings)?;
            json.push('\n');
            json
        }
    };
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteOutput)
}
