//! Focused unit tests covering CLI configuration and database validation.

use super::helpers::SeasonDatabase;
use super::*;
use crate::catalogue::{ClassificationsArgs, ClassificationsConfig};
use crate::standings::{OutputFormat, StandingsArgs, StandingsConfig};
use crate::summary::{SummaryArgs, SummaryConfig};
use camino::Utf8PathBuf;
use rstest::rstest;

fn expect_missing(err: CliError, field: &str, env_var: &str) {
    match err {
        CliError::MissingArgument {
            field: missing,
            env,
        } => {
            assert_eq!(missing, field);
            assert_eq!(env, env_var);
        }
        other => panic!("expected MissingArgument, found {other:?}"),
    }
}

#[rstest]
#[case(None, Some(3), ARG_DATABASE, ENV_STANDINGS_DATABASE)]
#[case(
    Some(Utf8PathBuf::from("championships.db")),
    None,
    ARG_CLASSIFICATION,
    ENV_STANDINGS_CLASSIFICATION
)]
fn converting_standings_without_required_fields_errors(
    #[case] database: Option<Utf8PathBuf>,
    #[case] classification: Option<u32>,
    #[case] field: &'static str,
    #[case] env_var: &'static str,
) {
    let args = StandingsArgs {
        database,
        classification,
        ..StandingsArgs::default()
    };
    let err = StandingsConfig::try_from(args).expect_err("missing field should error");
    expect_missing(err, field, env_var);
}

#[rstest]
fn standings_config_applies_defaults() {
    let args = StandingsArgs {
        database: Some(Utf8PathBuf::from("championships.db")),
        classification: Some(3),
        ..StandingsArgs::default()
    };
    let config = StandingsConfig::try_from(args).expect("config should build");
    assert_eq!(config.wikipedia, DEFAULT_WIKIPEDIA);
    assert_eq!(config.format, OutputFormat::Wikitable);
    assert_eq!(config.output, None);
}

#[rstest]
fn classifications_require_championship() {
    let args = ClassificationsArgs {
        database: Some(Utf8PathBuf::from("championships.db")),
        championship: None,
    };
    let err = ClassificationsConfig::try_from(args).expect_err("championship is required");
    expect_missing(err, ARG_CHAMPIONSHIP, ENV_CLASSIFICATIONS_CHAMPIONSHIP);
}

#[rstest]
fn summary_requires_database() {
    let args = SummaryArgs {
        database: None,
        classification: Some(1),
    };
    let err = SummaryConfig::try_from(args).expect_err("database is required");
    expect_missing(err, ARG_DATABASE, ENV_SUMMARY_DATABASE);
}

#[rstest]
fn require_database_accepts_files() {
    let season = SeasonDatabase::new();
    require_database(season.path()).expect("seeded database is a file");
}

#[rstest]
fn require_database_reports_missing_files() {
    let season = SeasonDatabase::new();
    let err = require_database(&season.root().join("absent.db")).expect_err("missing file");
    match err {
        CliError::MissingSourceFile { field, .. } => assert_eq!(field, ARG_DATABASE),
        other => panic!("expected MissingSourceFile, found {other:?}"),
    }
}

#[rstest]
fn require_database_rejects_directories() {
    let season = SeasonDatabase::new();
    let err = require_database(season.root()).expect_err("directory is not a database");
    match err {
        CliError::SourcePathNotFile { field, .. } => assert_eq!(field, ARG_DATABASE),
        other => panic!("expected SourcePathNotFile, found {other:?}"),
    }
}

#[rstest]
fn parses_standings_flags() {
    let cli = Cli::try_parse_from([
        "wikistandings",
        "standings",
        "--database",
        "championships.db",
        "--classification",
        "4",
        "--wikipedia",
        "plwiki",
        "--format",
        "json",
    ])
    .expect("arguments should parse");
    match cli.command {
        Command::Standings(args) => {
            assert_eq!(args.classification, Some(4));
            assert_eq!(args.wikipedia.as_deref(), Some("plwiki"));
            assert_eq!(args.format, Some(OutputFormat::Json));
        }
        other => panic!("expected standings command, found {other:?}"),
    }
}

#[rstest]
fn rejects_unknown_format() {
    let err = Cli::try_parse_from([
        "wikistandings",
        "standings",
        "--format",
        "csv",
    ])
    .expect_err("csv is not a format");
    assert_eq!(err.kind(), clap::error::ErrorKind::InvalidValue);
}
