//! Behaviour-driven step definitions driving the standings CLI scenarios.

use super::helpers::{SEASON_TABLE, SeasonDatabase};
use super::*;
use camino::Utf8PathBuf;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use std::cell::RefCell;

struct StandingsWorld {
    season: SeasonDatabase,
    database: RefCell<Utf8PathBuf>,
    cli_args: RefCell<Vec<String>>,
    output_path: RefCell<Option<Utf8PathBuf>>,
    stdout: RefCell<Vec<u8>>,
    result: RefCell<Option<Result<(), CliError>>>,
}

impl StandingsWorld {
    fn new() -> Self {
        let season = SeasonDatabase::new();
        let database = season.path().to_path_buf();
        Self {
            season,
            database: RefCell::new(database),
            cli_args: RefCell::new(Vec::new()),
            output_path: RefCell::new(None),
            stdout: RefCell::new(Vec::new()),
            result: RefCell::new(None),
        }
    }

    fn build_command_line(&self) -> Vec<String> {
        let mut argv = vec![
            "wikistandings".to_owned(),
            "standings".to_owned(),
            format!("--{ARG_DATABASE}"),
            self.database.borrow().as_str().to_owned(),
        ];
        let args = self.cli_args.borrow();
        if !args.iter().any(|arg| arg == "--classification") {
            argv.extend([format!("--{ARG_CLASSIFICATION}"), "1".to_owned()]);
        }
        argv.extend(args.iter().cloned());
        argv
    }

    fn error(&self) -> std::cell::Ref<'_, CliError> {
        std::cell::Ref::map(self.result.borrow(), |result| {
            result
                .as_ref()
                .expect("result recorded")
                .as_ref()
                .expect_err("expected error")
        })
    }
}

#[fixture]
fn world() -> StandingsWorld {
    StandingsWorld::new()
}

#[given("a seeded championship database")]
fn seeded_database(#[from(world)] world: &StandingsWorld) {
    assert!(world.season.path().is_file());
}

#[given("the database file does not exist")]
fn database_missing(#[from(world)] world: &StandingsWorld) {
    world
        .database
        .replace(world.season.root().join("missing.db"));
}

#[given("I request output to a nested file")]
fn request_nested_output(#[from(world)] world: &StandingsWorld) {
    let path = world.season.root().join("tables/2024/lmp2.txt");
    world
        .cli_args
        .borrow_mut()
        .extend([format!("--{ARG_OUTPUT}"), path.as_str().to_owned()]);
    world.output_path.replace(Some(path));
}

#[given("I request classification 42")]
fn request_unknown_classification(#[from(world)] world: &StandingsWorld) {
    world
        .cli_args
        .borrow_mut()
        .extend([format!("--{ARG_CLASSIFICATION}"), "42".to_owned()]);
}

#[when("I run the standings command")]
fn run_standings_command(#[from(world)] world: &StandingsWorld) {
    let invocation = world.build_command_line();
    let parsed = Cli::try_parse_from(invocation).map_err(CliError::from);
    let outcome = parsed.and_then(|cli| {
        let mut buffer = world.stdout.borrow_mut();
        run_command_with(cli.command, &mut *buffer)
    });
    world.result.replace(Some(outcome));
}

#[then("the command succeeds and prints the points table")]
fn command_prints_table(#[from(world)] world: &StandingsWorld) {
    let borrowed = world.result.borrow();
    let result = borrowed.as_ref().expect("result recorded");
    result.as_ref().expect("expected success");

    let stdout = String::from_utf8(world.stdout.borrow().clone()).expect("stdout utf-8");
    assert_eq!(stdout, SEASON_TABLE);
}

#[then("the points table is written to the file")]
fn table_written_to_file(#[from(world)] world: &StandingsWorld) {
    let borrowed = world.result.borrow();
    borrowed
        .as_ref()
        .expect("result recorded")
        .as_ref()
        .expect("expected success");

    assert!(world.stdout.borrow().is_empty());
    let path = world.output_path.borrow().clone().expect("output path");
    let written = std::fs::read_to_string(path).expect("read output file");
    assert_eq!(written, SEASON_TABLE);
}

#[then("the command fails because the database is missing")]
fn command_fails_missing_database(#[from(world)] world: &StandingsWorld) {
    match &*world.error() {
        CliError::MissingSourceFile { field, .. } => assert_eq!(*field, ARG_DATABASE),
        other => panic!("expected MissingSourceFile, found {other:?}"),
    }
}

#[then("the command fails because the classification is unknown")]
fn command_fails_unknown_classification(#[from(world)] world: &StandingsWorld) {
    match &*world.error() {
        CliError::UnknownClassification { id } => assert_eq!(*id, 42),
        other => panic!("expected UnknownClassification, found {other:?}"),
    }
}

macro_rules! register_standings_scenario {
    ($fn_name:ident, $scenario_title:literal) => {
        #[scenario(path = "tests/features/standings_command.feature", name = $scenario_title)]
        fn $fn_name(#[from(world)] world: StandingsWorld) {
            let _ = world;
        }
    };
}

register_standings_scenario!(standings_happy_path, "rendering a drivers' table");
register_standings_scenario!(standings_to_file, "writing standings to a file");
register_standings_scenario!(standings_missing_database, "rejecting a missing database");
register_standings_scenario!(
    standings_unknown_classification,
    "rejecting an unknown classification"
);
