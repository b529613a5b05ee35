//! Behavioural tests for results consolidation using rstest-bdd.

use std::cell::RefCell;

use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use wikistandings_core::{
    ClassificationSummary, ConsolidationError, EngineError, MalformedReason, RawScoreRow,
    RawStyle, ResultsEngine, RoundResult, test_support::MemorySource,
};

const ENTITY: u32 = 4;
const CLASSIFICATION: u32 = 2;

type Outcome = Result<Vec<RoundResult>, EngineError<std::convert::Infallible>>;

/// Rows collected by the given steps and the outcome of the when steps.
#[derive(Debug, Default)]
struct ConsolidationWorld {
    rows: RefCell<Vec<RawScoreRow>>,
    outcome: RefCell<Option<Outcome>>,
    summary: RefCell<Option<ClassificationSummary>>,
}

impl ConsolidationWorld {
    fn store_rows(&self, rows: Vec<RawScoreRow>) {
        self.rows.borrow_mut().extend(rows);
    }

    fn source(&self) -> MemorySource {
        let mut source = MemorySource::default();
        let rows = self.rows.borrow().clone();
        if !rows.is_empty() {
            source.insert_rows(ENTITY, CLASSIFICATION, rows);
        }
        source
    }

    fn results(&self) -> Vec<RoundResult> {
        match self.outcome.borrow().as_ref() {
            Some(Ok(results)) => results.clone(),
            Some(Err(err)) => panic!("unexpected consolidation error: {err}"),
            None => panic!("consolidation has not run"),
        }
    }
}

#[fixture]
fn world() -> ConsolidationWorld {
    ConsolidationWorld::default()
}

fn row(round: i64, session: &str, place: &str, points: f64, style_id: i64) -> RawScoreRow {
    RawScoreRow {
        round,
        session: session.to_owned(),
        place: place.to_owned(),
        points,
        style: RawStyle {
            id: style_id,
            background: format!("#{:06X}", style_id * 1000),
            text_colour: Some("000000".to_owned()),
            bold: false,
        },
    }
}

#[given("an entity with a pole position and a race result in round 1")]
fn given_pole_and_race(world: &ConsolidationWorld) {
    world.store_rows(vec![
        row(1, "QUALIFYING", "1", 0.0, 1),
        row(1, "RACE", "3", 4.0, 2),
    ]);
}

#[given("a plain race result in round 2")]
fn given_plain_race(world: &ConsolidationWorld) {
    world.store_rows(vec![row(2, "RACE", "1", 10.0, 3)]);
}

#[given("an entity with a pole position in round 3 and no race that round")]
fn given_lonely_pole(world: &ConsolidationWorld) {
    world.store_rows(vec![row(3, "QUALIFYING", "1", 0.0, 1)]);
}

#[given("an entity whose second row is a sprint session")]
fn given_sprint(world: &ConsolidationWorld) {
    world.store_rows(vec![
        row(1, "RACE", "2", 18.0, 1),
        row(2, "SPRINT", "1", 8.0, 2),
    ]);
}

#[given("a classification without scores or metadata")]
fn given_empty_classification(world: &ConsolidationWorld) {
    world.rows.borrow_mut().clear();
}

#[when("I consolidate the entity's results")]
fn consolidate(world: &ConsolidationWorld) {
    let engine = ResultsEngine::new(world.source());
    world
        .outcome
        .replace(Some(engine.consolidate(ENTITY, CLASSIFICATION)));
}

#[when("I summarise the classification")]
fn summarise(world: &ConsolidationWorld) {
    let engine = ResultsEngine::new(world.source());
    let summary = engine.summarize(CLASSIFICATION).expect("summary");
    world.summary.replace(Some(summary));
}

#[then("two race results are returned")]
fn then_two_results(world: &ConsolidationWorld) {
    let results = world.results();
    assert_eq!(results.len(), 2);
    assert!(results.iter().all(|result| !result.is_qualifying()));
}

#[then("the round 1 result keeps the race place, points and colours")]
fn then_race_fields_kept(world: &ConsolidationWorld) {
    let results = world.results();
    let first = &results[0];
    assert_eq!(first.round(), 1);
    assert_eq!(first.place(), "3");
    assert!((first.points() - 4.0).abs() < f64::EPSILON);
    assert_eq!(first.style().id(), 2);
    assert_eq!(first.style().background(), "0007D0");
}

#[then("only the round 1 result is bold")]
fn then_only_first_bold(world: &ConsolidationWorld) {
    let bold: Vec<_> = world
        .results()
        .iter()
        .map(|result| result.style().is_bold())
        .collect();
    assert_eq!(bold, vec![true, false]);
}

#[then("no results are returned")]
fn then_no_results(world: &ConsolidationWorld) {
    assert!(world.results().is_empty());
}

#[then("consolidation fails with a malformed record at row 1")]
fn then_malformed(world: &ConsolidationWorld) {
    let outcome = world.outcome.borrow();
    let Some(Err(EngineError::Consolidation { source, .. })) = outcome.as_ref() else {
        panic!("expected a consolidation error");
    };
    assert!(matches!(
        source,
        ConsolidationError::MalformedRecord {
            index: 1,
            reason: MalformedReason::UnknownSession(_),
        }
    ));
}

#[then("the summary reports no races held or configured")]
fn then_zero_summary(world: &ConsolidationWorld) {
    let summary = world.summary.borrow();
    assert_eq!(summary.as_ref(), Some(&ClassificationSummary::default()));
}

#[scenario(path = "tests/features/consolidation.feature", index = 0)]
fn pole_turns_race_bold(world: ConsolidationWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/consolidation.feature", index = 1)]
fn lonely_pole_dropped(world: ConsolidationWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/consolidation.feature", index = 2)]
fn unknown_session_rejected(world: ConsolidationWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/consolidation.feature", index = 3)]
fn empty_classification_summary(world: ConsolidationWorld) {
    let _ = world;
}
