//! Merge raw score rows into one display-ready result per round.
//!
//! Only pole positions are stored for qualifying, and only so the race result
//! that follows can be shown in bold. Consolidation therefore never emits a
//! qualifying result: a qualifying row immediately followed by the race of the
//! same round turns that race result bold, and is otherwise discarded.
//!
//! The scan relies on the record source ordering rows by round and placing
//! qualifying before the race. Nothing is sorted here; when a race row comes
//! before the qualifying row of its round the merge does not apply.

use log::{debug, warn};
use thiserror::Error;

use crate::error::{ErrorKind, ValidationError};
use crate::{RawScoreRow, RoundResult, Session, UnknownSession, resolve_style};

/// Errors returned by [`consolidate_rows`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConsolidationError {
    /// A raw row could not be interpreted. No results are returned.
    #[error("malformed record at row {index}: {reason}")]
    MalformedRecord {
        /// Zero-based position of the row in the input sequence.
        index: usize,
        /// Why the row was rejected.
        #[source]
        reason: MalformedReason,
    },
}

impl ConsolidationError {
    /// Every consolidation failure is a malformed record.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        ErrorKind::MalformedRecord
    }
}

/// Why a raw row was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedReason {
    /// The session name is neither qualifying nor race.
    #[error(transparent)]
    UnknownSession(#[from] UnknownSession),
    /// The round number is below 1 or too large.
    #[error("round number {0} is out of range")]
    RoundOutOfRange(i64),
    /// A field failed domain validation.
    #[error(transparent)]
    InvalidField(#[from] ValidationError),
}

/// Fold state carried through the scan.
#[derive(Debug, Default)]
struct MergeState {
    emitted: Vec<RoundResult>,
    previous: Option<(u32, Session)>,
}

impl MergeState {
    fn step(mut self, row: &RawScoreRow) -> Result<Self, MalformedReason> {
        let session: Session = row.session.parse()?;
        let round = u32::try_from(row.round)
            .ok()
            .filter(|round| *round > 0)
            .ok_or(MalformedReason::RoundOutOfRange(row.round))?;

        let merged =
            session == Session::Race && self.previous == Some((round, Session::Qualifying));
        if let Some((pole_round, Session::Qualifying)) = self.previous
            && !merged
        {
            warn!("dropping pole position in round {pole_round}: no race result follows it");
        }

        let style = resolve_style(&row.style, merged.then_some(true))?;
        let result = RoundResult::new(round, session, &row.place, row.points, style)?;
        if session == Session::Race {
            self.emitted.push(result);
        }
        self.previous = Some((round, session));
        Ok(self)
    }

    fn finish(self) -> Vec<RoundResult> {
        if let Some((round, Session::Qualifying)) = self.previous {
            warn!("dropping pole position in round {round}: no race result follows it");
        }
        self.emitted
    }
}

/// Consolidate one entity's raw rows for one classification.
///
/// Rows must be ordered by round and, within a round, qualifying before race.
/// The result holds one entry per race row, in input order; a race that
/// directly follows a qualifying row of the same round is forced bold.
///
/// The function is pure: calling it twice on the same rows yields equal
/// output.
///
/// # Errors
/// Returns [`ConsolidationError::MalformedRecord`] for the first row with an
/// unknown session, a round below 1, or a field that fails validation. No
/// partial output is returned.
///
/// # Examples
/// ```
/// use wikistandings_core::{RawScoreRow, RawStyle, consolidate_rows};
///
/// # fn main() -> Result<(), wikistandings_core::ConsolidationError> {
/// let style = |id| RawStyle {
///     id,
///     background: "FFFFBF".into(),
///     text_colour: None,
///     bold: false,
/// };
/// let rows = [
///     RawScoreRow { round: 1, session: "QUALIFYING".into(), place: "1".into(), points: 0.0, style: style(1) },
///     RawScoreRow { round: 1, session: "RACE".into(), place: "3".into(), points: 4.0, style: style(2) },
/// ];
/// let results = consolidate_rows(&rows)?;
/// assert_eq!(results.len(), 1);
/// assert!(results[0].style().is_bold());
/// # Ok(())
/// # }
/// ```
pub fn consolidate_rows<'a, I>(rows: I) -> Result<Vec<RoundResult>, ConsolidationError>
where
    I: IntoIterator<Item = &'a RawScoreRow>,
{
    let state = rows
        .into_iter()
        .enumerate()
        .try_fold(MergeState::default(), |state, (index, row)| {
            state
                .step(row)
                .map_err(|reason| ConsolidationError::MalformedRecord { index, reason })
        })?;
    let results = state.finish();
    debug!("consolidated {} round results", results.len());
    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RawStyle;
    use rstest::{fixture, rstest};

    fn style(id: i64, bold: bool) -> RawStyle {
        RawStyle {
            id,
            background: format!("{id:06X}"),
            text_colour: None,
            bold,
        }
    }

    fn row(round: i64, session: &str, place: &str, points: f64, style: RawStyle) -> RawScoreRow {
        RawScoreRow {
            round,
            session: session.to_owned(),
            place: place.to_owned(),
            points,
            style,
        }
    }

    #[fixture]
    fn pole_then_wins() -> Vec<RawScoreRow> {
        vec![
            row(1, "QUALIFYING", "1", 0.0, style(10, false)),
            row(1, "RACE", "3", 4.0, style(11, false)),
            row(2, "RACE", "1", 10.0, style(12, false)),
        ]
    }

    #[rstest]
    fn merges_pole_into_following_race(pole_then_wins: Vec<RawScoreRow>) {
        let results = consolidate_rows(&pole_then_wins).expect("valid rows");

        assert_eq!(results.len(), 2);
        let first = &results[0];
        assert_eq!(first.round(), 1);
        assert_eq!(first.place(), "3");
        assert_eq!(first.points(), 4.0);
        assert_eq!(first.session(), Session::Race);
        assert_eq!(first.style().background(), "00000B");
        assert!(first.style().is_bold());

        let second = &results[1];
        assert_eq!(second.round(), 2);
        assert_eq!(second.place(), "1");
        assert_eq!(second.style().background(), "00000C");
        assert!(!second.style().is_bold());
    }

    #[rstest]
    fn race_only_rounds_pass_through_unchanged() {
        let rows = vec![
            row(1, "RACE", "2", 18.0, style(1, false)),
            row(2, "RACE", "5", 10.0, style(2, true)),
            row(3, "RACE", "DNF", 0.0, style(3, false)),
        ];
        let results = consolidate_rows(&rows).expect("valid rows");
        let bold: Vec<_> = results.iter().map(|r| r.style().is_bold()).collect();
        assert_eq!(bold, vec![false, true, false]);
        let rounds: Vec<_> = results.iter().map(RoundResult::round).collect();
        assert_eq!(rounds, vec![1, 2, 3]);
    }

    #[rstest]
    fn drops_qualifying_without_race() {
        let rows = vec![
            row(1, "RACE", "4", 12.0, style(1, false)),
            row(2, "QUALIFYING", "1", 1.0, style(2, false)),
            row(3, "RACE", "1", 25.0, style(3, false)),
        ];
        let results = consolidate_rows(&rows).expect("valid rows");
        let rounds: Vec<_> = results.iter().map(RoundResult::round).collect();
        assert_eq!(rounds, vec![1, 3]);
        assert!(!results[1].style().is_bold());
    }

    #[rstest]
    fn trailing_qualifying_is_dropped() {
        let rows = vec![row(4, "QUALIFYING", "1", 0.0, style(1, false))];
        assert!(consolidate_rows(&rows).expect("valid rows").is_empty());
    }

    #[rstest]
    fn race_before_qualifying_is_not_merged() {
        let rows = vec![
            row(1, "RACE", "2", 18.0, style(1, false)),
            row(1, "QUALIFYING", "1", 0.0, style(2, false)),
        ];
        let results = consolidate_rows(&rows).expect("valid rows");
        assert_eq!(results.len(), 1);
        assert!(!results[0].style().is_bold());
    }

    #[rstest]
    fn qualifying_of_other_round_does_not_merge() {
        let rows = vec![
            row(1, "QUALIFYING", "1", 0.0, style(1, false)),
            row(2, "RACE", "1", 25.0, style(2, false)),
        ];
        let results = consolidate_rows(&rows).expect("valid rows");
        assert!(!results[0].style().is_bold());
    }

    #[rstest]
    fn rejects_unknown_session() {
        let rows = vec![
            row(1, "RACE", "1", 25.0, style(1, false)),
            row(2, "SPRINT", "1", 8.0, style(2, false)),
        ];
        let err = consolidate_rows(&rows).expect_err("sprint is not a session");
        assert_eq!(
            err,
            ConsolidationError::MalformedRecord {
                index: 1,
                reason: MalformedReason::UnknownSession(UnknownSession("SPRINT".into())),
            }
        );
        assert_eq!(err.kind(), ErrorKind::MalformedRecord);
    }

    #[rstest]
    #[case(0)]
    #[case(-2)]
    fn rejects_rounds_below_one(#[case] round: i64) {
        let rows = vec![row(round, "RACE", "1", 25.0, style(1, false))];
        let err = consolidate_rows(&rows).expect_err("bad round");
        assert_eq!(
            err,
            ConsolidationError::MalformedRecord {
                index: 0,
                reason: MalformedReason::RoundOutOfRange(round),
            }
        );
    }

    #[rstest]
    fn malformed_qualifying_row_still_fails() {
        let rows = vec![
            row(1, "QUALIFYING", " ", 0.0, style(1, false)),
            row(1, "RACE", "1", 25.0, style(2, false)),
        ];
        let err = consolidate_rows(&rows).expect_err("blank place");
        assert!(matches!(
            err,
            ConsolidationError::MalformedRecord {
                index: 0,
                reason: MalformedReason::InvalidField(_),
            }
        ));
    }

    #[rstest]
    fn consolidation_is_idempotent(pole_then_wins: Vec<RawScoreRow>) {
        let first = consolidate_rows(&pole_then_wins).expect("valid rows");
        let second = consolidate_rows(&pole_then_wins).expect("valid rows");
        assert_eq!(first, second);
    }

    #[rstest]
    fn empty_input_yields_no_results() {
        assert!(
            consolidate_rows(&Vec::<RawScoreRow>::new())
                .expect("empty input")
                .is_empty()
        );
    }
}
