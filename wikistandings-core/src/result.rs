//! Raw score rows and consolidated round results.

use crate::error::{ValidationError, non_blank};
use crate::{RawStyle, ResultStyle, Session};

/// A score row exactly as supplied by the record source.
///
/// Fields are left uninterpreted; [`crate::consolidate_rows`] validates them
/// and rejects the whole sequence when one row is malformed.
#[derive(Debug, Clone, PartialEq)]
pub struct RawScoreRow {
    /// Round number as stored.
    pub round: i64,
    /// Session name as stored, e.g. `RACE`.
    pub session: String,
    /// Place text, e.g. `1` or `DNF`.
    pub place: String,
    /// Points awarded.
    pub points: f64,
    /// Styling attached to the row.
    pub style: RawStyle,
}

/// One entity's result in one session of a round.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoundResult {
    round: u32,
    session: Session,
    place: String,
    points: f64,
    style: ResultStyle,
}

impl RoundResult {
    /// Validate and construct a [`RoundResult`].
    ///
    /// # Errors
    /// Returns [`ValidationError`] when `round` is zero, `place` is blank or
    /// `points` is negative or not finite.
    pub fn new(
        round: u32,
        session: Session,
        place: &str,
        points: f64,
        style: ResultStyle,
    ) -> Result<Self, ValidationError> {
        if round == 0 {
            return Err(ValidationError::NonPositiveId {
                field: "round number",
                value: 0,
            });
        }
        if !points.is_finite() || points < 0.0 {
            return Err(ValidationError::InvalidNumber { field: "points" });
        }
        Ok(Self {
            round,
            session,
            place: non_blank("place", place)?.trim().to_owned(),
            points,
            style,
        })
    }

    /// Round number, starting at 1.
    #[must_use]
    pub const fn round(&self) -> u32 {
        self.round
    }

    /// Session the result was scored in.
    #[must_use]
    pub const fn session(&self) -> Session {
        self.session
    }

    /// Report whether this is a qualifying result.
    #[must_use]
    pub const fn is_qualifying(&self) -> bool {
        self.session.is_qualifying()
    }

    /// Place text.
    #[must_use]
    pub fn place(&self) -> &str {
        &self.place
    }

    /// Points awarded.
    #[must_use]
    pub const fn points(&self) -> f64 {
        self.points
    }

    /// Resolved styling.
    #[must_use]
    pub const fn style(&self) -> &ResultStyle {
        &self.style
    }
}
