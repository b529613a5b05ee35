//! Sessions of a race weekend.
//!
//! Only two sessions are stored: the race itself and, for the pole sitter
//! only, qualifying.
//!
//! # Examples
//! ```
//! use wikistandings_core::Session;
//!
//! assert_eq!("race".parse::<Session>(), Ok(Session::Race));
//! assert_eq!(Session::Qualifying.as_str(), "QUALIFYING");
//! assert!(Session::Qualifying < Session::Race);
//! ```

use thiserror::Error;

/// Session in which a result was scored.
///
/// The derived ordering places qualifying before the race of the same round,
/// matching the order in which the record source must supply rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum Session {
    /// Qualifying; only pole positions are recorded.
    Qualifying,
    /// The race.
    Race,
}

/// Error returned when text does not name a known session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown session '{0}'")]
pub struct UnknownSession(pub String);

impl Session {
    /// Return the session name as stored in the database.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Qualifying => "QUALIFYING",
            Self::Race => "RACE",
        }
    }

    /// Report whether this is the qualifying session.
    #[must_use]
    pub const fn is_qualifying(self) -> bool {
        matches!(self, Self::Qualifying)
    }
}

impl std::fmt::Display for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Session {
    type Err = UnknownSession;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "QUALIFYING" => Ok(Self::Qualifying),
            "RACE" => Ok(Self::Race),
            _ => Err(UnknownSession(s.to_owned())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("QUALIFYING", Session::Qualifying)]
    #[case("qualifying", Session::Qualifying)]
    #[case(" Race ", Session::Race)]
    fn parses_case_insensitively(#[case] text: &str, #[case] expected: Session) {
        assert_eq!(text.parse::<Session>(), Ok(expected));
    }

    #[rstest]
    #[case("SPRINT")]
    #[case("")]
    #[case("FP1")]
    fn rejects_unknown_sessions(#[case] text: &str) {
        let err = text.parse::<Session>().unwrap_err();
        assert_eq!(err, UnknownSession(text.to_owned()));
    }

    #[test]
    fn display_matches_as_str() {
        assert_eq!(Session::Race.to_string(), Session::Race.as_str());
    }
}
