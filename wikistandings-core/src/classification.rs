//! Classifications and their metadata.

use thiserror::Error;

use crate::error::{ValidationError, count, non_blank, positive_id};

/// What kind of entity a classification ranks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum ClassificationType {
    /// Drivers' standings.
    Drivers,
    /// Manufacturers' standings.
    Manufacturers,
    /// Teams' standings.
    Teams,
}

/// Error returned when text does not name a classification type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown classification type '{0}'")]
pub struct UnknownClassificationType(pub String);

impl ClassificationType {
    /// Return the type name as stored in the database.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Drivers => "DRIVERS",
            Self::Manufacturers => "MANUFACTURERS",
            Self::Teams => "TEAMS",
        }
    }
}

impl std::fmt::Display for ClassificationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ClassificationType {
    type Err = UnknownClassificationType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "DRIVERS" => Ok(Self::Drivers),
            "MANUFACTURERS" => Ok(Self::Manufacturers),
            "TEAMS" => Ok(Self::Teams),
            _ => Err(UnknownClassificationType(s.to_owned())),
        }
    }
}

/// A scored competition track within a championship season.
///
/// # Examples
/// ```
/// use wikistandings_core::{Classification, ClassificationType};
///
/// # fn main() -> Result<(), wikistandings_core::ValidationError> {
/// let hypercar = Classification::new(
///     7,
///     "Hypercar World Endurance Drivers' Championship",
///     "2024",
///     8,
///     ClassificationType::Drivers,
///     true,
/// )?;
/// assert_eq!(hypercar.races(), 8);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Classification {
    id: u32,
    title: String,
    season: String,
    races: u32,
    kind: ClassificationType,
    active: bool,
}

impl Classification {
    /// Validate and construct a [`Classification`].
    ///
    /// # Errors
    /// Returns [`ValidationError`] when the id is not positive, the race
    /// count is negative, or the title or season is blank.
    pub fn new(
        id: i64,
        title: &str,
        season: &str,
        races: i64,
        kind: ClassificationType,
        active: bool,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            id: positive_id("classification id", id)?,
            title: non_blank("classification title", title)?,
            season: non_blank("season", season)?,
            races: count("races", races)?,
            kind,
            active,
        })
    }

    /// Database identifier.
    #[must_use]
    pub const fn id(&self) -> u32 {
        self.id
    }

    /// Title of the classification.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Season label, e.g. `2023` or `2023-24`.
    #[must_use]
    pub fn season(&self) -> &str {
        &self.season
    }

    /// Number of races configured for the season.
    #[must_use]
    pub const fn races(&self) -> u32 {
        self.races
    }

    /// Type of entity ranked by the classification.
    #[must_use]
    pub const fn kind(&self) -> ClassificationType {
        self.kind
    }

    /// Whether the classification is shown to users.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }
}

/// Metadata needed to summarise a classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassificationMeta {
    /// Number of races configured for the season.
    pub races_configured: u32,
    /// Type of entity ranked by the classification.
    pub kind: ClassificationType,
    /// Cars per manufacturer eligible to score, when configured.
    pub scoring_cars: Option<u32>,
}

impl From<&Classification> for ClassificationMeta {
    fn from(classification: &Classification) -> Self {
        Self {
            races_configured: classification.races(),
            kind: classification.kind(),
            scoring_cars: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn classification() -> Classification {
        Classification::new(2, "LMGT3", "2024", 8, ClassificationType::Teams, true)
            .expect("valid classification")
    }

    #[rstest]
    #[case("drivers", ClassificationType::Drivers)]
    #[case("MANUFACTURERS", ClassificationType::Manufacturers)]
    #[case("Teams", ClassificationType::Teams)]
    fn parses_types(#[case] text: &str, #[case] expected: ClassificationType) {
        assert_eq!(text.parse::<ClassificationType>(), Ok(expected));
    }

    #[rstest]
    fn rejects_unknown_type() {
        assert!("CONSTRUCTORS".parse::<ClassificationType>().is_err());
    }

    #[rstest]
    fn rejects_negative_race_count() {
        let err = Classification::new(2, "LMGT3", "2024", -1, ClassificationType::Teams, true)
            .expect_err("negative races");
        assert_eq!(err.field(), "races");
    }

    #[rstest]
    fn accepts_zero_races() {
        assert!(
            Classification::new(2, "LMGT3", "2024", 0, ClassificationType::Teams, false).is_ok()
        );
    }

    #[rstest]
    fn meta_copies_configured_races(classification: Classification) {
        let meta = ClassificationMeta::from(&classification);
        assert_eq!(meta.races_configured, 8);
        assert_eq!(meta.kind, ClassificationType::Teams);
        assert_eq!(meta.scoring_cars, None);
    }
}
