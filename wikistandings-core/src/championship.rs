//! Racing series that own classifications.

use crate::error::{ValidationError, non_blank, positive_id};

/// A racing series such as the World Endurance Championship.
///
/// The organiser is only filled in by queries that join it; listings of
/// championships with results leave it empty.
///
/// # Examples
/// ```
/// use wikistandings_core::Championship;
///
/// # fn main() -> Result<(), wikistandings_core::ValidationError> {
/// let wec = Championship::new(1, "FIA World Endurance Championship", Some("ACO"))?;
/// assert_eq!(wec.organiser(), Some("ACO"));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Championship {
    id: u32,
    name: String,
    organiser: Option<String>,
}

impl Championship {
    /// Validate and construct a [`Championship`].
    ///
    /// # Errors
    /// Returns [`ValidationError`] when `id` is not positive or `name` (or a
    /// supplied organiser) is blank.
    pub fn new(id: i64, name: &str, organiser: Option<&str>) -> Result<Self, ValidationError> {
        Ok(Self {
            id: positive_id("championship id", id)?,
            name: non_blank("championship name", name)?,
            organiser: organiser
                .map(|value| non_blank("organiser name", value))
                .transpose()?,
        })
    }

    /// Database identifier.
    #[must_use]
    pub const fn id(&self) -> u32 {
        self.id
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Organiser's name, when the query supplied it.
    #[must_use]
    pub fn organiser(&self) -> Option<&str> {
        self.organiser.as_deref()
    }
}
