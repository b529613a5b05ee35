//! Participants scored within a classification.

use crate::ClassificationType;
use crate::error::{ValidationError, count, non_blank, positive_id};

/// Attributes shared by every kind of entity.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntityProfile {
    id: u32,
    codename: String,
    flag: String,
    article_link: String,
}

impl EntityProfile {
    /// Validate and construct an [`EntityProfile`].
    ///
    /// # Errors
    /// Returns [`ValidationError`] when `id` is not positive or any text field
    /// is blank.
    pub fn new(
        id: i64,
        codename: &str,
        flag: &str,
        article_link: &str,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            id: positive_id("entity id", id)?,
            codename: non_blank("codename", codename)?,
            flag: non_blank("flag", flag)?,
            article_link: non_blank("article link", article_link)?,
        })
    }

    /// Identifier, unique within the entity's kind.
    #[must_use]
    pub const fn id(&self) -> u32 {
        self.id
    }

    /// Internal short name used by the database.
    #[must_use]
    pub fn codename(&self) -> &str {
        &self.codename
    }

    /// Flag or nationality code, e.g. `GBR`.
    #[must_use]
    pub fn flag(&self) -> &str {
        &self.flag
    }

    /// Wiki link markup for the entity's article.
    #[must_use]
    pub fn article_link(&self) -> &str {
        &self.article_link
    }
}

/// A driver, manufacturer or team.
///
/// Callers only need to match on the variant for kind-specific data such as
/// a team's car number; everything else is on [`Entity::profile`].
///
/// # Examples
/// ```
/// use wikistandings_core::{Entity, EntityProfile};
///
/// # fn main() -> Result<(), wikistandings_core::ValidationError> {
/// let profile = EntityProfile::new(5, "TOYOTA_7", "JPN", "[[Toyota Gazoo Racing]]")?;
/// let team = Entity::team(profile, 7)?;
/// assert_eq!(team.car_number(), Some(7));
/// assert_eq!(team.profile().flag(), "JPN");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum Entity {
    /// A driver.
    Driver {
        /// Shared attributes.
        profile: EntityProfile,
    },
    /// A car manufacturer.
    Manufacturer {
        /// Shared attributes.
        profile: EntityProfile,
    },
    /// A team entry, identified by its car.
    Team {
        /// Shared attributes.
        profile: EntityProfile,
        /// Number carried by the team's car.
        car_number: u32,
    },
}

impl Entity {
    /// Wrap a profile as a driver.
    #[must_use]
    pub const fn driver(profile: EntityProfile) -> Self {
        Self::Driver { profile }
    }

    /// Wrap a profile as a manufacturer.
    #[must_use]
    pub const fn manufacturer(profile: EntityProfile) -> Self {
        Self::Manufacturer { profile }
    }

    /// Wrap a profile as a team with its car number.
    ///
    /// # Errors
    /// Returns [`ValidationError`] when `car_number` is negative or too large.
    pub fn team(profile: EntityProfile, car_number: i64) -> Result<Self, ValidationError> {
        Ok(Self::Team {
            profile,
            car_number: count("car number", car_number)?,
        })
    }

    /// Attributes shared by all entity kinds.
    #[must_use]
    pub const fn profile(&self) -> &EntityProfile {
        match self {
            Self::Driver { profile } | Self::Manufacturer { profile } | Self::Team { profile, .. } => {
                profile
            }
        }
    }

    /// Shorthand for `self.profile().id()`.
    #[must_use]
    pub const fn id(&self) -> u32 {
        self.profile().id()
    }

    /// Classification type that ranks this kind of entity.
    #[must_use]
    pub const fn kind(&self) -> ClassificationType {
        match self {
            Self::Driver { .. } => ClassificationType::Drivers,
            Self::Manufacturer { .. } => ClassificationType::Manufacturers,
            Self::Team { .. } => ClassificationType::Teams,
        }
    }

    /// Car number for teams; `None` for other kinds.
    #[must_use]
    pub const fn car_number(&self) -> Option<u32> {
        match self {
            Self::Team { car_number, .. } => Some(*car_number),
            Self::Driver { .. } | Self::Manufacturer { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn profile() -> EntityProfile {
        EntityProfile::new(12, "BUEMI", "SUI", "[[Sébastien Buemi]]").expect("valid profile")
    }

    #[rstest]
    fn kinds_follow_variants(profile: EntityProfile) {
        assert_eq!(Entity::driver(profile.clone()).kind(), ClassificationType::Drivers);
        assert_eq!(
            Entity::manufacturer(profile.clone()).kind(),
            ClassificationType::Manufacturers
        );
        let team = Entity::team(profile, 8).expect("valid team");
        assert_eq!(team.kind(), ClassificationType::Teams);
    }

    #[rstest]
    fn only_teams_carry_car_numbers(profile: EntityProfile) {
        assert_eq!(Entity::driver(profile.clone()).car_number(), None);
        assert_eq!(Entity::team(profile, 8).expect("team").car_number(), Some(8));
    }

    #[rstest]
    fn rejects_negative_car_number(profile: EntityProfile) {
        let err = Entity::team(profile, -8).expect_err("negative car number");
        assert_eq!(err.field(), "car number");
    }

    #[rstest]
    #[case(0, "BUEMI", "SUI", "[[Buemi]]", "entity id")]
    #[case(1, " ", "SUI", "[[Buemi]]", "codename")]
    #[case(1, "BUEMI", "", "[[Buemi]]", "flag")]
    #[case(1, "BUEMI", "SUI", "", "article link")]
    fn profile_validation_names_field(
        #[case] id: i64,
        #[case] codename: &str,
        #[case] flag: &str,
        #[case] link: &str,
        #[case] field: &str,
    ) {
        let err = EntityProfile::new(id, codename, flag, link).expect_err("invalid profile");
        assert_eq!(err.field(), field);
    }
}
