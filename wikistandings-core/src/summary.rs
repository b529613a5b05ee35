//! Aggregate facts about a classification.

use crate::{ClassificationMeta, ClassificationType};

/// Facts derived from a classification's stored scores and metadata.
///
/// A classification with no metadata or no scores summarises to zeros
/// rather than failing; "no data yet" is not bad input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClassificationSummary {
    /// Highest round with a stored score.
    pub races_held: u32,
    /// Races configured for the season.
    pub races_configured: u32,
    /// Cars per manufacturer eligible to score. Only set for manufacturers'
    /// classifications that configure it.
    pub scoring_cars: Option<u32>,
}

impl ClassificationSummary {
    /// Combine the highest stored round with the classification's metadata.
    ///
    /// # Examples
    /// ```
    /// use wikistandings_core::{ClassificationMeta, ClassificationSummary, ClassificationType};
    ///
    /// let meta = ClassificationMeta {
    ///     races_configured: 8,
    ///     kind: ClassificationType::Manufacturers,
    ///     scoring_cars: Some(2),
    /// };
    /// let summary = ClassificationSummary::from_parts(3, Some(meta));
    /// assert_eq!(summary.races_held, 3);
    /// assert_eq!(summary.scoring_cars, Some(2));
    ///
    /// assert_eq!(ClassificationSummary::from_parts(0, None), ClassificationSummary::default());
    /// ```
    #[must_use]
    pub fn from_parts(max_round: u32, meta: Option<ClassificationMeta>) -> Self {
        let Some(meta) = meta else {
            return Self {
                races_held: max_round,
                ..Self::default()
            };
        };
        let scoring_cars = match meta.kind {
            ClassificationType::Manufacturers => meta.scoring_cars,
            ClassificationType::Drivers | ClassificationType::Teams => None,
        };
        Self {
            races_held: max_round,
            races_configured: meta.races_configured,
            scoring_cars,
        }
    }

    /// Number of result rows each entity spans in a rendered table.
    ///
    /// One, unless a manufacturers' classification lets several cars score.
    #[must_use]
    pub fn rows_per_entity(&self) -> u32 {
        self.scoring_cars.unwrap_or(1).max(1)
    }

    /// Number of round columns a table needs: every configured race, and at
    /// least every round already held.
    #[must_use]
    pub fn round_columns(&self) -> u32 {
        self.races_configured.max(self.races_held)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn meta(kind: ClassificationType, scoring_cars: Option<u32>) -> ClassificationMeta {
        ClassificationMeta {
            races_configured: 6,
            kind,
            scoring_cars,
        }
    }

    #[rstest]
    #[case(ClassificationType::Drivers)]
    #[case(ClassificationType::Teams)]
    fn scoring_cars_only_for_manufacturers(#[case] kind: ClassificationType) {
        let summary = ClassificationSummary::from_parts(2, Some(meta(kind, Some(2))));
        assert_eq!(summary.scoring_cars, None);
        assert_eq!(summary.rows_per_entity(), 1);
    }

    #[rstest]
    fn manufacturers_keep_scoring_cars_verbatim() {
        let summary = ClassificationSummary::from_parts(
            2,
            Some(meta(ClassificationType::Manufacturers, Some(3))),
        );
        assert_eq!(summary.scoring_cars, Some(3));
        assert_eq!(summary.rows_per_entity(), 3);
    }

    #[rstest]
    fn zero_scoring_cars_still_render_one_row() {
        let summary = ClassificationSummary::from_parts(
            2,
            Some(meta(ClassificationType::Manufacturers, Some(0))),
        );
        assert_eq!(summary.rows_per_entity(), 1);
    }

    #[rstest]
    fn unknown_classification_summarises_to_zero() {
        let summary = ClassificationSummary::from_parts(0, None);
        assert_eq!(summary.races_held, 0);
        assert_eq!(summary.races_configured, 0);
        assert_eq!(summary.scoring_cars, None);
    }

    #[rstest]
    #[case(3, 6, 6)]
    #[case(7, 6, 7)]
    fn round_columns_cover_held_rounds(
        #[case] held: u32,
        #[case] configured: u32,
        #[case] expected: u32,
    ) {
        let summary = ClassificationSummary {
            races_held: held,
            races_configured: configured,
            scoring_cars: None,
        };
        assert_eq!(summary.round_columns(), expected);
    }
}
