//! Ranking of consolidated results into classification standings.

use std::cmp::Ordering;

use crate::{Entity, RoundResult};

/// One entity's line in a classification.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Standing {
    /// Position in the classification, starting at 1.
    pub position: u32,
    /// The ranked entity.
    pub entity: Entity,
    /// Consolidated results, one per race row.
    pub results: Vec<RoundResult>,
    /// Sum of the results' points.
    pub points: f64,
}

/// Total the points of a consolidated result sequence. An empty sequence
/// totals positive zero.
#[expect(
    clippy::float_arithmetic,
    reason = "points are fractional when half points are awarded"
)]
#[must_use]
pub fn total_points(results: &[RoundResult]) -> f64 {
    results
        .iter()
        .map(RoundResult::points)
        .fold(0.0, |total, points| total + points)
}

/// Rank entities by their consolidated results.
///
/// Entities are ordered by total points, highest first; equal totals keep
/// the input order. Positions are dense: an entity shares the position above
/// only when both its points and its results equal those of the entity
/// ranked directly before it.
#[must_use]
pub fn assemble_standings(entries: Vec<(Entity, Vec<RoundResult>)>) -> Vec<Standing> {
    let mut totalled: Vec<_> = entries
        .into_iter()
        .map(|(entity, results)| {
            let points = total_points(&results);
            (entity, results, points)
        })
        .collect();
    totalled.sort_by(|left, right| right.2.total_cmp(&left.2));

    let mut standings: Vec<Standing> = Vec::with_capacity(totalled.len());
    for (entity, results, points) in totalled {
        let position = match standings.last() {
            None => 1,
            Some(previous) if ties(previous, points, &results) => previous.position,
            Some(previous) => previous.position.saturating_add(1),
        };
        standings.push(Standing {
            position,
            entity,
            results,
            points,
        });
    }
    standings
}

fn ties(previous: &Standing, points: f64, results: &[RoundResult]) -> bool {
    previous.points.total_cmp(&points) == Ordering::Equal && previous.results == results
}
