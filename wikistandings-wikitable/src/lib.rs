//! Render championship standings as the body of a Wikipedia points table.
//!
//! The output starts at the first body row separator; the table header with
//! round names is edited by hand on the wiki and is not produced here.
//!
//! # Examples
//! ```
//! use wikistandings_core::{ClassificationSummary, LocalizedAbbreviations};
//! use wikistandings_wikitable::{Markup, render_standings};
//!
//! let summary = ClassificationSummary {
//!     races_held: 0,
//!     races_configured: 2,
//!     scoring_cars: None,
//! };
//! let abbreviations = LocalizedAbbreviations::default();
//! let table = render_standings(&[], &summary, &abbreviations, Markup::English);
//! assert_eq!(table, "|-\n");
//! ```
#![forbid(unsafe_code)]

use log::warn;
use wikistandings_core::{
    ClassificationSummary, Entity, LocalizedAbbreviations, RoundResult, Standing,
};

/// Cell for a held round without a result.
const MISSING_RESULT: &str = "| –";
/// Cell for a round that has not been held yet.
const PENDING_ROUND: &str = "|";
/// Row separator.
const ROW_SEPARATOR: &str = "|-";
/// Significant digits kept when formatting points.
const POINTS_PRECISION: i32 = 6;

/// Template conventions of the target Wikipedia edition.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Markup {
    /// `{{flagicon}}` names with car numbers in their own centred cell.
    #[default]
    English,
    /// `{{Flaga}}` names with the car number inside the name cell.
    Polish,
}

impl Markup {
    /// Pick the markup for a Wikipedia version code such as `plwiki`.
    ///
    /// ```
    /// use wikistandings_wikitable::Markup;
    ///
    /// assert_eq!(Markup::for_wikipedia("plwiki"), Markup::Polish);
    /// assert_eq!(Markup::for_wikipedia("enwiki"), Markup::English);
    /// ```
    #[must_use]
    pub fn for_wikipedia(code: &str) -> Self {
        if code.trim().eq_ignore_ascii_case("plwiki") {
            Self::Polish
        } else {
            Self::English
        }
    }

    const fn flag_template(self) -> &'static str {
        match self {
            Self::English => "flagicon",
            Self::Polish => "Flaga",
        }
    }
}

/// Render the body rows of a points table.
///
/// Each standing spans [`ClassificationSummary::rows_per_entity`] rows, one
/// per scoring car. Standings are rendered in the given order with their
/// precomputed positions.
#[must_use]
pub fn render_standings(
    standings: &[Standing],
    summary: &ClassificationSummary,
    abbreviations: &LocalizedAbbreviations,
    markup: Markup,
) -> String {
    let renderer = Renderer {
        summary,
        abbreviations,
        markup,
    };
    let mut lines = vec![ROW_SEPARATOR.to_owned()];
    for standing in standings {
        renderer.push_standing(&mut lines, standing);
    }
    let mut table = lines.join("\n");
    table.push('\n');
    table
}

/// Format points with six significant digits and no trailing zeros.
///
/// Very large or very small totals switch to exponent notation, as printf's
/// `%g` does.
///
/// ```
/// use wikistandings_wikitable::format_points;
///
/// assert_eq!(format_points(25.0), "25");
/// assert_eq!(format_points(12.5), "12.5");
/// assert_eq!(format_points(0.300_000_000_000_000_04), "0.3");
/// ```
#[must_use]
pub fn format_points(points: f64) -> String {
    let scientific = format!("{:.*e}", digits_after_point(0), points);
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return scientific;
    };
    let exponent: i32 = exponent.parse().unwrap_or_default();
    if (-4..POINTS_PRECISION).contains(&exponent) {
        let fixed = format!("{:.*}", digits_after_point(exponent), points);
        trim_fraction(&fixed).to_owned()
    } else {
        format!("{}e{exponent:+03}", trim_fraction(mantissa))
    }
}

fn digits_after_point(exponent: i32) -> usize {
    usize::try_from(POINTS_PRECISION - 1 - exponent).unwrap_or_default()
}

fn trim_fraction(number: &str) -> &str {
    if number.contains('.') {
        number.trim_end_matches('0').trim_end_matches('.')
    } else {
        number
    }
}

struct Renderer<'a> {
    summary: &'a ClassificationSummary,
    abbreviations: &'a LocalizedAbbreviations,
    markup: Markup,
}

impl Renderer<'_> {
    fn push_standing(&self, lines: &mut Vec<String>, standing: &Standing) {
        let rows = self.summary.rows_per_entity();
        let points = format_points(standing.points);
        let (position_cell, name_prefix, points_cell) = if rows == 1 {
            (
                format!("! {}", standing.position),
                r#"| align="left""#.to_owned(),
                format!("! {points}"),
            )
        } else {
            (
                format!(r#"! rowspan="{rows}" | {}"#, standing.position),
                format!(r#"| align="left" rowspan="{rows}""#),
                format!(r#"! rowspan="{rows}" | {points}"#),
            )
        };

        lines.push(position_cell);
        if let (Markup::English, Some(car_number)) = (self.markup, standing.entity.car_number()) {
            lines.push(format!(r#"| align="center" | {car_number}"#));
        }
        lines.push(format!("{name_prefix} | {}", self.name_cell(&standing.entity)));

        let cells = self.result_cells(standing, rows);
        for (row, row_cells) in cells.into_iter().enumerate() {
            lines.extend(row_cells);
            if row == 0 {
                lines.push(points_cell.clone());
            }
            lines.push(ROW_SEPARATOR.to_owned());
        }
    }

    /// Lay out result cells as `rows` lines of one cell per round column.
    fn result_cells(&self, standing: &Standing, rows: u32) -> Vec<Vec<String>> {
        let mut cells: Vec<Vec<String>> = (0..rows).map(|_| Vec::new()).collect();
        for round in 1..=self.summary.round_columns() {
            if round > self.summary.races_held {
                for row in &mut cells {
                    row.push(PENDING_ROUND.to_owned());
                }
                continue;
            }

            let mut slots = cells.iter_mut();
            for result in standing.results.iter().filter(|r| r.round() == round) {
                if let Some(row) = slots.next() {
                    row.push(self.result_cell(result));
                } else {
                    warn!(
                        "entity {} has more results in round {round} than the {rows} scoring cars",
                        standing.entity.id()
                    );
                }
            }
            for row in slots {
                row.push(MISSING_RESULT.to_owned());
            }
        }
        cells
    }

    fn result_cell(&self, result: &RoundResult) -> String {
        let style = result.style();
        let mut css = format!("background:#{}", style.background());
        if let Some(text_colour) = style.text_colour() {
            css.push_str(&format!("; color:#{text_colour}"));
        }
        let place = self.display_place(result);
        if style.is_bold() {
            format!(r#"| style="{css}" | '''{place}'''"#)
        } else {
            format!(r#"| style="{css}" | {place}"#)
        }
    }

    fn display_place(&self, result: &RoundResult) -> String {
        let place = result.place().trim();
        if let Ok(number) = place.parse::<u32>() {
            return number.to_string();
        }
        self.abbreviations
            .get(result.style().id())
            .unwrap_or(place)
            .to_owned()
    }

    fn name_cell(&self, entity: &Entity) -> String {
        let profile = entity.profile();
        let flag = format!("{{{{{}|{}}}}}", self.markup.flag_template(), profile.flag());
        match (self.markup, entity.car_number()) {
            (Markup::Polish, Some(car_number)) => {
                format!("{flag} #{car_number} {}", profile.article_link())
            }
            _ => format!("{flag} {}", profile.article_link()),
        }
    }
}
