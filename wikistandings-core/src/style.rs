//! Result styling: colours, emphasis and localized abbreviations.
//!
//! Colours are stored as hexadecimal RGB without the leading `#`. The bold
//! flag is never taken verbatim for merged rows: [`resolve_style`] lets the
//! consolidation engine force it on when a pole position was merged into a
//! race result.

use std::collections::BTreeMap;

use crate::error::{ValidationError, non_blank, positive_id};

/// Styling exactly as stored alongside a raw score row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawStyle {
    /// Style identifier.
    pub id: i64,
    /// Background colour as hex RGB.
    pub background: String,
    /// Text colour as hex RGB, if one is configured.
    pub text_colour: Option<String>,
    /// Bold flag recorded for the style.
    pub bold: bool,
}

/// Presentation attributes attached to a consolidated result.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResultStyle {
    id: u32,
    background: String,
    text_colour: Option<String>,
    bold: bool,
}

impl ResultStyle {
    /// Validate and construct a [`ResultStyle`].
    ///
    /// A leading `#` on either colour is stripped.
    ///
    /// # Errors
    /// Returns [`ValidationError`] when `id` is not positive or a colour is
    /// blank.
    pub fn new(
        id: i64,
        background: &str,
        text_colour: Option<&str>,
        bold: bool,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            id: positive_id("style id", id)?,
            background: non_blank("background colour", strip_hash(background))?,
            text_colour: text_colour
                .map(|colour| non_blank("text colour", strip_hash(colour)))
                .transpose()?,
            bold,
        })
    }

    /// Style identifier.
    #[must_use]
    pub const fn id(&self) -> u32 {
        self.id
    }

    /// Background colour as hex RGB without `#`.
    #[must_use]
    pub fn background(&self) -> &str {
        &self.background
    }

    /// Text colour as hex RGB without `#`, if any.
    #[must_use]
    pub fn text_colour(&self) -> Option<&str> {
        self.text_colour.as_deref()
    }

    /// Whether the result is rendered in bold.
    #[must_use]
    pub const fn is_bold(&self) -> bool {
        self.bold
    }
}

fn strip_hash(colour: &str) -> &str {
    colour.trim().trim_start_matches('#')
}

/// Resolve the final presentation of a result.
///
/// Colours always come from `raw`. The bold flag comes from `forced_bold`
/// when supplied, otherwise from `raw`.
///
/// # Errors
/// Returns [`ValidationError`] when the raw style has a non-positive id or a
/// blank colour.
///
/// # Examples
/// ```
/// use wikistandings_core::{RawStyle, resolve_style};
///
/// # fn main() -> Result<(), wikistandings_core::ValidationError> {
/// let raw = RawStyle {
///     id: 3,
///     background: "FFFFBF".into(),
///     text_colour: None,
///     bold: false,
/// };
/// assert!(!resolve_style(&raw, None)?.is_bold());
/// assert!(resolve_style(&raw, Some(true))?.is_bold());
/// # Ok(())
/// # }
/// ```
pub fn resolve_style(raw: &RawStyle, forced_bold: Option<bool>) -> Result<ResultStyle, ValidationError> {
    ResultStyle::new(
        raw.id,
        &raw.background,
        raw.text_colour.as_deref(),
        forced_bold.unwrap_or(raw.bold),
    )
}

/// A locale-specific code for a non-classified result, e.g. `Ret` or `NC`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Abbreviation {
    style_id: u32,
    code: String,
}

impl Abbreviation {
    /// Validate and construct an [`Abbreviation`].
    ///
    /// # Errors
    /// Returns [`ValidationError`] when `style_id` is not positive or `code`
    /// is blank.
    pub fn new(style_id: i64, code: &str) -> Result<Self, ValidationError> {
        Ok(Self {
            style_id: positive_id("style id", style_id)?,
            code: non_blank("abbreviation", code)?,
        })
    }

    /// Style the abbreviation applies to.
    #[must_use]
    pub const fn style_id(&self) -> u32 {
        self.style_id
    }

    /// Abbreviation text.
    #[must_use]
    pub fn code(&self) -> &str {
        &self.code
    }
}

/// Abbreviations for one Wikipedia version, keyed by style id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocalizedAbbreviations {
    codes: BTreeMap<u32, String>,
}

impl LocalizedAbbreviations {
    /// Look up the abbreviation for a style.
    #[must_use]
    pub fn get(&self, style_id: u32) -> Option<&str> {
        self.codes.get(&style_id).map(String::as_str)
    }

    /// Number of known abbreviations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    /// Report whether no abbreviations are known.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

impl FromIterator<Abbreviation> for LocalizedAbbreviations {
    /// Later abbreviations for the same style replace earlier ones.
    fn from_iter<I: IntoIterator<Item = Abbreviation>>(iter: I) -> Self {
        Self {
            codes: iter
                .into_iter()
                .map(|abbreviation| (abbreviation.style_id, abbreviation.code))
                .collect(),
        }
    }
}
