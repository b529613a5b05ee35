//! Wikipedia language editions targeted by rendered tables.

use crate::error::{ValidationError, non_blank, positive_id};

/// A Wikipedia language edition, e.g. `enwiki`.
///
/// The version decides which article links and result abbreviations are
/// used when rendering standings.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Wikipedia {
    id: u32,
    code: String,
}

impl Wikipedia {
    /// Validate and construct a [`Wikipedia`].
    ///
    /// The code is normalised to lowercase.
    ///
    /// # Errors
    /// Returns [`ValidationError`] when `id` is not positive or `code` is
    /// blank.
    pub fn new(id: i64, code: &str) -> Result<Self, ValidationError> {
        Ok(Self {
            id: positive_id("wikipedia id", id)?,
            code: non_blank("wikipedia code", code)?.trim().to_lowercase(),
        })
    }

    /// Database identifier.
    #[must_use]
    pub const fn id(&self) -> u32 {
        self.id
    }

    /// Version code such as `enwiki` or `plwiki`.
    #[must_use]
    pub fn code(&self) -> &str {
        &self.code
    }
}
