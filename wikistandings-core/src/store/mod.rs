//! Read-only access to stored championship data.
//!
//! [`RecordSource`] supplies the raw rows the consolidation engine works on.
//! [`Catalogue`] supplies the browsing data a front end needs to pick a
//! classification and label its standings. Both are synchronous: they return
//! fully materialised records, and retries or timeouts are the
//! implementation's concern.

use crate::{
    Championship, Classification, ClassificationMeta, Entity, LocalizedAbbreviations,
    RawScoreRow, Wikipedia,
};

#[cfg(feature = "store-sqlite")]
mod sqlite;

#[cfg(feature = "store-sqlite")]
pub use sqlite::{SqliteRecordSource, SqliteSourceError};

/// Supplier of raw scoring rows and classification metadata.
///
/// # Examples
///
/// ```rust
/// use std::convert::Infallible;
/// use wikistandings_core::{ClassificationMeta, RawScoreRow, RecordSource};
///
/// struct EmptySource;
///
/// impl RecordSource for EmptySource {
///     type Error = Infallible;
///
///     fn raw_score_rows(&self, _: u32, _: u32) -> Result<Vec<RawScoreRow>, Infallible> {
///         Ok(Vec::new())
///     }
///
///     fn classification_meta(&self, _: u32) -> Result<Option<ClassificationMeta>, Infallible> {
///         Ok(None)
///     }
///
///     fn max_round_number(&self, _: u32) -> Result<u32, Infallible> {
///         Ok(0)
///     }
/// }
///
/// assert_eq!(EmptySource.max_round_number(1), Ok(0));
/// ```
pub trait RecordSource {
    /// Failure raised by the underlying store.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Return an entity's raw rows in a classification.
    ///
    /// Implementations MUST order rows by round ascending and, within a
    /// round, qualifying before race. Consolidation depends on it.
    fn raw_score_rows(
        &self,
        entity_id: u32,
        classification_id: u32,
    ) -> Result<Vec<RawScoreRow>, Self::Error>;

    /// Return the classification's metadata, or `None` when it is unknown.
    fn classification_meta(
        &self,
        classification_id: u32,
    ) -> Result<Option<ClassificationMeta>, Self::Error>;

    /// Return the highest round number with a stored score, or 0 when there
    /// are none.
    fn max_round_number(&self, classification_id: u32) -> Result<u32, Self::Error>;
}

impl<S: RecordSource + ?Sized> RecordSource for &S {
    type Error = S::Error;

    fn raw_score_rows(
        &self,
        entity_id: u32,
        classification_id: u32,
    ) -> Result<Vec<RawScoreRow>, Self::Error> {
        (**self).raw_score_rows(entity_id, classification_id)
    }

    fn classification_meta(
        &self,
        classification_id: u32,
    ) -> Result<Option<ClassificationMeta>, Self::Error> {
        (**self).classification_meta(classification_id)
    }

    fn max_round_number(&self, classification_id: u32) -> Result<u32, Self::Error> {
        (**self).max_round_number(classification_id)
    }
}

/// Browsing queries used to select and label a classification.
pub trait Catalogue {
    /// Failure raised by the underlying store.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Championships with results in at least one active classification.
    fn championships(&self) -> Result<Vec<Championship>, Self::Error>;

    /// Active classifications of a championship that have results.
    fn classifications(&self, championship_id: u32) -> Result<Vec<Classification>, Self::Error>;

    /// A single classification, or `None` when it does not exist.
    fn classification(&self, classification_id: u32)
    -> Result<Option<Classification>, Self::Error>;

    /// The Wikipedia version with the given code, or `None` when unknown.
    fn wikipedia(&self, code: &str) -> Result<Option<Wikipedia>, Self::Error>;

    /// Entities scored in a classification, with article links for the given
    /// Wikipedia version. The classification's type decides the entity kind.
    fn entities(
        &self,
        classification: &Classification,
        wikipedia_id: u32,
    ) -> Result<Vec<Entity>, Self::Error>;

    /// Result abbreviations localized for the given Wikipedia version.
    fn abbreviations(&self, wikipedia_id: u32) -> Result<LocalizedAbbreviations, Self::Error>;
}
