//! Core domain types and results consolidation for championship standings.
//!
//! Stored scores hold a row per session: a race result for every round, and
//! a qualifying row only for the pole sitter. This crate turns those rows
//! into one display-ready result per round, with pole positions shown as a
//! bold race result, and ranks entities into standings.
//!
//! Constructors return `Result` to surface invalid input early; rows read
//! from a [`RecordSource`] are validated during consolidation and reported
//! as malformed records instead.

#![forbid(unsafe_code)]

mod championship;
mod classification;
mod consolidate;
mod engine;
mod entity;
mod error;
mod result;
mod session;
mod standings;
mod style;
mod summary;
mod wikipedia;

pub mod store;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use championship::Championship;
pub use classification::{
    Classification, ClassificationMeta, ClassificationType, UnknownClassificationType,
};
pub use consolidate::{ConsolidationError, MalformedReason, consolidate_rows};
pub use engine::{EngineError, ResultsEngine};
pub use entity::{Entity, EntityProfile};
pub use error::{ErrorKind, ValidationError};
pub use result::{RawScoreRow, RoundResult};
pub use session::{Session, UnknownSession};
pub use standings::{Standing, assemble_standings, total_points};
pub use store::{Catalogue, RecordSource};
#[cfg(feature = "store-sqlite")]
pub use store::{SqliteRecordSource, SqliteSourceError};
pub use style::{Abbreviation, LocalizedAbbreviations, RawStyle, ResultStyle, resolve_style};
pub use summary::ClassificationSummary;
pub use wikipedia::Wikipedia;
