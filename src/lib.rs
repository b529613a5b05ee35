//! Facade crate for championship standings.
//!
//! This crate re-exports the core domain types and results engine, and
//! exposes the SQLite record source and wikitable renderer behind feature
//! flags.

#![forbid(unsafe_code)]

pub use wikistandings_core::{
    Abbreviation, Catalogue, Championship, Classification, ClassificationMeta,
    ClassificationSummary, ClassificationType, ConsolidationError, EngineError, Entity,
    EntityProfile, ErrorKind, LocalizedAbbreviations, RawScoreRow, RawStyle, RecordSource,
    ResultStyle, ResultsEngine, RoundResult, Session, Standing, ValidationError, Wikipedia,
    assemble_standings, consolidate_rows, resolve_style, total_points,
};

#[cfg(feature = "store-sqlite")]
pub use wikistandings_core::{SqliteRecordSource, SqliteSourceError};

#[cfg(feature = "wikitable")]
pub use wikistandings_wikitable::{Markup, format_points, render_standings};
