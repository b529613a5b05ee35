//! Error types emitted by the standings CLI.
//!
//! Store and engine failures are boxed so the error stays small for the
//! many helpers returning `Result<_, CliError>`.

use std::{error::Error as StdError, sync::Arc};

use camino::Utf8PathBuf;
use thiserror::Error;
use wikistandings_core::SqliteSourceError;

/// Boxed failure raised by a record source or the results engine.
pub type BoxedSourceError = Box<dyn StdError + Send + Sync + 'static>;

/// Errors emitted by the standings CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        /// Flag name of the missing option.
        field: &'static str,
        /// Environment variable that can supply it.
        env: &'static str,
    },
    /// A referenced input path does not exist on disk.
    #[error("{field} path {path:?} does not exist")]
    MissingSourceFile {
        /// Flag naming the path.
        field: &'static str,
        /// Path that was checked.
        path: Utf8PathBuf,
    },
    /// A referenced input path exists but is not a file.
    #[error("{field} path {path:?} exists but is not a file")]
    SourcePathNotFile {
        /// Flag naming the path.
        field: &'static str,
        /// Path that was checked.
        path: Utf8PathBuf,
    },
    /// A referenced input path could not be inspected due to an IO error.
    #[error("failed to inspect {field} path {path:?}: {source}")]
    InspectSourcePath {
        /// Flag naming the path.
        field: &'static str,
        /// Path that was checked.
        path: Utf8PathBuf,
        /// Underlying IO failure.
        #[source]
        source: std::io::Error,
    },
    /// The championship database could not be opened.
    #[error(transparent)]
    OpenDatabase(SqliteSourceError),
    /// A catalogue query failed.
    #[error("failed to {operation}: {source}")]
    Store {
        /// Query that failed.
        operation: &'static str,
        /// Underlying store failure.
        #[source]
        source: BoxedSourceError,
    },
    /// Consolidating or summarising a classification failed.
    #[error("failed to read results of classification {classification_id}: {source}")]
    Engine {
        /// Classification being read.
        classification_id: u32,
        /// Underlying engine failure.
        #[source]
        source: BoxedSourceError,
    },
    /// No classification has the requested id.
    #[error("classification {id} does not exist")]
    UnknownClassification {
        /// Requested classification id.
        id: u32,
    },
    /// No Wikipedia version has the requested code.
    #[error("unknown Wikipedia version {code:?}")]
    UnknownWikipedia {
        /// Requested version code.
        code: String,
    },
    /// Serialising standings to JSON failed.
    #[error("failed to serialise standings: {0}")]
    SerialiseStandings(#[source] serde_json::Error),
    /// Creating the output file failed.
    #[error("failed to create output file {path:?}: {source}")]
    CreateOutput {
        /// Output path.
        path: Utf8PathBuf,
        /// Underlying IO failure.
        #[source]
        source: std::io::Error,
    },
    /// Writing command output failed.
    #[error("failed to write output: {0}")]
    WriteOutput(#[source] std::io::Error),
}

impl CliError {
    /// Wrap a store failure raised while performing `operation`.
    pub(crate) fn store<E>(operation: &'static str) -> impl FnOnce(E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        move |source| Self::Store {
            operation,
            source: Box::new(source),
        }
    }

    /// Wrap an engine failure for `classification_id`.
    pub(crate) fn engine<E>(classification_id: u32) -> impl FnOnce(E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        move |source| Self::Engine {
            classification_id,
            source: Box::new(source),
        }
    }
}
