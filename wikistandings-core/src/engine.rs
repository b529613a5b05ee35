//! Entry points that read from a [`RecordSource`] and consolidate.

use log::debug;
use thiserror::Error;

use crate::error::{ErrorKind, ValidationError, positive_id};
use crate::{
    ClassificationSummary, ConsolidationError, Entity, RecordSource, RoundResult, Standing,
    assemble_standings, consolidate_rows,
};

/// Errors returned by [`ResultsEngine`].
#[derive(Debug, Error)]
pub enum EngineError<E>
where
    E: std::error::Error + 'static,
{
    /// A caller-supplied identifier was rejected before any lookup.
    #[error(transparent)]
    InvalidArgument(#[from] ValidationError),
    /// The stored rows of an entity could not be consolidated.
    #[error("failed to consolidate entity {entity_id} in classification {classification_id}")]
    Consolidation {
        /// Entity whose rows were malformed.
        entity_id: u32,
        /// Classification being read.
        classification_id: u32,
        /// Underlying consolidation failure.
        #[source]
        source: ConsolidationError,
    },
    /// The record source failed.
    #[error("record source failed")]
    Source(#[source] E),
}

impl<E> EngineError<E>
where
    E: std::error::Error + 'static,
{
    /// Classify the error, or `None` for record source failures.
    #[must_use]
    pub const fn kind(&self) -> Option<ErrorKind> {
        match self {
            Self::InvalidArgument(_) => Some(ErrorKind::InvalidArgument),
            Self::Consolidation { .. } => Some(ErrorKind::MalformedRecord),
            Self::Source(_) => None,
        }
    }
}

/// Consolidates results and summarises classifications from a record source.
///
/// # Examples
/// ```
/// use wikistandings_core::ResultsEngine;
/// use wikistandings_core::test_support::MemorySource;
///
/// let engine = ResultsEngine::new(MemorySource::default());
/// let summary = engine.summarize(7).expect("memory source never fails");
/// assert_eq!(summary.races_held, 0);
/// ```
#[derive(Debug, Clone)]
pub struct ResultsEngine<S> {
    source: S,
}

impl<S: RecordSource> ResultsEngine<S> {
    /// Wrap a record source.
    #[must_use]
    pub const fn new(source: S) -> Self {
        Self { source }
    }

    /// Borrow the wrapped record source.
    #[must_use]
    pub const fn source(&self) -> &S {
        &self.source
    }

    /// Consolidate one entity's stored results in a classification.
    ///
    /// # Errors
    /// Returns [`EngineError::InvalidArgument`] when either id is zero,
    /// [`EngineError::Consolidation`] when a stored row is malformed and
    /// [`EngineError::Source`] when the record source fails.
    pub fn consolidate(
        &self,
        entity_id: u32,
        classification_id: u32,
    ) -> Result<Vec<RoundResult>, EngineError<S::Error>> {
        positive_id("entity id", entity_id.into())?;
        positive_id("classification id", classification_id.into())?;

        let rows = self
            .source
            .raw_score_rows(entity_id, classification_id)
            .map_err(EngineError::Source)?;
        debug!(
            "read {} raw rows for entity {entity_id} in classification {classification_id}",
            rows.len()
        );
        consolidate_rows(&rows).map_err(|source| EngineError::Consolidation {
            entity_id,
            classification_id,
            source,
        })
    }

    /// Summarise a classification. Unknown classifications summarise to
    /// zeros.
    ///
    /// # Errors
    /// Returns [`EngineError::InvalidArgument`] when the id is zero and
    /// [`EngineError::Source`] when the record source fails.
    pub fn summarize(
        &self,
        classification_id: u32,
    ) -> Result<ClassificationSummary, EngineError<S::Error>> {
        positive_id("classification id", classification_id.into())?;

        let max_round = self
            .source
            .max_round_number(classification_id)
            .map_err(EngineError::Source)?;
        let meta = self
            .source
            .classification_meta(classification_id)
            .map_err(EngineError::Source)?;
        if meta.is_none() {
            debug!("classification {classification_id} has no metadata");
        }
        Ok(ClassificationSummary::from_parts(max_round, meta))
    }

    /// Consolidate every entity and rank them.
    ///
    /// # Errors
    /// Fails on the first entity that [`Self::consolidate`] rejects; no
    /// partial standings are returned.
    pub fn standings(
        &self,
        classification_id: u32,
        entities: impl IntoIterator<Item = Entity>,
    ) -> Result<Vec<Standing>, EngineError<S::Error>> {
        let entries = entities
            .into_iter()
            .map(|entity| {
                let results = self.consolidate(entity.id(), classification_id)?;
                Ok((entity, results))
            })
            .collect::<Result<Vec<_>, EngineError<S::Error>>>()?;
        debug!(
            "ranking {} entities in classification {classification_id}",
            entries.len()
        );
        Ok(assemble_standings(entries))
    }
}
