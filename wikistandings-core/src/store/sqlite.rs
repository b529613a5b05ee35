//! SQLite-backed record source for persisted championship data.

use std::{
    fmt,
    path::{Path, PathBuf},
};

use log::{debug, warn};
use rusqlite::{Connection, OpenFlags, OptionalExtension, Row, params};
use thiserror::Error;

use crate::error::{ValidationError, count};
use crate::{
    Abbreviation, Championship, Classification, ClassificationMeta, ClassificationType, Entity,
    EntityProfile, LocalizedAbbreviations, RawScoreRow, RawStyle, UnknownClassificationType,
    Wikipedia,
};

use super::{Catalogue, RecordSource};

const SCORE_ROWS_SQL: &str = r#"
    SELECT sc.round_number, ses.name, sc.place, sc.points,
           rs.id, rs.background_hex, rs.text_colour_hex, rs.bold
    FROM score sc
    JOIN "session" ses ON ses.id = sc.session_id
    JOIN result_styling rs ON rs.id = sc.style_id
    WHERE sc.classification_id = ?1
      AND sc.entity_id = ?2
    ORDER BY sc.round_number,
             CASE UPPER(TRIM(ses.name)) WHEN 'QUALIFYING' THEN 0 ELSE 1 END,
             sc.rowid
"#;

const CLASSIFICATION_META_SQL: &str = "
    SELECT cl.races_number, ct.name, mc.scoring_cars
    FROM classification cl
    JOIN title t ON t.id = cl.title_id
    JOIN classification_type ct ON ct.id = t.type_id
    LEFT JOIN manufacturer_classification mc
        ON mc.manufacturer_classification_id = cl.id
    WHERE cl.id = ?1
";

const MAX_ROUND_SQL: &str = "SELECT MAX(round_number) FROM score WHERE classification_id = ?1";

const CHAMPIONSHIPS_SQL: &str = "
    SELECT DISTINCT ch.id, ch.name, o.name
    FROM championship ch
    LEFT JOIN organiser o ON o.id = ch.organiser_id
    JOIN title t ON t.championship_id = ch.id
    JOIN classification cl ON cl.title_id = t.id
    JOIN score s ON s.classification_id = cl.id
    WHERE cl.active = 1
    ORDER BY ch.id
";

const CLASSIFICATION_COLUMNS: &str = "
    SELECT DISTINCT cl.id, t.name, cl.season, cl.races_number, ct.name, cl.active
    FROM classification cl
    JOIN title t ON t.id = cl.title_id
    JOIN classification_type ct ON ct.id = t.type_id
";

const WIKIPEDIA_SQL: &str = "SELECT id, version FROM wikipedia WHERE version = ?1 COLLATE NOCASE";

const ABBREVIATIONS_SQL: &str = "
    SELECT style_id, code
    FROM localised_status
    WHERE wikipedia_id = ?1
    ORDER BY style_id
";

/// Error raised when reading championship data from SQLite.
#[derive(Debug, Error)]
pub enum SqliteSourceError {
    /// Opening the SQLite database failed.
    #[error("failed to open SQLite database at {path}: {source}")]
    OpenDatabase {
        /// Location of the SQLite database on disk.
        path: PathBuf,
        /// Source error returned by `rusqlite`.
        #[source]
        source: rusqlite::Error,
    },
    /// A query failed to prepare or execute.
    #[error("failed to {operation}: {source}")]
    Query {
        /// Operation being performed.
        operation: &'static str,
        /// Source error returned by `rusqlite`.
        #[source]
        source: rusqlite::Error,
    },
    /// A stored value violated a domain invariant.
    #[error("invalid record while trying to {operation}: {source}")]
    InvalidRecord {
        /// Operation being performed.
        operation: &'static str,
        /// Validation failure.
        #[source]
        source: ValidationError,
    },
    /// A classification names a type this crate does not know.
    #[error(transparent)]
    UnknownClassificationType(#[from] UnknownClassificationType),
}

fn query_error(operation: &'static str) -> impl FnOnce(rusqlite::Error) -> SqliteSourceError {
    move |source| SqliteSourceError::Query { operation, source }
}

fn invalid_record(operation: &'static str) -> impl FnOnce(ValidationError) -> SqliteSourceError {
    move |source| SqliteSourceError::InvalidRecord { operation, source }
}

/// Read-only record source over the championship database.
pub struct SqliteRecordSource {
    connection: Connection,
    path: PathBuf,
}

impl fmt::Debug for SqliteRecordSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SqliteRecordSource")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

impl SqliteRecordSource {
    /// Open the database at `path` in read-only mode.
    ///
    /// # Errors
    /// Returns [`SqliteSourceError::OpenDatabase`] when the file cannot be
    /// opened.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, SqliteSourceError> {
        let path = path.as_ref();
        let connection = Connection::open_with_flags(path, OpenFlags::SQLITE_OPEN_READ_ONLY)
            .map_err(|source| SqliteSourceError::OpenDatabase {
                path: path.to_path_buf(),
                source,
            })?;
        debug!("opened championship database at {}", path.display());
        Ok(Self {
            connection,
            path: path.to_path_buf(),
        })
    }

    /// Location of the database on disk.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn classifications_where(
        &self,
        filter: &str,
        id: u32,
    ) -> Result<Vec<Classification>, SqliteSourceError> {
        const OPERATION: &str = "read classifications";
        let sql = format!("{CLASSIFICATION_COLUMNS} {filter} ORDER BY cl.id");
        let mut statement = self
            .connection
            .prepare(&sql)
            .map_err(query_error(OPERATION))?;
        let rows = statement
            .query_map(params![id], classification_columns)
            .map_err(query_error(OPERATION))?
            .collect::<Result<Vec<_>, _>>()
            .map_err(query_error(OPERATION))?;

        let mut classifications = Vec::with_capacity(rows.len());
        for columns in rows {
            let id = columns.id;
            match columns.into_classification() {
                Ok(classification) => classifications.push(classification),
                Err(err) => warn!("skipping classification {id}: {err}"),
            }
        }
        Ok(classifications)
    }
}

impl RecordSource for SqliteRecordSource {
    type Error = SqliteSourceError;

    fn raw_score_rows(
        &self,
        entity_id: u32,
        classification_id: u32,
    ) -> Result<Vec<RawScoreRow>, Self::Error> {
        const OPERATION: &str = "read score rows";
        let mut statement = self
            .connection
            .prepare_cached(SCORE_ROWS_SQL)
            .map_err(query_error(OPERATION))?;
        statement
            .query_map(params![classification_id, entity_id], |row| {
                Ok(RawScoreRow {
                    round: row.get(0)?,
                    session: row.get(1)?,
                    place: row.get(2)?,
                    points: row.get(3)?,
                    style: RawStyle {
                        id: row.get(4)?,
                        background: row.get(5)?,
                        text_colour: row.get(6)?,
                        bold: row.get(7)?,
                    },
                })
            })
            .map_err(query_error(OPERATION))?
            .collect::<Result<Vec<_>, _>>()
            .map_err(query_error(OPERATION))
    }

    fn classification_meta(
        &self,
        classification_id: u32,
    ) -> Result<Option<ClassificationMeta>, Self::Error> {
        const OPERATION: &str = "read classification metadata";
        let columns = self
            .connection
            .query_row(CLASSIFICATION_META_SQL, params![classification_id], |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, Option<i64>>(2)?,
                ))
            })
            .optional()
            .map_err(query_error(OPERATION))?;
        let Some((races, kind, scoring_cars)) = columns else {
            return Ok(None);
        };

        Ok(Some(ClassificationMeta {
            races_configured: count("races", races).map_err(invalid_record(OPERATION))?,
            kind: kind.parse()?,
            scoring_cars: scoring_cars
                .map(|cars| count("scoring cars", cars))
                .transpose()
                .map_err(invalid_record(OPERATION))?,
        }))
    }

    fn max_round_number(&self, classification_id: u32) -> Result<u32, Self::Error> {
        const OPERATION: &str = "read highest round";
        let max_round: Option<i64> = self
            .connection
            .query_row(MAX_ROUND_SQL, params![classification_id], |row| row.get(0))
            .map_err(query_error(OPERATION))?;
        max_round.map_or(Ok(0), |round| {
            count("round number", round).map_err(invalid_record(OPERATION))
        })
    }
}

impl Catalogue for SqliteRecordSource {
    type Error = SqliteSourceError;

    fn championships(&self) -> Result<Vec<Championship>, Self::Error> {
        const OPERATION: &str = "read championships";
        let mut statement = self
            .connection
            .prepare(CHAMPIONSHIPS_SQL)
            .map_err(query_error(OPERATION))?;
        let rows = statement
            .query_map([], |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, Option<String>>(2)?,
                ))
            })
            .map_err(query_error(OPERATION))?
            .collect::<Result<Vec<_>, _>>()
            .map_err(query_error(OPERATION))?;

        let mut championships = Vec::with_capacity(rows.len());
        for (id, name, organiser) in rows {
            match Championship::new(id, &name, organiser.as_deref()) {
                Ok(championship) => championships.push(championship),
                Err(err) => warn!("skipping championship {id}: {err}"),
            }
        }
        Ok(championships)
    }

    fn classifications(&self, championship_id: u32) -> Result<Vec<Classification>, Self::Error> {
        self.classifications_where(
            "JOIN score s ON s.classification_id = cl.id \
             WHERE t.championship_id = ?1 AND cl.active = 1",
            championship_id,
        )
    }

    fn classification(
        &self,
        classification_id: u32,
    ) -> Result<Option<Classification>, Self::Error> {
        const OPERATION: &str = "read classification";
        let sql = format!("{CLASSIFICATION_COLUMNS} WHERE cl.id = ?1");
        let columns = self
            .connection
            .query_row(&sql, params![classification_id], classification_columns)
            .optional()
            .map_err(query_error(OPERATION))?;
        columns
            .map(ClassificationColumns::into_classification)
            .transpose()
    }

    fn wikipedia(&self, code: &str) -> Result<Option<Wikipedia>, Self::Error> {
        const OPERATION: &str = "read wikipedia version";
        let columns = self
            .connection
            .query_row(WIKIPEDIA_SQL, params![code.trim()], |row| {
                Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?))
            })
            .optional()
            .map_err(query_error(OPERATION))?;
        columns
            .map(|(id, version)| Wikipedia::new(id, &version).map_err(invalid_record(OPERATION)))
            .transpose()
    }

    fn entities(
        &self,
        classification: &Classification,
        wikipedia_id: u32,
    ) -> Result<Vec<Entity>, Self::Error> {
        const OPERATION: &str = "read entities";
        let kind = classification.kind();
        let mut statement = self
            .connection
            .prepare(entities_sql(kind))
            .map_err(query_error(OPERATION))?;
        let rows = statement
            .query_map(params![classification.id(), wikipedia_id], |row| {
                Ok(EntityColumns {
                    id: row.get(0)?,
                    codename: row.get(1)?,
                    flag: row.get(2)?,
                    article_link: row.get(3)?,
                    car_number: row.get(4)?,
                })
            })
            .map_err(query_error(OPERATION))?
            .collect::<Result<Vec<_>, _>>()
            .map_err(query_error(OPERATION))?;

        let mut entities = Vec::with_capacity(rows.len());
        for columns in rows {
            let id = columns.id;
            match columns.into_entity(kind) {
                Ok(entity) => entities.push(entity),
                Err(err) => warn!("skipping {kind} entity {id}: {err}"),
            }
        }
        debug!(
            "found {} entities in classification {}",
            entities.len(),
            classification.id()
        );
        Ok(entities)
    }

    fn abbreviations(&self, wikipedia_id: u32) -> Result<LocalizedAbbreviations, Self::Error> {
        const OPERATION: &str = "read abbreviations";
        let mut statement = self
            .connection
            .prepare(ABBREVIATIONS_SQL)
            .map_err(query_error(OPERATION))?;
        let rows = statement
            .query_map(params![wikipedia_id], |row| {
                Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?))
            })
            .map_err(query_error(OPERATION))?
            .collect::<Result<Vec<_>, _>>()
            .map_err(query_error(OPERATION))?;

        rows.into_iter()
            .map(|(style_id, code)| {
                Abbreviation::new(style_id, &code).map_err(invalid_record(OPERATION))
            })
            .collect()
    }
}

fn entities_sql(kind: ClassificationType) -> &'static str {
    match kind {
        ClassificationType::Drivers => {
            "SELECT DISTINCT d.id, d.codename, d.flag, dw.short_link, NULL
             FROM score s
             JOIN driver d ON d.id = s.entity_id
             JOIN driver_wikipedia dw ON dw.driver_id = d.id
             WHERE s.classification_id = ?1 AND dw.wikipedia_id = ?2
             ORDER BY d.id"
        }
        ClassificationType::Manufacturers => {
            "SELECT DISTINCT m.id, m.codename, m.flag, mw.link, NULL
             FROM score s
             JOIN manufacturer m ON m.id = s.entity_id
             JOIN manufacturer_wikipedia mw ON mw.manufacturer_id = m.id
             WHERE s.classification_id = ?1 AND mw.wikipedia_id = ?2
             ORDER BY m.id"
        }
        ClassificationType::Teams => {
            "SELECT DISTINCT t.id, t.codename, t.flag, tw.short_link, t.car_number
             FROM score s
             JOIN team t ON t.id = s.entity_id
             JOIN team_wikipedia tw ON tw.team_id = t.id
             WHERE s.classification_id = ?1 AND tw.wikipedia_id = ?2
             ORDER BY t.id"
        }
    }
}

struct ClassificationColumns {
    id: i64,
    title: String,
    season: String,
    races: i64,
    kind: String,
    active: bool,
}

fn classification_columns(row: &Row<'_>) -> rusqlite::Result<ClassificationColumns> {
    Ok(ClassificationColumns {
        id: row.get(0)?,
        title: row.get(1)?,
        season: row.get(2)?,
        races: row.get(3)?,
        kind: row.get(4)?,
        active: row.get(5)?,
    })
}

impl ClassificationColumns {
    fn into_classification(self) -> Result<Classification, SqliteSourceError> {
        let kind = self.kind.parse()?;
        Classification::new(
            self.id,
            &self.title,
            &self.season,
            self.races,
            kind,
            self.active,
        )
        .map_err(invalid_record("read classification"))
    }
}

struct EntityColumns {
    id: i64,
    codename: String,
    flag: String,
    article_link: String,
    car_number: Option<i64>,
}

impl EntityColumns {
    fn into_entity(self, kind: ClassificationType) -> Result<Entity, ValidationError> {
        let profile = EntityProfile::new(self.id, &self.codename, &self.flag, &self.article_link)?;
        match kind {
            ClassificationType::Drivers => Ok(Entity::driver(profile)),
            ClassificationType::Manufacturers => Ok(Entity::manufacturer(profile)),
            ClassificationType::Teams => {
                let car_number = self.car_number.ok_or(ValidationError::Missing {
                    field: "car number",
                })?;
                Entity::team(profile, car_number)
            }
        }
    }
}
