//! In-memory record source and SQLite fixture writer used by unit and
//! behaviour tests.
//!
//! Gated behind the `test-support` feature (and `cfg(test)`).

use std::collections::BTreeMap;
use std::convert::Infallible;

use crate::{
    Abbreviation, Catalogue, Championship, Classification, ClassificationMeta, Entity,
    LocalizedAbbreviations, RawScoreRow, RecordSource, Wikipedia,
};

/// In-memory [`RecordSource`] and [`Catalogue`] used in tests.
///
/// Rows are returned exactly as inserted, so tests control their order.
#[derive(Default, Debug, Clone)]
pub struct MemorySource {
    rows: BTreeMap<(u32, u32), Vec<RawScoreRow>>,
    meta: BTreeMap<u32, ClassificationMeta>,
    championships: Vec<Championship>,
    classifications: Vec<(u32, Classification)>,
    wikipedias: Vec<Wikipedia>,
    entities: BTreeMap<(u32, u32), Vec<Entity>>,
    abbreviations: BTreeMap<u32, Vec<Abbreviation>>,
}

impl MemorySource {
    /// Store an entity's raw rows for a classification.
    pub fn insert_rows(&mut self, entity_id: u32, classification_id: u32, rows: Vec<RawScoreRow>) {
        self.rows.insert((entity_id, classification_id), rows);
    }

    /// Store a classification's metadata.
    pub fn insert_meta(&mut self, classification_id: u32, meta: ClassificationMeta) {
        self.meta.insert(classification_id, meta);
    }

    /// Register a championship.
    pub fn insert_championship(&mut self, championship: Championship) {
        self.championships.push(championship);
    }

    /// Register a classification under a championship. Its metadata is
    /// derived from the classification unless already stored.
    pub fn insert_classification(&mut self, championship_id: u32, classification: Classification) {
        self.meta
            .entry(classification.id())
            .or_insert_with(|| ClassificationMeta::from(&classification));
        self.classifications.push((championship_id, classification));
    }

    /// Register a Wikipedia version.
    pub fn insert_wikipedia(&mut self, wikipedia: Wikipedia) {
        self.wikipedias.push(wikipedia);
    }

    /// Register an entity scored in a classification for a Wikipedia version.
    pub fn insert_entity(&mut self, classification_id: u32, wikipedia_id: u32, entity: Entity) {
        self.entities
            .entry((classification_id, wikipedia_id))
            .or_default()
            .push(entity);
    }

    /// Register an abbreviation for a Wikipedia version.
    pub fn insert_abbreviation(&mut self, wikipedia_id: u32, abbreviation: Abbreviation) {
        self.abbreviations
            .entry(wikipedia_id)
            .or_default()
            .push(abbreviation);
    }

    fn has_scores(&self, classification_id: u32) -> bool {
        self.rows
            .iter()
            .any(|((_, classification), rows)| *classification == classification_id && !rows.is_empty())
    }
}

impl RecordSource for MemorySource {
    type Error = Infallible;

    fn raw_score_rows(
        &self,
        entity_id: u32,
        classification_id: u32,
    ) -> Result<Vec<RawScoreRow>, Self::Error> {
        Ok(self
            .rows
            .get(&(entity_id, classification_id))
            .cloned()
            .unwrap_or_default())
    }

    fn classification_meta(
        &self,
        classification_id: u32,
    ) -> Result<Option<ClassificationMeta>, Self::Error> {
        Ok(self.meta.get(&classification_id).copied())
    }

    fn max_round_number(&self, classification_id: u32) -> Result<u32, Self::Error> {
        Ok(self
            .rows
            .iter()
            .filter(|((_, classification), _)| *classification == classification_id)
            .flat_map(|(_, rows)| rows)
            .filter_map(|row| u32::try_from(row.round).ok())
            .max()
            .unwrap_or(0))
    }
}

impl Catalogue for MemorySource {
    type Error = Infallible;

    fn championships(&self) -> Result<Vec<Championship>, Self::Error> {
        Ok(self
            .championships
            .iter()
            .filter(|championship| {
                self.classifications.iter().any(|(owner, classification)| {
                    *owner == championship.id()
                        && classification.is_active()
                        && self.has_scores(classification.id())
                })
            })
            .cloned()
            .collect())
    }

    fn classifications(&self, championship_id: u32) -> Result<Vec<Classification>, Self::Error> {
        Ok(self
            .classifications
            .iter()
            .filter(|(owner, classification)| {
                *owner == championship_id
                    && classification.is_active()
                    && self.has_scores(classification.id())
            })
            .map(|(_, classification)| classification.clone())
            .collect())
    }

    fn classification(
        &self,
        classification_id: u32,
    ) -> Result<Option<Classification>, Self::Error> {
        Ok(self
            .classifications
            .iter()
            .find(|(_, classification)| classification.id() == classification_id)
            .map(|(_, classification)| classification.clone()))
    }

    fn wikipedia(&self, code: &str) -> Result<Option<Wikipedia>, Self::Error> {
        let code = code.trim();
        Ok(self
            .wikipedias
            .iter()
            .find(|wikipedia| wikipedia.code().eq_ignore_ascii_case(code))
            .cloned())
    }

    fn entities(
        &self,
        classification: &Classification,
        wikipedia_id: u32,
    ) -> Result<Vec<Entity>, Self::Error> {
        Ok(self
            .entities
            .get(&(classification.id(), wikipedia_id))
            .map(|entities| {
                entities
                    .iter()
                    .filter(|entity| entity.kind() == classification.kind())
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    fn abbreviations(&self, wikipedia_id: u32) -> Result<LocalizedAbbreviations, Self::Error> {
        Ok(self
            .abbreviations
            .get(&wikipedia_id)
            .into_iter()
            .flatten()
            .cloned()
            .collect())
    }
}

#[cfg(feature = "store-sqlite")]
pub use sqlite_fixture::SqliteFixture;

#[cfg(feature = "store-sqlite")]
mod sqlite_fixture {
    use std::path::Path;

    use rusqlite::{Connection, params};

    const SCHEMA: &str = r#"
        CREATE TABLE organiser (id INTEGER PRIMARY KEY, name TEXT NOT NULL);
        CREATE TABLE championship (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            organiser_id INTEGER REFERENCES organiser (id)
        );
        CREATE TABLE classification_type (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL UNIQUE
        );
        CREATE TABLE title (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            championship_id INTEGER NOT NULL REFERENCES championship (id),
            type_id INTEGER NOT NULL REFERENCES classification_type (id)
        );
        CREATE TABLE classification (
            id INTEGER PRIMARY KEY,
            title_id INTEGER NOT NULL REFERENCES title (id),
            season TEXT NOT NULL,
            races_number INTEGER NOT NULL,
            active INTEGER NOT NULL DEFAULT 1
        );
        CREATE TABLE manufacturer_classification (
            manufacturer_classification_id INTEGER PRIMARY KEY
                REFERENCES classification (id),
            scoring_cars INTEGER NOT NULL
        );
        CREATE TABLE "session" (id INTEGER PRIMARY KEY, name TEXT NOT NULL UNIQUE);
        CREATE TABLE result_styling (
            id INTEGER PRIMARY KEY,
            background_hex TEXT NOT NULL,
            text_colour_hex TEXT,
            bold INTEGER NOT NULL DEFAULT 0
        );
        CREATE TABLE score (
            classification_id INTEGER NOT NULL REFERENCES classification (id),
            entity_id INTEGER NOT NULL,
            round_number INTEGER NOT NULL,
            session_id INTEGER NOT NULL REFERENCES "session" (id),
            place TEXT NOT NULL,
            points REAL NOT NULL DEFAULT 0,
            style_id INTEGER NOT NULL REFERENCES result_styling (id)
        );
        CREATE TABLE wikipedia (id INTEGER PRIMARY KEY, version TEXT NOT NULL UNIQUE);
        CREATE TABLE driver (
            id INTEGER PRIMARY KEY,
            codename TEXT NOT NULL,
            flag TEXT NOT NULL
        );
        CREATE TABLE driver_wikipedia (
            driver_id INTEGER NOT NULL REFERENCES driver (id),
            wikipedia_id INTEGER NOT NULL REFERENCES wikipedia (id),
            short_link TEXT NOT NULL
        );
        CREATE TABLE team (
            id INTEGER PRIMARY KEY,
            codename TEXT NOT NULL,
            flag TEXT NOT NULL,
            car_number INTEGER
        );
        CREATE TABLE team_wikipedia (
            team_id INTEGER NOT NULL REFERENCES team (id),
            wikipedia_id INTEGER NOT NULL REFERENCES wikipedia (id),
            short_link TEXT NOT NULL
        );
        CREATE TABLE manufacturer (
            id INTEGER PRIMARY KEY,
            codename TEXT NOT NULL,
            flag TEXT NOT NULL
        );
        CREATE TABLE manufacturer_wikipedia (
            manufacturer_id INTEGER NOT NULL REFERENCES manufacturer (id),
            wikipedia_id INTEGER NOT NULL REFERENCES wikipedia (id),
            link TEXT NOT NULL
        );
        CREATE TABLE localised_status (
            style_id INTEGER NOT NULL REFERENCES result_styling (id),
            code TEXT NOT NULL,
            wikipedia_id INTEGER NOT NULL REFERENCES wikipedia (id)
        );
        INSERT INTO "session" (name) VALUES ('QUALIFYING'), ('RACE');
        INSERT INTO classification_type (name) VALUES ('DRIVERS'), ('MANUFACTURERS'), ('TEAMS');
    "#;

    /// Writable handle used to build championship databases for tests.
    #[derive(Debug)]
    pub struct SqliteFixture {
        connection: Connection,
    }

    impl SqliteFixture {
        /// Create a database at `path` with the championship schema.
        pub fn create(path: &Path) -> rusqlite::Result<Self> {
            let connection = Connection::open(path)?;
            connection.execute_batch(SCHEMA)?;
            Ok(Self { connection })
        }

        /// Reopen a database previously built with [`Self::create`].
        pub fn open(path: &Path) -> rusqlite::Result<Self> {
            Ok(Self {
                connection: Connection::open(path)?,
            })
        }

        /// Insert a Wikipedia version.
        pub fn wikipedia(&self, id: i64, version: &str) -> rusqlite::Result<()> {
            self.connection.execute(
                "INSERT INTO wikipedia (id, version) VALUES (?1, ?2)",
                params![id, version],
            )?;
            Ok(())
        }

        /// Insert a championship, creating its organiser when named.
        pub fn championship(
            &self,
            id: i64,
            name: &str,
            organiser: Option<&str>,
        ) -> rusqlite::Result<()> {
            let organiser_id = match organiser {
                Some(organiser) => {
                    self.connection
                        .execute("INSERT INTO organiser (name) VALUES (?1)", params![organiser])?;
                    Some(self.connection.last_insert_rowid())
                }
                None => None,
            };
            self.connection.execute(
                "INSERT INTO championship (id, name, organiser_id) VALUES (?1, ?2, ?3)",
                params![id, name, organiser_id],
            )?;
            Ok(())
        }

        /// Insert a classification and its title. Unknown type names are
        /// added to the type table.
        #[expect(clippy::too_many_arguments, reason = "mirrors the stored columns")]
        pub fn classification(
            &self,
            id: i64,
            championship_id: i64,
            title: &str,
            season: &str,
            races: i64,
            kind: &str,
            active: bool,
        ) -> rusqlite::Result<()> {
            self.connection.execute(
                "INSERT OR IGNORE INTO classification_type (name) VALUES (?1)",
                params![kind],
            )?;
            self.connection.execute(
                "INSERT INTO title (id, name, championship_id, type_id)
                 SELECT ?1, ?2, ?3, id FROM classification_type WHERE name = ?4",
                params![id, title, championship_id, kind],
            )?;
            self.connection.execute(
                "INSERT INTO classification (id, title_id, season, races_number, active)
                 VALUES (?1, ?1, ?2, ?3, ?4)",
                params![id, season, races, active],
            )?;
            Ok(())
        }

        /// Set the number of scoring cars of a manufacturers' classification.
        pub fn scoring_cars(&self, classification_id: i64, cars: i64) -> rusqlite::Result<()> {
            self.connection.execute(
                "INSERT INTO manufacturer_classification
                 (manufacturer_classification_id, scoring_cars) VALUES (?1, ?2)",
                params![classification_id, cars],
            )?;
            Ok(())
        }

        /// Insert a result style.
        pub fn style(
            &self,
            id: i64,
            background: &str,
            text_colour: Option<&str>,
            bold: bool,
        ) -> rusqlite::Result<()> {
            self.connection.execute(
                "INSERT INTO result_styling (id, background_hex, text_colour_hex, bold)
                 VALUES (?1, ?2, ?3, ?4)",
                params![id, background, text_colour, bold],
            )?;
            Ok(())
        }

        /// Insert an abbreviation for a style.
        pub fn abbreviation(
            &self,
            style_id: i64,
            code: &str,
            wikipedia_id: i64,
        ) -> rusqlite::Result<()> {
            self.connection.execute(
                "INSERT INTO localised_status (style_id, code, wikipedia_id) VALUES (?1, ?2, ?3)",
                params![style_id, code, wikipedia_id],
            )?;
            Ok(())
        }

        /// Insert a driver and its article link.
        pub fn driver(
            &self,
            id: i64,
            codename: &str,
            flag: &str,
            link: &str,
            wikipedia_id: i64,
        ) -> rusqlite::Result<()> {
            self.connection.execute(
                "INSERT INTO driver (id, codename, flag) VALUES (?1, ?2, ?3)",
                params![id, codename, flag],
            )?;
            self.connection.execute(
                "INSERT INTO driver_wikipedia (driver_id, wikipedia_id, short_link)
                 VALUES (?1, ?2, ?3)",
                params![id, wikipedia_id, link],
            )?;
            Ok(())
        }

        /// Insert a team and its article link. Teams without a car number
        /// are stored with a NULL number.
        pub fn team(
            &self,
            id: i64,
            codename: &str,
            flag: &str,
            car_number: Option<i64>,
            link: &str,
            wikipedia_id: i64,
        ) -> rusqlite::Result<()> {
            self.connection.execute(
                "INSERT INTO team (id, codename, flag, car_number) VALUES (?1, ?2, ?3, ?4)",
                params![id, codename, flag, car_number],
            )?;
            self.connection.execute(
                "INSERT INTO team_wikipedia (team_id, wikipedia_id, short_link)
                 VALUES (?1, ?2, ?3)",
                params![id, wikipedia_id, link],
            )?;
            Ok(())
        }

        /// Insert a manufacturer and its article link.
        pub fn manufacturer(
            &self,
            id: i64,
            codename: &str,
            flag: &str,
            link: &str,
            wikipedia_id: i64,
        ) -> rusqlite::Result<()> {
            self.connection.execute(
                "INSERT INTO manufacturer (id, codename, flag) VALUES (?1, ?2, ?3)",
                params![id, codename, flag],
            )?;
            self.connection.execute(
                "INSERT INTO manufacturer_wikipedia (manufacturer_id, wikipedia_id, link)
                 VALUES (?1, ?2, ?3)",
                params![id, wikipedia_id, link],
            )?;
            Ok(())
        }

        /// Insert a score row. Unknown session names are added to the
        /// session table.
        #[expect(clippy::too_many_arguments, reason = "mirrors the stored columns")]
        pub fn score(
            &self,
            classification_id: i64,
            entity_id: i64,
            round: i64,
            session: &str,
            place: &str,
            points: f64,
            style_id: i64,
        ) -> rusqlite::Result<()> {
            self.connection.execute(
                r#"INSERT OR IGNORE INTO "session" (name) VALUES (?1)"#,
                params![session],
            )?;
            self.connection.execute(
                r#"INSERT INTO score
                   (classification_id, entity_id, round_number, session_id, place, points, style_id)
                   SELECT ?1, ?2, ?3, id, ?5, ?6, ?7 FROM "session" WHERE name = ?4"#,
                params![classification_id, entity_id, round, session, place, points, style_id],
            )?;
            Ok(())
        }
    }
}
