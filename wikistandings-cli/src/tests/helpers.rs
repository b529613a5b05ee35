//! Test helpers for building championship databases on disk.

use camino::{Utf8Path, Utf8PathBuf};
use tempfile::TempDir;
use wikistandings_core::test_support::SqliteFixture;

/// Temporary workspace holding a seeded championship database.
pub(super) struct SeasonDatabase {
    _dir: TempDir,
    root: Utf8PathBuf,
    path: Utf8PathBuf,
}

impl SeasonDatabase {
    /// Seed a drivers' classification with two drivers over two rounds.
    ///
    /// Kubica takes pole and finishes second in round 1, then retires;
    /// Nato wins both rounds.
    pub(super) fn new() -> Self {
        let dir = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 workspace");
        let path = root.join("championships.db");
        let db = SqliteFixture::create(path.as_std_path()).expect("create database");
        db.wikipedia(1, "enwiki").expect("wikipedia");
        db.championship(1, "European Le Mans Series", Some("ACO"))
            .expect("championship");
        db.classification(1, 1, "LMP2 Drivers' Championship", "2024", 6, "DRIVERS", true)
            .expect("classification");
        db.style(1, "FFFFBF", None, false).expect("gold style");
        db.style(2, "DFDFDF", None, false).expect("silver style");
        db.style(3, "EFCFFF", None, false).expect("retired style");
        db.abbreviation(3, "Ret", 1).expect("abbreviation");
        db.driver(1, "KUB", "POL", "[[Robert Kubica]]", 1)
            .expect("driver");
        db.driver(2, "NAT", "FRA", "[[Norman Nato]]", 1)
            .expect("driver");
        db.score(1, 1, 1, "QUALIFYING", "1", 0.0, 1).expect("score");
        db.score(1, 1, 1, "RACE", "2", 18.0, 2).expect("score");
        db.score(1, 2, 1, "RACE", "1", 25.0, 1).expect("score");
        db.score(1, 1, 2, "RACE", "DNF", 0.0, 3).expect("score");
        db.score(1, 2, 2, "RACE", "1", 25.0, 1).expect("score");
        Self {
            _dir: dir,
            root,
            path,
        }
    }

    /// Add a teams' classification (id 2) with one team linked in the
    /// Wikipedia edition `code`, registering the edition when it is new.
    pub(super) fn add_teams(&self, code: &str) {
        let db = SqliteFixture::open(self.path.as_std_path()).expect("reopen database");
        let wikipedia_id = if code == "enwiki" {
            1
        } else {
            db.wikipedia(2, code).expect("wikipedia");
            2
        };
        db.classification(2, 1, "LMP2 Teams' Championship", "2024", 6, "TEAMS", true)
            .expect("classification");
        db.team(83, "AFC", "ITA", Some(83), "[[AF Corse]]", wikipedia_id)
            .expect("team");
        db.score(2, 83, 1, "RACE", "1", 25.0, 1).expect("score");
    }

    pub(super) fn path(&self) -> &Utf8Path {
        &self.path
    }

    pub(super) fn root(&self) -> &Utf8Path {
        &self.root
    }
}

/// Wikitable rows expected for [`SeasonDatabase`].
pub(super) const SEASON_TABLE: &str = r#"|-
! 1
| align="left" | {{flagicon|FRA}} [[Norman Nato]]
| style="background:#FFFFBF" | 1
| style="background:#FFFFBF" | 1
|
|
|
|
! 50
|-
! 2
| align="left" | {{flagicon|POL}} [[Robert Kubica]]
| style="background:#DFDFDF" | '''2'''
| style="background:#EFCFFF" | Ret
|
|
|
|
! 18
|-
"#;
