//! Common test utilities and fixture helpers.
//!
//! This module provides shared test infrastructure for integration tests,
//! including the checked-in JSON catalog and scratch SQLite snapshots.

use std::path::{Path, PathBuf};

use rusqlite::Connection;
use tempfile::TempDir;

/// Path to fixtures directory used by tests.
#[allow(dead_code)]
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures")
}

/// Path to the Madrid JSON catalog fixture.
#[allow(dead_code)]
pub fn madrid_catalog_path() -> PathBuf {
    fixtures_dir().join("madrid_catalog.json")
}

const SCHEMA: &str = "
    CREATE TABLE fields (
        id TEXT PRIMARY KEY,
        name TEXT NOT NULL,
        sport TEXT,
        surface TEXT,
        address TEXT,
        latitude REAL,
        longitude REAL
    );
    CREATE TABLE players (
        id TEXT PRIMARY KEY,
        display_name TEXT NOT NULL,
        favourite_sport TEXT,
        skill_level TEXT,
        latitude REAL,
        longitude REAL
    );
    CREATE TABLE games (
        id TEXT PRIMARY KEY,
        title TEXT NOT NULL,
        sport TEXT,
        field_id TEXT REFERENCES fields(id),
        starts_at TEXT,
        max_players INTEGER,
        latitude REAL,
        longitude REAL
    );
";

const ROWS: &str = "
    INSERT INTO fields VALUES
        ('f-plaza-mayor', 'Plaza Mayor Court', 'basketball', 'asphalt', NULL, 40.4155, -3.7074),
        ('f-retiro', 'Retiro Pitch', 'football', NULL, NULL, 40.4153, -3.6845),
        ('f-toledo', 'Toledo Field', 'football', NULL, NULL, 39.8628, -4.0273),
        ('f-popup', 'Pop-up Court', 'volleyball', NULL, NULL, NULL, NULL),
        ('f-null-island', 'Null Island Court', NULL, NULL, NULL, 0.0, 0.0);
    INSERT INTO players VALUES
        ('p-ana', 'Ana', 'basketball', 'intermediate', 40.4168, -3.7038),
        ('p-luis', 'Luis', 'football', NULL, 41.0, -3.70),
        ('p-sam', 'Sam', NULL, NULL, NULL, NULL);
    INSERT INTO games VALUES
        ('g-sunday-3v3', 'Sunday 3v3', 'basketball', 'f-plaza-mayor', '2026-10-25T10:00:00Z', 6, NULL, NULL),
        ('g-toledo-11s', 'Toledo Eleven-a-side', 'football', 'f-toledo', NULL, 22, NULL, NULL),
        ('g-roaming', 'Roaming game', 'football', 'f-toledo', NULL, NULL, 40.45, -3.70),
        ('g-beach', 'Beach volley meetup', 'volleyball', 'f-popup', NULL, NULL, NULL, NULL);
";

/// Scratch directory holding a populated SQLite snapshot.
#[allow(dead_code)]
pub struct SqliteFixture {
    _temp_dir: TempDir,
    pub db_path: PathBuf,
}

#[allow(dead_code)]
impl SqliteFixture {
    /// Create a snapshot with the full Madrid schema and rows.
    pub fn madrid() -> Self {
        Self::with_sql(&format!("{SCHEMA}{ROWS}"))
    }

    /// Create a snapshot from arbitrary SQL.
    pub fn with_sql(sql: &str) -> Self {
        let temp_dir = tempfile::tempdir().expect("create temp dir");
        let db_path = temp_dir.path().join("catalog.db");
        write_database(&db_path, sql);
        Self {
            _temp_dir: temp_dir,
            db_path,
        }
    }
}

fn write_database(path: &Path, sql: &str) {
    let connection = Connection::open(path).expect("create sqlite file");
    connection.execute_batch(sql).expect("populate sqlite file");
}
