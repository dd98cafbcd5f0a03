//! SQLite schema creation and migration.

use std::path::{Path, PathBuf};

use rusqlite::{Connection, OpenFlags};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("Migration error: expected version {expected}, found {found}")]
    VersionMismatch { expected: i32, found: i32 },
    #[error("Title database not found at {}", .0.display())]
    Missing(PathBuf),
    #[error("Title database at {} has no games table", .0.display())]
    NoGamesTable(PathBuf),
}

/// Current schema version. Increment when adding migrations.
pub const CURRENT_VERSION: i32 = 1;

/// Create all tables and indexes if they don't exist.
///
/// This is idempotent. Stores built by the ETL scripts carry the same
/// tables but no `schema_version` row; they are adopted as version 1.
pub fn create_schema(conn: &Connection) -> Result<(), SchemaError> {
    conn.execute_batch(SCHEMA_SQL)?;
    set_schema_version(conn, CURRENT_VERSION)?;
    Ok(())
}

/// Open or create a title database at the given path.
pub fn open_database(path: &Path) -> Result<Connection, SchemaError> {
    let conn = Connection::open(path)?;
    conn.execute_batch("PRAGMA journal_mode=WAL;")?;

    let version = get_schema_version(&conn)?;
    if version == 0 {
        create_schema(&conn)?;
    } else if version != CURRENT_VERSION {
        migrate(&conn, version)?;
    }

    Ok(conn)
}

/// Open an existing title database without write access.
///
/// Unlike [`open_database`] this never creates a file: a probe session
/// that finds no store should report the index as unavailable rather than
/// silently start from an empty one.
pub fn open_read_only(path: &Path) -> Result<Connection, SchemaError> {
    if !path.is_file() {
        return Err(SchemaError::Missing(path.to_path_buf()));
    }
    let conn = Connection::open_with_flags(
        path,
        OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )?;
    if !table_exists(&conn, "games")? {
        return Err(SchemaError::NoGamesTable(path.to_path_buf()));
    }
    Ok(conn)
}

/// Open an in-memory database with the full schema. Useful for testing.
pub fn open_memory() -> Result<Connection, SchemaError> {
    let conn = Connection::open_in_memory()?;
    create_schema(&conn)?;
    Ok(conn)
}

fn table_exists(conn: &Connection, name: &str) -> Result<bool, SchemaError> {
    let exists: bool = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name=?1)",
        [name],
        |row| row.get(0),
    )?;
    Ok(exists)
}

/// Get the current schema version, or 0 if no schema exists.
fn get_schema_version(conn: &Connection) -> Result<i32, SchemaError> {
    if !table_exists(conn, "schema_version")? {
        return Ok(0);
    }

    let version: i32 = conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_version",
        [],
        |row| row.get(0),
    )?;
    Ok(version)
}

/// Record a schema version.
fn set_schema_version(conn: &Connection, version: i32) -> Result<(), SchemaError> {
    conn.execute(
        "INSERT INTO schema_version (version) VALUES (?1)",
        [version],
    )?;
    Ok(())
}

/// Bring an older store up to `CURRENT_VERSION`.
///
/// There are no migrations yet; a store newer than this build is refused.
fn migrate(conn: &Connection, from_version: i32) -> Result<(), SchemaError> {
    if from_version > CURRENT_VERSION {
        return Err(SchemaError::VersionMismatch {
            expected: CURRENT_VERSION,
            found: from_version,
        });
    }

    let mut version = from_version;
    while version < CURRENT_VERSION {
        version += 1;
        log::info!("Migrating title database to schema version {}", version);
        set_schema_version(conn, version)?;
    }

    Ok(())
}

const SCHEMA_SQL: &str = r#"
-- Schema version tracking
CREATE TABLE IF NOT EXISTS schema_version (
    version INTEGER NOT NULL,
    applied_at TEXT NOT NULL DEFAULT (datetime('now'))
);

-- Known titles, keyed by disc serial per system
CREATE TABLE IF NOT EXISTS games (
    serial TEXT,
    title TEXT,
    category TEXT,
    region TEXT,
    system TEXT,
    language TEXT,
    PRIMARY KEY (serial, system)
);
CREATE INDEX IF NOT EXISTS idx_games_system ON games(system);

-- Serials read from discs that matched nothing
CREATE TABLE IF NOT EXISTS unknown (
    serial TEXT,
    title TEXT,
    category TEXT,
    region TEXT,
    system TEXT,
    language TEXT,
    timestamp TEXT,
    PRIMARY KEY (title, system)
);

-- System codes and the emulator core that runs them
CREATE TABLE IF NOT EXISTS systems (
    system TEXT,
    core TEXT,
    name TEXT,
    PRIMARY KEY (system)
);
"#;
