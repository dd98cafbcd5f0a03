//! Write operations for the title store.

use rusqlite::{Connection, params};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("Invalid {field}: value must not be empty")]
    Empty { field: &'static str },
}

/// Placeholder written into metadata columns nobody has filled in yet.
pub const UNKNOWN_FIELD: &str = "Unknown";

/// One row of the `games` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameRecord {
    pub serial: String,
    pub title: String,
    pub system: String,
    pub category: Option<String>,
    pub region: Option<String>,
    pub language: Option<String>,
}

impl GameRecord {
    pub fn new(
        serial: impl Into<String>,
        title: impl Into<String>,
        system: impl Into<String>,
    ) -> Self {
        Self {
            serial: serial.into(),
            title: title.into(),
            system: system.into(),
            category: None,
            region: None,
            language: None,
        }
    }
}

/// One row of the `unknown` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownEntry {
    pub serial: String,
    pub title: String,
    pub system: String,
    pub timestamp: String,
}

/// Title recorded for a serial nobody has named yet.
pub fn placeholder_title(serial: &str) -> String {
    format!("Game ({})", serial)
}

// ── Game Operations ─────────────────────────────────────────────────────────

/// Insert or replace a title keyed by `(serial, system)`.
pub fn upsert_game(conn: &Connection, game: &GameRecord) -> Result<(), StoreError> {
    require("serial", &game.serial)?;
    require("system", &game.system)?;
    conn.execute(
        "INSERT INTO games (serial, title, category, region, system, language)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)
         ON CONFLICT(serial, system) DO UPDATE SET
             title = excluded.title,
             category = excluded.category,
             region = excluded.region,
             language = excluded.language",
        params![
            game.serial.trim(),
            game.title.trim(),
            game.category,
            game.region,
            game.system.trim().to_lowercase(),
            game.language,
        ],
    )?;
    Ok(())
}

// ── Unknown-Title Log ───────────────────────────────────────────────────────

/// Record a serial that was read from a disc but matched no title.
///
/// The row is keyed by its placeholder title, so the same disc inserted
/// twice only refreshes the timestamp.
pub fn record_unknown(
    conn: &Connection,
    serial: &str,
    system: &str,
) -> Result<UnknownEntry, StoreError> {
    require("serial", serial)?;
    require("system", system)?;

    let entry = UnknownEntry {
        serial: serial.trim().to_string(),
        title: placeholder_title(serial.trim()),
        system: system.trim().to_lowercase(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    };
    conn.execute(
        "INSERT OR REPLACE INTO unknown (serial, title, category, region, system, language, timestamp)
         VALUES (?1, ?2, ?3, ?3, ?4, ?3, ?5)",
        params![
            entry.serial,
            entry.title,
            UNKNOWN_FIELD,
            entry.system,
            entry.timestamp,
        ],
    )?;
    log::debug!("Recorded unknown {} serial {}", entry.system, entry.serial);
    Ok(entry)
}

fn require(field: &'static str, value: &str) -> Result<(), StoreError> {
    if value.trim().is_empty() {
        Err(StoreError::Empty { field })
    } else {
        Ok(())
    }
}
