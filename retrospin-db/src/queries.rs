//! Read queries for the title store.

use rusqlite::Connection;

use crate::operations::{StoreError, UnknownEntry};

/// A `(serial, title, system)` row as the title index consumes it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitleRow {
    pub serial: String,
    pub title: String,
    pub system: String,
}

/// Load every title row.
///
/// Serials and titles are trimmed and system codes lower-cased. Rows with
/// a NULL or blank serial or system carry nothing to match on and are
/// skipped.
pub fn load_titles(conn: &Connection) -> Result<Vec<TitleRow>, StoreError> {
    let mut stmt = conn.prepare("SELECT serial, title, system FROM games ORDER BY rowid")?;
    let rows = stmt.query_map([], |row| {
        Ok((
            row.get::<_, Option<String>>(0)?,
            row.get::<_, Option<String>>(1)?,
            row.get::<_, Option<String>>(2)?,
        ))
    })?;

    let mut titles = Vec::new();
    let mut skipped = 0usize;
    for row in rows {
        let (serial, title, system) = row?;
        let serial = serial.as_deref().map(str::trim).unwrap_or_default();
        let system = system.as_deref().map(str::trim).unwrap_or_default();
        if serial.is_empty() || system.is_empty() {
            skipped += 1;
            continue;
        }
        titles.push(TitleRow {
            serial: serial.to_string(),
            title: title.as_deref().map(str::trim).unwrap_or_default().to_string(),
            system: system.to_lowercase(),
        });
    }
    if skipped > 0 {
        log::debug!("Skipped {} title rows without serial or system", skipped);
    }
    Ok(titles)
}

/// Total number of rows in `games`.
pub fn title_count(conn: &Connection) -> Result<i64, StoreError> {
    let count: i64 = conn.query_row("SELECT COUNT(*) FROM games", [], |r| r.get(0))?;
    Ok(count)
}

/// Title count for one system code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemCount {
    pub system: String,
    /// Display name from the `systems` table, when registered.
    pub name: Option<String>,
    /// Emulator core registered for the system.
    pub core: Option<String>,
    pub titles: i64,
}

/// Number of titles per system, ordered by system code.
pub fn titles_per_system(conn: &Connection) -> Result<Vec<SystemCount>, StoreError> {
    let mut stmt = conn.prepare(
        "SELECT LOWER(TRIM(g.system)) AS code, s.name, s.core, COUNT(*)
         FROM games g LEFT JOIN systems s ON s.system = LOWER(TRIM(g.system))
         GROUP BY code ORDER BY code",
    )?;
    let rows = stmt.query_map([], |row| {
        Ok(SystemCount {
            system: row.get::<_, Option<String>>(0)?.unwrap_or_default(),
            name: row.get(1)?,
            core: row.get(2)?,
            titles: row.get(3)?,
        })
    })?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

/// Every recorded unknown serial, newest first.
pub fn unknown_entries(conn: &Connection) -> Result<Vec<UnknownEntry>, StoreError> {
    let mut stmt = conn.prepare(
        "SELECT serial, title, system, timestamp FROM unknown
         ORDER BY timestamp DESC, system, serial",
    )?;
    let rows = stmt.query_map([], |row| {
        Ok(UnknownEntry {
            serial: row.get::<_, Option<String>>(0)?.unwrap_or_default(),
            title: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
            system: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
            timestamp: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
        })
    })?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

/// Summary statistics for the store.
#[derive(Debug)]
pub struct StoreStats {
    pub titles: i64,
    pub per_system: Vec<SystemCount>,
    pub unknown: i64,
}

pub fn store_stats(conn: &Connection) -> Result<StoreStats, StoreError> {
    let titles = title_count(conn)?;
    let per_system = titles_per_system(conn)?;
    let unknown: i64 = conn.query_row("SELECT COUNT(*) FROM unknown", [], |r| r.get(0))?;
    Ok(StoreStats {
        titles,
        per_system,
        unknown,
    })
}
