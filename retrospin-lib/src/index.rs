//! In-memory title index.
//!
//! Built once per session from the title store and read-only afterwards.
//! Keys are `(system code, normalized serial)`; each key holds a list
//! because several store rows can share a key once serials are normalized
//! (`SLUS_00515` and `slus00515` both land on `SLUS00515`).

use std::collections::BTreeMap;
use std::path::Path;

use retrospin_core::{ProbeError, normalize_serial};
use retrospin_db::TitleRow;

/// One candidate title for a serial.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitleEntry {
    /// Normalized serial as stored
    pub serial: String,
    pub title: String,
}

#[derive(Debug, Default, Clone)]
pub struct TitleIndex {
    entries: BTreeMap<(String, String), Vec<TitleEntry>>,
    len: usize,
}

impl TitleIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load every title from the store at `path`.
    ///
    /// Any failure (missing file, unreadable store) becomes
    /// `ProbeError::IndexUnavailable`.
    pub fn open(path: &Path) -> Result<Self, ProbeError> {
        let conn = retrospin_db::open_read_only(path)
            .map_err(|e| ProbeError::index_unavailable(e.to_string()))?;
        let rows = retrospin_db::load_titles(&conn)
            .map_err(|e| ProbeError::index_unavailable(e.to_string()))?;
        let index = Self::from_rows(rows);
        log::info!(
            "Loaded {} titles from {}",
            index.len(),
            path.display()
        );
        Ok(index)
    }

    pub fn from_rows(rows: impl IntoIterator<Item = TitleRow>) -> Self {
        let mut index = Self::new();
        for row in rows {
            index.insert(&row.system, &row.serial, &row.title);
        }
        index
    }

    /// Add a title. Rows whose serial normalizes to nothing are dropped.
    pub fn insert(&mut self, system_code: &str, serial: &str, title: &str) {
        let serial = normalize_serial(serial);
        if serial.is_empty() {
            return;
        }
        let system = system_code.trim().to_lowercase();
        self.entries
            .entry((system, serial.clone()))
            .or_default()
            .push(TitleEntry {
                serial,
                title: title.trim().to_string(),
            });
        self.len += 1;
    }

    /// Number of titles (not keys).
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of distinct `(system, serial)` keys.
    pub fn key_count(&self) -> usize {
        self.entries.len()
    }

    /// Every key of one system, in serial order.
    pub fn keys_for<'a>(
        &'a self,
        system_code: &str,
    ) -> impl Iterator<Item = (&'a str, &'a [TitleEntry])> + use<'a> {
        let system = system_code.to_lowercase();
        self.entries
            .range((system.clone(), String::new())..)
            .take_while(move |((s, _), _)| *s == system)
            .map(|((_, serial), titles)| (serial.as_str(), titles.as_slice()))
    }
}

#[cfg(test)]
#[path = "tests/index_tests.rs"]
mod tests;
