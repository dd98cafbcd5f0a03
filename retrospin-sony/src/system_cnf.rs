//! SYSTEM.CNF discovery and boot-line parsing.
//!
//! A PlayStation disc names its boot executable in a small text file at
//! (usually) the root of the filesystem:
//!
//! ```text
//! BOOT = cdrom:\SLUS_005.15;1
//! TCB = 4
//! EVENT = 10
//! STACK = 801FFFF0
//! ```
//!
//! The executable name is the disc's serial with a `.` inserted and `_` in
//! place of `-`.

use std::fs;
use std::path::{Path, PathBuf};

use retrospin_core::ProbeError;

/// File names accepted as the boot metadata file.
pub const METADATA_FILE_NAMES: [&str; 3] = ["system.cnf", "SYSTEM.CNF", "System.cnf"];

/// Walk `root` top-down and return every metadata file found.
///
/// Files in a directory are reported before anything in its
/// subdirectories; entries are visited in name order so the result is
/// stable across runs. Unreadable directories are skipped.
pub fn find_metadata_files(root: &Path) -> Vec<PathBuf> {
    let mut found = Vec::new();
    walk(root, &mut found);
    found
}

fn walk(dir: &Path, found: &mut Vec<PathBuf>) {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            log::debug!("Skipping {}: {}", dir.display(), e);
            return;
        }
    };

    let mut files = Vec::new();
    let mut subdirs = Vec::new();
    for entry in entries.flatten() {
        let path = entry.path();
        match entry.file_type() {
            Ok(ft) if ft.is_dir() => subdirs.push(path),
            Ok(ft) if ft.is_file() => files.push(path),
            _ => {}
        }
    }
    files.sort();
    subdirs.sort();

    found.extend(files.into_iter().filter(|p| is_metadata_file(p)));
    for sub in subdirs {
        walk(&sub, found);
    }
}

fn is_metadata_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| METADATA_FILE_NAMES.contains(&n))
}

/// Decode bytes as ISO-8859-1. Every byte maps to the code point of the
/// same value, so this never fails.
pub fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}

/// Find the `BOOT` line in SYSTEM.CNF content and return the serial it names.
///
/// The key match is case-insensitive; `BOOT2` (PS2 discs) is not accepted.
pub fn parse_boot_serial(content: &str) -> Option<String> {
    content.lines().find_map(|line| {
        let (key, value) = line.split_once('=')?;
        if key.trim().eq_ignore_ascii_case("BOOT") {
            boot_value_to_serial(value)
        } else {
            None
        }
    })
}

/// Turn a boot target like `cdrom:\SLUS_005.15;1` into `SLUS-00515`.
///
/// Discs disagree on the path separator (`cdrom:\X`, `cdrom:X`,
/// `cdrom:/X`), so the file name is whatever follows the last one.
pub fn boot_value_to_serial(value: &str) -> Option<String> {
    let value = value.trim();
    let file_name = value.rsplit(['\\', '/', ':']).next()?;
    let file_name = file_name.split(';').next().unwrap_or(file_name).trim();

    let serial: String = file_name
        .chars()
        .filter(|&c| c != '.')
        .map(|c| if c == '_' { '-' } else { c })
        .collect();

    if serial.is_empty() { None } else { Some(serial) }
}

/// Search a mounted disc tree for the boot serial.
///
/// Metadata files are tried in walk order; the first one with a usable
/// `BOOT` line wins.
pub fn read_serial_from_tree(root: &Path) -> Result<String, ProbeError> {
    let candidates = find_metadata_files(root);
    if candidates.is_empty() {
        return Err(ProbeError::metadata_not_found(format!(
            "no SYSTEM.CNF under {}",
            root.display()
        )));
    }

    for path in &candidates {
        let bytes = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) => {
                log::warn!("Cannot read {}: {}", path.display(), e);
                continue;
            }
        };
        if let Some(serial) = parse_boot_serial(&decode_latin1(&bytes)) {
            log::debug!("BOOT line in {} names {}", path.display(), serial);
            return Ok(serial);
        }
        log::debug!("{} has no BOOT line", path.display());
    }

    Err(ProbeError::metadata_not_found(format!(
        "no BOOT line in {} metadata file(s) under {}",
        candidates.len(),
        root.display()
    )))
}

#[cfg(test)]
#[path = "tests/system_cnf_tests.rs"]
mod tests;
