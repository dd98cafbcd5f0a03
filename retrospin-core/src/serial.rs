//! Serial normalization.
//!
//! Serials reach the index from two directions: read off a disc (sector
//! bytes or a SYSTEM.CNF boot line) and loaded from the title store. Both
//! sides go through [`normalize_serial`] before they are compared, and the
//! comparison itself uses [`match_key`] so `SLUS_005.15`-style and
//! `SLUS-00515`-style spellings meet in the middle.

use crate::System;

/// Normalize a serial for storage and display: strip `_`, upper-case, trim.
///
/// Hyphens are kept, so `"slus_00515"` becomes `"SLUS00515"` and
/// `"mk-81051 "` becomes `"MK-81051"`.
pub fn normalize_serial(serial: &str) -> String {
    serial
        .chars()
        .filter(|&c| c != '_')
        .flat_map(char::to_uppercase)
        .collect::<String>()
        .trim()
        .to_string()
}

/// Key used for matching: the normalized serial with hyphens removed too.
pub fn match_key(serial: &str) -> String {
    normalize_serial(serial)
        .chars()
        .filter(|&c| c != '-')
        .collect()
}

/// Serials worth an equality lookup for a disc of `system`.
///
/// The first entry is always the normalized serial. Mega-CD discs carry a
/// `-00` publisher suffix that western catalog rows usually omit, so the
/// suffix-stripped spelling is offered as a second key.
pub fn lookup_variants(system: System, serial: &str) -> Vec<String> {
    let normalized = normalize_serial(serial);
    let mut variants = vec![normalized.clone()];
    if system == System::MegaCd {
        let regional = normalized.replace("-00", "");
        if regional != normalized && !regional.is_empty() {
            variants.push(regional);
        }
    }
    variants
}

#[cfg(test)]
#[path = "tests/serial_tests.rs"]
mod tests;
