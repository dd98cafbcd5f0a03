//! Local disc image lookup.
//!
//! Resolved titles are matched against image files already on the device,
//! named after the title store's entries: `<title>.chd`, or a
//! `<title>.cue` / `<title>.bin` pair sitting in the same directory.

use std::fs;
use std::path::{Path, PathBuf};

use retrospin_core::System;

/// Characters that cannot appear in an image file name.
const FORBIDDEN: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// Language codes that open a trailing language tag such as `(En,Fr,De)`.
const LANGUAGE_CODES: &[&str] = &["en", "fr", "de", "es", "it", "ja", "ko", "zh"];

/// Find a local image for `title` under `dirs`, searched recursively.
///
/// All directories are checked for a `.chd` first, then for a complete
/// `.cue`/`.bin` pair (the `.cue` is returned). If the full title finds
/// nothing, the search is repeated with trailing tags removed.
pub fn find_game_image(title: &str, system: System, dirs: &[PathBuf]) -> Option<PathBuf> {
    let full = sanitize_title(title);
    if let Some(found) = search(&full, dirs) {
        log::info!("Found {} image: {}", system.short_label(), found.display());
        return Some(found);
    }

    let cleaned = sanitize_title(&clean_title(title));
    if !cleaned.is_empty() && cleaned != full {
        log::debug!("No image for '{}', trying '{}'", full, cleaned);
        if let Some(found) = search(&cleaned, dirs) {
            log::info!("Found {} image: {}", system.short_label(), found.display());
            return Some(found);
        }
    }

    log::info!("No local {} image for '{}'", system.short_label(), full);
    None
}

/// Drop characters that are invalid in file names and trim the result.
pub fn sanitize_title(title: &str) -> String {
    title
        .chars()
        .filter(|c| !FORBIDDEN.contains(c))
        .collect::<String>()
        .trim()
        .to_string()
}

/// Strip trailing language, `(Beta)`, `(Rev N)` and date tags, plus any
/// unterminated parenthesis, keeping the region tag.
///
/// `"Grandia (Japan) (En,Ja)"` becomes `"Grandia (Japan)"`.
pub fn clean_title(title: &str) -> String {
    let mut cleaned = title.trim();
    let tags: [fn(&str) -> bool; 4] =
        [is_language_tag, is_beta_tag, is_revision_tag, is_date_tag];
    for tag in tags {
        cleaned = strip_trailing_tag(cleaned, tag);
    }
    if let Some(open) = cleaned.rfind('(') {
        if !cleaned[open..].contains(')') {
            cleaned = &cleaned[..open];
        }
    }
    cleaned.trim().to_string()
}

fn strip_trailing_tag<'a>(title: &'a str, matches: fn(&str) -> bool) -> &'a str {
    let Some(body) = title.strip_suffix(')') else {
        return title;
    };
    match body.rfind('(') {
        Some(open) if matches(&body[open + 1..]) => body[..open].trim_end(),
        _ => title,
    }
}

fn is_language_tag(inner: &str) -> bool {
    let mut parts = inner.split(',');
    let first = parts.next().unwrap_or_default();
    LANGUAGE_CODES.contains(&first.to_ascii_lowercase().as_str())
        && parts.all(|p| !p.is_empty() && p.chars().all(|c| c.is_ascii_alphabetic()))
}

fn is_beta_tag(inner: &str) -> bool {
    inner.eq_ignore_ascii_case("beta")
}

fn is_revision_tag(inner: &str) -> bool {
    let Some(prefix) = inner.get(..3) else {
        return false;
    };
    let rest = &inner[3..];
    let number = rest.trim_start();
    prefix.eq_ignore_ascii_case("rev")
        && number.len() < rest.len()
        && !number.is_empty()
        && number.chars().all(|c| c.is_ascii_digit())
}

fn is_date_tag(inner: &str) -> bool {
    let bytes = inner.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, &b)| match i {
            4 | 7 => b == b'-',
            _ => b.is_ascii_digit(),
        })
}

fn search(name: &str, dirs: &[PathBuf]) -> Option<PathBuf> {
    if name.is_empty() {
        return None;
    }
    let chd = format!("{name}.chd");
    let cue = format!("{name}.cue");
    let bin = format!("{name}.bin");

    dirs.iter()
        .find_map(|dir| find_file(dir, &|d| Some(d.join(&chd)).filter(|p| p.is_file())))
        .or_else(|| {
            dirs.iter().find_map(|dir| {
                find_file(dir, &|d| {
                    let cue_path = d.join(&cue);
                    if !cue_path.is_file() {
                        return None;
                    }
                    if d.join(&bin).is_file() {
                        Some(cue_path)
                    } else {
                        log::debug!("Ignoring {} without {}", cue_path.display(), bin);
                        None
                    }
                })
            })
        })
}

/// Apply `probe` to `dir` and then its subdirectories in name order,
/// returning the first hit.
fn find_file(dir: &Path, probe: &dyn Fn(&Path) -> Option<PathBuf>) -> Option<PathBuf> {
    if let Some(found) = probe(dir) {
        return Some(found);
    }
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            log::debug!("Skipping {}: {}", dir.display(), e);
            return None;
        }
    };
    let mut subdirs: Vec<PathBuf> = entries
        .flatten()
        .filter(|e| e.file_type().is_ok_and(|ft| ft.is_dir()))
        .map(|e| e.path())
        .collect();
    subdirs.sort();
    subdirs.iter().find_map(|sub| find_file(sub, probe))
}

#[cfg(test)]
#[path = "tests/library_tests.rs"]
mod tests;
