//! Sega CD / Mega CD serial reader.
//!
//! Mega-CD discs mirror the Genesis cartridge header inside the first
//! logical sector, so the product code sits at 0x180 just like on a
//! cartridge: `GM MK-4407 -00`, `GM T-93185 -00` and so on. The type prefix
//! and the revision suffix are stripped, leaving the catalog serial.

use std::ops::Range;
use std::path::Path;

use retrospin_core::sector::{self, SECTOR_SIZE};
use retrospin_core::util::decode_ascii_window;
use retrospin_core::{ProbeError, ReadSeek, SerialReader, System};

/// Product code window within the header sector (0x180..0x190).
const SERIAL_WINDOW: Range<usize> = 384..400;

/// Type prefixes that may precede the product code.
const TYPE_PREFIXES: &[&str] = &["GM", "T-"];

/// Reader for Sega CD / Mega CD discs.
#[derive(Debug, Default)]
pub struct MegaCdReader;

impl MegaCdReader {
    pub fn new() -> Self {
        Self
    }
}

/// Decode the Mega-CD serial from a header sector.
pub fn decode_mega_cd_serial(sector: &[u8; SECTOR_SIZE]) -> Option<String> {
    let raw = decode_ascii_window(sector::header_field(sector, SERIAL_WINDOW));
    log::debug!("Mega CD raw serial: {:?}", raw);
    parse_product_code(&raw)
}

/// Read the Mega-CD serial from any seekable source positioned on a disc image.
pub fn read_mega_cd_serial(reader: &mut dyn ReadSeek) -> Result<String, ProbeError> {
    let sector = sector::read_header_sector(reader)?;
    decode_mega_cd_serial(&sector)
        .ok_or_else(|| ProbeError::decode_failed("no valid Mega CD serial in disc header"))
}

/// Reduce a raw product code field to its serial body.
///
/// Accepts an optional `GM` or `T-` prefix, then a run of upper-case
/// alphanumerics and hyphens, then an optional whitespace-separated `-NN`
/// revision. Anything else in the field rejects it. If the text after a
/// prefix does not parse, the field is retried with the prefix kept.
pub fn parse_product_code(raw: &str) -> Option<String> {
    let raw = raw.trim();
    TYPE_PREFIXES
        .iter()
        .filter_map(|prefix| raw.strip_prefix(prefix))
        .chain(std::iter::once(raw))
        .find_map(parse_body)
}

fn parse_body(text: &str) -> Option<String> {
    let text = text.trim_start();
    let end = text
        .find(|c: char| !is_body_char(c))
        .unwrap_or(text.len());
    if end == 0 {
        return None;
    }
    let (body, rest) = text.split_at(end);
    if is_revision_suffix(rest) {
        Some(body.to_string())
    } else {
        None
    }
}

fn is_body_char(c: char) -> bool {
    c.is_ascii_uppercase() || c.is_ascii_digit() || c == '-'
}

/// True for `""`, whitespace, or whitespace + `-<digits>` + whitespace.
fn is_revision_suffix(rest: &str) -> bool {
    let rest = rest.trim();
    if rest.is_empty() {
        return true;
    }
    match rest.strip_prefix('-') {
        Some(digits) => !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()),
        None => false,
    }
}

impl SerialReader for MegaCdReader {
    fn read_serial(&self, drive: &Path) -> Result<String, ProbeError> {
        let sector = sector::read_device_header(drive)?;
        let serial = decode_mega_cd_serial(&sector)
            .ok_or_else(|| ProbeError::decode_failed("no valid Mega CD serial in disc header"))?;
        log::info!("Extracted Mega CD serial: {}", serial);
        Ok(serial)
    }

    fn system(&self) -> System {
        System::MegaCd
    }
}

#[cfg(test)]
#[path = "tests/mega_cd_tests.rs"]
mod tests;
