//! Sega Saturn serial reader.
//!
//! The Saturn system ID lives in the first logical sector of the data
//! track. The product number field starts at 0x20; its first ten bytes hold
//! serials like `MK-81051`, `T-12705H` or `GS-9051`.

use std::ops::Range;
use std::path::Path;

use retrospin_core::sector::{self, SECTOR_SIZE};
use retrospin_core::util::decode_ascii_window;
use retrospin_core::{ProbeError, ReadSeek, SerialReader, System};

/// Product number window within the header sector (0x20..0x2A).
const SERIAL_WINDOW: Range<usize> = 32..42;

/// Reader for Sega Saturn discs.
#[derive(Debug, Default)]
pub struct SaturnReader;

impl SaturnReader {
    pub fn new() -> Self {
        Self
    }
}

/// Decode the Saturn serial from a header sector.
///
/// Returns `None` when the window is blank or not shaped `<alnum>-<alnum>`.
pub fn decode_saturn_serial(sector: &[u8; SECTOR_SIZE]) -> Option<String> {
    let raw = decode_ascii_window(sector::header_field(sector, SERIAL_WINDOW));
    log::debug!("Saturn raw serial: {:?}", raw);
    if is_saturn_serial(&raw) {
        Some(raw)
    } else {
        None
    }
}

/// Read the Saturn serial from any seekable source positioned on a disc image.
pub fn read_saturn_serial(reader: &mut dyn ReadSeek) -> Result<String, ProbeError> {
    let sector = sector::read_header_sector(reader)?;
    decode_saturn_serial(&sector)
        .ok_or_else(|| ProbeError::decode_failed("no valid Saturn serial in disc header"))
}

/// `T-12345`, `MK-81009`, `GS-9051`: one hyphen, upper-case alphanumerics on both sides.
fn is_saturn_serial(s: &str) -> bool {
    let Some((prefix, body)) = s.split_once('-') else {
        return false;
    };
    let part_ok = |p: &str| {
        !p.is_empty()
            && p
                .chars()
                .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
    };
    part_ok(prefix) && part_ok(body)
}

impl SerialReader for SaturnReader {
    fn read_serial(&self, drive: &Path) -> Result<String, ProbeError> {
        let sector = sector::read_device_header(drive)?;
        let serial = decode_saturn_serial(&sector)
            .ok_or_else(|| ProbeError::decode_failed("no valid Saturn serial in disc header"))?;
        log::info!("Extracted Saturn serial: {}", serial);
        Ok(serial)
    }

    fn system(&self) -> System {
        System::Saturn
    }
}

#[cfg(test)]
#[path = "tests/saturn_tests.rs"]
mod tests;
