//! Raw sector access for the header-based strategies.
//!
//! Saturn and Mega-CD discs both carry their identifier in the first
//! logical sector of the data track, so one read of 2048 bytes at offset 0
//! is all either strategy needs. No mount is involved.

use std::fs::File;
use std::io::SeekFrom;
use std::ops::Range;
use std::path::Path;

use crate::{ProbeError, ReadSeek};

/// Size of one logical (user data) sector on a Mode 1 / Mode 2 Form 1 disc.
pub const SECTOR_SIZE: usize = 2048;

/// Read the first logical sector from a reader.
pub fn read_header_sector(reader: &mut dyn ReadSeek) -> Result<[u8; SECTOR_SIZE], ProbeError> {
    reader.seek(SeekFrom::Start(0))?;
    let mut sector = [0u8; SECTOR_SIZE];
    reader.read_exact(&mut sector).map_err(|e| {
        if e.kind() == std::io::ErrorKind::UnexpectedEof {
            ProbeError::decode_failed("header sector is shorter than 2048 bytes")
        } else {
            ProbeError::Io(e)
        }
    })?;
    Ok(sector)
}

/// Open a raw block device (or image file) and read its first logical sector.
pub fn read_device_header(drive: &Path) -> Result<[u8; SECTOR_SIZE], ProbeError> {
    let mut file = File::open(drive)?;
    read_header_sector(&mut file)
}

/// Slice a header field out of a sector, clamped to the sector bounds.
pub fn header_field(sector: &[u8], range: Range<usize>) -> &[u8] {
    let end = range.end.min(sector.len());
    let start = range.start.min(end);
    &sector[start..end]
}

#[cfg(test)]
#[path = "tests/sector_tests.rs"]
mod tests;
