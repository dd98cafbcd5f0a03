use std::io::{Read, Seek};
use std::path::Path;
use std::time::Duration;

pub mod error;
pub mod outcome;
pub mod sector;
pub mod serial;
pub mod system;
pub mod util;

pub use error::ProbeError;
pub use outcome::{DiscOutcome, ResolvedDisc, UnmatchedDisc, UnmatchedReason};
pub use serial::{lookup_variants, match_key, normalize_serial};
pub use system::{System, SystemParseError};

/// A reader that implements both Read and Seek.
pub trait ReadSeek: Read + Seek {}
impl<T: Read + Seek> ReadSeek for T {}

/// Trait for reading a system-specific serial off a physical disc.
///
/// One implementation exists per supported system. The probe session calls
/// them in [`System::probe_order`] and stops at the first serial; any error
/// a reader returns is logged and treated as "not this system".
pub trait SerialReader: Send + Sync {
    /// Read the disc in `drive` and return its raw serial.
    ///
    /// # Returns
    /// * `Ok(serial)` - A serial in this system's shape was found
    /// * `Err(ProbeError)` - Mount, decode or I/O failure, or no serial present
    fn read_serial(&self, drive: &Path) -> Result<String, ProbeError>;

    /// Returns the system this reader identifies.
    fn system(&self) -> System;

    /// How many times the session should try this reader before giving up.
    fn attempts(&self) -> u32 {
        1
    }

    /// Pause between failed attempts.
    fn retry_delay(&self) -> Duration {
        Duration::ZERO
    }

    /// Put the drive back into a clean state after a failed attempt.
    ///
    /// The default does nothing; readers with side effects (mounts)
    /// override it.
    fn recover(&self, _drive: &Path) {}

    /// Returns the full name of the system this reader handles.
    fn system_name(&self) -> &'static str {
        self.system().display_name()
    }
}
