//! PlayStation serial reader.
//!
//! Unlike the Sega systems the PlayStation serial is not at a fixed sector
//! offset; it is the boot executable named in SYSTEM.CNF. The reader mounts
//! the disc read-only, walks the tree for that file and unmounts again.

use std::path::{Path, PathBuf};
use std::time::Duration;

use retrospin_core::{ProbeError, SerialReader, System};

use crate::mount::{self, DEFAULT_FS_TYPES, MountFacility, MountGuard, SystemMount};
use crate::system_cnf;

/// Default private mount point.
pub const DEFAULT_MOUNT_POINT: &str = "/mnt/cdrom";

/// Mounting right after insertion fails while the drive spins up.
pub const DEFAULT_ATTEMPTS: u32 = 2;
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(1);

/// Reader for PlayStation discs.
pub struct PsxReader {
    mount_point: PathBuf,
    fs_types: Vec<String>,
    attempts: u32,
    retry_delay: Duration,
    facility: Box<dyn MountFacility>,
}

impl Default for PsxReader {
    fn default() -> Self {
        Self::new()
    }
}

impl PsxReader {
    /// Reader using the system mount tools at [`DEFAULT_MOUNT_POINT`].
    pub fn new() -> Self {
        Self::with_facility(Box::new(SystemMount::new()))
    }

    pub fn with_facility(facility: Box<dyn MountFacility>) -> Self {
        Self {
            mount_point: PathBuf::from(DEFAULT_MOUNT_POINT),
            fs_types: DEFAULT_FS_TYPES.iter().map(|s| s.to_string()).collect(),
            attempts: DEFAULT_ATTEMPTS,
            retry_delay: DEFAULT_RETRY_DELAY,
            facility,
        }
    }

    pub fn with_mount_point(mut self, mount_point: impl Into<PathBuf>) -> Self {
        self.mount_point = mount_point.into();
        self
    }

    pub fn with_fs_types<S: Into<String>>(mut self, fs_types: impl IntoIterator<Item = S>) -> Self {
        self.fs_types = fs_types.into_iter().map(Into::into).collect();
        self
    }

    /// Number of tries per probe; clamped to at least one.
    pub fn with_attempts(mut self, attempts: u32) -> Self {
        self.attempts = attempts.max(1);
        self
    }

    pub fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = delay;
        self
    }

    pub fn mount_point(&self) -> &Path {
        &self.mount_point
    }
}

impl SerialReader for PsxReader {
    fn read_serial(&self, drive: &Path) -> Result<String, ProbeError> {
        let guard = MountGuard::acquire(
            self.facility.as_ref(),
            drive,
            &self.mount_point,
            &self.fs_types,
        )?;
        let serial = system_cnf::read_serial_from_tree(guard.path())?;
        log::info!(
            "Extracted PSX serial: {} ({} mount)",
            serial,
            guard.fstype()
        );
        Ok(serial)
    }

    fn system(&self) -> System {
        System::Psx
    }

    fn attempts(&self) -> u32 {
        self.attempts
    }

    fn retry_delay(&self) -> Duration {
        self.retry_delay
    }

    fn recover(&self, _drive: &Path) {
        mount::force_unmount(self.facility.as_ref(), &self.mount_point);
    }
}

#[cfg(test)]
#[path = "tests/psx_tests.rs"]
mod tests;
