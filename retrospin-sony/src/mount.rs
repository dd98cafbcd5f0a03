//! Read-only mounting of the optical drive.
//!
//! The PSX strategy is the only one that needs a filesystem view of the
//! disc. A mount left behind blocks the raw sector reads the other
//! strategies rely on, so every mount is owned by a [`MountGuard`] that
//! force-unmounts when it goes out of scope, whichever way that happens.

use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use retrospin_core::ProbeError;

/// Filesystem types tried, in order, when mounting a PSX disc.
pub const DEFAULT_FS_TYPES: &[&str] = &["iso9660", "udf"];

/// OS mount primitive.
pub trait MountFacility: Send + Sync {
    /// Mount `device` read-only at `mount_point` as `fstype`.
    fn mount(&self, device: &Path, mount_point: &Path, fstype: &str) -> io::Result<()>;

    /// Force-unmount whatever is mounted at `mount_point`.
    fn unmount(&self, mount_point: &Path) -> io::Result<()>;

    /// Whether something is currently mounted at `mount_point`.
    fn is_mounted(&self, mount_point: &Path) -> bool;
}

/// [`MountFacility`] backed by the system `mount`/`umount` tools and
/// `/proc/mounts`.
#[derive(Debug, Clone)]
pub struct SystemMount {
    mounts_table: PathBuf,
}

impl Default for SystemMount {
    fn default() -> Self {
        Self {
            mounts_table: PathBuf::from("/proc/mounts"),
        }
    }
}

impl SystemMount {
    pub fn new() -> Self {
        Self::default()
    }
}

impl MountFacility for SystemMount {
    fn mount(&self, device: &Path, mount_point: &Path, fstype: &str) -> io::Result<()> {
        let status = Command::new("mount")
            .args(["-t", fstype, "-o", "ro"])
            .arg(device)
            .arg(mount_point)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()?;
        if status.success() {
            Ok(())
        } else {
            Err(io::Error::other(format!(
                "mount -t {} {} exited with {}",
                fstype,
                device.display(),
                status
            )))
        }
    }

    fn unmount(&self, mount_point: &Path) -> io::Result<()> {
        let status = Command::new("umount")
            .arg("-f")
            .arg(mount_point)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()?;
        if status.success() {
            Ok(())
        } else {
            Err(io::Error::other(format!(
                "umount -f {} exited with {}",
                mount_point.display(),
                status
            )))
        }
    }

    fn is_mounted(&self, mount_point: &Path) -> bool {
        match std::fs::read_to_string(&self.mounts_table) {
            Ok(table) => mount_points(&table).any(|p| Path::new(&p) == mount_point),
            Err(e) => {
                log::debug!("Cannot read {}: {}", self.mounts_table.display(), e);
                false
            }
        }
    }
}

/// Mount points listed in a `/proc/mounts`-format table.
///
/// The kernel escapes spaces, tabs, newlines and backslashes in paths as
/// three-digit octal sequences (`\040`).
pub fn mount_points(table: &str) -> impl Iterator<Item = String> + '_ {
    table
        .lines()
        .filter_map(|line| line.split_whitespace().nth(1))
        .map(unescape_octal)
}

fn unescape_octal(field: &str) -> String {
    let bytes = field.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'\\' && i + 3 < bytes.len() {
            let digits = &bytes[i + 1..i + 4];
            if digits.iter().all(|b| (b'0'..=b'7').contains(b)) {
                let value = digits.iter().fold(0u32, |acc, b| acc * 8 + u32::from(b - b'0'));
                if let Ok(value) = u8::try_from(value) {
                    out.push(value);
                    i += 4;
                    continue;
                }
            }
        }
        out.push(bytes[i]);
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}

/// Force-unmount `mount_point`, logging instead of failing.
pub fn force_unmount(facility: &dyn MountFacility, mount_point: &Path) {
    match facility.unmount(mount_point) {
        Ok(()) => log::debug!("Unmounted {}", mount_point.display()),
        Err(e) => {
            if facility.is_mounted(mount_point) {
                log::warn!("Failed to unmount {}: {}", mount_point.display(), e);
            } else {
                log::debug!("Nothing mounted at {} ({})", mount_point.display(), e);
            }
        }
    }
}

/// A live read-only mount that is released on drop.
pub struct MountGuard<'a> {
    facility: &'a dyn MountFacility,
    mount_point: PathBuf,
    fstype: String,
}

impl<'a> MountGuard<'a> {
    /// Mount `device` at `mount_point`, trying each filesystem type in turn.
    ///
    /// An existing mount at `mount_point` is force-unmounted first and the
    /// directory is created if missing. When every type fails the mount
    /// point is cleaned again before returning `MountFailed`.
    pub fn acquire(
        facility: &'a dyn MountFacility,
        device: &Path,
        mount_point: &Path,
        fs_types: &[String],
    ) -> Result<Self, ProbeError> {
        if facility.is_mounted(mount_point) {
            log::info!(
                "{} already mounted, forcing unmount",
                mount_point.display()
            );
            force_unmount(facility, mount_point);
        }
        std::fs::create_dir_all(mount_point)?;

        for fstype in fs_types {
            log::debug!(
                "Mounting {} at {} as {}",
                device.display(),
                mount_point.display(),
                fstype
            );
            match facility.mount(device, mount_point, fstype) {
                Ok(()) => {
                    log::info!("Mounted {} as {}", device.display(), fstype);
                    return Ok(Self {
                        facility,
                        mount_point: mount_point.to_path_buf(),
                        fstype: fstype.clone(),
                    });
                }
                Err(e) => log::warn!("{} mount of {} failed: {}", fstype, device.display(), e),
            }
        }

        force_unmount(facility, mount_point);
        Err(ProbeError::mount_failed(fs_types.iter().cloned()))
    }

    /// Root of the mounted filesystem.
    pub fn path(&self) -> &Path {
        &self.mount_point
    }

    /// Filesystem type the mount succeeded with.
    pub fn fstype(&self) -> &str {
        &self.fstype
    }
}

impl Drop for MountGuard<'_> {
    fn drop(&mut self) {
        force_unmount(self.facility, &self.mount_point);
    }
}

#[cfg(test)]
#[path = "tests/mount_tests.rs"]
mod tests;
