//! Optical drive discovery and disc presence.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::Command;

use serde::Deserialize;

/// Locates the optical drive and checks whether it holds a disc.
///
/// Both operations swallow every OS error: the watch loop polls them
/// continuously and a missing drive is an ordinary state, not a failure.
pub trait DriveProbe: Send + Sync {
    /// Path of the first optical drive, or `None`.
    fn locate(&self) -> Option<PathBuf>;

    /// Whether `drive` has a readable disc loaded.
    fn disc_present(&self, drive: &Path) -> bool;
}

/// [`DriveProbe`] backed by `lsblk` and a one-byte raw read.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemDrives;

impl DriveProbe for SystemDrives {
    fn locate(&self) -> Option<PathBuf> {
        let output = match Command::new("lsblk")
            .args(["-d", "-J", "-o", "NAME,TYPE"])
            .output()
        {
            Ok(output) => output,
            Err(e) => {
                log::debug!("lsblk failed to run: {}", e);
                return None;
            }
        };
        if !output.status.success() {
            log::debug!("lsblk exited with {}", output.status);
            return None;
        }
        match first_optical_drive(&String::from_utf8_lossy(&output.stdout)) {
            Ok(drive) => drive,
            Err(e) => {
                log::debug!("Unreadable lsblk output: {}", e);
                None
            }
        }
    }

    fn disc_present(&self, drive: &Path) -> bool {
        disc_present(drive)
    }
}

/// A drive named on the command line instead of discovered.
#[derive(Debug, Clone)]
pub struct FixedDrive {
    path: PathBuf,
}

impl FixedDrive {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl DriveProbe for FixedDrive {
    fn locate(&self) -> Option<PathBuf> {
        self.path.exists().then(|| self.path.clone())
    }

    fn disc_present(&self, drive: &Path) -> bool {
        disc_present(drive)
    }
}

#[derive(Debug, Deserialize)]
struct LsblkOutput {
    #[serde(default)]
    blockdevices: Vec<BlockDevice>,
}

#[derive(Debug, Deserialize)]
struct BlockDevice {
    name: String,
    #[serde(rename = "type")]
    kind: Option<String>,
}

/// Pick the first `rom` device from `lsblk -d -J -o NAME,TYPE` output.
pub fn first_optical_drive(json: &str) -> Result<Option<PathBuf>, serde_json::Error> {
    let parsed: LsblkOutput = serde_json::from_str(json)?;
    Ok(parsed
        .blockdevices
        .into_iter()
        .find(|dev| dev.kind.as_deref() == Some("rom"))
        .map(|dev| Path::new("/dev").join(dev.name)))
}

/// Try to read one byte from the raw device.
///
/// An empty tray, a drive still spinning up or a missing device all fail
/// here and report `false`.
pub fn disc_present(drive: &Path) -> bool {
    let mut byte = [0u8; 1];
    match File::open(drive).and_then(|mut f| f.read(&mut byte)) {
        Ok(n) => n == 1,
        Err(e) => {
            log::debug!("No readable disc in {}: {}", drive.display(), e);
            false
        }
    }
}

#[cfg(test)]
#[path = "tests/drive_tests.rs"]
mod tests;
