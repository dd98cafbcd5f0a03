pub(crate) mod config;
pub(crate) mod drive;
pub(crate) mod lookup;
pub(crate) mod probe;
pub(crate) mod stats;
pub(crate) mod watch;

use std::path::PathBuf;

use retrospin_lib::{DriveProbe, FixedDrive, Settings, SystemDrives};

/// Drive named with `--drive`, or discovery when none was given.
pub(crate) fn drive_probe(drive: Option<PathBuf>) -> Box<dyn DriveProbe> {
    match drive {
        Some(path) => Box::new(FixedDrive::new(path)),
        None => Box::new(SystemDrives),
    }
}

/// Settings with the per-command `--mount-point` override applied.
pub(crate) fn with_mount_point(settings: &Settings, mount_point: Option<PathBuf>) -> Settings {
    let mut settings = settings.clone();
    if let Some(mount_point) = mount_point {
        settings.disc.mount_point = mount_point;
    }
    settings
}
