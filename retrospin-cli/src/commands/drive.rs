use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use retrospin_lib::{DriveProbe, SystemDrives};

use crate::CliError;

/// Show the located drive and whether it holds a disc.
pub(crate) fn run_drive() -> Result<(), CliError> {
    let drives = SystemDrives;
    let drive = drives.locate().ok_or(CliError::NoDrive)?;

    let state = if drives.disc_present(&drive) {
        "disc loaded".if_supports_color(Stdout, |t| t.green()).to_string()
    } else {
        "no disc".if_supports_color(Stdout, |t| t.yellow()).to_string()
    };
    log::info!(
        "  Drive: {} ({})",
        drive.display().if_supports_color(Stdout, |t| t.cyan()),
        state,
    );
    Ok(())
}
