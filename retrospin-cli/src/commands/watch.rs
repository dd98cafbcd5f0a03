use std::path::PathBuf;

use indicatif::ProgressBar;

use retrospin_lib::{DiscSession, DiscWatcher, Settings};

use crate::CliError;
use crate::dispatch::ReportDispatcher;
use crate::prompt::TerminalPrompt;

use super::{drive_probe, with_mount_point};

/// Poll the drive until the process is terminated.
pub(crate) fn run_watch(
    settings: &Settings,
    drive: Option<PathBuf>,
    mount_point: Option<PathBuf>,
) -> Result<(), CliError> {
    let settings = with_mount_point(settings, mount_point);

    // No spinner here: the loop runs indefinitely and logs state changes.
    let session = DiscSession::from_settings(&settings, drive_probe(drive))
        .with_disambiguator(Box::new(TerminalPrompt::new(ProgressBar::hidden())));
    let mut watcher = DiscWatcher::new(session, settings.poll_interval());
    let mut dispatcher = ReportDispatcher::new(settings);

    watcher.run(&mut dispatcher, || false);
    Ok(())
}
