use std::path::PathBuf;

use retrospin_lib::{DiscOutcome, DiscSession, Dispatcher, Settings};

use crate::CliError;
use crate::dispatch::ReportDispatcher;
use crate::prompt::TerminalPrompt;
use crate::spinner::probe_spinner;

use super::{drive_probe, with_mount_point};

/// Run one probe cycle and report the outcome.
pub(crate) fn run_probe(
    settings: &Settings,
    drive: Option<PathBuf>,
    mount_point: Option<PathBuf>,
    quiet: bool,
) -> Result<DiscOutcome, CliError> {
    let settings = with_mount_point(settings, mount_point);
    let pb = probe_spinner(quiet, "Reading disc...");

    let mut session = DiscSession::from_settings(&settings, drive_probe(drive))
        .with_disambiguator(Box::new(TerminalPrompt::new(pb.clone())));
    let outcome = session.probe();
    pb.finish_and_clear();

    ReportDispatcher::new(settings).dispatch(&outcome);
    Ok(outcome)
}
