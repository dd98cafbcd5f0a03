//! What happens to a probe outcome once the session is done with it.

use std::path::PathBuf;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use retrospin_lib::{DiscOutcome, Dispatcher, Settings, UnmatchedReason, find_game_image};

use crate::CliError;

/// Follow-up decided for one outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Handoff {
    /// A local image exists for the resolved title
    Image(PathBuf),
    /// Resolved, but the disc has not been captured yet
    CaptureRequired,
    /// Serial written to the unknown-title log
    RecordedUnknown,
    /// Nothing to do
    Nothing,
}

/// Reports outcomes and records unknown serials in the title store.
pub(crate) struct ReportDispatcher {
    settings: Settings,
    db_path: PathBuf,
}

impl ReportDispatcher {
    pub(crate) fn new(settings: Settings) -> Self {
        let db_path = settings.db_path();
        Self { settings, db_path }
    }

    pub(crate) fn handle(&self, outcome: &DiscOutcome) -> Handoff {
        match outcome {
            DiscOutcome::Resolved(disc) => {
                log::info!(
                    "{} {} [{}] {}",
                    "\u{2714}".if_supports_color(Stdout, |t| t.green()),
                    disc.title.if_supports_color(Stdout, |t| t.bold()),
                    disc.system.short_label(),
                    disc.serial.if_supports_color(Stdout, |t| t.dimmed()),
                );
                let dirs = self.settings.game_dirs(disc.system);
                match find_game_image(&disc.title, disc.system, &dirs) {
                    Some(image) => {
                        log::info!(
                            "  Image: {}",
                            image.display().if_supports_color(Stdout, |t| t.cyan())
                        );
                        Handoff::Image(image)
                    }
                    None => {
                        log::info!(
                            "  {}",
                            "No local image; capture required"
                                .if_supports_color(Stdout, |t| t.yellow())
                        );
                        Handoff::CaptureRequired
                    }
                }
            }
            DiscOutcome::Unmatched(disc) => {
                log::warn!(
                    "{} {}",
                    "\u{2718}".if_supports_color(Stdout, |t| t.red()),
                    outcome,
                );
                // Only a readable serial with no title is worth logging
                if disc.reason != UnmatchedReason::NoTitle {
                    return Handoff::Nothing;
                }
                let (Some(system), Some(serial)) = (disc.system, disc.serial.as_deref()) else {
                    return Handoff::Nothing;
                };
                match self.record_unknown(system.code(), serial) {
                    Ok(()) => Handoff::RecordedUnknown,
                    Err(e) => {
                        log::warn!("Could not record unknown serial {}: {}", serial, e);
                        Handoff::Nothing
                    }
                }
            }
        }
    }

    fn record_unknown(&self, system: &str, serial: &str) -> Result<(), CliError> {
        if let Some(parent) = self.db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let conn = retrospin_db::open_database(&self.db_path)
            .map_err(|e| CliError::database(format!("Failed to open title database: {}", e)))?;
        let entry = retrospin_db::record_unknown(&conn, serial, system)
            .map_err(|e| CliError::database(format!("Failed to record unknown title: {}", e)))?;
        log::info!(
            "  Logged {} as '{}' for later identification",
            entry.serial,
            entry.title
        );
        Ok(())
    }
}

impl Dispatcher for ReportDispatcher {
    fn dispatch(&mut self, outcome: &DiscOutcome) {
        self.handle(outcome);
    }
}

#[cfg(test)]
#[path = "tests/dispatch_tests.rs"]
mod tests;
