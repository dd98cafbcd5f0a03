//! Poll loop around [`DiscSession`].
//!
//! The watcher remembers the last outcome so a disc sitting in the tray is
//! probed once, not on every tick. It re-arms when the drive reports the
//! disc gone (or the drive itself disappears). A probe that found no serial
//! does not count as a read: the drive may still be spinning up, so the
//! same disc is probed again on the next tick.

use std::time::Duration;

use retrospin_core::{DiscOutcome, UnmatchedReason};

use crate::session::DiscSession;

/// Receives each terminal outcome, once per disc insertion.
pub trait Dispatcher {
    fn dispatch(&mut self, outcome: &DiscOutcome);
}

pub struct DiscWatcher {
    session: DiscSession,
    last: Option<DiscOutcome>,
    poll_interval: Duration,
}

impl DiscWatcher {
    pub fn new(session: DiscSession, poll_interval: Duration) -> Self {
        Self {
            session,
            last: None,
            poll_interval,
        }
    }

    /// Outcome of the most recent probe, if any.
    pub fn last(&self) -> Option<&DiscOutcome> {
        self.last.as_ref()
    }

    /// Run one poll step.
    ///
    /// Returns the outcome of a newly inserted disc. Returns `None` while
    /// the same disc stays loaded, while there is no drive or no disc, and
    /// while no strategy has read a serial yet.
    pub fn tick(&mut self) -> Option<DiscOutcome> {
        if let Some(drive) = self
            .last
            .as_ref()
            .filter(|o| disc_was_read(o))
            .and_then(DiscOutcome::drive)
        {
            let drives = self.session.drives();
            if drives.locate().as_deref() == Some(drive) && drives.disc_present(drive) {
                return None;
            }
            log::info!("Disc removed from {}", drive.display());
            self.last = None;
        }

        let outcome = self.session.probe();
        let changed = self.last.as_ref() != Some(&outcome);
        self.last = Some(outcome.clone());

        if disc_was_read(&outcome) {
            Some(outcome)
        } else {
            if changed {
                log::info!("Waiting: {}", outcome);
            }
            None
        }
    }

    /// Poll until `should_stop` returns true, dispatching every new outcome.
    pub fn run(&mut self, dispatcher: &mut dyn Dispatcher, should_stop: impl Fn() -> bool) {
        log::info!(
            "Watching for discs every {} ms",
            self.poll_interval.as_millis()
        );
        while !should_stop() {
            if let Some(outcome) = self.tick() {
                dispatcher.dispatch(&outcome);
            }
            std::thread::sleep(self.poll_interval);
        }
    }
}

/// Whether the probe got as far as reading a serial off the disc.
fn disc_was_read(outcome: &DiscOutcome) -> bool {
    match outcome {
        DiscOutcome::Resolved(_) => true,
        DiscOutcome::Unmatched(disc) => !matches!(
            disc.reason,
            UnmatchedReason::DriveNotFound
                | UnmatchedReason::NoDiscPresent
                | UnmatchedReason::NoSerial
        ),
    }
}

#[cfg(test)]
#[path = "tests/watch_tests.rs"]
mod tests;
