//! Probe-cycle state machine.
//!
//! One call to [`DiscSession::probe`] runs a full cycle:
//!
//! ```text
//! Idle ─► DriveAbsent ─────────────────────────────────► Unmatched
//!   └───► DriveNoDisc ─────────────────────────────────► Unmatched
//!              └──► Probing(Saturn) ─► Probing(MegaCd) ─► Probing(Psx) ─► Unmatched
//!                         └──────────────┴───────────────────┴──► Resolved | Unmatched
//! ```
//!
//! Readers run in [`System::probe_order`]: the two raw-sector reads first,
//! the mounting PSX reader last. A reader error only means "not this
//! system"; it is logged and the next reader runs.

use std::path::{Path, PathBuf};

use retrospin_core::{
    DiscOutcome, ProbeError, ResolvedDisc, SerialReader, System, UnmatchedDisc, UnmatchedReason,
    normalize_serial,
};
use retrospin_sega::{MegaCdReader, SaturnReader};
use retrospin_sony::PsxReader;

use crate::drive::DriveProbe;
use crate::index::TitleIndex;
use crate::resolver::{Disambiguator, FirstCandidate, TitleResolver, Unresolved};
use crate::settings::Settings;

/// Where the last probe cycle got to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeState {
    Idle,
    /// No optical drive found
    DriveAbsent,
    /// Drive found; presence not yet confirmed
    DriveNoDisc { drive: PathBuf },
    Probing { drive: PathBuf, system: System },
    Resolved(ResolvedDisc),
    Unmatched(UnmatchedDisc),
}

impl ProbeState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Resolved(_) | Self::Unmatched(_))
    }
}

pub struct DiscSession {
    drives: Box<dyn DriveProbe>,
    readers: Vec<Box<dyn SerialReader>>,
    index: Option<TitleIndex>,
    disambiguator: Box<dyn Disambiguator>,
    state: ProbeState,
}

impl DiscSession {
    /// Create a session with no readers registered.
    ///
    /// A failed index load is not fatal: the session keeps probing, and
    /// every serial it reads ends `Unmatched(IndexUnavailable)`.
    pub fn new(drives: Box<dyn DriveProbe>, index: Result<TitleIndex, ProbeError>) -> Self {
        let index = match index {
            Ok(index) => Some(index),
            Err(e) => {
                log::error!("{}; titles cannot be resolved this session", e);
                None
            }
        };
        Self {
            drives,
            readers: Vec::new(),
            index,
            disambiguator: Box::new(FirstCandidate),
            state: ProbeState::Idle,
        }
    }

    /// Session with the Saturn, Mega-CD and PSX readers, configured from
    /// `settings`, and the title index loaded from the configured store.
    pub fn from_settings(settings: &Settings, drives: Box<dyn DriveProbe>) -> Self {
        let index = TitleIndex::open(&settings.db_path());
        let psx = PsxReader::new()
            .with_mount_point(&settings.disc.mount_point)
            .with_attempts(settings.disc.psx_attempts)
            .with_retry_delay(settings.psx_retry_delay());

        let mut session = Self::new(drives, index);
        session
            .register(SaturnReader::new())
            .register(MegaCdReader::new())
            .register(psx);
        session
    }

    /// Register a serial reader.
    ///
    /// Readers are kept in [`System::probe_order`] whatever order they are
    /// registered in.
    pub fn register<R: SerialReader + 'static>(&mut self, reader: R) -> &mut Self {
        self.readers.push(Box::new(reader));
        self.readers.sort_by_key(|r| probe_rank(r.system()));
        self
    }

    pub fn with_disambiguator(mut self, disambiguator: Box<dyn Disambiguator>) -> Self {
        self.disambiguator = disambiguator;
        self
    }

    pub fn state(&self) -> &ProbeState {
        &self.state
    }

    pub fn index(&self) -> Option<&TitleIndex> {
        self.index.as_ref()
    }

    pub fn drives(&self) -> &dyn DriveProbe {
        self.drives.as_ref()
    }

    /// Systems in the order they will be probed.
    pub fn systems(&self) -> Vec<System> {
        self.readers.iter().map(|r| r.system()).collect()
    }

    /// Run one full probe cycle against the located drive.
    pub fn probe(&mut self) -> DiscOutcome {
        self.enter(ProbeState::Idle);
        match self.drives.locate() {
            Some(drive) => self.probe_located(drive),
            None => {
                self.enter(ProbeState::DriveAbsent);
                self.finish(DiscOutcome::Unmatched(UnmatchedDisc::new(
                    UnmatchedReason::DriveNotFound,
                )))
            }
        }
    }

    /// Run a probe cycle against `drive`, skipping discovery.
    pub fn probe_drive(&mut self, drive: &Path) -> DiscOutcome {
        self.enter(ProbeState::Idle);
        self.probe_located(drive.to_path_buf())
    }

    fn probe_located(&mut self, drive: PathBuf) -> DiscOutcome {
        self.enter(ProbeState::DriveNoDisc {
            drive: drive.clone(),
        });
        if !self.drives.disc_present(&drive) {
            log::debug!("{}", ProbeError::no_disc(drive.display().to_string()));
            return self.finish(DiscOutcome::Unmatched(
                UnmatchedDisc::new(UnmatchedReason::NoDiscPresent).with_drive(drive),
            ));
        }

        for i in 0..self.readers.len() {
            let system = self.readers[i].system();
            self.enter(ProbeState::Probing {
                drive: drive.clone(),
                system,
            });
            if let Some(serial) = read_with_retry(self.readers[i].as_ref(), &drive) {
                let outcome = self.resolve(drive, system, serial);
                return self.finish(outcome);
            }
        }

        log::info!("No serial found on disc in {}", drive.display());
        self.finish(DiscOutcome::Unmatched(
            UnmatchedDisc::new(UnmatchedReason::NoSerial).with_drive(drive),
        ))
    }

    fn resolve(&mut self, drive: PathBuf, system: System, serial: String) -> DiscOutcome {
        let unmatched = |reason| {
            DiscOutcome::Unmatched(
                UnmatchedDisc::new(reason)
                    .with_drive(drive.clone())
                    .with_serial(system, serial.clone()),
            )
        };

        let Some(index) = self.index.as_ref() else {
            return unmatched(UnmatchedReason::IndexUnavailable);
        };
        match TitleResolver::new(index).select(&serial, system, self.disambiguator.as_mut()) {
            Ok(title) => DiscOutcome::Resolved(ResolvedDisc {
                drive: drive.clone(),
                title,
                system,
                serial: serial.clone(),
            }),
            Err(Unresolved::NoTitle) => unmatched(UnmatchedReason::NoTitle),
            Err(Unresolved::NoSelection) => unmatched(UnmatchedReason::NoSelection),
        }
    }

    fn enter(&mut self, state: ProbeState) {
        log::debug!("Probe state: {:?}", state);
        self.state = state;
    }

    fn finish(&mut self, outcome: DiscOutcome) -> DiscOutcome {
        log::info!("Probe finished: {}", outcome);
        self.enter(match &outcome {
            DiscOutcome::Resolved(disc) => ProbeState::Resolved(disc.clone()),
            DiscOutcome::Unmatched(disc) => ProbeState::Unmatched(disc.clone()),
        });
        outcome
    }
}

fn probe_rank(system: System) -> usize {
    System::probe_order()
        .iter()
        .position(|&s| s == system)
        .unwrap_or(usize::MAX)
}

/// Run `reader` up to its attempt budget and return the normalized serial.
///
/// Between attempts the reader gets a chance to clean up (the PSX reader
/// force-unmounts) and the session waits out the retry delay.
fn read_with_retry(reader: &dyn SerialReader, drive: &Path) -> Option<String> {
    let attempts = reader.attempts().max(1);
    for attempt in 1..=attempts {
        match reader.read_serial(drive) {
            Ok(raw) => {
                let serial = normalize_serial(&raw);
                if !serial.is_empty() {
                    return Some(serial);
                }
                log::debug!("{} reader returned an empty serial", reader.system_name());
            }
            Err(e @ (ProbeError::DecodeFailed(_) | ProbeError::MetadataNotFound(_))) => {
                log::debug!("Not a {} disc: {}", reader.system_name(), e);
            }
            Err(e) => {
                log::warn!(
                    "{} read failed (attempt {}/{}): {}",
                    reader.system_name(),
                    attempt,
                    attempts,
                    e
                );
            }
        }
        if attempt < attempts {
            reader.recover(drive);
            std::thread::sleep(reader.retry_delay());
        }
    }
    None
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
