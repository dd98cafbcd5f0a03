//! Disc identification: drive discovery, title lookup, and the probe cycle
//! that ties the per-system serial readers together.

pub mod drive;
pub mod error;
pub mod index;
pub mod library;
pub mod resolver;
pub mod session;
pub mod settings;
pub mod watch;

pub use drive::{DriveProbe, FixedDrive, SystemDrives};
pub use error::SettingsError;
pub use index::{TitleEntry, TitleIndex};
pub use library::find_game_image;
pub use resolver::{
    Disambiguator, FirstCandidate, NO_TITLE, ResolveResult, TitleResolver, Unresolved,
};
pub use session::{DiscSession, ProbeState};
pub use settings::Settings;
pub use watch::{DiscWatcher, Dispatcher};

pub use retrospin_core::{
    DiscOutcome, ProbeError, ResolvedDisc, System, UnmatchedDisc, UnmatchedReason,
};

#[cfg(test)]
#[path = "tests/fakes.rs"]
mod fakes;
