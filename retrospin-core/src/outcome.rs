use std::path::{Path, PathBuf};

use crate::System;

/// A disc that was read and matched to a title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedDisc {
    /// Device path the disc was read from (e.g. `/dev/sr0`)
    pub drive: PathBuf,
    /// Title as stored in the index
    pub title: String,
    /// System whose strategy produced the serial
    pub system: System,
    /// Normalized serial used for the lookup
    pub serial: String,
}

/// Why a probe cycle ended without a title.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnmatchedReason {
    /// No optical drive is attached.
    DriveNotFound,
    /// The drive is present but empty or not ready.
    NoDiscPresent,
    /// Every strategy ran and none produced a serial.
    NoSerial,
    /// A serial was read but the index has no usable title for it.
    NoTitle,
    /// Several titles matched and the prompt returned no selection.
    NoSelection,
    /// The title index failed to load, so nothing can match this session.
    IndexUnavailable,
}

impl UnmatchedReason {
    pub fn describe(&self) -> &'static str {
        match self {
            Self::DriveNotFound => "no optical drive",
            Self::NoDiscPresent => "no disc in drive",
            Self::NoSerial => "no serial found",
            Self::NoTitle => "no matching title",
            Self::NoSelection => "no title selected",
            Self::IndexUnavailable => "title index unavailable",
        }
    }
}

/// A probe cycle that ended without a title.
///
/// Carries whatever was learned along the way; a raw serial that was read
/// but not matched is what the unknown-title log needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnmatchedDisc {
    pub drive: Option<PathBuf>,
    pub system: Option<System>,
    pub serial: Option<String>,
    pub reason: UnmatchedReason,
}

impl UnmatchedDisc {
    pub fn new(reason: UnmatchedReason) -> Self {
        Self {
            drive: None,
            system: None,
            serial: None,
            reason,
        }
    }

    pub fn with_drive(mut self, drive: impl Into<PathBuf>) -> Self {
        self.drive = Some(drive.into());
        self
    }

    pub fn with_serial(mut self, system: System, serial: impl Into<String>) -> Self {
        self.system = Some(system);
        self.serial = Some(serial.into());
        self
    }
}

/// Terminal result of one probe cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiscOutcome {
    Resolved(ResolvedDisc),
    Unmatched(UnmatchedDisc),
}

impl DiscOutcome {
    pub fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved(_))
    }

    pub fn drive(&self) -> Option<&Path> {
        match self {
            Self::Resolved(disc) => Some(disc.drive.as_path()),
            Self::Unmatched(disc) => disc.drive.as_deref(),
        }
    }

    pub fn system(&self) -> Option<System> {
        match self {
            Self::Resolved(disc) => Some(disc.system),
            Self::Unmatched(disc) => disc.system,
        }
    }

    pub fn serial(&self) -> Option<&str> {
        match self {
            Self::Resolved(disc) => Some(disc.serial.as_str()),
            Self::Unmatched(disc) => disc.serial.as_deref(),
        }
    }

    pub fn title(&self) -> Option<&str> {
        match self {
            Self::Resolved(disc) => Some(disc.title.as_str()),
            Self::Unmatched(_) => None,
        }
    }
}

impl std::fmt::Display for DiscOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Resolved(disc) => write!(
                f,
                "{} [{}] {} ({})",
                disc.title,
                disc.serial,
                disc.system.short_label(),
                disc.drive.display()
            ),
            Self::Unmatched(disc) => {
                write!(f, "unmatched: {}", disc.reason.describe())?;
                if let (Some(system), Some(serial)) = (disc.system, disc.serial.as_deref()) {
                    write!(f, " ({} serial {})", system.short_label(), serial)?;
                }
                Ok(())
            }
        }
    }
}
