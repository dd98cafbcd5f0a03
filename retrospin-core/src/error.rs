use thiserror::Error;

/// Errors that can occur while identifying a disc.
///
/// Strategy-level kinds are recovered by the probe session and folded into
/// a "no serial" result for that system. Only `IndexUnavailable` outlives a
/// single probe, and even that never stops the host process.
#[derive(Debug, Error)]
pub enum ProbeError {
    /// I/O error while talking to the drive
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// No optical drive is attached
    #[error("No optical drive found")]
    DriveNotFound,

    /// The drive is present but no readable disc is loaded
    #[error("No disc present in {0}")]
    NoDiscPresent(String),

    /// Every candidate filesystem type failed to mount
    #[error("Mount failed (tried {})", tried.join(", "))]
    MountFailed { tried: Vec<String> },

    /// The disc mounted but the expected metadata file or entry is absent
    #[error("Metadata not found: {0}")]
    MetadataNotFound(String),

    /// Raw sector bytes were read but failed shape validation
    #[error("Decode failed: {0}")]
    DecodeFailed(String),

    /// The title index could not be loaded at session start
    #[error("Title index unavailable: {0}")]
    IndexUnavailable(String),
}

impl ProbeError {
    pub fn no_disc(drive: impl Into<String>) -> Self {
        Self::NoDiscPresent(drive.into())
    }

    pub fn mount_failed<S: Into<String>>(tried: impl IntoIterator<Item = S>) -> Self {
        Self::MountFailed {
            tried: tried.into_iter().map(Into::into).collect(),
        }
    }

    pub fn metadata_not_found(msg: impl Into<String>) -> Self {
        Self::MetadataNotFound(msg.into())
    }

    pub fn decode_failed(msg: impl Into<String>) -> Self {
        Self::DecodeFailed(msg.into())
    }

    pub fn index_unavailable(msg: impl Into<String>) -> Self {
        Self::IndexUnavailable(msg.into())
    }
}
