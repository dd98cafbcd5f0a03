/// Disc-based systems the probe engine knows how to identify.
///
/// This enum centralizes system identity: the code stored in the title
/// index, display names and aliases. The title store itself may contain
/// rows for other systems; those are kept under their raw code and never
/// probed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum System {
    Saturn,
    MegaCd,
    Psx,
}

/// All system variants in probe priority order.
///
/// The two raw-sector systems come first: each is a single fast read with no
/// side effects, while PSX has to mount the disc.
const PROBE_ORDER: &[System] = &[System::Saturn, System::MegaCd, System::Psx];

impl System {
    /// Code used for this system in the title store (`games.system`).
    pub fn code(&self) -> &'static str {
        match self {
            Self::Saturn => "ss",
            Self::MegaCd => "mcd",
            Self::Psx => "psx",
        }
    }

    /// Full display name for the system.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Saturn => "Sega Saturn",
            Self::MegaCd => "Sega CD / Mega CD",
            Self::Psx => "Sony PlayStation",
        }
    }

    /// Short label used in prompts and log lines.
    pub fn short_label(&self) -> &'static str {
        match self {
            Self::Saturn => "Saturn",
            Self::MegaCd => "Mega CD",
            Self::Psx => "PSX",
        }
    }

    /// Directory name used for this system's images under a games root.
    pub fn games_folder(&self) -> &'static str {
        match self {
            Self::Saturn => "Saturn",
            Self::MegaCd => "MegaCD",
            Self::Psx => "PSX",
        }
    }

    /// All accepted names for this system (case-insensitive matching).
    ///
    /// The store code comes first.
    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            Self::Saturn => &["ss", "saturn", "sega saturn"],
            Self::MegaCd => &["mcd", "megacd", "mega cd", "segacd", "sega cd"],
            Self::Psx => &["psx", "ps1", "playstation", "playstation1"],
        }
    }

    /// Systems in the order a probe cycle tries them.
    pub fn probe_order() -> &'static [System] {
        PROBE_ORDER
    }
}

impl std::fmt::Display for System {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Error returned when a string cannot be parsed into a `System`.
#[derive(Debug, Clone)]
pub struct SystemParseError(pub String);

impl std::fmt::Display for SystemParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown system: '{}'", self.0)
    }
}

impl std::error::Error for SystemParseError {}

impl std::str::FromStr for System {
    type Err = SystemParseError;

    /// Parse a system from its store code or any alias (case-insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        PROBE_ORDER
            .iter()
            .copied()
            .find(|system| system.aliases().contains(&lower.as_str()))
            .ok_or_else(|| SystemParseError(s.to_string()))
    }
}

#[cfg(test)]
#[path = "tests/system_tests.rs"]
mod tests;
