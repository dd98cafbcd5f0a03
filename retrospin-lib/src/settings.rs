//! Application settings.
//!
//! Settings live in `~/.config/retrospin/settings.toml`. Every field has a
//! default, so a missing file, a missing table or a missing key all fall
//! back to the values the appliance ships with.
//!
//! ```toml
//! [disc]
//! mount_point = "/mnt/cdrom"
//! psx_attempts = 2
//! psx_retry_delay_ms = 1000
//! poll_interval_ms = 1000
//!
//! [index]
//! db_path = "/media/fat/retrospin/data/games.db"
//!
//! [library.game_dirs]
//! psx = ["/media/fat/games/PSX", "/media/usb0/games/PSX"]
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use retrospin_core::System;
use serde::{Deserialize, Serialize};

use crate::error::SettingsError;

/// Roots searched for per-system image folders when none are configured.
pub const DEFAULT_LIBRARY_ROOTS: &[&str] = &["/media/fat/games", "/media/usb0/games"];

/// Canonical path to the settings file: `~/.config/retrospin/settings.toml`.
pub fn settings_path() -> PathBuf {
    let config = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    config.join("retrospin").join("settings.toml")
}

/// Default title database location: `<data_dir>/retrospin/games.db`.
pub fn default_db_path() -> PathBuf {
    let data = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
    data.join("retrospin").join("games.db")
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub disc: DiscSettings,
    pub index: IndexSettings,
    pub library: LibrarySettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscSettings {
    /// Private mount point for the PSX reader.
    pub mount_point: PathBuf,
    /// PSX read attempts per probe.
    pub psx_attempts: u32,
    pub psx_retry_delay_ms: u64,
    /// Delay between watch-loop ticks.
    pub poll_interval_ms: u64,
}

impl Default for DiscSettings {
    fn default() -> Self {
        Self {
            mount_point: PathBuf::from(retrospin_sony::psx::DEFAULT_MOUNT_POINT),
            psx_attempts: retrospin_sony::psx::DEFAULT_ATTEMPTS,
            psx_retry_delay_ms: retrospin_sony::psx::DEFAULT_RETRY_DELAY.as_millis() as u64,
            poll_interval_ms: 1000,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexSettings {
    /// Title database; `None` means [`default_db_path`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub db_path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LibrarySettings {
    /// Image directories per system code, searched in order.
    pub game_dirs: BTreeMap<String, Vec<PathBuf>>,
}

impl Default for LibrarySettings {
    fn default() -> Self {
        let game_dirs = System::probe_order()
            .iter()
            .map(|&system| (system.code().to_string(), default_game_dirs(system)))
            .collect();
        Self { game_dirs }
    }
}

fn default_game_dirs(system: System) -> Vec<PathBuf> {
    DEFAULT_LIBRARY_ROOTS
        .iter()
        .map(|root| Path::new(root).join(system.games_folder()))
        .collect()
}

impl Settings {
    /// Load from [`settings_path`], falling back to defaults on any error.
    pub fn load() -> Self {
        let path = settings_path();
        match Self::load_from(&path) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("{}; using default settings", e);
                Self::default()
            }
        }
    }

    /// Load from `path`. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("No settings at {}, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(e) => return Err(SettingsError::io(path, e)),
        };
        toml::from_str(&contents).map_err(|e| SettingsError::parse(path, e))
    }

    /// Write settings to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<(), SettingsError> {
        let serialized = self.to_toml_string()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| SettingsError::io(parent, e))?;
        }
        // Write atomically
        let tmp = path.with_extension("toml.tmp");
        std::fs::write(&tmp, &serialized).map_err(|e| SettingsError::io(&tmp, e))?;
        std::fs::rename(&tmp, path).map_err(|e| SettingsError::io(path, e))?;
        Ok(())
    }

    pub fn to_toml_string(&self) -> Result<String, SettingsError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Effective title database path.
    pub fn db_path(&self) -> PathBuf {
        self.index.db_path.clone().unwrap_or_else(default_db_path)
    }

    pub fn psx_retry_delay(&self) -> Duration {
        Duration::from_millis(self.disc.psx_retry_delay_ms)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.disc.poll_interval_ms)
    }

    /// Image directories for `system`, in search order.
    ///
    /// A system with no entry in `library.game_dirs` uses the default roots.
    pub fn game_dirs(&self, system: System) -> Vec<PathBuf> {
        self.library
            .game_dirs
            .get(system.code())
            .cloned()
            .unwrap_or_else(|| default_game_dirs(system))
    }
}

#[cfg(test)]
#[path = "tests/settings_tests.rs"]
mod tests;
