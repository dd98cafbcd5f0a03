use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use std::path::Path;

use retrospin_lib::Settings;
use retrospin_lib::settings::settings_path;

use crate::CliError;

/// Print the effective settings as TOML.
pub(crate) fn run_config_show(settings: &Settings) -> Result<(), CliError> {
    let path = settings_path();
    let status = if path.exists() { "(exists)" } else { "(not found, using defaults)" };
    log::info!(
        "{}",
        "Retrospin Configuration".if_supports_color(Stdout, |t| t.bold()),
    );
    log::info!(
        "  Settings file: {} {}",
        path.display().if_supports_color(Stdout, |t| t.cyan()),
        status.if_supports_color(Stdout, |t| t.dimmed()),
    );
    log::info!(
        "  Title database: {}",
        settings.db_path().display().if_supports_color(Stdout, |t| t.cyan()),
    );
    crate::log_blank();

    let text = settings
        .to_toml_string()
        .map_err(|e| CliError::config(e.to_string()))?;
    for line in text.lines() {
        log::info!("{}", line);
    }
    Ok(())
}

/// Print the settings file path.
pub(crate) fn run_config_path() {
    log::info!("{}", settings_path().display());
}

/// Write the effective settings to the settings file.
///
/// An existing file is left alone unless `force` is set.
pub(crate) fn run_config_init(settings: &Settings, force: bool) -> Result<(), CliError> {
    write_settings(settings, &settings_path(), force).map(|_| ())
}

/// Returns whether the file was written.
fn write_settings(settings: &Settings, path: &Path, force: bool) -> Result<bool, CliError> {
    if path.exists() && !force {
        log::warn!(
            "{} already exists; pass --force to overwrite it",
            path.display()
        );
        return Ok(false);
    }
    settings
        .save_to(path)
        .map_err(|e| CliError::config(e.to_string()))?;
    log::info!(
        "Wrote settings to {}",
        path.display().if_supports_color(Stdout, |t| t.cyan()),
    );
    Ok(true)
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
