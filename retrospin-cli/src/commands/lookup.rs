use indicatif::ProgressBar;
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use retrospin_core::normalize_serial;
use retrospin_lib::{Settings, System, TitleIndex, TitleResolver, Unresolved};

use crate::CliError;
use crate::prompt::TerminalPrompt;

/// Resolve `serial` against the title store without reading a disc.
///
/// Returns the selected title, or `None` when nothing usable matched.
pub(crate) fn run_lookup(
    settings: &Settings,
    serial: &str,
    system: System,
) -> Result<Option<String>, CliError> {
    let db_path = settings.db_path();
    let index = TitleIndex::open(&db_path).map_err(|e| CliError::database(e.to_string()))?;
    let resolver = TitleResolver::new(&index);
    let serial = normalize_serial(serial);

    let mut prompt = TerminalPrompt::new(ProgressBar::hidden());
    match resolver.select(&serial, system, &mut prompt) {
        Ok(title) => {
            log::info!(
                "{} {} {}",
                "\u{2714}".if_supports_color(Stdout, |t| t.green()),
                serial.if_supports_color(Stdout, |t| t.cyan()),
                title.if_supports_color(Stdout, |t| t.bold()),
            );
            Ok(Some(title))
        }
        Err(reason) => {
            let why = match reason {
                Unresolved::NoTitle => "no matching title",
                Unresolved::NoSelection => "no title selected",
            };
            log::warn!(
                "{} {} [{}]: {}",
                "\u{2718}".if_supports_color(Stdout, |t| t.red()),
                serial,
                system.short_label(),
                why,
            );
            Ok(None)
        }
    }
}

#[cfg(test)]
#[path = "tests/lookup_tests.rs"]
mod tests;
