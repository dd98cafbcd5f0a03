//! Interactive title selection.

use std::io::{self, BufRead, IsTerminal, Write};

use indicatif::ProgressBar;
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use retrospin_lib::{Disambiguator, System, TitleEntry};

/// Asks on the terminal which of several matching titles is in the drive.
///
/// When stdin is not a terminal nobody can answer, so the first candidate
/// is taken without asking.
pub(crate) struct TerminalPrompt {
    progress: ProgressBar,
}

impl TerminalPrompt {
    /// Prompt that pauses `progress` while the menu is on screen.
    pub(crate) fn new(progress: ProgressBar) -> Self {
        Self { progress }
    }
}

impl Disambiguator for TerminalPrompt {
    fn choose(
        &mut self,
        candidates: &[TitleEntry],
        system: System,
        serial: &str,
    ) -> Option<String> {
        if !io::stdin().is_terminal() {
            log::debug!("stdin is not a terminal; taking the first candidate");
            return candidates.first().map(|c| c.title.clone());
        }
        self.progress.suspend(|| {
            let mut input = io::stdin().lock();
            ask(&mut input, &mut io::stdout(), candidates, system, serial)
        })
    }
}

/// Print the numbered candidate list to `out` and read one answer from
/// `input`.
///
/// A read error counts as no selection.
pub(crate) fn ask(
    input: &mut impl BufRead,
    out: &mut impl Write,
    candidates: &[TitleEntry],
    system: System,
    serial: &str,
) -> Option<String> {
    let shown = write_menu(out, candidates, system, serial);
    if let Err(e) = shown {
        log::warn!("Could not show title menu: {}", e);
        return None;
    }

    let mut line = String::new();
    match input.read_line(&mut line) {
        Ok(_) => parse_choice(&line, candidates.len()).map(|i| candidates[i].title.clone()),
        Err(e) => {
            log::warn!("Could not read selection: {}", e);
            None
        }
    }
}

fn write_menu(
    out: &mut impl Write,
    candidates: &[TitleEntry],
    system: System,
    serial: &str,
) -> io::Result<()> {
    writeln!(
        out,
        "{} titles match {} disc {}:",
        candidates.len(),
        system.display_name(),
        serial.if_supports_color(Stdout, |t| t.cyan()),
    )?;
    for (i, candidate) in candidates.iter().enumerate() {
        writeln!(
            out,
            "  {:>2}) {} - {}",
            i + 1,
            candidate.serial.if_supports_color(Stdout, |t| t.dimmed()),
            candidate.title,
        )?;
    }
    write!(out, "Select [1-{}, Enter = 1, 0 = none]: ", candidates.len())?;
    out.flush()
}

/// Map an answer to a candidate index.
///
/// Blank input picks the first candidate. `0`, anything non-numeric and
/// numbers past the end pick nothing.
pub(crate) fn parse_choice(answer: &str, count: usize) -> Option<usize> {
    let answer = answer.trim();
    if answer.is_empty() {
        return (count > 0).then_some(0);
    }
    match answer.parse::<usize>() {
        Ok(n) if (1..=count).contains(&n) => Some(n - 1),
        _ => None,
    }
}

#[cfg(test)]
#[path = "tests/prompt_tests.rs"]
mod tests;
