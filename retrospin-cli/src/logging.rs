//! Logger setup.
//!
//! Command output goes through the `log` macros so `--quiet` and
//! `--logfile` apply uniformly. Messages are written bare; `--verbose`
//! adds a timestamp and level.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use env_logger::{Builder, Target};
use log::LevelFilter;

/// Writes to stdout and, when a log file is open, to the file with ANSI
/// escapes removed.
struct Tee {
    file: Option<File>,
}

impl Write for Tee {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        io::stdout().write_all(buf)?;
        if let Some(file) = self.file.as_mut() {
            file.write_all(&strip_ansi_escapes::strip(buf))?;
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stdout().flush()?;
        if let Some(file) = self.file.as_mut() {
            file.flush()?;
        }
        Ok(())
    }
}

pub(crate) fn level_for(quiet: bool, verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::Debug
    } else if quiet {
        LevelFilter::Warn
    } else {
        LevelFilter::Info
    }
}

/// Install the global logger. `RUST_LOG` overrides the flag-derived level.
pub(crate) fn init(quiet: bool, verbose: bool, logfile: Option<&Path>) -> io::Result<()> {
    let file = logfile.map(File::create).transpose()?;

    let mut builder = Builder::new();
    builder
        .filter_level(level_for(quiet, verbose))
        .parse_default_env()
        .target(Target::Pipe(Box::new(Tee { file })));

    if verbose {
        builder.format(|buf, record| {
            writeln!(
                buf,
                "{} {:<5} {}",
                chrono::Local::now().format("%H:%M:%S%.3f"),
                record.level(),
                record.args()
            )
        });
    } else {
        builder.format(|buf, record| writeln!(buf, "{}", record.args()));
    }

    builder.try_init().map_err(io::Error::other)
}

#[cfg(test)]
#[path = "tests/logging_tests.rs"]
mod tests;
