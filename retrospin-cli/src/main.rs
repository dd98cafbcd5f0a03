//! retrospin CLI
//!
//! Command-line interface for identifying CD-based console discs and
//! resolving their titles.

mod cli_types;
mod commands;
mod dispatch;
mod error;
mod logging;
mod prompt;
mod spinner;

use clap::Parser;

use retrospin_lib::Settings;

use cli_types::{Cli, Commands, ConfigAction};
pub(crate) use error::CliError;

/// Log an empty line at info level (section separator in command output).
pub(crate) fn log_blank() {
    log::info!("");
}

/// Exit status for a command that ran but found no title.
const EXIT_UNRESOLVED: i32 = 2;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.quiet, cli.verbose, cli.logfile.as_deref()) {
        eprintln!("Failed to set up logging: {}", e);
        std::process::exit(1);
    }

    let mut settings = Settings::load();
    if let Some(db) = cli.db {
        settings.index.db_path = Some(db);
    }

    let result = match cli.command {
        Commands::Probe { drive, mount_point } => {
            commands::probe::run_probe(&settings, drive, mount_point, cli.quiet)
                .map(|outcome| outcome.is_resolved())
        }
        Commands::Watch { drive, mount_point } => {
            commands::watch::run_watch(&settings, drive, mount_point).map(|()| true)
        }
        Commands::Lookup { serial, system } => {
            commands::lookup::run_lookup(&settings, &serial, system).map(|title| title.is_some())
        }
        Commands::Stats => commands::stats::run_stats(&settings).map(|()| true),
        Commands::Drive => commands::drive::run_drive().map(|()| true),
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config::run_config_show(&settings).map(|()| true),
            ConfigAction::Path => {
                commands::config::run_config_path();
                Ok(true)
            }
            ConfigAction::Init { force } => {
                commands::config::run_config_init(&settings, force).map(|()| true)
            }
        },
    };

    match result {
        Ok(true) => {}
        Ok(false) => std::process::exit(EXIT_UNRESOLVED),
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(1);
        }
    }
}
