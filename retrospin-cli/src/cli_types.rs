//! CLI type definitions: command enums and argument structs.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use retrospin_lib::System;

#[derive(Parser)]
#[command(name = "retrospin")]
#[command(about = "Identify CD-based console discs and resolve their titles", long_about = None)]
pub(crate) struct Cli {
    /// Title store to read (overrides index.db_path in settings)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Only show warnings and errors (suppress normal output)
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Enable verbose/debug logging (timestamps + debug-level messages)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Write log output to a file (ANSI codes stripped)
    #[arg(long, global = true)]
    pub logfile: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Run one probe cycle and print what is in the drive
    Probe {
        /// Optical drive device (skips drive discovery)
        #[arg(short, long)]
        drive: Option<PathBuf>,

        /// Where the PSX filesystem is mounted while probing
        #[arg(long)]
        mount_point: Option<PathBuf>,
    },

    /// Poll the drive and report each inserted disc
    Watch {
        /// Optical drive device (skips drive discovery)
        #[arg(short, long)]
        drive: Option<PathBuf>,

        /// Where the PSX filesystem is mounted while probing
        #[arg(long)]
        mount_point: Option<PathBuf>,
    },

    /// Resolve a serial against the title store without a disc
    Lookup {
        /// Disc serial (e.g., SLUS-00515, MK-81051)
        serial: String,

        /// System the serial belongs to (e.g., psx, saturn, segacd)
        #[arg(short, long)]
        system: System,
    },

    /// Show title store statistics
    Stats,

    /// Show the optical drive and whether a disc is loaded
    Drive,

    /// Show, locate or write the settings file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Print the effective settings
    Show,

    /// Print the settings file path
    Path,

    /// Write the effective settings to the settings file
    Init {
        /// Overwrite an existing settings file
        #[arg(long)]
        force: bool,
    },
}

#[cfg(test)]
#[path = "tests/cli_types_tests.rs"]
mod tests;
