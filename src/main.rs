//! espmerge - assemble a flashable image from built ESP32 binaries
//!
//! Merges the binaries a build produces (bootloader, partition table,
//! application) plus an optional pre-built NVS blob into a single image at
//! MCU-specific flash offsets, delegating the byte-level merge to the
//! external `esptool merge-bin` tool and validating the layout against the
//! project's partition CSV before and after.
//!
//! Exit status encodes the host-build contract: only the two size checks
//! (application vs. test partition, merged image vs. ota_0 offset) exit
//! non-zero. Missing inputs and merge-tool failures are reported and the
//! host build continues.

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands, PartitionCommands};
use espmerge_core::hooks::BuildStage;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.verbose {
        0 => {} // default (info)
        1 => log::set_max_level(log::LevelFilter::Debug),
        _ => log::set_max_level(log::LevelFilter::Trace),
    }

    match cli.command {
        Commands::Merge { args } => commands::merge::run(BuildStage::Manual, &args),
        Commands::PostBuild { args } => commands::merge::run(BuildStage::PostBuild, &args),
        Commands::Partitions(PartitionCommands::Show { file }) => {
            commands::partitions::cmd_show(&file)
        }
    }
}
