//! CLI argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "espmerge")]
#[command(author, version, about = "Merge built ESP32 binaries into one flashable image", long_about = None)]
pub struct Cli {
    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Options shared by the merge-producing commands
#[derive(clap::Args, Debug, Clone)]
pub struct MergeArgs {
    /// MCU identifier (e.g. esp32, esp32s3, esp32p4); unknown values fall
    /// back to a default layout
    #[arg(long, default_value = "")]
    pub mcu: String,

    /// Build output directory containing bootloader.bin, partitions.bin and
    /// firmware.bin
    #[arg(long)]
    pub build_dir: PathBuf,

    /// Project root directory
    #[arg(long, default_value = ".")]
    pub project_dir: PathBuf,

    /// Build environment name, used in the default output file name
    #[arg(long, default_value = "default")]
    pub env: String,

    /// Partition description CSV [default: <project-dir>/partitions.csv]
    #[arg(long)]
    pub partitions: Option<PathBuf>,

    /// Merged image path [default: <project-dir>/merged-<env>.bin]
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Merge tool to invoke
    #[arg(long, default_value = "esptool")]
    pub esptool: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Merge the built binaries into one image on demand
    Merge {
        #[command(flatten)]
        args: MergeArgs,
    },

    /// Build-hook entry point, run automatically after the application
    /// image is produced
    PostBuild {
        #[command(flatten)]
        args: MergeArgs,
    },

    /// Partition table operations
    #[command(subcommand)]
    Partitions(PartitionCommands),
}

/// Partition-table-related subcommands
#[derive(Subcommand)]
pub enum PartitionCommands {
    /// Parse a partition CSV and show its records and derived facts
    Show {
        /// Partition description CSV
        #[arg(short, long)]
        file: PathBuf,
    },
}
