//! CLI argument definitions using clap
//!
//! Commands:
//! - sturgeon-check model <archive>
//! - sturgeon-check bed <bed> [--model <archive>]

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Check classifier model archives and methylation bed files
#[derive(Parser, Debug)]
#[command(name = "sturgeon-check")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// JSON file overriding the member and column contracts
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Print the report as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Verify that a model archive has every required member
    Model {
        /// Path to the model zip archive
        archive: PathBuf,
    },

    /// Load and validate a methylation bed file
    Bed {
        /// Path to the bed file
        bed: PathBuf,

        /// Model archive whose probes.csv is the probe reference
        #[arg(long)]
        model: Option<PathBuf>,
    },
}
