mod cli;

use anyhow::{Context, Result};
use clap::Parser;

use cli::{Cli, Command};
use sturgeon_check::pipeline::{check_model, check_sample, CheckReport};
use sturgeon_check::ValidationConfig;

fn main() -> Result<()> {
    // Advisories are logged at warn level, so show them unless RUST_LOG says otherwise.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => ValidationConfig::from_path(path)?,
        None => ValidationConfig::default(),
    };

    let report = match &cli.command {
        Command::Model { archive } => check_model(archive, &config)?,
        Command::Bed { bed, model } => check_sample(bed, model.as_deref(), &config)?,
    };

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report).context("encoding report")?);
    } else {
        print_summary(&report);
    }
    Ok(())
}

fn print_summary(report: &CheckReport) {
    if let Some(archive) = &report.archive {
        println!(
            "{}: ok ({} members, {} advisories)",
            archive.archive.display(),
            archive.members.len(),
            archive.advisories.len()
        );
    }
    if let Some(table) = &report.table {
        match table.unknown_probes {
            Some(unknown) => println!("bed: ok ({} rows, {unknown} unknown probes)", table.rows),
            None => println!("bed: ok ({} rows)", table.rows),
        }
    }
}
