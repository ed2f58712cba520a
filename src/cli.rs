use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Ombros precipitation gap filler.
#[derive(Parser)]
#[command(
    name = "ombros",
    version,
    about = "Gap filling for daily precipitation records"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Fill missing days in a precipitation CSV.
    Fill(FillArgs),
}

/// Arguments for the `fill` subcommand.
#[derive(clap::Args)]
pub struct FillArgs {
    /// Path to TOML configuration file. Built-in defaults apply without one.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override input CSV path from config.
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Override output CSV path from config.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Override maximum gap length, in days, that will be filled.
    #[arg(long)]
    pub max_gap: Option<usize>,
}
