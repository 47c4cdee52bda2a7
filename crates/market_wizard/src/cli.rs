// src/cli.rs
use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "market-wizard", version, about = "Market creation wizard driver")]
pub struct Cli {
    /// Directory holding config.toml / config.json5 (overrides MARKET_WIZARD_CONFIG)
    #[arg(long, global = true)]
    pub config_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub cmd: Cmd,
}

#[derive(Subcommand)]
pub enum Cmd {
    /// Replay a JSON script of actions through a freshly mounted wizard
    Run {
        /// JSON file with an array of actions
        #[arg(long)]
        script: PathBuf,
        /// Create a group together with the market
        #[arg(long)]
        with_group: bool,
        /// Use the stricter standalone "Basic Info" rules
        #[arg(long)]
        strict: bool,
        /// Answer every confirmation prompt with yes
        #[arg(short, long)]
        yes: bool,
        /// Override the simulated submission delay
        #[arg(long)]
        delay_ms: Option<u64>,
        /// Give up waiting for the submission after this many seconds
        #[arg(long, default_value_t = 30)]
        timeout_secs: u64,
    },
    /// Print the visible step list
    Steps {
        #[arg(long)]
        with_group: bool,
    },
    /// List fixture groups and their markets
    Fixtures,
}
