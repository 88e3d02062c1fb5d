//! Command-line argument definitions.

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "holdem",
    version,
    about = "No-limit Texas Hold'em engine: deal, evaluate and simulate hands"
)]
pub struct HoldemCli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Deal one hand and show every seat's cards and the board
    Deal {
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long, default_value_t = 2)]
        players: usize,
    },
    /// Rank a hand, optionally with board cards
    Eval {
        /// Hole cards, e.g. "As Kd"
        #[arg(long)]
        hand: String,
        /// Zero or three to five board cards
        #[arg(long)]
        board: Option<String>,
    },
    /// Play hands between the configured agents
    Sim {
        #[arg(long, default_value_t = 100)]
        hands: usize,
        #[arg(long)]
        seed: Option<u64>,
        /// Print one JSON line per hand instead of a summary
        #[arg(long)]
        json: bool,
    },
    /// Show the resolved configuration and where each value came from
    Cfg,
}

/// Subcommand names, in the order `--help` lists them.
pub const COMMANDS: &[&str] = &["deal", "eval", "sim", "cfg"];
