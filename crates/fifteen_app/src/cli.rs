//! Command-line interface for the terminal 15-puzzle.

use clap::Parser;
use std::path::PathBuf;

/// Fifteen - sliding tile puzzle for the terminal
#[derive(Parser, Debug)]
#[command(name = "fifteen")]
#[command(about = "Sliding 15-puzzle with picture tiles", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to a TOML config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Seed for reproducible shuffles and mode selection
    #[arg(long)]
    pub seed: Option<u64>,

    /// Probability in [0, 1] of starting a numbered game instead of a
    /// picture game
    #[arg(long, allow_hyphen_values = true)]
    pub numbered_probability: Option<f64>,

    /// Always play numbered mode (skips image loading entirely)
    #[arg(long)]
    pub numbered: bool,

    /// Number of random legal moves per shuffle
    #[arg(long)]
    pub shuffle_moves: Option<u32>,

    /// Log file path (logs go to a file so they don't corrupt the TUI)
    #[arg(long, default_value = "fifteen.log")]
    pub log_file: PathBuf,
}
