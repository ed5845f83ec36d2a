//! Command-line configuration.

use clap::Parser;

use crate::game::GameOptions;

/// Klondike solitaire in the terminal.
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "klondike", version)]
pub struct Config {
    /// Deal a specific game. Without it the deal is seeded from the clock.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Turn up a tableau's newly exposed card automatically after each move.
    #[arg(long)]
    pub auto_flip: bool,

    /// Skip the command summary at start.
    #[arg(long)]
    pub no_banner: bool,

    /// Log more (-v info, -vv debug). RUST_LOG overrides this.
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Config {
    pub fn game_options(&self) -> GameOptions {
        GameOptions {
            auto_flip: self.auto_flip,
        }
    }

    /// Default log filter for the chosen verbosity.
    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    }
}
